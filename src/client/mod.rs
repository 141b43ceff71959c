//! Incremental browsing client for the listing service.
//!
//! Parameter changes go through the [`reconcile::Reconciler`], which decides
//! between a hard reset and a view-only update. Hard resets and scroll signals
//! drive the [`pagination::Pagination`], whose fetches the
//! [`session`] executes against a [`remote::ListingService`]. The
//! [`filter`] derives the rendered subset from whatever is loaded.

pub mod browser;
pub mod filter;
pub mod pagination;
pub mod preview;
pub mod reconcile;
pub mod remote;
pub mod scroll;
pub mod session;

pub use browser::{Browser, BrowserCommand, BrowserEvent, BrowserSnapshot, Notice};
pub use remote::{HttpListingClient, ListingService, PageRequest};
pub use session::{spawn, SessionHandle};
