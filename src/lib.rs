//! # Fileglass
//!
//! A listing service for the Desktop, Documents and Downloads folders and an
//! incremental browsing client for it.
//!
//! ## Architecture
//!
//! The service side is built on:
//! - **Axum**: HTTP server and routing
//! - **Tokio**: async runtime, blocking pool for folder walks
//! - **Serde**: JSON wire format
//!
//! ## Core Components
//!
//! - [`catalog`]: folder scanning, categorization, sort and pagination of listings
//! - [`client`]: the browsing client (pagination state machine, parameter
//!   reconciliation, scroll trigger, local filtering, preview dispatch)
//! - [`config`]: layered configuration
//! - [`error`]: service errors with JSON responses, client error taxonomy
//! - [`host`]: opening files and moving them to the trash
//! - [`metrics`]: service counters
//! - [`routes`]: HTTP endpoint handlers
//! - [`state`]: shared service state and path authorization
//! - [`types`]: records and query parameters shared by both sides

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod host;
pub mod metrics;
pub mod routes;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
