use crate::types::{CategoryFilter, Folder, QueryParameters, SortKey, SubCategory};

/// A user-driven change to the listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamChange {
    Folder(Folder),
    SortBy(SortKey),
    Category(CategoryFilter),
    SubCategory(SubCategory),
    Search(String),
}

/// What a parameter change requires of the loaded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Same value as before.
    Unchanged,
    /// Only the local view filter is affected; no network call.
    ViewOnly,
    /// Server parameters changed: clear, rewind, load from offset 0.
    HardReset,
}

/// Client-only filter parameters, applied over already loaded records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewParameters {
    pub sub_category: SubCategory,
    pub search: String,
}

/// Single writer of the active query and view parameters.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    query: QueryParameters,
    view: ViewParameters,
}

impl Reconciler {
    pub fn new(query: QueryParameters) -> Self {
        Self { query, view: ViewParameters::default() }
    }

    pub fn query(&self) -> QueryParameters {
        self.query
    }

    pub fn view(&self) -> &ViewParameters {
        &self.view
    }

    pub fn apply(&mut self, change: ParamChange) -> Reconciliation {
        match change {
            ParamChange::Folder(folder) => {
                if self.query.folder == folder {
                    return Reconciliation::Unchanged;
                }
                self.query.folder = folder;
                Reconciliation::HardReset
            }
            ParamChange::SortBy(sort_by) => {
                if self.query.sort_by == sort_by {
                    return Reconciliation::Unchanged;
                }
                self.query.sort_by = sort_by;
                Reconciliation::HardReset
            }
            ParamChange::Category(category) => {
                if self.query.category == category {
                    return Reconciliation::Unchanged;
                }
                self.query.category = category;
                // Extension options depend on the category
                self.view.sub_category = SubCategory::All;
                Reconciliation::HardReset
            }
            ParamChange::SubCategory(sub_category) => {
                if self.view.sub_category == sub_category {
                    return Reconciliation::Unchanged;
                }
                self.view.sub_category = sub_category;
                Reconciliation::ViewOnly
            }
            ParamChange::Search(search) => {
                if self.view.search == search {
                    return Reconciliation::Unchanged;
                }
                self.view.search = search;
                Reconciliation::ViewOnly
            }
        }
    }
}
