//! View state driving the dashboard table.

use serde::Serialize;

use crate::domain::lead::LeadField;

/// Leads shown per page unless configured otherwise.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Search, filter, sort and page cursor of one dashboard.
///
/// Any change to the search term, stage filter or sort order puts the cursor
/// back on the first page. Page navigation alone does not touch the rest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub search: String,
    pub stage_filter: String,
    pub sort_column: LeadField,
    pub sort_direction: SortDirection,
    pub page: usize,
    pub per_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl ViewState {
    /// Newest leads first, first page.
    pub fn new(per_page: usize) -> Self {
        Self {
            search: String::new(),
            stage_filter: String::new(),
            sort_column: LeadField::DateReceived,
            sort_direction: SortDirection::Desc,
            page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_stage_filter(&mut self, stage: impl Into<String>) {
        self.stage_filter = stage.into();
        self.page = 1;
    }

    /// Clicking the active column flips the direction; any other column
    /// starts ascending.
    pub fn sort_by(&mut self, column: LeadField) {
        if self.sort_column == column {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_column = column;
            self.sort_direction = SortDirection::Asc;
        }
        self.page = 1;
    }

    /// Moves to `page`, clamped to `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }
}
