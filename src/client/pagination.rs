//! Pagination helpers for list endpoints
//!
//! Paged endpoints take zero-based `page` and `size` query parameters plus
//! optional filters and answer with `{ content, totalPages, number }`.

use serde::{Deserialize, Serialize};

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Page size used when walking every page of a collection
pub const BULK_PAGE_SIZE: usize = 100;

/// Pagination and filter parameters for paged endpoints.
///
/// # Example
/// ```ignore
/// let params = PageParams::new()
///     .page(1)
///     .size(20)
///     .material_text("Jacket");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    /// Zero-based page index
    pub page: usize,
    pub size: Option<usize>,
    /// Material description filter (material lists)
    pub text: Option<String>,
    /// Size id filter (material lists)
    pub size_id: Option<i64>,
    pub store_id: Option<i64>,
    /// Order author filter (order lists)
    pub user_id: Option<i64>,
    /// Material description filter (order lists)
    pub material_text: Option<String>,
    /// Size name filter (order lists)
    pub size_name: Option<String>,
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    (!value.trim().is_empty()).then_some(value)
}

impl PageParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = non_empty(text);
        self
    }

    pub fn size_id(mut self, size_id: i64) -> Self {
        self.size_id = Some(size_id);
        self
    }

    pub fn store_id(mut self, store_id: i64) -> Self {
        self.store_id = Some(store_id);
        self
    }

    pub fn user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn material_text(mut self, text: impl Into<String>) -> Self {
        self.material_text = non_empty(text);
        self
    }

    pub fn size_name(mut self, name: impl Into<String>) -> Self {
        self.size_name = non_empty(name);
        self
    }

    /// Convert to query string parameters. Unset filters are omitted.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("size", self.size.unwrap_or(DEFAULT_PAGE_SIZE).to_string()),
        ];

        if let Some(store_id) = self.store_id {
            params.push(("storeId", store_id.to_string()));
        }
        if let Some(user_id) = self.user_id {
            params.push(("userId", user_id.to_string()));
        }
        if let Some(ref text) = self.text {
            params.push(("text", text.clone()));
        }
        if let Some(size_id) = self.size_id {
            params.push(("sizeId", size_id.to_string()));
        }
        if let Some(ref text) = self.material_text {
            params.push(("materialText", text.clone()));
        }
        if let Some(ref name) = self.size_name {
            params.push(("sizeName", name.clone()));
        }

        params
    }
}

/// One page of a paged endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,

    #[serde(default)]
    pub total_pages: usize,

    /// Zero-based index of this page
    #[serde(default)]
    pub number: usize,
}

impl<T> Page<T> {
    /// Whether another page follows this one.
    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    /// Indexes of every page after this one.
    pub fn remaining_pages(&self) -> Vec<usize> {
        (self.number + 1..self.total_pages).collect()
    }
}
