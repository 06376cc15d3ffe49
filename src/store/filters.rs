//! Filter set and partial-update types for the object listing.

use serde::{Deserialize, Serialize};

/// Default page size requested before the server has echoed one back.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query parameters sent to `GET /objects`.
///
/// Unset optional fields are omitted from the query string entirely,
/// never sent as null or empty. `page` and `page_size` are always
/// present; after the first successful refresh they carry the
/// server-echoed authoritative values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_max: Option<f64>,
    /// Exact constellation match (case-insensitive on the server).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constellation: Option<String>,
    /// Exact spectral class match (case-insensitive on the server).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectral_type: Option<String>,
    /// Substring match against name or constellation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Page number, 1-indexed.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            magnitude_min: None,
            magnitude_max: None,
            distance_min: None,
            distance_max: None,
            constellation: None,
            spectral_type: None,
            search: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterSet {
    /// Shallow-merge a patch into this filter set.
    ///
    /// Fields absent from the patch keep their current value; fields
    /// present in the patch overwrite, including overwriting to unset.
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(v) = patch.magnitude_min {
            self.magnitude_min = v;
        }
        if let Some(v) = patch.magnitude_max {
            self.magnitude_max = v;
        }
        if let Some(v) = patch.distance_min {
            self.distance_min = v;
        }
        if let Some(v) = patch.distance_max {
            self.distance_max = v;
        }
        if let Some(v) = patch.constellation {
            self.constellation = v;
        }
        if let Some(v) = patch.spectral_type {
            self.spectral_type = v;
        }
        if let Some(v) = patch.search {
            self.search = v;
        }
        if let Some(v) = patch.page {
            self.page = v;
        }
        if let Some(v) = patch.page_size {
            self.page_size = v;
        }
    }
}

/// Partial update for [`FilterSet`].
///
/// Every field is doubly optional: the outer `Option` says whether the
/// patch touches the field at all, the inner one (for the optional
/// filters) carries the new value or clears it. Build patches with the
/// `with_*` / `clear_*` methods.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub magnitude_min: Option<Option<f64>>,
    pub magnitude_max: Option<Option<f64>>,
    pub distance_min: Option<Option<f64>>,
    pub distance_max: Option<Option<f64>>,
    pub constellation: Option<Option<String>>,
    pub spectral_type: Option<Option<String>>,
    pub search: Option<Option<String>>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_magnitude_min(mut self, value: f64) -> Self {
        self.magnitude_min = Some(Some(value));
        self
    }

    pub fn with_magnitude_max(mut self, value: f64) -> Self {
        self.magnitude_max = Some(Some(value));
        self
    }

    pub fn with_distance_min(mut self, value: f64) -> Self {
        self.distance_min = Some(Some(value));
        self
    }

    pub fn with_distance_max(mut self, value: f64) -> Self {
        self.distance_max = Some(Some(value));
        self
    }

    pub fn with_constellation(mut self, value: impl Into<String>) -> Self {
        self.constellation = Some(Some(value.into()));
        self
    }

    pub fn with_spectral_type(mut self, value: impl Into<String>) -> Self {
        self.spectral_type = Some(Some(value.into()));
        self
    }

    pub fn with_search(mut self, value: impl Into<String>) -> Self {
        self.search = Some(Some(value.into()));
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn clear_magnitude_min(mut self) -> Self {
        self.magnitude_min = Some(None);
        self
    }

    pub fn clear_magnitude_max(mut self) -> Self {
        self.magnitude_max = Some(None);
        self
    }

    pub fn clear_distance_min(mut self) -> Self {
        self.distance_min = Some(None);
        self
    }

    pub fn clear_distance_max(mut self) -> Self {
        self.distance_max = Some(None);
        self
    }

    pub fn clear_constellation(mut self) -> Self {
        self.constellation = Some(None);
        self
    }

    pub fn clear_spectral_type(mut self) -> Self {
        self.spectral_type = Some(None);
        self
    }

    pub fn clear_search(mut self) -> Self {
        self.search = Some(None);
        self
    }
}
