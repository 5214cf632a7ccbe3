//! Page envelopes (response side) and page/sort requests (request side).
//!
//! Offset pages are 1-indexed for users and 0-indexed on the wire; the
//! conversion lives in [`PageRequest::api_page`] and nowhere else.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SortDirection;
use crate::errors::CoreError;

/// Offset-paged list response.
///
/// The files endpoint names its list `data`; every other endpoint uses `items`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPage<T> {
    #[serde(alias = "data")]
    pub items: Vec<T>,
    pub total_count: u64,
    pub total_pages: u32,
    /// Zero-based page index echoed by the server.
    pub page_number: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Cursor-paged list response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

/// A 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `page` or `size` is zero.
    pub fn new(page: u32, size: u32) -> Result<Self, CoreError> {
        if page == 0 {
            return Err(CoreError::Validation("page numbers start at 1".into()));
        }
        if size == 0 {
            return Err(CoreError::Validation("page size must be positive".into()));
        }
        Ok(Self { page, size })
    }

    #[must_use]
    pub const fn first(size: u32) -> Self {
        Self { page: 1, size }
    }

    /// Zero-based page index sent to the API.
    #[must_use]
    pub const fn api_page(self) -> u32 {
        self.page.saturating_sub(1)
    }
}

// ---------------------------------------------------------------------------
// SortSpec
// ---------------------------------------------------------------------------

/// Case list columns the server accepts in `sort`.
pub const CASE_SORT_FIELDS: &[&str] = &[
    "code",
    "caseName",
    "doctorFirstName",
    "patientFirstName",
    "isLocked",
    "status",
    "externalId",
    "createdAt",
    "updatedAt",
];

/// A single `field,direction` sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Parse a sort for the case list, mapping the `doctor`/`patient` column
    /// aliases and rejecting columns the server cannot sort by.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for malformed input or unknown columns.
    pub fn for_cases(raw: &str) -> Result<Self, CoreError> {
        let mut spec: Self = raw.parse()?;
        spec.field = match spec.field.as_str() {
            "doctor" => "doctorFirstName".to_string(),
            "patient" => "patientFirstName".to_string(),
            _ => spec.field,
        };
        if !CASE_SORT_FIELDS.contains(&spec.field.as_str()) {
            return Err(CoreError::Validation(format!(
                "cases cannot be sorted by '{}' (expected one of: {})",
                spec.field,
                CASE_SORT_FIELDS.join(", ")
            )));
        }
        Ok(spec)
    }
}

impl FromStr for SortSpec {
    type Err = CoreError;

    /// `field` or `field,asc|desc`. Anything other than `desc` sorts ascending.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (field, direction) = raw.split_once(',').unwrap_or((raw, ""));
        let field = field.trim();
        if field.is_empty() {
            return Err(CoreError::Validation(format!("invalid sort '{raw}'")));
        }
        let direction = if direction.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Ok(Self::new(field, direction))
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field, self.direction)
    }
}
