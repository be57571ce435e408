//! Query parameters, sort whitelist and pagination utilities

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::core::error::ValidationError;
use crate::core::predicate::Predicate;
use crate::core::record::Advocate;

/// Raw list parameters as received from the transport layer
///
/// Every field is optional; [`QueryResolver::validate`](crate::core::QueryResolver::validate)
/// turns this into a [`QueryRequest`] or a [`ValidationError`].
///
/// # Example
/// ```text
/// GET /advocates?page=2&pageSize=5
/// GET /advocates?query=anne&sortField=lastName&sortDirection=desc
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryParams {
    /// Page number (starts at 1)
    pub page: Option<i64>,

    /// Number of items per page
    pub page_size: Option<i64>,

    /// Free-text filter
    pub query: Option<String>,

    /// One of the names in [`SortField::ALL`]
    pub sort_field: Option<String>,

    /// `asc`, `ascending`, `desc` or `descending`
    pub sort_direction: Option<String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self.sort_direction = Some(direction.into());
        self
    }

    pub fn with_sort_field(mut self, field: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self
    }
}

/// List parameters exactly as they appear in the query string
///
/// Numbers stay text here so an unparsable `page=abc` can be handled by
/// [`QueryResolver::parse_params`](crate::core::QueryResolver::parse_params)
/// under the configured page-size policy instead of failing extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawQueryParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub query: Option<String>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
}

// =============================================================================
// Sorting
// =============================================================================

/// The fields a listing may be sorted by
///
/// This is the complete whitelist; changing it changes the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    FirstName,
    LastName,
    City,
    Degree,
    YearsOfExperience,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::FirstName,
        SortField::LastName,
        SortField::City,
        SortField::Degree,
        SortField::YearsOfExperience,
    ];

    /// Public name, as accepted in `sortField`
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::FirstName => "firstName",
            SortField::LastName => "lastName",
            SortField::City => "city",
            SortField::Degree => "degree",
            SortField::YearsOfExperience => "yearsOfExperience",
        }
    }

    /// Natural comparison of two records on this field alone
    ///
    /// Text fields compare byte-wise, years of experience numerically.
    pub fn compare(&self, a: &Advocate, b: &Advocate) -> Ordering {
        match self {
            SortField::FirstName => a.first_name.cmp(&b.first_name),
            SortField::LastName => a.last_name.cmp(&b.last_name),
            SortField::City => a.city.cmp(&b.city),
            SortField::Degree => a.degree.cmp(&b.degree),
            SortField::YearsOfExperience => a.years_of_experience.cmp(&b.years_of_experience),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidSortField {
                value: s.to_string(),
            })
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(ValidationError::InvalidSortDirection {
                value: s.to_string(),
            }),
        }
    }
}

/// Resolved ordering of a listing
///
/// Both variants end with `id ASC`, so every order is total and pages
/// never overlap or skip records between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Store-natural order (id ascending)
    #[default]
    Natural,
    By {
        field: SortField,
        direction: SortDirection,
    },
}

impl SortOrder {
    pub fn by(field: SortField, direction: SortDirection) -> Self {
        SortOrder::By { field, direction }
    }

    pub fn field(&self) -> Option<SortField> {
        match self {
            SortOrder::Natural => None,
            SortOrder::By { field, .. } => Some(*field),
        }
    }

    /// Total order over records, ties broken by ascending id
    pub fn compare(&self, a: &Advocate, b: &Advocate) -> Ordering {
        let primary = match self {
            SortOrder::Natural => Ordering::Equal,
            SortOrder::By { field, direction } => {
                let ordering = field.compare(a, b);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// A validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Returns `None` when either value is zero
    pub fn new(number: u32, size: u32) -> Option<Self> {
        (number >= 1 && size >= 1).then_some(Self { number, size })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// `(page - 1) * pageSize`
    pub fn offset(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

/// A validated, normalized list request
///
/// Only [`QueryResolver::validate`](crate::core::QueryResolver::validate)
/// builds these, so every value here is already within bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    query: String,
    sort: SortOrder,
    page: Page,
}

impl QueryRequest {
    pub(crate) fn new(query: String, sort: SortOrder, page: Page) -> Self {
        Self { query, sort, page }
    }

    /// Trimmed free-text query; empty means no filter
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// The filter this request resolves to
    pub fn predicate(&self, search_specialties: bool) -> Predicate {
        Predicate::from_query(&self.query, search_specialties)
    }
}

/// One page of matching records plus the total match count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Records on this page, in resolved order
    pub items: Vec<Advocate>,

    /// Records matching the filter, regardless of the page window
    pub total_count: u64,

    pub page: u32,

    pub page_size: u32,
}

impl QueryResult {
    pub fn pagination(&self) -> PaginationMeta {
        PaginationMeta::new(self.page, self.page_size, self.total_count)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: u32,

    /// Number of items per page
    pub page_size: u32,

    /// Total number of items (after filters)
    pub total_count: u64,

    /// Total number of pages
    pub total_pages: u64,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: u32, page_size: u32, total_count: u64) -> Self {
        // Guard against division by zero
        let size = u64::from(page_size.max(1));
        let page = page.max(1);
        let total_pages = total_count.div_ceil(size);
        let start = u64::from(page - 1) * size;

        Self {
            page,
            page_size,
            total_count,
            total_pages,
            has_next: start + size < total_count,
            has_prev: page > 1,
        }
    }
}
