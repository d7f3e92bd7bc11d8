use std::fmt;

use crate::error::{Result, ScrapeError};

/// Synthetic trailing column holding each listing's detail URL.
pub const LINK_HEADER: &str = "Link";

/// A product category, identified by its URL path segment (e.g. `laptop`).
///
/// The slug is a single segment: it may not contain `/`, `:`, `?` or `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

impl Category {
    pub fn new(slug: impl Into<String>) -> Result<Self> {
        let slug = slug.into().trim().to_string();
        if slug.is_empty() || slug.contains(['/', ':', '?', '#']) {
            return Err(ScrapeError::InvalidCategory(slug));
        }
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Slug with its first character upper-cased, used for export file names.
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One product entry from a category results page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRow {
    pub name: String,
    pub price: Option<f64>,
    pub specs: Vec<String>,
    pub score: Option<i64>,
    pub link: String,
}

impl ListingRow {
    /// Number of cells this row occupies in the result table.
    pub fn width(&self) -> usize {
        self.specs.len() + 4
    }

    /// Cells in column order. Absent values become empty cells.
    pub fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(self.width());
        record.push(self.name.clone());
        record.push(self.price.map(|p| p.to_string()).unwrap_or_default());
        record.extend(self.specs.iter().cloned());
        record.push(self.score.map(|s| s.to_string()).unwrap_or_default());
        record.push(self.link.clone());
        record
    }
}

/// Rows extracted from one result page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRows {
    pub page: u32,
    pub rows: Vec<ListingRow>,
}

/// Column layout of one category, derived once from its header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    headers: Vec<String>,
}

impl TableSchema {
    /// Name, price, score and link are always present.
    pub const MIN_COLUMNS: usize = 4;

    /// `headers` must already end with the synthetic link column.
    pub fn new(headers: Vec<String>) -> Result<Self> {
        if headers.len() < Self::MIN_COLUMNS {
            return Err(ScrapeError::parse(format!(
                "header row has {} columns, need at least {}",
                headers.len(),
                Self::MIN_COLUMNS
            )));
        }
        if headers.last().map(String::as_str) != Some(LINK_HEADER) {
            return Err(ScrapeError::parse("header set must end with the link column"));
        }
        Ok(Self { headers })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// `li` fields expected per listing item (every column except the link).
    pub fn item_field_count(&self) -> usize {
        self.headers.len() - 1
    }

    pub fn spec_count(&self) -> usize {
        self.headers.len() - Self::MIN_COLUMNS
    }

    pub fn validate(&self, row: &ListingRow, page: u32) -> Result<()> {
        if row.width() != self.width() {
            return Err(ScrapeError::Schema {
                page,
                expected: self.width(),
                found: row.width(),
            });
        }
        Ok(())
    }

    pub fn into_headers(self) -> Vec<String> {
        self.headers
    }
}
