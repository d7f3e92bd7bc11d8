use crate::error::Result;
use crate::model::{ListingRow, PageRows, TableSchema};

/// All listings of one category paired with its header set.
///
/// Rows follow page completion order, not page number order.
#[derive(Debug, Clone)]
pub struct ResultTable {
    headers: Vec<String>,
    rows: Vec<ListingRow>,
}

impl ResultTable {
    pub fn assemble(schema: TableSchema, pages: Vec<PageRows>) -> Result<Self> {
        let capacity = pages.iter().map(|p| p.rows.len()).sum();
        let mut rows = Vec::with_capacity(capacity);

        for PageRows { page, rows: page_rows } in pages {
            for row in page_rows {
                schema.validate(&row, page)?;
                rows.push(row);
            }
        }

        Ok(Self {
            headers: schema.into_headers(),
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows.iter().map(ListingRow::to_record)
    }
}
