// epey.com category scraper
//
// Resolves a category's page count, fetches every result page concurrently,
// normalizes each listing into a fixed-width row and exports the table as CSV.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetcher;
pub mod menu;
pub mod model;
pub mod pipeline;
pub mod table;

// Re-export main types for convenience
pub use config::{CategoryEntry, ScraperConfig};
pub use error::{Result, ScrapeError};
pub use export::{RunContext, export_csv};
pub use fetcher::PageFetcher;
pub use model::{Category, ListingRow, PageRows, TableSchema};
pub use pipeline::{Orchestrator, fetch_headers, resolve_page_count};
pub use table::ResultTable;
