//! Pagination orchestration: one landing probe, then every result page
//! fetched and extracted through a bounded worker pool.

use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::export::{RunContext, export_csv};
use crate::extract::{extract_headers, extract_page_count, extract_rows};
use crate::fetcher::PageFetcher;
use crate::model::{Category, PageRows, TableSchema};
use crate::table::ResultTable;

/// What the category landing page tells us before any result page is fetched.
#[derive(Debug, Clone)]
pub struct LandingPage {
    pub schema: TableSchema,
    pub page_count: u32,
}

pub fn probe_landing(html: &str) -> Result<LandingPage> {
    Ok(LandingPage {
        schema: extract_headers(html)?,
        page_count: extract_page_count(html)?,
    })
}

pub async fn fetch_headers(fetcher: &PageFetcher, category: &Category) -> Result<TableSchema> {
    let html = fetcher.fetch_landing(category).await?;
    extract_headers(&html)
}

pub async fn resolve_page_count(fetcher: &PageFetcher, category: &Category) -> Result<u32> {
    let html = fetcher.fetch_landing(category).await?;
    extract_page_count(&html)
}

pub struct Orchestrator {
    fetcher: PageFetcher,
    workers: usize,
    show_progress: bool,
}

impl Orchestrator {
    pub fn new(fetcher: PageFetcher, workers: usize) -> Self {
        Self {
            fetcher,
            workers: workers.max(1),
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Scrape every page of `category` into one table.
    ///
    /// Fails on the first transport or structural error; nothing is returned
    /// for the pages that did complete.
    pub async fn run(&self, category: &Category) -> Result<ResultTable> {
        log::info!("🔍 Probing category: {}", category);

        let landing = self.fetcher.fetch_landing(category).await?;
        let LandingPage { schema, page_count } = probe_landing(&landing)?;

        log::info!(
            "📄 {} has {} page(s) with {} columns",
            category,
            page_count,
            schema.width()
        );

        let pages = self.scrape_pages(category, &schema, page_count).await?;
        ResultTable::assemble(schema, pages)
    }

    /// Scrape `context.category` and write it as CSV into `output_dir`.
    ///
    /// Nothing is written when the scrape fails.
    pub async fn run_and_export(&self, context: &RunContext, output_dir: &Path) -> Result<PathBuf> {
        let table = self.run(&context.category).await?;
        log::info!("✅ Collected {} listings", table.len());
        export_csv(&table, context, output_dir)
    }

    /// Pages 1..=`page_count`, in completion order.
    pub async fn scrape_pages(
        &self,
        category: &Category,
        schema: &TableSchema,
        page_count: u32,
    ) -> Result<Vec<PageRows>> {
        let progress = self.progress_bar(page_count);
        let mut collected = Vec::new();

        let mut pending = stream::iter(1..=page_count)
            .map(|page| self.scrape_page(category, schema, page))
            .buffer_unordered(self.workers);

        while let Some(result) = pending.next().await {
            match result {
                Ok(page_rows) => {
                    collected.push(page_rows);
                    progress.inc(1);
                }
                Err(e) => {
                    progress.abandon();
                    log::error!("❌ Aborting {}: {}", category, e);
                    return Err(e);
                }
            }
        }

        progress.finish_and_clear();
        Ok(collected)
    }

    async fn scrape_page(
        &self,
        category: &Category,
        schema: &TableSchema,
        page: u32,
    ) -> Result<PageRows> {
        let html = self.fetcher.fetch_page(category, page).await?;
        let rows = extract_rows(&html, schema, page)?;

        log::debug!("Page {} of {}: {} listings", page, category, rows.len());

        Ok(PageRows { page, rows })
    }

    fn progress_bar(&self, page_count: u32) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(u64::from(page_count));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}
