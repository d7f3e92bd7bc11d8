use thiserror::Error;

/// Errors produced while scraping a category.
///
/// Field-level failures (price, score) never show up here; they degrade to
/// `None` inside the row extractor.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error {status} for {url}")]
    Transport {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected page structure: {0}")]
    Parse(String),

    #[error("row width mismatch on page {page}: expected {expected} fields, found {found}")]
    Schema {
        page: u32,
        expected: usize,
        found: usize,
    },

    #[error("invalid category: {0:?}")]
    InvalidCategory(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("menu error: {0}")]
    Menu(#[from] inquire::InquireError),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

impl ScrapeError {
    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        ScrapeError::Parse(msg.into())
    }

    /// True for errors caused by the site's markup rather than the network.
    pub fn is_structural(&self) -> bool {
        matches!(self, ScrapeError::Parse(_) | ScrapeError::Schema { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_classification() {
        assert!(ScrapeError::parse("missing table").is_structural());
        assert!(
            ScrapeError::Schema {
                page: 2,
                expected: 6,
                found: 5
            }
            .is_structural()
        );
        assert!(!ScrapeError::InvalidCategory(String::new()).is_structural());
    }

    #[test]
    fn test_schema_message() {
        let err = ScrapeError::Schema {
            page: 3,
            expected: 7,
            found: 4,
        };
        assert_eq!(
            err.to_string(),
            "row width mismatch on page 3: expected 7 fields, found 4"
        );
    }
}
