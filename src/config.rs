use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::model::Category;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "epey-scraper.toml";

pub const DEFAULT_BASE_URL: &str = "https://www.epey.com/";

/// Menu label and URL path segment of one category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryEntry {
    pub label: String,
    pub slug: String,
}

impl CategoryEntry {
    fn new(label: &str, slug: &str) -> Self {
        Self {
            label: label.to_string(),
            slug: slug.to_string(),
        }
    }
}

pub fn default_categories() -> Vec<CategoryEntry> {
    [
        ("Anakart", "anakart"),
        ("Fotoğraf makinesi", "fotograf-kamera"),
        ("Ekran kartı", "ekran-karti"),
        ("İşlemci", "islemci"),
        ("Oyun konsolu", "oyun-konsolu"),
        ("Laptop", "laptop"),
        ("Monitör", "monitor"),
        ("Motosiklet", "motosiklet"),
        ("RAM", "bellek-ram"),
        ("Tablet", "tablet"),
        ("Akıllı telefon", "akilli-telefonlar"),
        ("Televizyon", "televizyon"),
        ("Tuşlu telefon", "tuslu-telefon"),
        ("Yazıcı", "yazici"),
    ]
    .into_iter()
    .map(|(label, slug)| CategoryEntry::new(label, slug))
    .collect()
}

/// Worker pool size when none is configured: a few more than the core count,
/// capped at 32.
pub fn default_workers() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cores + 4).min(32)
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_true")]
    pub show_progress: bool,
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryEntry>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            workers: default_workers(),
            timeout_secs: default_timeout_secs(),
            output_dir: default_output_dir(),
            show_progress: true,
            categories: default_categories(),
        }
    }
}

impl ScraperConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Explicit path first, then [`DEFAULT_CONFIG_FILE`] if it exists, then
    /// built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    log::info!("Loading config from {}", local.display());
                    Self::from_file(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ScrapeError::InvalidConfig("workers must be at least 1".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ScrapeError::InvalidConfig("timeout_secs must be at least 1".into()));
        }
        if self.categories.is_empty() {
            return Err(ScrapeError::InvalidConfig("category list is empty".into()));
        }
        if let Some(entry) = self
            .categories
            .iter()
            .find(|c| Category::new(c.slug.as_str()).is_err())
        {
            return Err(ScrapeError::InvalidConfig(format!(
                "category {:?} has an invalid slug {:?}",
                entry.label, entry.slug
            )));
        }
        Url::parse(&self.base_url)?;
        Ok(())
    }

    pub fn find_category(&self, label: &str) -> Option<Category> {
        self.categories
            .iter()
            .find(|c| c.label == label)
            .and_then(|c| Category::new(c.slug.as_str()).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ScraperConfig::default();
        assert_eq!(config.base_url, "https://www.epey.com/");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.categories.len(), 14);
        assert!(config.workers >= 1 && config.workers <= 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml_partial() {
        let text = r#"
            workers = 4
            output_dir = "exports"
        "#;

        let config = ScraperConfig::from_toml(text).unwrap();
        assert_eq!(config.workers, 4);
        assert_eq!(config.output_dir, PathBuf::from("exports"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.show_progress);
        assert_eq!(config.categories, default_categories());
    }

    #[test]
    fn test_config_custom_categories() {
        let text = r#"
            [[categories]]
            label = "Kulaklık"
            slug = "kulaklik"
        "#;

        let config = ScraperConfig::from_toml(text).unwrap();
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.find_category("Kulaklık").unwrap().as_str(), "kulaklik");
        assert!(config.find_category("Laptop").is_none());
    }

    #[test]
    fn test_config_rejects_invalid_values() {
        assert!(ScraperConfig::from_toml("workers = 0").is_err());
        assert!(ScraperConfig::from_toml("timeout_secs = 0").is_err());
        assert!(ScraperConfig::from_toml("categories = []").is_err());
        assert!(ScraperConfig::from_toml(r#"base_url = "not a url""#).is_err());
        assert!(ScraperConfig::from_toml("workers = \"many\"").is_err());
        assert!(
            ScraperConfig::from_toml("[[categories]]\nlabel = \"Dış\"\nslug = \"http://x\"\n")
                .is_err()
        );
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("epey.toml");
        std::fs::write(&path, "show_progress = false\n").unwrap();

        let config = ScraperConfig::load(Some(&path)).unwrap();
        assert!(!config.show_progress);
    }

    #[test]
    fn test_find_category_maps_label_to_slug() {
        let config = ScraperConfig::default();
        assert_eq!(
            config.find_category("Akıllı telefon").unwrap().as_str(),
            "akilli-telefonlar"
        );
        assert_eq!(config.find_category("RAM").unwrap().as_str(), "bellek-ram");
    }
}
