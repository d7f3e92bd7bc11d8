use inquire::Select;

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::model::Category;

pub fn menu_options(config: &ScraperConfig) -> Vec<String> {
    config.categories.iter().map(|c| c.label.clone()).collect()
}

/// Interactive category picker over the configured catalog.
pub fn select_category(config: &ScraperConfig) -> Result<Category> {
    let label = Select::new("Choose product type:", menu_options(config))
        .with_starting_cursor(0)
        .prompt()?;

    config
        .find_category(&label)
        .ok_or(ScrapeError::InvalidCategory(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_options_follow_catalog_order() {
        let options = menu_options(&ScraperConfig::default());
        assert_eq!(options.first().map(String::as_str), Some("Anakart"));
        assert_eq!(options.last().map(String::as_str), Some("Yazıcı"));
        assert_eq!(options.len(), 14);
    }
}
