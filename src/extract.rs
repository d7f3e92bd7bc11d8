//! Markup extraction for epey.com category pages.
//!
//! Every function here is a pure function of the page body: the same markup
//! always yields the same headers, page count and rows.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};
use crate::model::{LINK_HEADER, ListingRow, TableSchema};

const LISTING_TABLE: &str = "div.listele.table";
const HEADER_ROW: &str = "ul.baslik.row";
const LISTING_ITEM: &str = "ul.metin.row";
const NAME_LINK: &str = "a.urunadi";
const LAST_PAGE_LINK: &str = "a.son";

/// Highest last-page index accepted from the pager.
pub const MAX_PAGES: u32 = 10_000;

/// Argument of the pager's `sayfa(...)` call, with optional quotes.
static PAGE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"sayfa\(\s*['"]?([^'")]*?)['"]?\s*\)"#).expect("page call pattern is valid")
});

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::parse(format!("invalid selector {css}: {e:?}")))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Direct `li` children, in document order.
fn fields_of(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "li")
        .collect()
}

fn listing_table<'a>(document: &'a Html) -> Result<ElementRef<'a>> {
    let table = selector(LISTING_TABLE)?;
    document
        .select(&table)
        .next()
        .ok_or_else(|| ScrapeError::parse(format!("listing table `{LISTING_TABLE}` not found")))
}

/// Column headers of the listing table, followed by the synthetic link column.
pub fn extract_headers(html: &str) -> Result<TableSchema> {
    let document = Html::parse_document(html);
    let table = listing_table(&document)?;

    let header_row = selector(HEADER_ROW)?;
    let row = table
        .select(&header_row)
        .next()
        .ok_or_else(|| ScrapeError::parse(format!("header row `{HEADER_ROW}` not found")))?;

    let mut headers: Vec<String> = fields_of(row).into_iter().map(text_of).collect();
    headers.push(LINK_HEADER.to_string());

    TableSchema::new(headers)
}

/// Last page index from the pager. A category without a "last page" control
/// has exactly one page.
pub fn extract_page_count(html: &str) -> Result<u32> {
    let document = Html::parse_document(html);
    let last_page = selector(LAST_PAGE_LINK)?;

    let Some(control) = document.select(&last_page).next() else {
        return Ok(1);
    };

    let onclick = control
        .value()
        .attr("onclick")
        .ok_or_else(|| ScrapeError::parse("last page control has no onclick action"))?;

    parse_page_index(onclick)
}

/// Parses `sayfa(12);return false;` style actions. An index of 0 means the
/// category has no result pages.
pub fn parse_page_index(action: &str) -> Result<u32> {
    let argument = PAGE_CALL
        .captures(action)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .ok_or_else(|| ScrapeError::parse(format!("no page call in action {action:?}")))?;

    let index: u32 = argument
        .parse()
        .map_err(|_| ScrapeError::parse(format!("page index {argument:?} is not numeric")))?;

    if index > MAX_PAGES {
        return Err(ScrapeError::parse(format!(
            "page index {index} exceeds the limit of {MAX_PAGES}"
        )));
    }

    Ok(index)
}

/// `"12.345,67 TL"` -> `12345.67`. Anything unparsable is `None`.
pub fn parse_price(text: &str) -> Option<f64> {
    let amount = text.split_whitespace().next()?;
    let normalized = amount.replace('.', "").replace(',', ".");
    normalized.parse::<f64>().ok().filter(|p| p.is_finite())
}

pub fn parse_score(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// One row per listing item on the page, in document order.
///
/// Items whose field count disagrees with `schema` fail the page with
/// [`ScrapeError::Schema`]; an item without a product name fails it with
/// [`ScrapeError::Parse`]. Price and score degrade to `None`.
pub fn extract_rows(html: &str, schema: &TableSchema, page: u32) -> Result<Vec<ListingRow>> {
    let document = Html::parse_document(html);
    let table = listing_table(&document)?;

    let item_selector = selector(LISTING_ITEM)?;
    let name_selector = selector(NAME_LINK)?;
    let anchor_selector = selector("a")?;
    let div_selector = selector("div")?;

    let mut rows = Vec::new();

    for (index, item) in table.select(&item_selector).enumerate() {
        let fields = fields_of(item);
        if fields.len() != schema.item_field_count() {
            return Err(ScrapeError::Schema {
                page,
                expected: schema.item_field_count(),
                found: fields.len(),
            });
        }

        let name_link = fields[0].select(&name_selector).next().ok_or_else(|| {
            ScrapeError::parse(format!("listing {} on page {} has no product name", index + 1, page))
        })?;
        let name = text_of(name_link);

        let link = match name_link
            .value()
            .attr("href")
            .or_else(|| fields[0].select(&anchor_selector).next().and_then(|a| a.value().attr("href")))
        {
            Some(href) => href.to_string(),
            None => {
                log::warn!("Listing {:?} on page {} has no link", name, page);
                String::new()
            }
        };

        let price = fields[1]
            .select(&anchor_selector)
            .next()
            .and_then(|a| parse_price(&text_of(a)));

        let last = fields.len() - 1;
        let specs = fields[2..last].iter().copied().map(text_of).collect();

        let score = fields[last]
            .select(&div_selector)
            .next()
            .and_then(|div| div.value().attr("data-text"))
            .and_then(parse_score);

        let row = ListingRow {
            name,
            price,
            specs,
            score,
            link,
        };
        schema.validate(&row, page)?;
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Minimal epey.com-shaped markup shared by the tests in this crate.

    pub const HEADERS: &[&str] = &["Ürün Adı", "Fiyat", "Ekran Boyutu", "İşlemci", "Puan"];

    pub struct Item<'a> {
        pub name: &'a str,
        pub href: &'a str,
        pub price: Option<&'a str>,
        pub specs: &'a [&'a str],
        pub score: Option<&'a str>,
    }

    pub fn item(name: &str) -> Item<'_> {
        Item {
            name,
            href: "https://www.epey.com/laptop/sample.html",
            price: Some("12.345,67 TL"),
            specs: &["15.6\"", "Core i7"],
            score: Some("87"),
        }
    }

    fn render_item(item: &Item<'_>) -> String {
        let price = match item.price {
            Some(p) => format!(r#"<a href="/fiyat">{p}</a>"#),
            None => "<span>Reklam</span>".to_string(),
        };
        let score = match item.score {
            Some(s) => format!(r#"<div class="puan" data-text="{s}"></div>"#),
            None => "<span>-</span>".to_string(),
        };
        let specs: String = item.specs.iter().map(|s| format!("<li>{s}</li>")).collect();
        format!(
            r#"<ul class="metin row">
                <li><a class="urunadi" href="{href}">{name}</a></li>
                <li class="fiyat">{price}</li>
                {specs}
                <li>{score}</li>
            </ul>"#,
            href = item.href,
            name = item.name,
        )
    }

    pub fn page(items: &[Item<'_>], last_page: Option<&str>) -> String {
        let headers: String = HEADERS.iter().map(|h| format!("<li>{h}</li>")).collect();
        let rows: String = items.iter().map(render_item).collect();
        let pager = match last_page {
            Some(action) => format!(r#"<a class="son" onclick="{action}">Son</a>"#),
            None => String::new(),
        };
        format!(
            r#"<!DOCTYPE html>
            <html><body>
                <div class="listele table">
                    <ul class="baslik row">{headers}</ul>
                    {rows}
                </div>
                <div class="sayfalama">{pager}</div>
            </body></html>"#
        )
    }
}
