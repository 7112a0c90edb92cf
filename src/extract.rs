use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::formats::{BookRecord, NOT_AVAILABLE, ZERO};

/// Label the catalog prints in front of the sale index.
const SALE_INDEX_LABEL: &str = "판매지수";
const REVIEW_LABEL: &str = "리뷰";

/// Compiled selectors for one listing entry and its ten fields.
pub struct ListingSelectors {
    item: Selector,
    title: Selector,
    author: Selector,
    publisher: Selector,
    published: Selector,
    sale_price: Selector,
    list_price: Selector,
    review_count: Selector,
    sale_index: Selector,
    description: Selector,
}

impl ListingSelectors {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            item: parse_selector("div.itemUnit")?,
            title: parse_selector("a.gd_name")?,
            author: parse_selector("span.info_auth a")?,
            publisher: parse_selector("span.info_pub a")?,
            published: parse_selector("span.info_date")?,
            sale_price: parse_selector("strong.txt_num em.yes_b")?,
            list_price: parse_selector("span.txt_num.dash em.yes_m")?,
            review_count: parse_selector("span.rating_rvCount em.txC_blue")?,
            sale_index: parse_selector("span.saleNum")?,
            description: parse_selector("div.info_read")?,
        })
    }
}

fn parse_selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|err| anyhow::anyhow!("invalid selector {css:?}: {err:?}"))
}

pub fn listing_items<'a>(document: &'a Html, selectors: &ListingSelectors) -> Vec<ElementRef<'a>> {
    document.select(&selectors.item).collect()
}

/// Extracts one record. Each field is looked up on its own and falls back to
/// its default when the element is absent or unusable.
pub fn extract_record(
    item: ElementRef<'_>,
    selectors: &ListingSelectors,
    site_origin: &Url,
) -> BookRecord {
    let title_anchor = item.select(&selectors.title).next();

    let title = title_anchor
        .map(element_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned());
    let detail_url = title_anchor
        .and_then(|anchor| anchor.value().attr("href"))
        .and_then(|href| resolve_link(site_origin, href))
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned());

    let sale_price = select_text(item, &selectors.sale_price)
        .map(|text| strip_thousands(&text))
        .unwrap_or_else(|| ZERO.to_owned());
    let list_price = select_text(item, &selectors.list_price)
        .map(|text| strip_thousands(&text))
        .unwrap_or_else(|| sale_price.clone());

    BookRecord {
        title,
        author: text_or(item, &selectors.author, NOT_AVAILABLE),
        publisher: text_or(item, &selectors.publisher, NOT_AVAILABLE),
        published: text_or(item, &selectors.published, NOT_AVAILABLE),
        list_price,
        sale_price,
        review_count: select_text(item, &selectors.review_count)
            .map(|text| strip_count_label(&text, REVIEW_LABEL))
            .unwrap_or_else(|| ZERO.to_owned()),
        sale_index: select_text(item, &selectors.sale_index)
            .map(|text| strip_count_label(&text, SALE_INDEX_LABEL))
            .unwrap_or_else(|| ZERO.to_owned()),
        description: text_or(item, &selectors.description, ""),
        detail_url,
    }
}

fn resolve_link(site_origin: &Url, href: &str) -> Option<String> {
    match site_origin.join(href.trim()) {
        Ok(url) => Some(url.to_string()),
        Err(err) => {
            tracing::warn!(href, "unusable detail link: {err}");
            None
        }
    }
}

/// Text of the first element matching `selector` under `item`, if any.
pub fn select_text(item: ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector).next().map(element_text)
}

fn text_or(item: ElementRef<'_>, selector: &Selector, default: &str) -> String {
    select_text(item, selector).unwrap_or_else(|| default.to_owned())
}

// Trims every text node and joins them without separators.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

pub fn strip_thousands(text: &str) -> String {
    text.trim().replace(',', "")
}

pub fn strip_count_label(text: &str, label: &str) -> String {
    let text = text.trim();
    let text = text.strip_prefix(label).unwrap_or(text);
    strip_thousands(text)
}
