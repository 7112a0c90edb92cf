use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use rand::Rng as _;
use scraper::Html;
use url::Url;

use crate::catalog::CatalogClient;
use crate::cli::ScrapeArgs;
use crate::extract::{self, ListingSelectors};
use crate::formats::BookRecord;

/// Politeness delay between listing pages, in milliseconds.
const PAGE_DELAY_MS: RangeInclusive<u64> = 1_000..=2_000;

const PREVIEW_ROWS: usize = 5;

pub async fn run(args: ScrapeArgs) -> anyhow::Result<Vec<BookRecord>> {
    if args.first_page > args.last_page {
        anyhow::bail!(
            "--first-page ({}) must not exceed --last-page ({})",
            args.first_page,
            args.last_page
        );
    }

    let client = CatalogClient::new(&args.base_url, &args.category).context("build catalog client")?;
    let selectors = ListingSelectors::new().context("compile listing selectors")?;

    let records = scrape_pages(
        &client,
        &selectors,
        args.first_page..=args.last_page,
        args.page_size,
    )
    .await;

    if records.is_empty() {
        tracing::warn!("no records collected; nothing written");
        return Ok(records);
    }

    let out_path = PathBuf::from(&args.out);
    crate::table_store::write_records(&out_path, &records).context("write scrape table")?;
    tracing::info!(
        records = records.len(),
        out = %out_path.display(),
        "scrape saved"
    );
    for record in records.iter().take(PREVIEW_ROWS) {
        tracing::info!(
            title = %record.title,
            author = %record.author,
            sale_price = %record.sale_price,
            sale_index = %record.sale_index,
            "preview"
        );
    }

    Ok(records)
}

/// Walks the listing pages in order. Stops at the first failed request or the
/// first page without items; records gathered so far are kept.
async fn scrape_pages(
    client: &CatalogClient,
    selectors: &ListingSelectors,
    pages: RangeInclusive<u32>,
    page_size: u32,
) -> Vec<BookRecord> {
    let site_origin = client.site_origin();
    let mut records = Vec::new();

    for page in pages {
        tracing::info!(page, "fetching listing page");

        let html = match client.fetch_listing_page(page, page_size).await {
            Ok(html) => html,
            Err(err) => {
                tracing::error!(page, "listing request failed: {err:#}");
                break;
            }
        };

        let page_records = match extract_page(&html, selectors, &site_origin) {
            PageOutcome::Empty => {
                tracing::warn!(page, "listing page has no items; stopping");
                break;
            }
            PageOutcome::Items(page_records) => page_records,
        };
        tracing::info!(page, books = page_records.len(), "listing page done");
        records.extend(page_records);

        let delay_ms = rand::thread_rng().gen_range(PAGE_DELAY_MS);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    records
}

#[derive(Debug)]
enum PageOutcome {
    Empty,
    Items(Vec<BookRecord>),
}

fn extract_page(html: &str, selectors: &ListingSelectors, site_origin: &Url) -> PageOutcome {
    let document = Html::parse_document(html);
    let items = extract::listing_items(&document, selectors);
    if items.is_empty() {
        return PageOutcome::Empty;
    }

    PageOutcome::Items(
        items
            .into_iter()
            .map(|item| extract::extract_record(item, selectors, site_origin))
            .collect(),
    )
}
