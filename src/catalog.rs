//! HTTP access to the category listing endpoint.

use std::time::Duration;

use anyhow::Context as _;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36";

/// Listing order requested from the catalog (by sale index).
const SORT_ORDER: &str = "SINDEX_ONLY";

pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: Url,
    category: String,
}

impl CatalogClient {
    pub fn new(endpoint: &str, category: &str) -> anyhow::Result<Self> {
        let endpoint = Url::parse(endpoint).context("parse listing endpoint url")?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            anyhow::bail!("listing endpoint must be http/https: {endpoint}");
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(browser_headers(&endpoint, category)?)
            .build()
            .context("build catalog http client")?;

        Ok(Self {
            http,
            endpoint,
            category: category.to_owned(),
        })
    }

    /// Origin of the catalog site; relative detail links resolve against it.
    pub fn site_origin(&self) -> Url {
        let mut origin = self.endpoint.clone();
        origin.set_path("/");
        origin.set_query(None);
        origin.set_fragment(None);
        origin
    }

    pub async fn fetch_listing_page(&self, page: u32, page_size: u32) -> anyhow::Result<String> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&listing_query(&self.category, page, page_size))
            .send()
            .await
            .with_context(|| format!("GET {} (page {page})", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("unexpected status {status} for page {page}");
        }

        response
            .text()
            .await
            .with_context(|| format!("read body of page {page}"))
    }
}

fn listing_query(category: &str, page: u32, page_size: u32) -> Vec<(&'static str, String)> {
    vec![
        ("dispNo", category.to_owned()),
        ("order", SORT_ORDER.to_owned()),
        ("addOptionTp", "0".to_owned()),
        ("page", page.to_string()),
        ("size", page_size.to_string()),
        ("statGbYn", "N".to_owned()),
        ("viewMode", String::new()),
        ("_options", String::new()),
        ("directDelvYn", String::new()),
        ("usedTp", "0".to_owned()),
        ("elemNo", "0".to_owned()),
        ("elemSeq", "0".to_owned()),
        ("seriesNumber", "0".to_owned()),
    ]
}

// The catalog serves a different fragment to clients that do not look like
// the site's own XHR calls.
fn browser_headers(endpoint: &Url, category: &str) -> anyhow::Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ko-KR,ko;q=0.9"));

    let referer = endpoint
        .join(&format!("/product/category/display/{category}"))
        .context("build referer url")?;
    headers.insert(
        REFERER,
        HeaderValue::from_str(referer.as_str()).context("referer header value")?,
    );

    let fixed = [
        (
            "sec-ch-ua",
            r#""Not(A:Brand";v="8", "Chromium";v="144", "Google Chrome";v="144""#,
        ),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", r#""Windows""#),
        ("sec-fetch-dest", "empty"),
        ("sec-fetch-mode", "cors"),
        ("sec-fetch-site", "same-origin"),
        ("x-requested-with", "XMLHttpRequest"),
    ];
    for (name, value) in fixed {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }

    Ok(headers)
}
