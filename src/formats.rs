use serde::{Deserialize, Serialize};

/// Placeholder for text fields whose element is missing from the listing.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for numeric-looking fields whose element is missing.
pub const ZERO: &str = "0";

/// One catalog item as scraped. Every field is stored as text; numeric
/// coercion happens only at analysis time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(rename = "제목")]
    pub title: String,
    #[serde(rename = "저자")]
    pub author: String,
    #[serde(rename = "출판사")]
    pub publisher: String,
    #[serde(rename = "발행일")]
    pub published: String,
    #[serde(rename = "정가")]
    pub list_price: String,
    #[serde(rename = "판매가")]
    pub sale_price: String,
    #[serde(rename = "리뷰 수")]
    pub review_count: String,
    #[serde(rename = "판매지수")]
    pub sale_index: String,
    #[serde(rename = "설명")]
    pub description: String,
    #[serde(rename = "상세 페이지 URL")]
    pub detail_url: String,
}

/// Header row of the scrape CSV, in column order.
pub const BOOK_RECORD_HEADERS: [&str; 10] = [
    "제목",
    "저자",
    "출판사",
    "발행일",
    "정가",
    "판매가",
    "리뷰 수",
    "판매지수",
    "설명",
    "상세 페이지 URL",
];
