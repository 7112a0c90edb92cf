#![forbid(unsafe_code)]

pub mod analyze;
pub mod catalog;
pub mod charts;
pub mod cli;
pub mod derive;
pub mod extract;
pub mod fonts;
pub mod formats;
pub mod logging;
pub mod scrape;
pub mod stats;
pub mod table_store;
pub mod wordcloud;
