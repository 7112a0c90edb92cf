use std::path::Path;

use bookscout::formats::BookRecord;
use predicates::prelude::*;

fn record(title: &str, review_count: &str, sale_index: &str, published: &str) -> BookRecord {
    BookRecord {
        title: title.to_owned(),
        author: "홍길동".to_owned(),
        publisher: "한빛미디어".to_owned(),
        published: published.to_owned(),
        list_price: "25000".to_owned(),
        sale_price: "22500".to_owned(),
        review_count: review_count.to_owned(),
        sale_index: sale_index.to_owned(),
        description: String::new(),
        detail_url: "https://www.yes24.com/product/goods/1".to_owned(),
    }
}

fn write_sample_table(path: &Path) -> anyhow::Result<()> {
    bookscout::table_store::write_records(
        path,
        &[
            record("A", "40", "100", "2023년 5월"),
            record("B", "12", "50", "2024년 11월"),
            record("혼자 공부하는 머신러닝", "N/A", "N/A", "N/A"),
            record("LLM 엔지니어링", "7", "75", "2024년 2월"),
        ],
    )
}

#[test]
fn word_cloud_failure_leaves_other_charts_on_disk() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let input = temp.path().join("data").join("books.csv");
    write_sample_table(&input)?;
    let plots = temp.path().join("plots");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("bookscout");
    cmd.args([
        "analyze",
        "--input",
        input.to_str().unwrap(),
        "--out",
        plots.to_str().unwrap(),
        "--font",
        temp.path().join("no-such-font.ttf").to_str().unwrap(),
        "--log-dir",
        temp.path().join("log").to_str().unwrap(),
    ])
    .assert()
    .success()
    .stderr(predicate::str::contains("chart failed"))
    .stderr(predicate::str::contains("analysis complete"));

    assert!(plots.join("top_10_sales.png").exists());
    assert!(plots.join("review_vs_sales.png").exists());
    assert!(plots.join("yearly_trend.png").exists());
    assert!(!plots.join("wordcloud.png").exists());
    Ok(())
}

#[test]
fn usable_font_writes_all_four_charts() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let input = temp.path().join("books.csv");
    write_sample_table(&input)?;
    let plots = temp.path().join("plots");
    let font = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("bookscout");
    cmd.args([
        "analyze",
        "--input",
        input.to_str().unwrap(),
        "--out",
        plots.to_str().unwrap(),
        "--font",
        font.to_str().unwrap(),
        "--log-dir",
        temp.path().join("log").to_str().unwrap(),
    ])
    .assert()
    .success()
    .stderr(predicate::str::contains("chart failed").not())
    .stderr(predicate::str::contains("chart text disabled").not())
    .stderr(predicate::str::contains("analysis complete"));

    for name in [
        "top_10_sales.png",
        "review_vs_sales.png",
        "yearly_trend.png",
        "wordcloud.png",
    ] {
        let metadata = std::fs::metadata(plots.join(name))?;
        assert!(metadata.len() > 0, "{name} is empty");
    }
    Ok(())
}

#[test]
fn summary_statistics_are_logged() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let input = temp.path().join("books.csv");
    write_sample_table(&input)?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("bookscout");
    cmd.args([
        "analyze",
        "--input",
        input.to_str().unwrap(),
        "--out",
        temp.path().join("plots").to_str().unwrap(),
        "--font",
        temp.path().join("no-such-font.ttf").to_str().unwrap(),
        "--log-dir",
        temp.path().join("log").to_str().unwrap(),
    ])
    .assert()
    .success()
    .stderr(predicate::str::contains("summary statistics"))
    .stderr(predicate::str::contains("판매지수"))
    .stderr(predicate::str::contains("75%"));
    Ok(())
}

#[test]
fn missing_input_table_fails() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("bookscout");
    cmd.args([
        "analyze",
        "--input",
        temp.path().join("absent.csv").to_str().unwrap(),
        "--out",
        temp.path().join("plots").to_str().unwrap(),
        "--log-dir",
        temp.path().join("log").to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("load scrape table"));
    Ok(())
}

#[test]
fn scraped_table_round_trips_through_analysis_input() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    let input = temp.path().join("books.csv");
    write_sample_table(&input)?;

    let reloaded = bookscout::table_store::read_records(&input)?;
    assert_eq!(reloaded.len(), 4);
    assert_eq!(reloaded[2].sale_index, "N/A");
    assert_eq!(reloaded[2].title, "혼자 공부하는 머신러닝");

    let rows = bookscout::derive::derive_rows(&reloaded);
    let top: Vec<&str> = bookscout::derive::top_by_sale_index(&rows, 10)
        .iter()
        .map(|row| row.title.as_str())
        .collect();
    assert_eq!(top, vec!["A", "LLM 엔지니어링", "B", "혼자 공부하는 머신러닝"]);
    Ok(())
}
