use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::charts;
use crate::cli::AnalyzeArgs;
use crate::derive::{self, BookRow};
use crate::fonts;
use crate::stats::Summary;
use crate::wordcloud;

const TOP_N: usize = 10;

#[derive(Debug)]
pub struct AnalysisReport {
    pub rows: usize,
    pub summary: Summary,
    /// Charts written, in render order.
    pub charts: Vec<PathBuf>,
    /// Charts attempted but not written, with the reason.
    pub failed: Vec<(&'static str, String)>,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<AnalysisReport> {
    let input = PathBuf::from(&args.input);
    let out_dir = PathBuf::from(&args.out);

    if !out_dir.exists() {
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("create plot dir: {}", out_dir.display()))?;
        tracing::info!(dir = %out_dir.display(), "created plot directory");
    }

    tracing::info!(input = %input.display(), "loading table");
    let records = crate::table_store::read_records(&input).context("load scrape table")?;

    tracing::info!(records = records.len(), "deriving columns");
    let rows = derive::derive_rows(&records);

    let summary = Summary::of(&rows);
    tracing::info!("summary statistics:\n{}", summary.render_table());

    let font_path = fonts::resolve_font_path(args.font.as_deref());
    let font_error = match fonts::register(fonts::FONT_FAMILY, &font_path) {
        Ok(()) => None,
        Err(err) => {
            tracing::warn!("chart text disabled: {err:#}");
            Some(format!("{err:#}"))
        }
    };
    let labelled = font_error.is_none();

    let mut report = AnalysisReport {
        rows: rows.len(),
        summary,
        charts: Vec::new(),
        failed: Vec::new(),
    };

    tracing::info!("rendering charts");
    let top = derive::top_by_sale_index(&rows, TOP_N);
    render_guarded(&mut report, &out_dir, charts::TOP_SALES_FILE, |path| {
        charts::draw_top_sales(path, &top, labelled)
    });
    render_guarded(&mut report, &out_dir, charts::REVIEW_VS_SALES_FILE, |path| {
        charts::draw_review_vs_sales(path, &rows, labelled)
    });

    let yearly = derive::yearly_counts(&rows);
    if yearly.is_empty() {
        tracing::info!("no valid publication years; skipping yearly trend");
    } else {
        render_guarded(&mut report, &out_dir, charts::YEARLY_TREND_FILE, |path| {
            charts::draw_yearly_trend(path, &yearly, labelled)
        });
    }

    tracing::info!(font = %font_path.display(), "rendering word cloud");
    render_guarded(&mut report, &out_dir, wordcloud::WORDCLOUD_FILE, |path| {
        if let Some(reason) = &font_error {
            anyhow::bail!("word cloud needs a font: {reason}");
        }
        let titles: Vec<&str> = rows.iter().map(|row: &BookRow| row.title.as_str()).collect();
        wordcloud::draw_wordcloud(path, &titles, fonts::FONT_FAMILY)
    });

    tracing::info!(
        written = report.charts.len(),
        failed = report.failed.len(),
        out = %out_dir.display(),
        "analysis complete"
    );
    Ok(report)
}

// A failed chart is logged and recorded; the remaining charts still run.
fn render_guarded<F>(report: &mut AnalysisReport, out_dir: &Path, file_name: &'static str, draw: F)
where
    F: FnOnce(&Path) -> anyhow::Result<()>,
{
    let path = out_dir.join(file_name);
    match draw(&path) {
        Ok(()) => {
            tracing::info!(chart = file_name, path = %path.display(), "chart saved");
            report.charts.push(path);
        }
        Err(err) => {
            tracing::error!(chart = file_name, "chart failed: {err:#}");
            report.failed.push((file_name, format!("{err:#}")));
        }
    }
}
