//! Bar, scatter and line charts rendered to PNG with plotters.
//!
//! Text is only drawn when `labelled` is set, i.e. when a chart font could be
//! registered; without one the same geometry is drawn bare.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::derive::BookRow;
use crate::fonts::FONT_FAMILY;

pub const TOP_SALES_FILE: &str = "top_10_sales.png";
pub const REVIEW_VS_SALES_FILE: &str = "review_vs_sales.png";
pub const YEARLY_TREND_FILE: &str = "yearly_trend.png";

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const ORANGE: RGBColor = RGBColor(255, 165, 0);
const FOREST_GREEN: RGBColor = RGBColor(34, 139, 34);

const TITLE_LABEL_CHARS: usize = 28;

type DrawResult = Result<(), Box<dyn Error>>;

/// Horizontal bars of `top` (already ranked, highest first), highest at the top.
pub fn draw_top_sales(path: &Path, top: &[&BookRow], labelled: bool) -> anyhow::Result<()> {
    top_sales(path, top, labelled)
        .map_err(|err| anyhow::anyhow!("draw {}: {err}", path.display()))
}

pub fn draw_review_vs_sales(path: &Path, rows: &[BookRow], labelled: bool) -> anyhow::Result<()> {
    review_vs_sales(path, rows, labelled)
        .map_err(|err| anyhow::anyhow!("draw {}: {err}", path.display()))
}

/// `counts` must be non-empty and sorted by year.
pub fn draw_yearly_trend(
    path: &Path,
    counts: &[(i32, usize)],
    labelled: bool,
) -> anyhow::Result<()> {
    if counts.is_empty() {
        anyhow::bail!("no publication years to plot");
    }
    yearly_trend(path, counts, labelled)
        .map_err(|err| anyhow::anyhow!("draw {}: {err}", path.display()))
}

fn top_sales(path: &Path, top: &[&BookRow], labelled: bool) -> DrawResult {
    let root = BitMapBackend::new(path, (1200, 1000)).into_drawing_area();
    root.fill(&WHITE)?;

    let slots = top.len().max(1);
    let x_max = axis_max(top.iter().map(|row| row.sale_index));
    // Slot 0 is the bottom row, so the best seller gets the last slot.
    let slot_of = |rank: usize| (slots - 1 - rank) as f64;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if labelled {
        builder
            .caption("YES24 AI 도서 판매지수 TOP 10", (FONT_FAMILY, 28))
            .x_label_area_size(50)
            .y_label_area_size(360);
    }
    let mut chart = builder.build_cartesian_2d(0.0..x_max, -0.5..(slots as f64 - 0.5))?;

    if labelled {
        let labels: Vec<String> = top.iter().map(|row| short_title(&row.title)).collect();
        let slot_label = |y: &f64| -> String {
            let slot = y.round();
            if (y - slot).abs() > 1e-6 || slot < 0.0 {
                return String::new();
            }
            let rank = slots as i64 - 1 - slot as i64;
            usize::try_from(rank)
                .ok()
                .and_then(|rank| labels.get(rank).cloned())
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(slots)
            .y_label_formatter(&slot_label)
            .x_desc("판매지수")
            .label_style((FONT_FAMILY, 14))
            .axis_desc_style((FONT_FAMILY, 16))
            .draw()?;
    }

    chart.draw_series(top.iter().enumerate().map(|(rank, row)| {
        let slot = slot_of(rank);
        Rectangle::new(
            [(0.0, slot - 0.4), (row.sale_index, slot + 0.4)],
            SKY_BLUE.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn review_vs_sales(path: &Path, rows: &[BookRow], labelled: bool) -> DrawResult {
    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = axis_max(rows.iter().map(|row| row.review_count));
    let y_max = axis_max(rows.iter().map(|row| row.sale_index));

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if labelled {
        builder
            .caption("리뷰 수와 판매지수의 상관관계", (FONT_FAMILY, 26))
            .x_label_area_size(50)
            .y_label_area_size(80);
    }
    let mut chart = builder.build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    if labelled {
        chart
            .configure_mesh()
            .x_desc("리뷰 수")
            .y_desc("판매지수")
            .label_style((FONT_FAMILY, 14))
            .axis_desc_style((FONT_FAMILY, 16))
            .light_line_style(BLACK.mix(0.05))
            .draw()?;
    }

    chart.draw_series(
        rows.iter()
            .map(|row| Circle::new((row.review_count, row.sale_index), 4, ORANGE.mix(0.5).filled())),
    )?;

    root.present()?;
    Ok(())
}

fn yearly_trend(path: &Path, counts: &[(i32, usize)], labelled: bool) -> DrawResult {
    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let first_year = counts.first().map(|(year, _)| *year).unwrap_or_default();
    let last_year = counts.last().map(|(year, _)| *year).unwrap_or_default();
    let max_count = counts.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let points: Vec<(i32, u32)> = counts
        .iter()
        .map(|(year, count)| (*year, u32::try_from(*count).unwrap_or(u32::MAX)))
        .collect();

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if labelled {
        builder
            .caption("연도별 AI 도서 발행 추이", (FONT_FAMILY, 26))
            .x_label_area_size(50)
            .y_label_area_size(60);
    }
    let mut chart = builder.build_cartesian_2d(
        (first_year - 1)..(last_year + 1),
        0u32..(u32::try_from(max_count).unwrap_or(u32::MAX).saturating_add(1)),
    )?;

    if labelled {
        chart
            .configure_mesh()
            .x_desc("발행연도")
            .y_desc("발행 권수")
            .x_label_formatter(&|year| year.to_string())
            .label_style((FONT_FAMILY, 14))
            .axis_desc_style((FONT_FAMILY, 16))
            .draw()?;
    }

    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        FOREST_GREEN.stroke_width(2),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|point| Circle::new(*point, 5, FOREST_GREEN.filled())),
    )?;

    root.present()?;
    Ok(())
}

// Upper axis bound with some headroom; never empty.
fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.05 } else { 1.0 }
}

fn short_title(title: &str) -> String {
    if title.chars().count() <= TITLE_LABEL_CHARS {
        return title.to_owned();
    }
    let mut short: String = title.chars().take(TITLE_LABEL_CHARS).collect();
    short.push('…');
    short
}
