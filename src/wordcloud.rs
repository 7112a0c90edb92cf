//! Word cloud of listing titles: token frequencies, spiral placement, and PNG
//! rendering with plotters.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context as _;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use regex::Regex;

pub const WORDCLOUD_FILE: &str = "wordcloud.png";

const CANVAS: (u32, u32) = (800, 400);
const MAX_WORDS: usize = 200;
const MIN_FONT_PX: f64 = 10.0;
const SHRINK: f64 = 0.85;
const SPIRAL_PX_PER_RAD: f64 = 3.0;
const SPIRAL_STEP_PX: f64 = 6.0;
const PADDING_PX: i32 = 2;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w[\w']+").expect("token pattern is valid"));

const PALETTE: [RGBColor; 6] = [
    RGBColor(68, 1, 84),
    RGBColor(59, 82, 139),
    RGBColor(33, 145, 140),
    RGBColor(94, 201, 98),
    RGBColor(49, 104, 142),
    RGBColor(253, 231, 37),
];

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub font_px: f64,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    rank: usize,
}

impl PlacedWord {
    fn overlaps(&self, x: i32, y: i32, width: u32, height: u32) -> bool {
        let (w, h) = (width as i32, height as i32);
        let (sw, sh) = (self.width as i32, self.height as i32);
        x < self.x + sw + PADDING_PX
            && self.x < x + w + PADDING_PX
            && y < self.y + sh + PADDING_PX
            && self.y < y + h + PADDING_PX
    }
}

/// Token counts over `text`, most frequent first (ties alphabetical), capped
/// at the word limit.
pub fn word_frequencies(text: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in TOKEN.find_iter(text) {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let mut words: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(word, count)| (word.to_owned(), count))
        .collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words.truncate(MAX_WORDS);
    words
}

/// Places words on an Archimedean spiral around the canvas centre, largest
/// first. A word that does not fit shrinks until the minimum size and is
/// dropped after that. `measure` returns the pixel box of a word at a size.
pub fn layout_words<M>(
    words: &[(String, usize)],
    canvas: (u32, u32),
    mut measure: M,
) -> anyhow::Result<Vec<PlacedWord>>
where
    M: FnMut(&str, f64) -> anyhow::Result<(u32, u32)>,
{
    let Some(max_count) = words.iter().map(|(_, count)| *count).max() else {
        return Ok(Vec::new());
    };
    let max_font_px = f64::from(canvas.1) / 4.0;

    let mut placed: Vec<PlacedWord> = Vec::new();
    for (rank, (text, count)) in words.iter().enumerate() {
        let weight = *count as f64 / max_count as f64;
        let mut font_px = MIN_FONT_PX + (max_font_px - MIN_FONT_PX) * weight;

        while font_px >= MIN_FONT_PX {
            let (width, height) = measure(text, font_px)?;
            if let Some((x, y)) = find_spot(&placed, canvas, width, height) {
                placed.push(PlacedWord {
                    text: text.clone(),
                    font_px,
                    x,
                    y,
                    width,
                    height,
                    rank,
                });
                break;
            }
            font_px *= SHRINK;
        }
    }
    Ok(placed)
}

fn find_spot(
    placed: &[PlacedWord],
    canvas: (u32, u32),
    width: u32,
    height: u32,
) -> Option<(i32, i32)> {
    let (canvas_w, canvas_h) = (canvas.0 as i32, canvas.1 as i32);
    let (w, h) = (width as i32, height as i32);
    if w > canvas_w || h > canvas_h {
        return None;
    }

    let (cx, cy) = (f64::from(canvas.0) / 2.0, f64::from(canvas.1) / 2.0);
    let max_radius = cx.hypot(cy);
    let mut theta = 0.0_f64;
    loop {
        let radius = SPIRAL_PX_PER_RAD * theta;
        if radius > max_radius {
            return None;
        }

        let x = (cx + radius * theta.cos()) as i32 - w / 2;
        let y = (cy + radius * theta.sin()) as i32 - h / 2;
        let inside = x >= 0 && y >= 0 && x + w <= canvas_w && y + h <= canvas_h;
        if inside && !placed.iter().any(|word| word.overlaps(x, y, width, height)) {
            return Some((x, y));
        }

        theta += SPIRAL_STEP_PX / radius.max(SPIRAL_STEP_PX);
    }
}

fn word_font(family: &str, font_px: f64) -> FontDesc<'_> {
    FontDesc::new(FontFamily::Name(family), font_px, FontStyle::Normal)
}

/// Renders the word cloud of `titles` to `path` with the font registered as
/// `family`. Every failure happens before the image file is created.
pub fn draw_wordcloud(path: &Path, titles: &[&str], family: &str) -> anyhow::Result<()> {
    let text = titles.join(" ");
    let words = word_frequencies(&text);
    if words.is_empty() {
        anyhow::bail!("titles contain no words");
    }

    let placed = layout_words(&words, CANVAS, |word, font_px| {
        word_font(family, font_px)
            .box_size(word)
            .map_err(|err| anyhow::anyhow!("measure {word:?}: {err:?}"))
    })
    .context("lay out words")?;
    tracing::debug!(words = words.len(), placed = placed.len(), "word cloud layout");

    render(path, &placed, family)
        .map_err(|err| anyhow::anyhow!("draw {}: {err}", path.display()))
}

fn render(
    path: &Path,
    placed: &[PlacedWord],
    family: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE)?;

    for word in placed {
        let color = PALETTE[word.rank % PALETTE.len()];
        let style = word_font(family, word.font_px).color(&color);
        root.draw(&Text::new(word.text.as_str(), (word.x, word.y), style))?;
    }

    root.present()?;
    Ok(())
}
