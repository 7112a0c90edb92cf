use std::path::{Path, PathBuf};

use anyhow::Context as _;
use plotters::style::FontStyle;

/// Family name every chart, word cloud included, draws its text with.
pub const FONT_FAMILY: &str = "bookscout";

/// Hangul-capable system font for the host OS family.
pub fn default_font_path() -> PathBuf {
    if cfg!(target_os = "windows") {
        PathBuf::from("C:/Windows/Fonts/malgun.ttf")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/System/Library/Fonts/AppleSDGothicNeo.ttc")
    } else {
        PathBuf::from("/usr/share/fonts/truetype/nanum/NanumGothic.ttf")
    }
}

pub fn resolve_font_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_font_path)
}

/// Loads a font file and makes it available to plotters under `family`.
///
/// plotters keeps registered fonts for the rest of the process, so the file
/// contents are leaked once they parse as a font.
pub fn register(family: &str, path: &Path) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read font file: {}", path.display()))?;
    ab_glyph::FontRef::try_from_slice(&bytes)
        .map_err(|err| anyhow::anyhow!("load font {}: {err}", path.display()))?;

    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font(family, FontStyle::Normal, bytes)
        .map_err(|_| anyhow::anyhow!("load font {}: not a usable font file", path.display()))
}

/// Font checked into the test fixtures.
#[cfg(test)]
pub(crate) fn fixture_font_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf")
}
