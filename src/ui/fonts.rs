use std::path::Path;
use std::sync::Arc;

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

// ---------------------------------------------------------------------------
// Hangul font fallback
// ---------------------------------------------------------------------------

/// egui's bundled fonts have no Hangul glyphs, so region names and labels
/// need a system font. First readable candidate wins.
const CANDIDATES: &[&str] = &[
    // Linux
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    // macOS
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    // Windows
    "C:\\Windows\\Fonts\\malgun.ttf",
];

/// Register the first available Hangul font as a fallback for both families.
pub fn install_hangul_font(ctx: &egui::Context) {
    let Some((path, bytes)) = CANDIDATES
        .iter()
        .map(Path::new)
        .find_map(|p| std::fs::read(p).ok().map(|b| (p, b)))
    else {
        log::warn!("No Hangul font found; Korean labels may not render");
        return;
    };

    log::info!("Using Hangul font {}", path.display());
    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert("hangul".to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push("hangul".to_owned());
    }
    ctx.set_fonts(fonts);
}
