use eframe::egui;
use std::path::{Path, PathBuf};

const FONT_NAME: &str = "novel";

/// Platform fonts that cover CJK text, tried in order.
pub fn font_candidates() -> Vec<PathBuf> {
    let paths: &[&str] = if cfg!(target_os = "windows") {
        &[
            r"C:\Windows\Fonts\msyh.ttc",
            r"C:\Windows\Fonts\msyh.ttf",
            r"C:\Windows\Fonts\simsun.ttc",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/System/Library/Fonts/PingFang.ttc",
            "/System/Library/Fonts/STHeiti Light.ttc",
        ]
    } else {
        &[
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
            "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
        ]
    };
    paths.iter().map(PathBuf::from).collect()
}

/// Read the configured font, or the first platform candidate that exists.
pub fn find_font(configured: Option<&Path>) -> Option<(PathBuf, Vec<u8>)> {
    let configured = configured.map(Path::to_path_buf);
    configured
        .into_iter()
        .chain(font_candidates())
        .find_map(|path| match std::fs::read(&path) {
            Ok(bytes) => Some((path, bytes)),
            Err(e) => {
                tracing::debug!(path = %path.display(), "font not usable: {e}");
                None
            }
        })
}

/// Put the found font in front of egui's defaults so CJK glyphs render.
pub fn install(ctx: &egui::Context, configured: Option<&Path>) {
    let Some((path, bytes)) = find_font(configured) else {
        tracing::info!("no CJK font found; using bundled fonts");
        return;
    };
    tracing::info!(path = %path.display(), "using font");

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(FONT_NAME.to_owned(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .insert(0, FONT_NAME.to_owned());
    }
    ctx.set_fonts(fonts);
}
