#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use novel_overlay::fonts;
use novel_overlay::gui::{ReaderApp, UiRequest};
use novel_overlay::hotkey::HotkeyListener;
use novel_overlay::loader;
use novel_overlay::logging;
use novel_overlay::settings::Settings;
use novel_overlay::window::{MIN_HEIGHT, MIN_WIDTH};

use eframe::egui;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load("settings.json")?;
    logging::init(settings.debug_logging, settings.log_file.as_ref().map(PathBuf::from));
    tracing::info!("starting novel overlay");

    let listener = HotkeyListener::new(settings.restore_hotkey());
    let mouse_pos = listener.mouse_pos.clone();
    let content = loader::initial_content(Path::new(&settings.default_file), &settings.restore_hotkey);
    let (tx, rx) = mpsc::channel::<UiRequest>();

    let mut viewport = egui::ViewportBuilder::default()
        .with_title("Novel Reader")
        .with_inner_size(settings.window_size)
        .with_min_inner_size([MIN_WIDTH, MIN_HEIGHT])
        .with_decorations(false)
        .with_transparent(true)
        .with_always_on_top();
    if let Some(pos) = settings.window_pos {
        viewport = viewport.with_position(pos);
    }
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Novel Reader",
        native_options,
        Box::new(move |cc| {
            fonts::install(&cc.egui_ctx, settings.font_path.as_deref().map(Path::new));

            // The hook thread only posts a request and wakes the GUI thread.
            let ctx = cc.egui_ctx.clone();
            listener.start(move || {
                if tx.send(UiRequest::RestoreVisibility).is_ok() {
                    ctx.request_repaint();
                }
            });

            Box::new(ReaderApp::new(&settings, content, rx, mouse_pos))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to run overlay window: {e}"))?;

    tracing::info!("overlay closed");
    Ok(())
}
