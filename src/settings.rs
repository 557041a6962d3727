use crate::color::Rgb;
use crate::hotkey::{Hotkey, DEFAULT_RESTORE_HOTKEY};
use crate::loader::DEFAULT_NOVEL_FILE;
use crate::visibility::VISIBLE_OPACITY;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKGROUND: Rgb = Rgb(40, 38, 42);

/// Optional overrides read from `settings.json`. The file is never written;
/// every field falls back to the built-in overlay defaults.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Global chord restoring a hidden overlay.
    #[serde(default = "default_hotkey")]
    pub restore_hotkey: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// TrueType/OpenType file used for the text. When absent a platform CJK
    /// font is looked up, then egui's bundled fonts are used.
    #[serde(default)]
    pub font_path: Option<String>,
    #[serde(default = "default_window_size")]
    pub window_size: (f32, f32),
    #[serde(default)]
    pub window_pos: Option<(f32, f32)>,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    #[serde(default = "default_background")]
    pub background: Rgb,
    /// Novel loaded at startup when it exists.
    #[serde(default = "default_novel")]
    pub default_file: String,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_hotkey() -> String {
    DEFAULT_RESTORE_HOTKEY.into()
}

fn default_font_size() -> f32 {
    14.0
}

fn default_window_size() -> (f32, f32) {
    (800.0, 150.0)
}

fn default_opacity() -> f32 {
    VISIBLE_OPACITY
}

fn default_background() -> Rgb {
    DEFAULT_BACKGROUND
}

fn default_novel() -> String {
    DEFAULT_NOVEL_FILE.into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            restore_hotkey: default_hotkey(),
            font_size: default_font_size(),
            font_path: None,
            window_size: default_window_size(),
            window_pos: None,
            opacity: default_opacity(),
            background: default_background(),
            default_file: default_novel(),
            debug_logging: false,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn restore_hotkey(&self) -> Hotkey {
        match self.restore_hotkey.parse::<Hotkey>() {
            Ok(k) => k,
            Err(e) => {
                tracing::warn!(
                    "restore hotkey '{}' rejected ({e}); using default {}",
                    self.restore_hotkey,
                    DEFAULT_RESTORE_HOTKEY
                );
                Hotkey::default()
            }
        }
    }
}
