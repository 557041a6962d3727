use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

/// Per-channel offset used when deriving the foreground candidates.
const SHIFT: i16 = 30;
/// Minimum brightness difference (in thousandths) a candidate must reach.
const MIN_DIFF_MILLI: i32 = 15_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Perceptual brightness scaled by 1000 (`0.299R + 0.587G + 0.114B`).
    pub fn brightness_milli(self) -> i32 {
        self.0 as i32 * 299 + self.1 as i32 * 587 + self.2 as i32 * 114
    }

    pub fn brightness(self) -> f32 {
        self.brightness_milli() as f32 / 1000.0
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn shifted(self, by: i16) -> Self {
        let ch = |c: u8| (c as i16 + by).clamp(0, 255) as u8;
        Rgb(ch(self.0), ch(self.1), ch(self.2))
    }
}

impl From<Rgb> for Color32 {
    fn from(c: Rgb) -> Self {
        Color32::from_rgb(c.0, c.1, c.2)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Rgb(c[0], c[1], c[2])
    }
}

/// Pick a foreground that stays readable on `bg` without standing out.
///
/// The lighter shift wins ties. When neither shift moves brightness far
/// enough, each channel is XOR-ed with 15 instead.
pub fn contrast_color(bg: Rgb) -> Rgb {
    let base = bg.brightness_milli();
    let brighter = bg.shifted(SHIFT);
    let darker = bg.shifted(-SHIFT);
    let bright_diff = (brighter.brightness_milli() - base).abs();
    let dark_diff = (darker.brightness_milli() - base).abs();

    if bright_diff >= dark_diff && bright_diff >= MIN_DIFF_MILLI {
        brighter
    } else if dark_diff >= MIN_DIFF_MILLI {
        darker
    } else {
        Rgb(bg.0 ^ 15, bg.1 ^ 15, bg.2 ^ 15)
    }
}

/// Background and the foreground derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorState {
    background: Rgb,
    foreground: Rgb,
}

impl ColorState {
    pub fn new(background: Rgb) -> Self {
        Self {
            background,
            foreground: contrast_color(background),
        }
    }

    /// Replace the background; the foreground always follows it.
    pub fn apply_background(&mut self, rgb: Rgb) {
        self.background = rgb;
        self.foreground = contrast_color(rgb);
        tracing::debug!(
            bg = %rgb.to_hex(),
            fg = %self.foreground.to_hex(),
            "background color applied"
        );
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn foreground(&self) -> Rgb {
        self.foreground
    }
}

impl Default for ColorState {
    fn default() -> Self {
        Self::new(crate::settings::DEFAULT_BACKGROUND)
    }
}
