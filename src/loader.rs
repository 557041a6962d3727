use encoding_rs::{Encoding, GBK, UTF_8};
use std::path::Path;

/// Name of the file picked up from the working directory at startup.
pub const DEFAULT_NOVEL_FILE: &str = "novel1.txt";

const ERROR_PREFIX: &str = "[error] failed to read file";

/// Fully decoded document, displayed as a single block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        self.text.starts_with(ERROR_PREFIX)
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Decode raw bytes: BOM, then strict GBK, then strict UTF-8, then lossy UTF-8.
pub fn decode(bytes: &[u8]) -> String {
    if let Some((enc, bom_len)) = Encoding::for_bom(bytes) {
        if enc == UTF_8 {
            return String::from_utf8_lossy(&bytes[bom_len..]).into_owned();
        }
    }
    if let Some(text) = GBK.decode_without_bom_handling_and_without_replacement(bytes) {
        return text.into_owned();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => {
            tracing::debug!("falling back to lossy utf-8 decoding");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

pub fn read_text(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode(&bytes))
}

/// Load a document. Read failures become an error block instead of an `Err`
/// so there is always something to show.
pub fn load(path: impl AsRef<Path>) -> TextBuffer {
    let path = path.as_ref();
    match read_text(path) {
        Ok(text) => {
            tracing::info!(path = %path.display(), bytes = text.len(), "novel loaded");
            TextBuffer::new(text)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "failed to load novel: {e}");
            TextBuffer::new(format!("{ERROR_PREFIX}: {e}"))
        }
    }
}

/// Startup content: the default novel when present, otherwise usage hints.
pub fn initial_content(default_file: &Path, restore_hotkey: &str) -> TextBuffer {
    if default_file.exists() {
        load(default_file)
    } else {
        placeholder(restore_hotkey)
    }
}

pub fn placeholder(restore_hotkey: &str) -> TextBuffer {
    TextBuffer::new(
        [
            "[hint] Press F to choose a novel file".to_string(),
            "[hint] Press H to hide/show the window".to_string(),
            "[hint] Press C to take the background color under the cursor".to_string(),
            "[hint] Up/Down arrows scroll one line".to_string(),
            format!("[hint] Press {restore_hotkey} anywhere to bring the window back"),
            "[hint] Esc quits".to_string(),
        ]
        .join("\n"),
    )
}
