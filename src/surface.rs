use crate::loader::TextBuffer;

/// Extra pixels between lines on top of the font size.
const LINE_SPACING: f32 = 6.0;

/// Read-only text viewport state. Rendering lives in `gui`; this only tracks
/// what is shown and where the view is scrolled to.
#[derive(Debug, Clone)]
pub struct DisplaySurface {
    buffer: TextBuffer,
    /// Bumped on every content swap so cached layouts can be invalidated.
    revision: u64,
    font_size: f32,
    /// First visible display line.
    scroll_line: usize,
    /// Largest valid `scroll_line` from the last layout.
    max_line: usize,
    visible_lines: usize,
}

impl DisplaySurface {
    pub fn new(font_size: f32) -> Self {
        Self {
            buffer: TextBuffer::default(),
            revision: 0,
            font_size,
            scroll_line: 0,
            max_line: 0,
            visible_lines: 1,
        }
    }

    /// Swap in a new document and jump back to the top.
    pub fn set_content(&mut self, buffer: TextBuffer) {
        self.buffer = buffer;
        self.revision += 1;
        self.show_from_top();
    }

    /// Re-show the current document from its first line.
    pub fn show_from_top(&mut self) {
        self.scroll_line = 0;
        self.max_line = 0;
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn line_height(&self) -> f32 {
        self.font_size + LINE_SPACING
    }

    pub fn scroll_line(&self) -> usize {
        self.scroll_line
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_line as f32 * self.line_height()
    }

    pub fn visible_lines(&self) -> usize {
        self.visible_lines
    }

    pub fn scroll_up(&mut self) {
        self.scroll_line = self.scroll_line.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_line < self.max_line {
            self.scroll_line += 1;
        }
    }

    /// Wheel or trackpad input: positive deltas scroll up, negative down.
    pub fn scroll_by_gesture(&mut self, delta: f32) {
        if delta > 0.0 {
            self.scroll_up();
        } else if delta < 0.0 {
            self.scroll_down();
        }
    }

    /// Feed back the wrapped line count of the last layout so scrolling stops
    /// at the end of the document.
    pub fn set_layout_lines(&mut self, total: usize) {
        self.max_line = total.saturating_sub(self.visible_lines);
        self.scroll_line = self.scroll_line.min(self.max_line);
    }

    /// Recompute how many lines fit in `height` pixels.
    pub fn fit_height(&mut self, height: f32) {
        let line_height = self.line_height();
        if height > 0.0 && line_height > 0.0 {
            self.visible_lines = ((height / line_height) as usize).max(1);
        }
    }
}
