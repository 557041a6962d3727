use eframe::egui;

/// Opacity used whenever the overlay is shown.
pub const VISIBLE_OPACITY: f32 = 0.95;

/// Minimal view of an egui context so visibility handling can be tested
/// without a running window.
pub trait ViewportCtx {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand);
    fn request_repaint(&self);
}

impl ViewportCtx for egui::Context {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        egui::Context::send_viewport_cmd(self, cmd);
    }

    fn request_repaint(&self) {
        egui::Context::request_repaint(self);
    }
}

/// Either fully transparent or at the configured visible level, never in between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityState {
    opacity: f32,
    visible_level: f32,
}

impl VisibilityState {
    pub fn new(visible_level: f32) -> Self {
        let visible_level = if visible_level > 0.0 {
            visible_level.min(1.0)
        } else {
            VISIBLE_OPACITY
        };
        Self {
            opacity: visible_level,
            visible_level,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Flip between hidden and visible. Returns the new visibility.
    pub fn toggle(&mut self) -> bool {
        if self.is_visible() {
            self.opacity = 0.0;
        } else {
            self.opacity = self.visible_level;
        }
        self.is_visible()
    }

    /// Force the visible level. Returns `true` if the state changed.
    pub fn restore(&mut self) -> bool {
        let changed = !self.is_visible();
        self.opacity = self.visible_level;
        changed
    }
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self::new(VISIBLE_OPACITY)
    }
}

/// Push the visibility state to the native window.
///
/// A hidden overlay lets the mouse through so it does not swallow clicks
/// meant for the windows underneath. Showing it again also grabs focus.
pub fn apply_visibility<C: ViewportCtx>(ctx: &C, state: &VisibilityState) {
    if state.is_visible() {
        tracing::debug!(opacity = state.opacity(), "showing overlay");
        ctx.send_viewport_cmd(egui::ViewportCommand::MousePassthrough(false));
        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
        ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(false));
        ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
    } else {
        tracing::debug!("hiding overlay");
        ctx.send_viewport_cmd(egui::ViewportCommand::MousePassthrough(true));
    }
    ctx.request_repaint();
}
