use crate::color::{ColorState, Rgb};
use crate::loader::{self, TextBuffer};
use crate::screen;
use crate::settings::Settings;
use crate::surface::DisplaySurface;
use crate::visibility::{apply_visibility, ViewportCtx, VisibilityState};
use crate::window::{WindowController, WindowGeometry, RESIZE_HANDLE};
use eframe::egui;
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Padding between the window edge and the text.
const TEXT_MARGIN: f32 = 4.0;

/// Requests posted to the GUI thread from elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiRequest {
    RestoreVisibility,
}

/// Keyboard commands available while the overlay has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    OpenFile,
    ToggleVisibility,
    PickColor,
    ScrollUp,
    ScrollDown,
}

const BOUND_KEYS: [egui::Key; 6] = [
    egui::Key::Escape,
    egui::Key::F,
    egui::Key::H,
    egui::Key::C,
    egui::Key::ArrowUp,
    egui::Key::ArrowDown,
];

pub fn command_for_key(key: egui::Key) -> Option<Command> {
    match key {
        egui::Key::Escape => Some(Command::Quit),
        egui::Key::F => Some(Command::OpenFile),
        egui::Key::H => Some(Command::ToggleVisibility),
        egui::Key::C => Some(Command::PickColor),
        egui::Key::ArrowUp => Some(Command::ScrollUp),
        egui::Key::ArrowDown => Some(Command::ScrollDown),
        _ => None,
    }
}

#[derive(Clone, Copy, PartialEq)]
struct LayoutKey {
    revision: u64,
    width: f32,
    color: egui::Color32,
}

pub struct ReaderApp {
    surface: DisplaySurface,
    colors: ColorState,
    visibility: VisibilityState,
    window: WindowController,
    requests: Receiver<UiRequest>,
    /// Global cursor as last seen by the hotkey hook.
    mouse_pos: Arc<Mutex<Option<(f64, f64)>>>,
    native_ppp: f32,
    bring_to_front: bool,
    layout: Option<(LayoutKey, Arc<egui::Galley>)>,
}

impl ReaderApp {
    pub fn new(
        settings: &Settings,
        content: TextBuffer,
        requests: Receiver<UiRequest>,
        mouse_pos: Arc<Mutex<Option<(f64, f64)>>>,
    ) -> Self {
        let (w, h) = settings.window_size;
        let pos = settings.window_pos.unwrap_or((0.0, 0.0));
        let geometry = WindowGeometry::new(egui::pos2(pos.0, pos.1), egui::vec2(w, h));

        let mut surface = DisplaySurface::new(settings.font_size);
        surface.set_content(content);
        surface.fit_height(geometry.size.y - 2.0 * TEXT_MARGIN);

        Self {
            surface,
            colors: ColorState::new(settings.background),
            visibility: VisibilityState::new(settings.opacity),
            window: WindowController::new(geometry),
            requests,
            mouse_pos,
            native_ppp: 1.0,
            bring_to_front: false,
            layout: None,
        }
    }

    pub fn surface(&self) -> &DisplaySurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DisplaySurface {
        &mut self.surface
    }

    pub fn colors(&self) -> ColorState {
        self.colors
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    pub fn window(&self) -> &WindowController {
        &self.window
    }

    pub fn load_file(&mut self, path: &Path) {
        self.surface.set_content(loader::load(path));
    }

    /// Take the window system's view of the geometry. A size change we did
    /// not drive ourselves (e.g. an OS resize) refits the visible lines.
    pub fn observe_viewport(&mut self, pos: Option<egui::Pos2>, size: Option<egui::Vec2>) {
        if self.window.observe(pos, size) {
            let height = self.window.geometry().size.y;
            self.surface.fit_height(height - 2.0 * TEXT_MARGIN);
            tracing::debug!(height, lines = self.surface.visible_lines(), "refit after resize");
        }
    }

    /// Drain requests from other threads. Returns `true` if the overlay was restored.
    pub fn process_requests<C: ViewportCtx>(&mut self, ctx: &C) -> bool {
        let mut restored = false;
        while let Ok(req) = self.requests.try_recv() {
            match req {
                UiRequest::RestoreVisibility => {
                    tracing::debug!("restore requested by global hotkey");
                    self.visibility.restore();
                    apply_visibility(ctx, &self.visibility);
                    self.bring_to_front = true;
                    restored = true;
                }
            }
        }
        restored
    }

    pub fn run_command<C: ViewportCtx>(&mut self, ctx: &C, cmd: Command) {
        tracing::debug!(?cmd, "command");
        match cmd {
            Command::Quit => {
                tracing::info!("quit requested");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            Command::OpenFile => self.open_file_dialog(),
            Command::ToggleVisibility => self.toggle_visibility(ctx),
            Command::PickColor => self.pick_color_at_cursor(ctx),
            Command::ScrollUp => self.surface.scroll_up(),
            Command::ScrollDown => self.surface.scroll_down(),
        }
    }

    pub fn toggle_visibility<C: ViewportCtx>(&mut self, ctx: &C) {
        let visible = self.visibility.toggle();
        apply_visibility(ctx, &self.visibility);
        if visible {
            self.bring_to_front = true;
        }
    }

    /// Use `rgb` as the new background and center the window on `cursor`
    /// (physical screen pixels).
    pub fn apply_sampled_color<C: ViewportCtx>(&mut self, ctx: &C, rgb: Rgb, cursor: (i32, i32)) {
        self.colors.apply_background(rgb);
        let cursor = self.to_points(cursor.0 as f64, cursor.1 as f64);
        let pos = self.window.recenter_on(cursor);
        ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(pos));
        ctx.request_repaint();
    }

    fn pick_color_at_cursor<C: ViewportCtx>(&mut self, ctx: &C) {
        let Some((x, y)) = screen::cursor_position(self.hook_cursor()) else {
            tracing::warn!("cursor position unknown; move the mouse and try again");
            return;
        };
        match screen::sample_pixel(x, y) {
            Ok(rgb) => self.apply_sampled_color(ctx, rgb, (x, y)),
            Err(e) => tracing::warn!("failed to sample screen at ({x}, {y}): {e}"),
        }
    }

    fn open_file_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Choose a novel")
            .add_filter("Text files", &["txt"])
            .add_filter("All files", &["*"])
            .pick_file();
        if let Some(path) = picked {
            self.load_file(&path);
        }
    }

    fn hook_cursor(&self) -> Option<(f64, f64)> {
        self.mouse_pos.lock().ok().and_then(|p| *p)
    }

    fn to_points(&self, x: f64, y: f64) -> egui::Pos2 {
        let ppp = self.native_ppp.max(f32::EPSILON);
        egui::pos2(x as f32 / ppp, y as f32 / ppp)
    }

    fn global_cursor(&self) -> Option<egui::Pos2> {
        screen::cursor_position(self.hook_cursor()).map(|(x, y)| self.to_points(x as f64, y as f64))
    }

    fn handle_move(&mut self, ctx: &egui::Context, body: &egui::Response) {
        if body.drag_started_by(egui::PointerButton::Primary) {
            match (self.global_cursor(), body.interact_pointer_pos()) {
                (Some(_), Some(local)) => self.window.begin_move(local.to_vec2()),
                // No global cursor available: let the window system drag.
                _ => ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag),
            }
        }
        if !self.window.is_moving() {
            return;
        }
        if !body.dragged() {
            self.window.end_move();
            return;
        }
        if let Some(pos) = self.global_cursor().and_then(|c| self.window.drag_move(c)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(pos));
        }
    }

    fn handle_resize(&mut self, ctx: &egui::Context, handle: &egui::Response) {
        if handle.drag_started_by(egui::PointerButton::Primary) {
            match self.global_cursor() {
                Some(cursor) => self.window.begin_resize(cursor),
                None => ctx.send_viewport_cmd(egui::ViewportCommand::BeginResize(
                    egui::viewport::ResizeDirection::SouthEast,
                )),
            }
        }
        if !self.window.is_resizing() {
            return;
        }
        if !handle.dragged() {
            self.window.end_resize();
            return;
        }
        if let Some(cursor) = self.global_cursor() {
            if let Some(size) = self.window.drag_resize(cursor, Instant::now()) {
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
            }
        }
    }

    fn run_timers(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let out = self.window.poll_timers(now);
        let size = self.window.geometry().size;
        if out.apply_size {
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
        }
        if out.refit {
            self.surface.fit_height(size.y - 2.0 * TEXT_MARGIN);
        }
        if out.redisplay {
            self.surface.show_from_top();
            self.window.finish_redisplay();
        }
        if let Some(deadline) = self.window.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }

    fn galley(&mut self, ui: &egui::Ui, width: f32, color: egui::Color32) -> Arc<egui::Galley> {
        let key = LayoutKey {
            revision: self.surface.revision(),
            width,
            color,
        };
        if let Some((cached, galley)) = &self.layout {
            if *cached == key {
                return galley.clone();
            }
        }
        let font = egui::FontId::proportional(self.surface.font_size());
        let mut job =
            egui::text::LayoutJob::simple(self.surface.text().to_owned(), font, color, width);
        for section in &mut job.sections {
            section.format.line_height = Some(self.surface.line_height());
        }
        let galley = ui.fonts(|f| f.layout_job(job));
        self.layout = Some((key, galley.clone()));
        galley
    }
}

impl eframe::App for ReaderApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        use egui::*;

        let (outer, inner, ppp) = ctx.input(|i| {
            let vp = i.viewport();
            (vp.outer_rect, vp.inner_rect, vp.native_pixels_per_point)
        });
        if let Some(ppp) = ppp {
            self.native_ppp = ppp;
        }
        self.observe_viewport(outer.map(|r| r.min), inner.map(|r| r.size()));

        self.process_requests(ctx);

        let commands: Vec<Command> = ctx.input(|i| {
            BOUND_KEYS
                .iter()
                .filter(|k| i.key_pressed(**k))
                .filter_map(|k| command_for_key(*k))
                .collect()
        });
        for cmd in commands {
            self.run_command(ctx, cmd);
        }

        let wheel = ctx.input(|i| i.raw_scroll_delta.y);
        self.surface.scroll_by_gesture(wheel);

        self.run_timers(ctx);

        if self.bring_to_front {
            screen::force_foreground(frame);
            self.bring_to_front = false;
        }

        let opacity = self.visibility.opacity();
        let bg = Color32::from(self.colors.background()).gamma_multiply(opacity);
        let fg = Color32::from(self.colors.foreground()).gamma_multiply(opacity);

        let panel = Frame::none().fill(bg).inner_margin(Margin::same(TEXT_MARGIN));
        CentralPanel::default().frame(panel).show(ctx, |ui| {
            ui.visuals_mut().override_text_color = Some(fg);
            ui.visuals_mut().text_cursor.color = fg;

            let window_rect = ctx.screen_rect();
            let body = ui.interact(window_rect, Id::new("reader_body"), Sense::click_and_drag());

            let text_rect = ui.max_rect();
            let galley = self.galley(ui, text_rect.width(), fg);
            self.surface.set_layout_lines(galley.rows.len());
            let origin = text_rect.min - vec2(0.0, self.surface.scroll_offset());
            ui.painter()
                .with_clip_rect(text_rect)
                .galley(origin, galley, fg);

            let handle_rect = Rect::from_min_size(
                window_rect.max - Vec2::splat(RESIZE_HANDLE),
                Vec2::splat(RESIZE_HANDLE),
            );
            ui.painter().rect_filled(handle_rect, 0.0, bg);
            let handle = ui
                .interact(handle_rect, Id::new("resize_handle"), Sense::drag())
                .on_hover_cursor(CursorIcon::ResizeSouthEast);

            self.handle_resize(ctx, &handle);
            if !self.window.is_resizing() {
                self.handle_move(ctx, &body);
            }
        });
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0; 4]
    }
}
