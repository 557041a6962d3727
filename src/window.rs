use eframe::egui::{Pos2, Vec2};
use std::time::{Duration, Instant};

pub const MIN_WIDTH: f32 = 100.0;
pub const MIN_HEIGHT: f32 = 30.0;
/// Side length of the square resize handle in the bottom-right corner.
pub const RESIZE_HANDLE: f32 = 10.0;

/// Steps closer together than this are coalesced into one pending step.
pub const RESIZE_COALESCE: Duration = Duration::from_millis(100);
/// Delay before content is redisplayed once resizing settles.
pub const REDISPLAY_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowGeometry {
    pub pos: Pos2,
    pub size: Vec2,
}

impl WindowGeometry {
    pub fn new(pos: Pos2, size: Vec2) -> Self {
        Self {
            pos,
            size: clamp_size(size),
        }
    }
}

pub fn clamp_size(size: Vec2) -> Vec2 {
    Vec2::new(size.x.max(MIN_WIDTH), size.y.max(MIN_HEIGHT))
}

/// A single pending timer. Scheduling again cancels whatever was pending.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, value: T) {
        self.pending = Some((now + delay, value));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// Take the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((at, _)) if *at <= now => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct ResizeGesture {
    initial_size: Vec2,
    press: Pos2,
}

/// Work the GUI has to carry out after polling the controller's timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerOutcome {
    /// Geometry changed and must be pushed to the viewport.
    pub apply_size: bool,
    /// Visible line count must be recomputed from the new height.
    pub refit: bool,
    /// Content must be shown again.
    pub redisplay: bool,
}

impl TimerOutcome {
    pub fn is_empty(&self) -> bool {
        !self.apply_size && !self.refit && !self.redisplay
    }
}

/// Position, size and the in-flight move/resize gestures of the overlay.
#[derive(Debug)]
pub struct WindowController {
    geometry: WindowGeometry,
    move_offset: Option<Vec2>,
    resize: Option<ResizeGesture>,
    last_resize_step: Option<Instant>,
    complete_timer: Debouncer<Vec2>,
    redisplay_timer: Debouncer<()>,
    redisplay_in_progress: bool,
}

impl WindowController {
    pub fn new(geometry: WindowGeometry) -> Self {
        Self {
            geometry,
            move_offset: None,
            resize: None,
            last_resize_step: None,
            complete_timer: Debouncer::new(),
            redisplay_timer: Debouncer::new(),
            redisplay_in_progress: false,
        }
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.geometry
    }

    /// Sync with the position/size the window system actually reports.
    ///
    /// Returns `true` when the reported size changed ours, i.e. the window
    /// was resized by something other than our own gesture.
    pub fn observe(&mut self, pos: Option<Pos2>, size: Option<Vec2>) -> bool {
        if let Some(pos) = pos {
            self.geometry.pos = pos;
        }
        // While resizing our own size is authoritative; reports lag behind.
        if self.resize.is_some() {
            return false;
        }
        match size.map(clamp_size) {
            Some(size) if size != self.geometry.size => {
                self.geometry.size = size;
                true
            }
            _ => false,
        }
    }

    /// `offset` is the press position relative to the window's top-left corner.
    pub fn begin_move(&mut self, offset: Vec2) {
        self.move_offset = Some(offset);
    }

    /// Returns the new window position, keeping the press offset under the cursor.
    pub fn drag_move(&mut self, cursor: Pos2) -> Option<Pos2> {
        let offset = self.move_offset?;
        let pos = cursor - offset;
        self.geometry.pos = pos;
        Some(pos)
    }

    pub fn end_move(&mut self) {
        self.move_offset = None;
    }

    pub fn is_moving(&self) -> bool {
        self.move_offset.is_some()
    }

    pub fn begin_resize(&mut self, cursor: Pos2) {
        self.resize = Some(ResizeGesture {
            initial_size: self.geometry.size,
            press: cursor,
        });
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    pub fn end_resize(&mut self) {
        self.resize = None;
    }

    fn size_for(&self, cursor: Pos2) -> Option<Vec2> {
        let gesture = self.resize?;
        Some(clamp_size(gesture.initial_size + (cursor - gesture.press)))
    }

    /// Handle one drag step on the resize handle.
    ///
    /// Returns the size to apply right away, or `None` when the step was
    /// coalesced into the pending "complete resize" timer.
    pub fn drag_resize(&mut self, cursor: Pos2, now: Instant) -> Option<Vec2> {
        self.resize?;
        if let Some(last) = self.last_resize_step {
            if now.duration_since(last) < RESIZE_COALESCE {
                // The completed step redisplays on its own.
                self.redisplay_timer.cancel();
                if let Some(size) = self.size_for(cursor) {
                    self.complete_timer.schedule(now, RESIZE_COALESCE, size);
                }
                return None;
            }
        }
        self.last_resize_step = Some(now);

        let size = self.size_for(cursor)?;
        self.geometry.size = size;
        // An older coalesced step must not land on top of this one.
        self.complete_timer.cancel();
        self.redisplay_timer.schedule(now, REDISPLAY_DELAY, ());
        Some(size)
    }

    /// Fire whichever timers are due.
    pub fn poll_timers(&mut self, now: Instant) -> TimerOutcome {
        let mut out = TimerOutcome::default();
        if let Some(size) = self.complete_timer.poll(now) {
            self.geometry.size = size;
            out.apply_size = true;
            out.refit = true;
            out.redisplay = true;
        }
        if self.redisplay_timer.poll(now).is_some() {
            out.refit = true;
            out.redisplay = true;
        }
        if out.redisplay {
            if self.redisplay_in_progress {
                out.redisplay = false;
            } else {
                self.redisplay_in_progress = true;
            }
        }
        out
    }

    /// Must be called once a redisplay reported by `poll_timers` is done.
    pub fn finish_redisplay(&mut self) {
        self.redisplay_in_progress = false;
    }

    /// Earliest pending timer, used to schedule the next repaint.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.complete_timer.deadline(), self.redisplay_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Center the window on `cursor`, returning the new position.
    pub fn recenter_on(&mut self, cursor: Pos2) -> Pos2 {
        let size = self.geometry.size;
        let pos = Pos2::new(
            cursor.x - (size.x / 2.0).floor(),
            cursor.y - (size.y / 2.0).floor(),
        );
        self.geometry.pos = pos;
        pos
    }
}
