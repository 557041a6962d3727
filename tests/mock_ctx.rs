use eframe::egui;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockCtx {
    pub commands: Arc<Mutex<Vec<egui::ViewportCommand>>>,
    pub repaints: Arc<Mutex<usize>>,
}

impl MockCtx {
    pub fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        self.commands.lock().unwrap().push(cmd);
    }

    pub fn request_repaint(&self) {
        *self.repaints.lock().unwrap() += 1;
    }

    pub fn take(&self) -> Vec<egui::ViewportCommand> {
        std::mem::take(&mut *self.commands.lock().unwrap())
    }
}

// Implement the trait from the main crate so tests can drive the app logic.
impl novel_overlay::visibility::ViewportCtx for MockCtx {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        self.send_viewport_cmd(cmd);
    }

    fn request_repaint(&self) {
        self.request_repaint();
    }
}
