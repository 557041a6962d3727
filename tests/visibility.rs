use eframe::egui;
use novel_overlay::visibility::{apply_visibility, VisibilityState, VISIBLE_OPACITY};

#[path = "mock_ctx.rs"]
mod mock_ctx;
use mock_ctx::MockCtx;

#[test]
fn double_toggle_returns_to_visible_level() {
    let mut v = VisibilityState::default();
    assert_eq!(v.opacity(), VISIBLE_OPACITY);

    assert!(!v.toggle());
    assert_eq!(v.opacity(), 0.0);
    assert!(v.toggle());
    assert_eq!(v.opacity(), 0.95);
}

#[test]
fn restore_reports_change_only_when_hidden() {
    let mut v = VisibilityState::new(0.8);
    assert!(!v.restore());
    v.toggle();
    assert!(v.restore());
    assert_eq!(v.opacity(), 0.8);
}

#[test]
fn invalid_level_falls_back_to_default() {
    assert_eq!(VisibilityState::new(0.0).opacity(), VISIBLE_OPACITY);
    assert_eq!(VisibilityState::new(3.0).opacity(), 1.0);
}

#[test]
fn hidden_overlay_passes_mouse_through() {
    let ctx = MockCtx::default();
    let mut v = VisibilityState::default();
    v.toggle();
    apply_visibility(&ctx, &v);

    let cmds = ctx.take();
    assert_eq!(cmds.len(), 1);
    assert!(matches!(cmds[0], egui::ViewportCommand::MousePassthrough(true)));
    assert_eq!(*ctx.repaints.lock().unwrap(), 1);
}

#[test]
fn shown_overlay_takes_focus() {
    let ctx = MockCtx::default();
    apply_visibility(&ctx, &VisibilityState::default());

    let cmds = ctx.take();
    assert!(matches!(cmds[0], egui::ViewportCommand::MousePassthrough(false)));
    assert!(cmds.iter().any(|c| matches!(c, egui::ViewportCommand::Visible(true))));
    assert!(matches!(cmds.last(), Some(egui::ViewportCommand::Focus)));
}
