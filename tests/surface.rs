use novel_overlay::loader::TextBuffer;
use novel_overlay::surface::DisplaySurface;

fn surface_with_lines(total: usize, visible_height: f32) -> DisplaySurface {
    let mut s = DisplaySurface::new(14.0);
    s.set_content(TextBuffer::new("text"));
    s.fit_height(visible_height);
    s.set_layout_lines(total);
    s
}

#[test]
fn line_height_and_fit() {
    let mut s = DisplaySurface::new(14.0);
    assert_eq!(s.line_height(), 20.0);
    s.fit_height(142.0);
    assert_eq!(s.visible_lines(), 7);
    s.fit_height(5.0);
    assert_eq!(s.visible_lines(), 1);
    // Zero height keeps the previous value.
    s.fit_height(0.0);
    assert_eq!(s.visible_lines(), 1);
}

#[test]
fn scrolling_is_bounded() {
    let mut s = surface_with_lines(10, 60.0);
    assert_eq!(s.visible_lines(), 3);

    s.scroll_up();
    assert_eq!(s.scroll_line(), 0);

    for _ in 0..20 {
        s.scroll_down();
    }
    assert_eq!(s.scroll_line(), 7);
    assert_eq!(s.scroll_offset(), 140.0);

    s.scroll_up();
    assert_eq!(s.scroll_line(), 6);
}

#[test]
fn gesture_sign_picks_direction() {
    let mut s = surface_with_lines(10, 20.0);
    s.scroll_by_gesture(-3.0);
    s.scroll_by_gesture(-120.0);
    assert_eq!(s.scroll_line(), 2);
    s.scroll_by_gesture(0.0);
    assert_eq!(s.scroll_line(), 2);
    s.scroll_by_gesture(1.5);
    assert_eq!(s.scroll_line(), 1);
}

#[test]
fn new_content_resets_to_top() {
    let mut s = surface_with_lines(10, 20.0);
    s.scroll_down();
    s.scroll_down();
    let before = s.revision();

    s.set_content(TextBuffer::new("another book"));
    assert_eq!(s.scroll_line(), 0);
    assert_eq!(s.text(), "another book");
    assert_eq!(s.revision(), before + 1);
}

#[test]
fn shrinking_layout_clamps_scroll() {
    let mut s = surface_with_lines(10, 20.0);
    for _ in 0..9 {
        s.scroll_down();
    }
    assert_eq!(s.scroll_line(), 9);
    s.set_layout_lines(4);
    assert_eq!(s.scroll_line(), 3);
}
