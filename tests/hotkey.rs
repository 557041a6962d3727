use novel_overlay::hotkey::{ChordState, Hotkey, HotkeyListener};
use rdev::{EventType, Key};

#[test]
fn parse_default_restore_chord() {
    let hk: Hotkey = "Ctrl+Shift+`".parse().expect("should parse backquote chord");
    assert_eq!(hk, Hotkey::default());
    assert_eq!(hk.key, Key::BackQuote);
    assert!(hk.ctrl && hk.shift && !hk.alt);
}

#[test]
fn parse_simple_keys() {
    assert_eq!("F2".parse::<Hotkey>().unwrap().key, Key::F2);
    assert_eq!("f12".parse::<Hotkey>().unwrap().key, Key::F12);
    assert_eq!("alt+h".parse::<Hotkey>().unwrap().key, Key::KeyH);
    assert_eq!("Ctrl + 7".parse::<Hotkey>().unwrap().key, Key::Num7);
    assert_eq!("Ctrl+Grave".parse::<Hotkey>().unwrap().key, Key::BackQuote);
}

#[test]
fn parse_invalid_hotkey() {
    assert!("Ctrl+Shift".parse::<Hotkey>().is_err());
    assert!("F13".parse::<Hotkey>().is_err());
    assert!("F0".parse::<Hotkey>().is_err());
    assert!("Ctrl+A+B".parse::<Hotkey>().is_err());

    let err = "Ctrl+Foo".parse::<Hotkey>().unwrap_err();
    assert!(err.to_string().contains("Foo"));
}

#[test]
fn chord_fires_once_per_press() {
    let mut chord = ChordState::new(Hotkey::default());
    assert!(!chord.handle(&EventType::KeyPress(Key::ControlLeft)));
    assert!(!chord.handle(&EventType::KeyPress(Key::ShiftLeft)));
    assert!(chord.handle(&EventType::KeyPress(Key::BackQuote)));
    // Auto-repeat does not fire again.
    assert!(!chord.handle(&EventType::KeyPress(Key::BackQuote)));

    assert!(!chord.handle(&EventType::KeyRelease(Key::BackQuote)));
    assert!(chord.handle(&EventType::KeyPress(Key::BackQuote)));
}

#[test]
fn chord_requires_all_modifiers() {
    let mut chord = ChordState::new(Hotkey::default());
    assert!(!chord.handle(&EventType::KeyPress(Key::ControlRight)));
    assert!(!chord.handle(&EventType::KeyPress(Key::BackQuote)));
    assert!(!chord.handle(&EventType::KeyRelease(Key::BackQuote)));
    assert!(!chord.handle(&EventType::KeyRelease(Key::ControlRight)));
}

#[test]
fn mouse_events_do_not_affect_chord() {
    let mut chord = ChordState::new("F2".parse().unwrap());
    assert!(!chord.handle(&EventType::MouseMove { x: 10.0, y: 20.0 }));
    assert!(chord.handle(&EventType::KeyPress(Key::F2)));
}

#[test]
fn listener_starts_without_cursor() {
    let listener = HotkeyListener::new(Hotkey::default());
    assert_eq!(listener.hotkey(), Hotkey::default());
    assert_eq!(listener.last_mouse_pos(), None);

    *listener.mouse_pos.lock().unwrap() = Some((150.0, 250.0));
    assert_eq!(listener.last_mouse_pos(), Some((150.0, 250.0)));
}
