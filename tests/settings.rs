use novel_overlay::color::Rgb;
use novel_overlay::hotkey::Hotkey;
use novel_overlay::settings::Settings;
use rdev::Key;
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let s = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(s.window_size, (800.0, 150.0));
    assert_eq!(s.opacity, 0.95);
    assert_eq!(s.background, Rgb(40, 38, 42));
    assert_eq!(s.default_file, "novel1.txt");
    assert_eq!(s.restore_hotkey(), Hotkey::default());
    assert!(!s.debug_logging);
}

#[test]
fn partial_file_overrides_some_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{ "font_size": 18.0, "background": [10, 20, 30], "restore_hotkey": "Alt+F9" }"#,
    )
    .unwrap();

    let s = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(s.font_size, 18.0);
    assert_eq!(s.background, Rgb(10, 20, 30));
    assert_eq!(s.window_size, (800.0, 150.0));
    let hk = s.restore_hotkey();
    assert_eq!(hk.key, Key::F9);
    assert!(hk.alt && !hk.ctrl);
}

#[test]
fn invalid_hotkey_falls_back() {
    let s = Settings {
        restore_hotkey: "Ctrl+Nope".into(),
        ..Settings::default()
    };
    assert_eq!(s.restore_hotkey(), Hotkey::default());
}

#[test]
fn malformed_json_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(Settings::load(path.to_str().unwrap()).is_err());
}
