use rdev::{listen, EventType, Key};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Chord that brings the overlay back when nothing else can reach it.
pub const DEFAULT_RESTORE_HOTKEY: &str = "Ctrl+Shift+`";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hotkey {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Default for Hotkey {
    fn default() -> Self {
        Self {
            key: Key::BackQuote,
            ctrl: true,
            shift: true,
            alt: false,
        }
    }
}

const FUNCTION_KEYS: [Key; 12] = [
    Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
    Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
];

const DIGIT_KEYS: [Key; 10] = [
    Key::Num0, Key::Num1, Key::Num2, Key::Num3, Key::Num4,
    Key::Num5, Key::Num6, Key::Num7, Key::Num8, Key::Num9,
];

const LETTER_KEYS: [Key; 26] = [
    Key::KeyA, Key::KeyB, Key::KeyC, Key::KeyD, Key::KeyE, Key::KeyF, Key::KeyG,
    Key::KeyH, Key::KeyI, Key::KeyJ, Key::KeyK, Key::KeyL, Key::KeyM, Key::KeyN,
    Key::KeyO, Key::KeyP, Key::KeyQ, Key::KeyR, Key::KeyS, Key::KeyT, Key::KeyU,
    Key::KeyV, Key::KeyW, Key::KeyX, Key::KeyY, Key::KeyZ,
];

/// Restore chords are a backquote, a function key, a letter or a digit,
/// with any of `Ctrl`, `Shift` and `Alt` in front, e.g. "Ctrl+Shift+`".
impl FromStr for Hotkey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (mut ctrl, mut shift, mut alt) = (false, false, false);
        let mut key = None;

        for part in s.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            if part.eq_ignore_ascii_case("ctrl") || part.eq_ignore_ascii_case("control") {
                ctrl = true;
            } else if part.eq_ignore_ascii_case("shift") {
                shift = true;
            } else if part.eq_ignore_ascii_case("alt") {
                alt = true;
            } else if key.is_some() {
                anyhow::bail!("more than one key in '{s}'");
            } else {
                key = Some(chord_key(part).ok_or_else(|| anyhow::anyhow!("unknown key '{part}'"))?);
            }
        }

        let key = key.ok_or_else(|| anyhow::anyhow!("no key in '{s}'"))?;
        Ok(Hotkey {
            key,
            ctrl,
            shift,
            alt,
        })
    }
}

fn chord_key(name: &str) -> Option<Key> {
    if name == "`" || name.eq_ignore_ascii_case("backquote") || name.eq_ignore_ascii_case("grave") {
        return Some(Key::BackQuote);
    }
    if let Some(n) = name.strip_prefix(['F', 'f']).filter(|n| !n.is_empty()) {
        let n: usize = n.parse().ok()?;
        return FUNCTION_KEYS.get(n.checked_sub(1)?).copied();
    }
    let mut chars = name.chars();
    match (chars.next()?, chars.next()) {
        (c @ '0'..='9', None) => DIGIT_KEYS.get(c as usize - '0' as usize).copied(),
        (c, None) if c.is_ascii_alphabetic() => {
            LETTER_KEYS.get(c.to_ascii_uppercase() as usize - 'A' as usize).copied()
        }
        _ => None,
    }
}

/// Modifier and key state of the global hook. Fires once per chord press.
#[derive(Debug, Clone)]
pub struct ChordState {
    hotkey: Hotkey,
    ctrl_pressed: bool,
    shift_pressed: bool,
    alt_pressed: bool,
    watch_pressed: bool,
    triggered: bool,
}

impl ChordState {
    pub fn new(hotkey: Hotkey) -> Self {
        Self {
            hotkey,
            ctrl_pressed: false,
            shift_pressed: false,
            alt_pressed: false,
            watch_pressed: false,
            triggered: false,
        }
    }

    /// Feed one hook event. Returns `true` exactly when the chord completes.
    pub fn handle(&mut self, event: &EventType) -> bool {
        match event {
            EventType::KeyPress(k) => self.set_key(*k, true),
            EventType::KeyRelease(k) => self.set_key(*k, false),
            _ => return false,
        }

        let hk = &self.hotkey;
        let combo = self.watch_pressed
            && (!hk.ctrl || self.ctrl_pressed)
            && (!hk.shift || self.shift_pressed)
            && (!hk.alt || self.alt_pressed);
        if combo {
            if !self.triggered {
                self.triggered = true;
                tracing::debug!("hotkey match");
                return true;
            }
        } else {
            if self.triggered {
                tracing::debug!("combo released");
            }
            self.triggered = false;
        }
        false
    }

    fn set_key(&mut self, k: Key, down: bool) {
        match k {
            Key::ControlLeft | Key::ControlRight => self.ctrl_pressed = down,
            Key::ShiftLeft | Key::ShiftRight => self.shift_pressed = down,
            Key::Alt | Key::AltGr => self.alt_pressed = down,
            _ => {}
        }
        if k == self.hotkey.key {
            self.watch_pressed = down;
        }
    }
}

/// Background listener for the global restore chord.
///
/// The hook thread never touches GUI state: it only calls `on_trigger`,
/// which is expected to post a request to the GUI thread.
pub struct HotkeyListener {
    hotkey: Hotkey,
    /// Last global cursor position reported by the hook, in physical pixels.
    /// `None` until the first mouse-move event arrives.
    pub mouse_pos: Arc<Mutex<Option<(f64, f64)>>>,
}

impl HotkeyListener {
    pub fn new(hotkey: Hotkey) -> Self {
        Self {
            hotkey,
            mouse_pos: Arc::new(Mutex::new(None)),
        }
    }

    pub fn hotkey(&self) -> Hotkey {
        self.hotkey
    }

    /// Spawn the hook thread. It lives until the process exits.
    pub fn start<F>(&self, on_trigger: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let hotkey = self.hotkey;
        let mouse_pos = self.mouse_pos.clone();
        let on_trigger = Arc::new(on_trigger);
        tracing::debug!("starting hotkey listener for {:?}", hotkey);
        let spawned = thread::Builder::new()
            .name("hotkey-listener".into())
            .spawn(move || loop {
                let mut chord = ChordState::new(hotkey);
                let mouse_pos = mouse_pos.clone();
                let on_trigger = on_trigger.clone();

                let result = listen(move |event| {
                    if let EventType::MouseMove { x, y } = event.event_type {
                        if let Ok(mut pos) = mouse_pos.lock() {
                            *pos = Some((x, y));
                        }
                        return;
                    }
                    if chord.handle(&event.event_type) {
                        on_trigger();
                    }
                });

                match result {
                    Ok(()) => tracing::warn!("Hotkey listener exited unexpectedly. Restarting shortly"),
                    Err(e) => tracing::warn!("Hotkey listener failed: {:?}. Retrying shortly", e),
                }

                thread::sleep(Duration::from_millis(500));
            });
        if let Err(e) = spawned {
            tracing::error!("failed to spawn hotkey listener: {e}");
        }
    }

    pub fn last_mouse_pos(&self) -> Option<(f64, f64)> {
        self.mouse_pos.lock().ok().and_then(|p| *p)
    }
}
