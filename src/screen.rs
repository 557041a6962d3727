use crate::color::Rgb;
use screenshots::Screen;

/// Grab the single pixel at global screen coordinates `(x, y)`.
pub fn sample_pixel(x: i32, y: i32) -> anyhow::Result<Rgb> {
    let screen = Screen::from_point(x, y)?;
    let img: image::RgbaImage = screen.capture_area(
        x - screen.display_info.x,
        y - screen.display_info.y,
        1,
        1,
    )?;
    let px = img
        .get_pixel_checked(0, 0)
        .ok_or_else(|| anyhow::anyhow!("empty capture at ({x}, {y})"))?;
    Ok(Rgb(px[0], px[1], px[2]))
}

/// Current cursor position in physical screen pixels.
///
/// Windows can be asked directly; elsewhere the position last reported by
/// the global hook is used, which is `None` until the mouse has moved.
pub fn cursor_position(hook_pos: Option<(f64, f64)>) -> Option<(i32, i32)> {
    #[cfg(target_os = "windows")]
    {
        use windows::Win32::Foundation::POINT;
        use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;
        let mut pt = POINT::default();
        if unsafe { GetCursorPos(&mut pt).is_ok() } {
            return Some((pt.x, pt.y));
        }
    }
    hook_pos.map(|(x, y)| (x.round() as i32, y.round() as i32))
}

/// On Windows, restore the window and bring it to the foreground.
#[cfg(target_os = "windows")]
pub fn force_foreground(frame: &eframe::Frame) {
    use raw_window_handle::{HasWindowHandle, RawWindowHandle};
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{SetForegroundWindow, ShowWindow, SW_RESTORE};

    let Ok(handle) = frame.window_handle() else {
        return;
    };
    if let RawWindowHandle::Win32(h) = handle.as_raw() {
        let hwnd = HWND(h.hwnd.get() as *mut core::ffi::c_void);
        unsafe {
            let _ = ShowWindow(hwnd, SW_RESTORE);
            let _ = SetForegroundWindow(hwnd);
        }
    }
}

#[cfg(not(target_os = "windows"))]
pub fn force_foreground(_frame: &eframe::Frame) {}
