//! Best-effort window foregrounding.
//!
//! After spawning the browser the launcher tries to surface its window.
//! Hosts without the capability report `false` and the caller moves on;
//! nothing here is ever fatal.

/// Bring the first top-level window whose title contains `substring`
/// (case-insensitive) to the foreground. Returns whether such a window was
/// found.
#[cfg(windows)]
pub fn bring_to_front(substring: &str) -> bool {
    imp::bring_to_front(substring)
}

#[cfg(not(windows))]
pub fn bring_to_front(_substring: &str) -> bool {
    false
}

#[cfg(windows)]
mod imp {
    use windows_sys::Win32::Foundation::{BOOL, HWND, LPARAM};
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        EnumWindows, GetWindowTextLengthW, GetWindowTextW, SW_SHOWNA, SetForegroundWindow,
        ShowWindow,
    };

    struct Search {
        needle: String,
        found: bool,
    }

    pub fn bring_to_front(substring: &str) -> bool {
        let mut search = Search {
            needle: substring.to_lowercase(),
            found: false,
        };
        // The callback only runs inside this call, so the pointer stays
        // valid for the whole enumeration.
        unsafe {
            EnumWindows(Some(enum_callback), &mut search as *mut Search as LPARAM);
        }
        search.found
    }

    unsafe extern "system" fn enum_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let search = unsafe { &mut *(lparam as *mut Search) };

        let length = unsafe { GetWindowTextLengthW(hwnd) };
        if length == 0 {
            return 1;
        }

        let mut buf = vec![0u16; length as usize + 1];
        let copied = unsafe { GetWindowTextW(hwnd, buf.as_mut_ptr(), buf.len() as i32) };
        if copied == 0 {
            return 1;
        }
        let title = String::from_utf16_lossy(&buf[..copied as usize]);

        if title.to_lowercase().contains(&search.needle) {
            tracing::debug!(title = %title, "bringing window to foreground");
            unsafe {
                // SW_SHOWNA keeps the window's size and position.
                ShowWindow(hwnd, SW_SHOWNA);
                SetForegroundWindow(hwnd);
            }
            search.found = true;
            return 0;
        }
        1
    }
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn unsupported_host_reports_not_found() {
        assert!(!bring_to_front("Chromium"));
    }
}
