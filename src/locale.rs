// SPDX-License-Identifier: Apache-2.0

//! Passthroughs to the C library's message translation and error string
//! lookup. No text domain is bound here; `translate` sees whatever catalog
//! the process has already configured.

use std::ffi::CStr;
use std::sync::Mutex;

use once_cell::sync::Lazy;

// `strerror` may hand back a buffer that the next call overwrites.
static STRERROR_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[cfg(all(target_os = "linux", target_env = "gnu"))]
extern "C" {
    fn gettext(msgid: *const libc::c_char) -> *mut libc::c_char;
}

/// Looks up `message_id` in the active message catalog, returning it
/// unchanged when there is no translation.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
pub fn translate(message_id: &str) -> String {
    let c_message_id = match std::ffi::CString::new(message_id) {
        Ok(s) => s,
        Err(_) => return message_id.to_string(),
    };
    unsafe {
        let translated = gettext(c_message_id.as_ptr());
        if translated.is_null() {
            return message_id.to_string();
        }
        CStr::from_ptr(translated).to_string_lossy().into_owned()
    }
}

/// Platforms without a C library `gettext` have no catalogs to consult.
#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
pub fn translate(message_id: &str) -> String {
    message_id.to_string()
}

/// Returns the platform's description of `errnum`.
pub fn describe_error(errnum: i32) -> String {
    let _guard = STRERROR_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    unsafe {
        let description = libc::strerror(errnum);
        if description.is_null() {
            log::warn!("strerror returned null for errnum {}", errnum);
            return format!("Unknown error {}", errnum);
        }
        CStr::from_ptr(description).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_without_catalog_is_identity() {
        assert_eq!(translate("no translation for this"), "no translation for this");
    }

    #[test]
    fn test_translate_interior_nul_is_identity() {
        assert_eq!(translate("a\0b"), "a\0b");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_describe_error_known() {
        assert_eq!(describe_error(libc::ENOENT), "No such file or directory");
        assert_eq!(describe_error(libc::EACCES), "Permission denied");
    }

    #[cfg(any(target_env = "gnu", target_os = "macos"))]
    #[test]
    fn test_describe_error_unknown_mentions_number() {
        let text = describe_error(123_456);
        assert!(text.contains("123456"), "got {:?}", text);
    }

    #[test]
    fn test_describe_error_is_stable_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| describe_error(libc::ENOENT)))
            .collect();
        let want = describe_error(libc::ENOENT);
        for handle in handles {
            assert_eq!(handle.join().unwrap(), want);
        }
    }
}
