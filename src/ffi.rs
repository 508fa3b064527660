//! FFI bindings for the scoring engine
//!
//! C-compatible entry points for embedding the engine in a non-Rust host
//! shell. All functions use null-terminated C strings and return allocated
//! memory the caller must free with `mockmeter_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::replay::{parse_ndjson, run_replay};
use crate::session::SessionConfig;
use crate::ENGINE_VERSION;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Replay a recorded session and return the result record as JSON.
///
/// # Arguments
/// * `config_json` - Session configuration JSON (camelCase fields; missing
///   fields take their defaults)
/// * `events_ndjson` - Newline-delimited replay events
/// * `started_at_ms` - Session start, unix epoch milliseconds
/// * `session_id` - Identifier for the produced record
///
/// # Returns
/// Result JSON string, or null on error (query `mockmeter_last_error`).
///
/// # Safety
/// All pointer arguments must be valid null-terminated C strings or null.
#[no_mangle]
pub unsafe extern "C" fn mockmeter_replay_session(
    config_json: *const c_char,
    events_ndjson: *const c_char,
    started_at_ms: i64,
    session_id: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let Some(events_str) = cstr_to_string(events_ndjson) else {
        set_last_error("events_ndjson is null or not valid UTF-8");
        return ptr::null_mut();
    };
    let Some(id) = cstr_to_string(session_id) else {
        set_last_error("session_id is null or not valid UTF-8");
        return ptr::null_mut();
    };

    let config = match cstr_to_string(config_json) {
        Some(json) if !json.trim().is_empty() => match serde_json::from_str::<SessionConfig>(&json)
        {
            Ok(config) => config,
            Err(e) => {
                set_last_error(&format!("invalid config: {}", e));
                return ptr::null_mut();
            }
        },
        _ => SessionConfig::default(),
    };

    let events = match parse_ndjson(&events_str) {
        Ok(events) => events,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    match run_replay(config, started_at_ms, &events, id)
        .and_then(|result| serde_json::to_string(&result).map_err(Into::into))
    {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Return the last error message, or null when the last call succeeded.
///
/// The returned pointer is owned by the library and valid until the next
/// engine call on this thread; do not free it.
#[no_mangle]
pub extern "C" fn mockmeter_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(msg) => msg.as_ptr(),
        None => ptr::null(),
    })
}

/// Return the engine version string (caller must free).
#[no_mangle]
pub extern "C" fn mockmeter_version() -> *mut c_char {
    string_to_cstr(ENGINE_VERSION)
}

/// Free a string previously returned by this library.
///
/// # Safety
/// `ptr` must have been returned by a `mockmeter_*` function and not freed
/// already.
#[no_mangle]
pub unsafe extern "C" fn mockmeter_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c_string(s: &str) -> CString {
        CString::new(s).unwrap()
    }

    unsafe fn take_string(ptr: *mut c_char) -> String {
        assert!(!ptr.is_null());
        let s = CStr::from_ptr(ptr).to_str().unwrap().to_string();
        mockmeter_free_string(ptr);
        s
    }

    #[test]
    fn test_replay_session_round_trip() {
        let config = c_string(r#"{"domain":"HR","questionCount":2}"#);
        let events = c_string(
            "{\"event\":\"fragment\",\"at_ms\":1000,\"text\":\"um hello\",\"is_final\":true}\n\
             {\"event\":\"next\",\"at_ms\":30000}",
        );
        let id = c_string("ffi-session");

        let out = unsafe {
            mockmeter_replay_session(config.as_ptr(), events.as_ptr(), 0, id.as_ptr())
        };
        let json = unsafe { take_string(out) };
        assert!(mockmeter_last_error().is_null());

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "ffi-session");
        assert_eq!(value["domain"], "HR");
        assert_eq!(value["questions"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_events_set_last_error() {
        let events = c_string("not json");
        let id = c_string("x");

        let out =
            unsafe { mockmeter_replay_session(ptr::null(), events.as_ptr(), 0, id.as_ptr()) };
        assert!(out.is_null());

        let err = mockmeter_last_error();
        assert!(!err.is_null());
        let message = unsafe { CStr::from_ptr(err).to_str().unwrap() };
        assert!(message.contains("line 1"));
    }

    #[test]
    fn test_null_events_rejected() {
        let id = c_string("x");
        let out = unsafe { mockmeter_replay_session(ptr::null(), ptr::null(), 0, id.as_ptr()) };
        assert!(out.is_null());
        assert!(!mockmeter_last_error().is_null());
    }

    #[test]
    fn test_version_is_exposed() {
        let version = unsafe { take_string(mockmeter_version()) };
        assert_eq!(version, ENGINE_VERSION);
    }
}
