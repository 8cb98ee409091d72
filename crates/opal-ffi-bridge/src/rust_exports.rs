//! Rust-hosted status line appearance engine, exported with C ABI.
//!
//! Records are heap allocated with the same C layout as OPAL's
//! `OpalStatusLineAppearance`, so native callers and [`InProcessApi`] can share
//! them. Text fields own their strings and are freed with the record.

use opal_native::{LineAppearanceApi, RawRecord, RecordHandle, TextField};
use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Number of records allocated and not yet deleted.
static LIVE_RECORDS: AtomicUsize = AtomicUsize::new(0);

/// C-compatible status line appearance record.
#[repr(C)]
#[derive(Debug)]
pub struct NativeStatusLineAppearance {
    pub line: *mut c_char,
    pub state: c_int,
    pub appearance: c_int,
    pub call_id: *mut c_char,
    pub party_a: *mut c_char,
    pub party_b: *mut c_char,
}

impl Default for NativeStatusLineAppearance {
    fn default() -> Self {
        Self {
            line: ptr::null_mut(),
            state: 0,
            appearance: 0,
            call_id: ptr::null_mut(),
            party_a: ptr::null_mut(),
            party_b: ptr::null_mut(),
        }
    }
}

impl Drop for NativeStatusLineAppearance {
    fn drop(&mut self) {
        for slot in [
            &mut self.line,
            &mut self.call_id,
            &mut self.party_a,
            &mut self.party_b,
        ] {
            // SAFETY: text slots are null or came from CString::into_raw.
            unsafe { replace_text(slot, ptr::null()) };
        }
    }
}

/// Replaces an owned text slot with a copy of `value` (null clears it).
///
/// # Safety
///
/// `slot` must be null or from `CString::into_raw`; `value` must be null or a
/// NUL-terminated string.
unsafe fn replace_text(slot: &mut *mut c_char, value: *const c_char) {
    let new = if value.is_null() {
        ptr::null_mut()
    } else {
        CStr::from_ptr(value).to_owned().into_raw()
    };
    let old = std::mem::replace(slot, new);
    if !old.is_null() {
        drop(CString::from_raw(old));
    }
}

// =============================================================================
// Exported C functions
// =============================================================================

/// Allocates a zero-initialized record.
///
/// The record must be freed with `rust_opal_sla_delete()`.
#[no_mangle]
pub extern "C" fn rust_opal_sla_new() -> *mut NativeStatusLineAppearance {
    LIVE_RECORDS.fetch_add(1, Ordering::SeqCst);
    Box::into_raw(Box::default())
}

/// Frees a record and its strings.
///
/// # Safety
///
/// - `ptr` must be null or a pointer returned by `rust_opal_sla_new()`
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn rust_opal_sla_delete(ptr: *mut NativeStatusLineAppearance) {
    if ptr.is_null() {
        return;
    }
    drop(Box::from_raw(ptr));
    LIVE_RECORDS.fetch_sub(1, Ordering::SeqCst);
}

/// Returns the number of records currently allocated.
#[no_mangle]
pub extern "C" fn rust_opal_sla_live_count() -> usize {
    LIVE_RECORDS.load(Ordering::SeqCst)
}

macro_rules! export_text_field {
    ($get:ident, $set:ident, $field:ident) => {
        #[doc = concat!("Returns `", stringify!($field), "`, or null if unset.")]
        ///
        /// # Safety
        ///
        /// `ptr` must be null or a live record.
        #[no_mangle]
        pub unsafe extern "C" fn $get(ptr: *const NativeStatusLineAppearance) -> *const c_char {
            match ptr.as_ref() {
                Some(record) => record.$field.cast_const(),
                None => ptr::null(),
            }
        }

        #[doc = concat!("Sets `", stringify!($field), "` to a copy of `value`; null clears it.")]
        ///
        /// # Safety
        ///
        /// `ptr` must be null or a live record; `value` must be null or a
        /// NUL-terminated string.
        #[no_mangle]
        pub unsafe extern "C" fn $set(ptr: *mut NativeStatusLineAppearance, value: *const c_char) {
            if let Some(record) = ptr.as_mut() {
                replace_text(&mut record.$field, value);
            }
        }
    };
}

macro_rules! export_int_field {
    ($get:ident, $set:ident, $field:ident) => {
        #[doc = concat!("Returns `", stringify!($field), "`, or 0 for a null record.")]
        ///
        /// # Safety
        ///
        /// `ptr` must be null or a live record.
        #[no_mangle]
        pub unsafe extern "C" fn $get(ptr: *const NativeStatusLineAppearance) -> c_int {
            ptr.as_ref().map_or(0, |record| record.$field)
        }

        #[doc = concat!("Sets `", stringify!($field), "`.")]
        ///
        /// # Safety
        ///
        /// `ptr` must be null or a live record.
        #[no_mangle]
        pub unsafe extern "C" fn $set(ptr: *mut NativeStatusLineAppearance, value: c_int) {
            if let Some(record) = ptr.as_mut() {
                record.$field = value;
            }
        }
    };
}

export_text_field!(rust_opal_sla_line_get, rust_opal_sla_line_set, line);
export_int_field!(rust_opal_sla_state_get, rust_opal_sla_state_set, state);
export_int_field!(rust_opal_sla_appearance_get, rust_opal_sla_appearance_set, appearance);
export_text_field!(rust_opal_sla_call_id_get, rust_opal_sla_call_id_set, call_id);
export_text_field!(rust_opal_sla_party_a_get, rust_opal_sla_party_a_set, party_a);
export_text_field!(rust_opal_sla_party_b_get, rust_opal_sla_party_b_set, party_b);

// =============================================================================
// LineAppearanceApi over the exported functions
// =============================================================================

/// Backend that runs records in-process through the `rust_opal_sla_*` exports.
#[derive(Debug, Default, Clone, Copy)]
pub struct InProcessApi;

impl InProcessApi {
    /// Returns the number of records currently allocated by this engine.
    pub fn live_records() -> usize {
        rust_opal_sla_live_count()
    }
}

fn record(handle: RecordHandle) -> *mut NativeStatusLineAppearance {
    handle.as_raw().cast()
}

impl LineAppearanceApi for InProcessApi {
    fn allocate(&self) -> RawRecord {
        rust_opal_sla_new().cast()
    }

    unsafe fn free(&self, handle: RecordHandle) {
        rust_opal_sla_delete(record(handle));
    }

    unsafe fn text(&self, handle: RecordHandle, field: TextField) -> *const c_char {
        let ptr = record(handle);
        match field {
            TextField::Line => rust_opal_sla_line_get(ptr),
            TextField::CallId => rust_opal_sla_call_id_get(ptr),
            TextField::PartyA => rust_opal_sla_party_a_get(ptr),
            TextField::PartyB => rust_opal_sla_party_b_get(ptr),
        }
    }

    unsafe fn set_text(&self, handle: RecordHandle, field: TextField, value: *const c_char) {
        let ptr = record(handle);
        match field {
            TextField::Line => rust_opal_sla_line_set(ptr, value),
            TextField::CallId => rust_opal_sla_call_id_set(ptr, value),
            TextField::PartyA => rust_opal_sla_party_a_set(ptr, value),
            TextField::PartyB => rust_opal_sla_party_b_set(ptr, value),
        }
    }

    unsafe fn state(&self, handle: RecordHandle) -> c_int {
        rust_opal_sla_state_get(record(handle))
    }

    unsafe fn set_state(&self, handle: RecordHandle, state: c_int) {
        rust_opal_sla_state_set(record(handle), state)
    }

    unsafe fn appearance(&self, handle: RecordHandle) -> c_int {
        rust_opal_sla_appearance_get(record(handle))
    }

    unsafe fn set_appearance(&self, handle: RecordHandle, appearance: c_int) {
        rust_opal_sla_appearance_set(record(handle), appearance)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_create_and_delete() {
        let before = rust_opal_sla_live_count();
        let record = rust_opal_sla_new();
        assert!(!record.is_null());
        assert_eq!(rust_opal_sla_live_count(), before + 1);

        unsafe { rust_opal_sla_delete(record) };
        assert_eq!(rust_opal_sla_live_count(), before);
    }

    #[test]
    #[serial]
    fn test_new_record_is_zeroed() {
        let record = rust_opal_sla_new();
        unsafe {
            assert!(rust_opal_sla_line_get(record).is_null());
            assert_eq!(rust_opal_sla_state_get(record), 0);
            assert_eq!(rust_opal_sla_appearance_get(record), 0);
            rust_opal_sla_delete(record);
        }
    }

    #[test]
    #[serial]
    fn test_text_is_copied_on_set() {
        let record = rust_opal_sla_new();
        let value = CString::new("sip:alice@example.com").unwrap();
        unsafe {
            rust_opal_sla_party_a_set(record, value.as_ptr());
            drop(value);

            let got = CStr::from_ptr(rust_opal_sla_party_a_get(record));
            assert_eq!(got.to_str().unwrap(), "sip:alice@example.com");

            rust_opal_sla_party_a_set(record, ptr::null());
            assert!(rust_opal_sla_party_a_get(record).is_null());
            rust_opal_sla_delete(record);
        }
    }

    #[test]
    fn test_null_record_is_tolerated() {
        let value = CString::new("101").unwrap();
        unsafe {
            rust_opal_sla_delete(ptr::null_mut());
            rust_opal_sla_line_set(ptr::null_mut(), value.as_ptr());
            rust_opal_sla_state_set(ptr::null_mut(), 3);
            assert!(rust_opal_sla_line_get(ptr::null()).is_null());
            assert_eq!(rust_opal_sla_appearance_get(ptr::null()), 0);
        }
    }

    #[test]
    #[serial]
    fn test_in_process_api_fields() {
        let api = InProcessApi;
        let handle = RecordHandle::from_raw(api.allocate()).unwrap();
        let value = CString::new("101").unwrap();
        unsafe {
            api.set_text(handle, TextField::Line, value.as_ptr());
            api.set_state(handle, 4);
            api.set_appearance(handle, 7);

            let line = CStr::from_ptr(api.text(handle, TextField::Line));
            assert_eq!(line.to_str().unwrap(), "101");
            assert!(api.text(handle, TextField::CallId).is_null());
            assert_eq!(api.state(handle), 4);
            assert_eq!(api.appearance(handle), 7);
            api.free(handle);
        }
    }
}
