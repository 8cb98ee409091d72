//! FFI bindings to the OPAL native library.
//!
//! The declarations below match the flat functions OPAL's interface generator
//! emits for `OpalStatusLineAppearance`: `new_`/`delete_` prefixed lifecycle
//! entry points and `_<field>_get`/`_set` suffixed accessors. They are only compiled
//! with the `opal-link` feature; without it, [`open_linked`] logs a warning
//! and fails with [`FfiError::NotLinked`].

use opal_native::LineAppearanceApi;
#[cfg(feature = "opal-link")]
use opal_native::{RawRecord, RecordHandle, TextField};
#[cfg(feature = "opal-link")]
use std::ffi::{c_char, c_int};
use std::sync::Arc;
use thiserror::Error;

/// Error type for backend setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FfiError {
    #[error("OPAL native library not linked (enable the opal-link feature)")]
    NotLinked,

    #[error("Unknown backend: {name}")]
    UnknownBackend { name: String },
}

/// Result type for backend setup.
pub type FfiResult<T> = Result<T, FfiError>;

// =============================================================================
// libopal function declarations (extern "C")
// =============================================================================

#[cfg(feature = "opal-link")]
#[link(name = "opal")]
extern "C" {
    fn new_OpalStatusLineAppearance() -> RawRecord;
    fn delete_OpalStatusLineAppearance(record: RawRecord);

    fn OpalStatusLineAppearance_line_get(record: RawRecord) -> *const c_char;
    fn OpalStatusLineAppearance_line_set(record: RawRecord, value: *const c_char);
    fn OpalStatusLineAppearance_state_get(record: RawRecord) -> c_int;
    fn OpalStatusLineAppearance_state_set(record: RawRecord, value: c_int);
    fn OpalStatusLineAppearance_appearance_get(record: RawRecord) -> c_int;
    fn OpalStatusLineAppearance_appearance_set(record: RawRecord, value: c_int);
    fn OpalStatusLineAppearance_callId_get(record: RawRecord) -> *const c_char;
    fn OpalStatusLineAppearance_callId_set(record: RawRecord, value: *const c_char);
    fn OpalStatusLineAppearance_partyA_get(record: RawRecord) -> *const c_char;
    fn OpalStatusLineAppearance_partyA_set(record: RawRecord, value: *const c_char);
    fn OpalStatusLineAppearance_partyB_get(record: RawRecord) -> *const c_char;
    fn OpalStatusLineAppearance_partyB_set(record: RawRecord, value: *const c_char);
}

// =============================================================================
// Safe wrapper
// =============================================================================

/// Backend that forwards to the linked `libopal`.
#[cfg(feature = "opal-link")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkedApi;

#[cfg(feature = "opal-link")]
impl LineAppearanceApi for LinkedApi {
    fn allocate(&self) -> RawRecord {
        // SAFETY: allocation takes no arguments; null is handled by the caller.
        unsafe { new_OpalStatusLineAppearance() }
    }

    unsafe fn free(&self, record: RecordHandle) {
        delete_OpalStatusLineAppearance(record.as_raw())
    }

    unsafe fn text(&self, record: RecordHandle, field: TextField) -> *const c_char {
        let raw = record.as_raw();
        match field {
            TextField::Line => OpalStatusLineAppearance_line_get(raw),
            TextField::CallId => OpalStatusLineAppearance_callId_get(raw),
            TextField::PartyA => OpalStatusLineAppearance_partyA_get(raw),
            TextField::PartyB => OpalStatusLineAppearance_partyB_get(raw),
        }
    }

    unsafe fn set_text(&self, record: RecordHandle, field: TextField, value: *const c_char) {
        let raw = record.as_raw();
        match field {
            TextField::Line => OpalStatusLineAppearance_line_set(raw, value),
            TextField::CallId => OpalStatusLineAppearance_callId_set(raw, value),
            TextField::PartyA => OpalStatusLineAppearance_partyA_set(raw, value),
            TextField::PartyB => OpalStatusLineAppearance_partyB_set(raw, value),
        }
    }

    unsafe fn state(&self, record: RecordHandle) -> c_int {
        OpalStatusLineAppearance_state_get(record.as_raw())
    }

    unsafe fn set_state(&self, record: RecordHandle, state: c_int) {
        OpalStatusLineAppearance_state_set(record.as_raw(), state)
    }

    unsafe fn appearance(&self, record: RecordHandle) -> c_int {
        OpalStatusLineAppearance_appearance_get(record.as_raw())
    }

    unsafe fn set_appearance(&self, record: RecordHandle, appearance: c_int) {
        OpalStatusLineAppearance_appearance_set(record.as_raw(), appearance)
    }
}

/// Opens the linked `libopal` backend.
#[cfg(feature = "opal-link")]
pub fn open_linked() -> FfiResult<Arc<dyn LineAppearanceApi>> {
    log::debug!("Using linked libopal backend");
    Ok(Arc::new(LinkedApi))
}

/// Stub implementation when libopal linking is not enabled.
#[cfg(not(feature = "opal-link"))]
pub fn open_linked() -> FfiResult<Arc<dyn LineAppearanceApi>> {
    log::warn!("open_linked called without opal-link feature");
    Err(FfiError::NotLinked)
}
