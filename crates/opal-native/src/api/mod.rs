//! Boundary between the proxy and a native record implementation.
//!
//! [`LineAppearanceApi`] is the set of entry points the proxy forwards to.
//! Backends (the linked OPAL library, the Rust-hosted engine in
//! `opal-ffi-bridge`, test mocks) implement it; the proxy never touches record
//! memory itself.

#[cfg(test)]
pub(crate) mod mock;

use crate::handle::{RawRecord, RecordHandle};
use std::ffi::{c_char, c_int};
use std::fmt;

/// Text fields of a status line appearance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Line,
    CallId,
    PartyA,
    PartyB,
}

impl TextField {
    /// Every text field, in record order.
    pub const ALL: [TextField; 4] = [
        TextField::Line,
        TextField::CallId,
        TextField::PartyA,
        TextField::PartyB,
    ];

    /// Returns the field name used by the native record.
    pub const fn name(&self) -> &'static str {
        match self {
            TextField::Line => "line",
            TextField::CallId => "callId",
            TextField::PartyA => "partyA",
            TextField::PartyB => "partyB",
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Native entry points for the status line appearance record.
///
/// All methods except [`allocate`](Self::allocate) take a handle and are
/// `unsafe`: the caller guarantees the handle was returned by `allocate` on
/// this same backend (or handed over by code that did) and has not been freed.
pub trait LineAppearanceApi: Send + Sync {
    /// Allocates a fresh record. Returns null on failure.
    fn allocate(&self) -> RawRecord;

    /// Frees a record. Calling this twice for one record is undefined.
    ///
    /// # Safety
    ///
    /// `record` must be live and must not be used afterwards.
    unsafe fn free(&self, record: RecordHandle);

    /// Returns a text field, or null if unset.
    ///
    /// # Safety
    ///
    /// `record` must be live. The returned string is only valid until the next
    /// set of the same field or until the record is freed.
    unsafe fn text(&self, record: RecordHandle, field: TextField) -> *const c_char;

    /// Sets a text field. The backend copies `value`; null clears the field.
    ///
    /// # Safety
    ///
    /// `record` must be live and `value` null or a NUL-terminated string.
    unsafe fn set_text(&self, record: RecordHandle, field: TextField, value: *const c_char);

    /// Returns the raw state value.
    ///
    /// # Safety
    ///
    /// `record` must be live.
    unsafe fn state(&self, record: RecordHandle) -> c_int;

    /// Sets the raw state value.
    ///
    /// # Safety
    ///
    /// `record` must be live.
    unsafe fn set_state(&self, record: RecordHandle, state: c_int);

    /// Returns the appearance code.
    ///
    /// # Safety
    ///
    /// `record` must be live.
    unsafe fn appearance(&self, record: RecordHandle) -> c_int;

    /// Sets the appearance code.
    ///
    /// # Safety
    ///
    /// `record` must be live.
    unsafe fn set_appearance(&self, record: RecordHandle, appearance: c_int);
}
