//! Typed handles to native records.
//!
//! A raw address is only ever accepted at the edge ([`RecordHandle::from_raw`]).
//! Inside the crate a record is either a non-null [`RecordHandle`] or one of the
//! explicit non-live [`HandleState`] variants, so "disposed" can never be
//! confused with "wrapped a null address".

use std::ffi::c_void;
use std::fmt;
use std::ptr::{self, NonNull};

/// Raw native record address, as passed across the C boundary.
pub type RawRecord = *mut c_void;

/// A non-null address of a native record.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHandle(NonNull<c_void>);

// SAFETY: a RecordHandle is only an address. It is dereferenced solely by a
// LineAppearanceApi implementation, and the proxy serializes those calls.
unsafe impl Send for RecordHandle {}
unsafe impl Sync for RecordHandle {}

impl RecordHandle {
    /// Creates a handle from a raw address.
    ///
    /// Returns `None` for the null address.
    pub fn from_raw(raw: RawRecord) -> Option<Self> {
        NonNull::new(raw).map(RecordHandle)
    }

    /// Returns the raw address.
    pub const fn as_raw(&self) -> RawRecord {
        self.0.as_ptr()
    }
}

impl fmt::Debug for RecordHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordHandle({:p})", self.0)
    }
}

/// Handle state held by a proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    /// Wrapped a null address; there is no record.
    Empty,
    /// References a native record.
    Live { handle: RecordHandle, owned: bool },
    /// Released by dispose or handed off with `into_raw`.
    Disposed,
}

impl HandleState {
    /// Builds the state for a wrapped raw address.
    pub fn wrap(raw: RawRecord, owned: bool) -> Self {
        match RecordHandle::from_raw(raw) {
            Some(handle) => HandleState::Live { handle, owned },
            None => HandleState::Empty,
        }
    }

    /// Returns the live handle, if any.
    pub fn handle(&self) -> Option<RecordHandle> {
        match self {
            HandleState::Live { handle, .. } => Some(*handle),
            _ => None,
        }
    }

    /// Returns true if this state is responsible for freeing a record.
    pub fn is_owned(&self) -> bool {
        matches!(self, HandleState::Live { owned: true, .. })
    }

    /// Returns the raw address, or null when no record is referenced.
    pub fn as_raw(&self) -> RawRecord {
        self.handle().map_or(ptr::null_mut(), |h| h.as_raw())
    }
}
