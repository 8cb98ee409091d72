//! Proxy for a native `OpalStatusLineAppearance` record.
//!
//! [`StatusLineAppearance`] holds a handle to a record on the native heap and
//! forwards every field access to a [`LineAppearanceApi`]. Nothing is cached
//! on the Rust side: each getter and setter is a live call into native code.
//!
//! # Ownership
//!
//! A proxy either owns its record (created with [`StatusLineAppearance::new`],
//! or wrapped with `owned = true`) or is a non-owning view of a record owned
//! elsewhere. Only an owning proxy frees the record, and it frees it exactly
//! once: on the first [`dispose`](StatusLineAppearance::dispose), or on drop
//! if `dispose` was never called. A proxy that was `mem::forget`-ed never
//! releases its record.
//!
//! # Thread safety
//!
//! The handle state sits behind a mutex owned by the proxy. Accessors hold it
//! for the duration of the native call, so an accessor can never observe a
//! record that a concurrent `dispose` is freeing.

use crate::api::{LineAppearanceApi, TextField};
use crate::error::{OpalError, OpalResult};
use crate::handle::{HandleState, RawRecord, RecordHandle};
use crate::marshal;
use log::debug;
use opal_types::{LineAppearance, LineAppearanceState};
use parking_lot::Mutex;
use std::ffi::CString;
use std::fmt;
use std::ptr;
use std::sync::Arc;

/// Native record name used in errors and logs.
pub const RECORD_NAME: &str = "OpalStatusLineAppearance";

/// Proxy for a native status line appearance record.
pub struct StatusLineAppearance {
    api: Arc<dyn LineAppearanceApi>,
    state: Mutex<HandleState>,
}

impl StatusLineAppearance {
    /// Allocates a new native record owned by the returned proxy.
    ///
    /// # Errors
    ///
    /// Returns [`OpalError::Allocation`] if the native layer returns null.
    pub fn new(api: Arc<dyn LineAppearanceApi>) -> OpalResult<Self> {
        let handle = RecordHandle::from_raw(api.allocate())
            .ok_or_else(|| OpalError::allocation(RECORD_NAME))?;
        debug!("Allocated {} {:?}", RECORD_NAME, handle);
        Ok(Self {
            api,
            state: Mutex::new(HandleState::Live {
                handle,
                owned: true,
            }),
        })
    }

    /// Wraps an existing native record.
    ///
    /// A null `raw` yields a proxy with no record; its accessors fail with
    /// [`OpalError::NullHandle`].
    ///
    /// # Safety
    ///
    /// A non-null `raw` must address a live record created by `api`. If
    /// `owned` is true, nothing else may free it. If `owned` is false, the
    /// record must outlive every accessor call made through this proxy.
    pub unsafe fn from_raw(api: Arc<dyn LineAppearanceApi>, raw: RawRecord, owned: bool) -> Self {
        Self {
            api,
            state: Mutex::new(HandleState::wrap(raw, owned)),
        }
    }

    /// Returns the raw address of `proxy`, or null for `None`.
    pub fn raw_of(proxy: Option<&Self>) -> RawRecord {
        proxy.map_or(ptr::null_mut(), |p| p.as_raw())
    }

    /// Returns the raw address, or null if there is no live record.
    pub fn as_raw(&self) -> RawRecord {
        self.state.lock().as_raw()
    }

    /// Returns true if this proxy is responsible for freeing its record.
    pub fn is_owned(&self) -> bool {
        self.state.lock().is_owned()
    }

    /// Returns true once [`dispose`](Self::dispose) or `into_raw` has run.
    pub fn is_disposed(&self) -> bool {
        matches!(*self.state.lock(), HandleState::Disposed)
    }

    /// Returns true if the proxy was created around a null address.
    pub fn is_null(&self) -> bool {
        matches!(*self.state.lock(), HandleState::Empty)
    }

    /// Releases the record if this proxy owns it.
    ///
    /// Idempotent: only the first call has any effect, and concurrent calls
    /// are serialized. Afterwards every accessor fails with
    /// [`OpalError::UseAfterDispose`] and dropping the proxy does nothing.
    pub fn dispose(&self) {
        let mut state = self.state.lock();
        if release(self.api.as_ref(), &mut state) {
            debug!("Disposed {}", RECORD_NAME);
        }
    }

    /// Gives up the record without freeing it and returns its address.
    ///
    /// Ownership, if held, passes to the caller. Returns null if the proxy had
    /// no live record.
    pub fn into_raw(mut self) -> RawRecord {
        let state = self.state.get_mut();
        let raw = state.as_raw();
        if state.is_owned() {
            debug!("Released ownership of {} at {:p}", RECORD_NAME, raw);
        }
        *state = HandleState::Disposed;
        raw
    }

    /// Returns the line label.
    pub fn line(&self) -> OpalResult<Option<String>> {
        self.text(TextField::Line)
    }

    /// Sets the line label.
    pub fn set_line(&self, line: &str) -> OpalResult<()> {
        self.set_text(TextField::Line, Some(line))
    }

    /// Returns the line appearance state.
    ///
    /// # Errors
    ///
    /// Returns [`OpalError::Marshaling`] if the native value is not a known state.
    pub fn state(&self) -> OpalResult<LineAppearanceState> {
        self.with_record(|api, record| {
            // SAFETY: with_record only hands out live handles, under the lock.
            marshal::state_from_raw(unsafe { api.state(record) })
        })
    }

    /// Sets the line appearance state.
    pub fn set_state(&self, state: LineAppearanceState) -> OpalResult<()> {
        self.with_record(|api, record| {
            // SAFETY: with_record only hands out live handles, under the lock.
            unsafe { api.set_state(record, state.as_raw()) };
            Ok(())
        })
    }

    /// Returns the appearance code; negative means undefined.
    pub fn appearance(&self) -> OpalResult<i32> {
        // SAFETY: with_record only hands out live handles, under the lock.
        self.with_record(|api, record| Ok(unsafe { api.appearance(record) }))
    }

    /// Sets the appearance code.
    pub fn set_appearance(&self, appearance: i32) -> OpalResult<()> {
        self.with_record(|api, record| {
            // SAFETY: with_record only hands out live handles, under the lock.
            unsafe { api.set_appearance(record, appearance) };
            Ok(())
        })
    }

    /// Returns the call identifier.
    pub fn call_id(&self) -> OpalResult<Option<String>> {
        self.text(TextField::CallId)
    }

    /// Sets the call identifier.
    pub fn set_call_id(&self, call_id: &str) -> OpalResult<()> {
        self.set_text(TextField::CallId, Some(call_id))
    }

    /// Returns the A party.
    pub fn party_a(&self) -> OpalResult<Option<String>> {
        self.text(TextField::PartyA)
    }

    /// Sets the A party.
    pub fn set_party_a(&self, party: &str) -> OpalResult<()> {
        self.set_text(TextField::PartyA, Some(party))
    }

    /// Returns the B party.
    pub fn party_b(&self) -> OpalResult<Option<String>> {
        self.text(TextField::PartyB)
    }

    /// Sets the B party.
    pub fn set_party_b(&self, party: &str) -> OpalResult<()> {
        self.set_text(TextField::PartyB, Some(party))
    }

    /// Clears a text field to null.
    pub fn clear_text(&self, field: TextField) -> OpalResult<()> {
        self.set_text(field, None)
    }

    /// Reads every field in one locked pass.
    pub fn snapshot(&self) -> OpalResult<LineAppearance> {
        self.with_record(|api, record| {
            // SAFETY: with_record only hands out live handles, under the lock,
            // and each native string is copied before the next native call.
            unsafe {
                let text =
                    |field: TextField| marshal::from_c_string(field, api.text(record, field));
                Ok(LineAppearance {
                    line: text(TextField::Line)?,
                    state: marshal::state_from_raw(api.state(record))?,
                    appearance: api.appearance(record),
                    call_id: text(TextField::CallId)?,
                    party_a: text(TextField::PartyA)?,
                    party_b: text(TextField::PartyB)?,
                })
            }
        })
    }

    /// Writes every field in one locked pass.
    ///
    /// All text is converted before anything is written, so a marshaling
    /// failure leaves the record untouched. `None` text clears the field.
    pub fn apply(&self, values: &LineAppearance) -> OpalResult<()> {
        let convert = |field: TextField, value: &Option<String>| -> OpalResult<Option<CString>> {
            value
                .as_deref()
                .map(|v| marshal::to_c_string(field, v))
                .transpose()
        };
        let texts = [
            (TextField::Line, convert(TextField::Line, &values.line)?),
            (TextField::CallId, convert(TextField::CallId, &values.call_id)?),
            (TextField::PartyA, convert(TextField::PartyA, &values.party_a)?),
            (TextField::PartyB, convert(TextField::PartyB, &values.party_b)?),
        ];

        self.with_record(|api, record| {
            // SAFETY: with_record only hands out live handles, under the lock;
            // the converted strings outlive the calls.
            unsafe {
                for (field, value) in &texts {
                    api.set_text(record, *field, marshal::as_c_ptr(value.as_ref()));
                }
                api.set_state(record, values.state.as_raw());
                api.set_appearance(record, values.appearance);
            }
            Ok(())
        })
    }

    fn text(&self, field: TextField) -> OpalResult<Option<String>> {
        self.with_record(|api, record| {
            // SAFETY: with_record only hands out live handles, under the lock;
            // the string is copied before the lock is released.
            unsafe { marshal::from_c_string(field, api.text(record, field)) }
        })
    }

    fn set_text(&self, field: TextField, value: Option<&str>) -> OpalResult<()> {
        let value = value.map(|v| marshal::to_c_string(field, v)).transpose()?;
        self.with_record(|api, record| {
            // SAFETY: with_record only hands out live handles, under the lock.
            unsafe { api.set_text(record, field, marshal::as_c_ptr(value.as_ref())) };
            Ok(())
        })
    }

    /// Runs `f` with the live handle while holding the state lock.
    fn with_record<T>(
        &self,
        f: impl FnOnce(&dyn LineAppearanceApi, RecordHandle) -> OpalResult<T>,
    ) -> OpalResult<T> {
        let state = self.state.lock();
        match *state {
            HandleState::Live { handle, .. } => f(self.api.as_ref(), handle),
            HandleState::Empty => Err(OpalError::null_handle(RECORD_NAME)),
            HandleState::Disposed => Err(OpalError::use_after_dispose(RECORD_NAME)),
        }
    }
}

/// Moves `state` to `Disposed`, freeing the record if it was owned.
///
/// Returns true if a record was freed.
fn release(api: &dyn LineAppearanceApi, state: &mut HandleState) -> bool {
    match std::mem::replace(state, HandleState::Disposed) {
        HandleState::Live {
            handle,
            owned: true,
        } => {
            // SAFETY: an owned live handle is freed only here, and the state
            // is already Disposed so this arm cannot run again.
            unsafe { api.free(handle) };
            true
        }
        HandleState::Live { owned: false, .. } | HandleState::Empty | HandleState::Disposed => {
            false
        }
    }
}

impl Drop for StatusLineAppearance {
    fn drop(&mut self) {
        if release(self.api.as_ref(), self.state.get_mut()) {
            debug!("Released {} on drop", RECORD_NAME);
        }
    }
}

impl fmt::Debug for StatusLineAppearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusLineAppearance")
            .field("state", &*self.state.lock())
            .finish()
    }
}
