//! Conversions between Rust values and their native representations.

use crate::api::TextField;
use crate::error::{OpalError, OpalResult};
use opal_types::LineAppearanceState;
use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;

/// Converts a text value for a native setter.
pub(crate) fn to_c_string(field: TextField, value: &str) -> OpalResult<CString> {
    CString::new(value).map_err(|e| {
        OpalError::marshaling(
            field.name(),
            format!("interior NUL byte at offset {}", e.nul_position()),
        )
    })
}

/// Returns the pointer to pass for an optional converted value.
pub(crate) fn as_c_ptr(value: Option<&CString>) -> *const c_char {
    value.map_or(ptr::null(), |v| v.as_ptr())
}

/// Copies a native string into an owned value.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid for
/// the duration of the call.
pub(crate) unsafe fn from_c_string(
    field: TextField,
    ptr: *const c_char,
) -> OpalResult<Option<String>> {
    if ptr.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(|s| Some(s.to_owned()))
        .map_err(|e| OpalError::marshaling(field.name(), format!("invalid UTF-8: {}", e)))
}

/// Converts a raw native state value.
pub(crate) fn state_from_raw(raw: c_int) -> OpalResult<LineAppearanceState> {
    LineAppearanceState::from_raw(raw).map_err(|e| OpalError::marshaling("state", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_interior_nul_is_rejected() {
        let err = to_c_string(TextField::CallId, "abc\0def").unwrap_err();
        assert_eq!(
            err,
            OpalError::marshaling("callId", "interior NUL byte at offset 3")
        );
    }

    #[test]
    fn test_null_pointer_is_none() {
        let value = unsafe { from_c_string(TextField::Line, ptr::null()) }.unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let raw = CString::new(vec![0x31, 0xff, 0x32]).unwrap();
        let err = unsafe { from_c_string(TextField::PartyA, raw.as_ptr()) }.unwrap_err();
        assert!(matches!(err, OpalError::Marshaling { field: "partyA", .. }));
    }

    #[test]
    fn test_state_from_raw() {
        assert_eq!(state_from_raw(3), Ok(LineAppearanceState::Ringing));
        assert!(matches!(
            state_from_raw(42),
            Err(OpalError::Marshaling { field: "state", .. })
        ));
    }
}
