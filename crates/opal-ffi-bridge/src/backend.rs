//! Backend selection.

use crate::c_bindings::{open_linked, FfiError, FfiResult};
use crate::rust_exports::InProcessApi;
use opal_native::LineAppearanceApi;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Native backend to run records against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// Rust-hosted engine ([`InProcessApi`]).
    #[default]
    InProcess,
    /// The linked `libopal` (requires the `opal-link` feature).
    Linked,
}

impl Backend {
    /// Opens the backend.
    ///
    /// # Errors
    ///
    /// Returns [`FfiError::NotLinked`] for [`Backend::Linked`] in builds
    /// without the `opal-link` feature.
    pub fn open(self) -> FfiResult<Arc<dyn LineAppearanceApi>> {
        match self {
            Backend::InProcess => Ok(Arc::new(InProcessApi)),
            Backend::Linked => open_linked(),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Backend::InProcess => "in-process",
            Backend::Linked => "linked",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Backend {
    type Err = FfiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in-process" | "inprocess" => Ok(Backend::InProcess),
            "linked" | "opal" => Ok(Backend::Linked),
            _ => Err(FfiError::UnknownBackend {
                name: s.to_string(),
            }),
        }
    }
}
