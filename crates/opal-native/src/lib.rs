//! Safe Rust bindings for the OPAL status line appearance record.
//!
//! The record lives on the native heap and is reached only through an opaque
//! handle. This crate wraps that handle so it is released exactly once and
//! every field access is checked against the handle's state.
//!
//! # Architecture
//!
//! - [`handle`]: typed non-null record handles and the proxy's handle state
//! - [`error`]: error types for allocation, disposal and marshaling failures
//! - [`api`]: the boundary trait implemented by native backends
//! - [`proxy`]: [`StatusLineAppearance`], the owning/non-owning proxy
//!
//! # Example
//!
//! ```ignore
//! use opal_native::{LineAppearanceState, OpalResult, StatusLineAppearance};
//!
//! fn ring(api: std::sync::Arc<dyn opal_native::LineAppearanceApi>) -> OpalResult<()> {
//!     let sla = StatusLineAppearance::new(api)?;
//!     sla.set_line("101")?;
//!     sla.set_state(LineAppearanceState::Ringing)?;
//!     sla.dispose();
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod handle;
mod marshal;
pub mod proxy;

pub use api::{LineAppearanceApi, TextField};
pub use error::{OpalError, OpalResult};
pub use handle::{HandleState, RawRecord, RecordHandle};
pub use proxy::StatusLineAppearance;

pub use opal_types::{LineAppearance, LineAppearanceState};
