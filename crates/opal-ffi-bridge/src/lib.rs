//! Native backends for the OPAL record bindings.
//!
//! `opal-native` talks to native code only through
//! [`LineAppearanceApi`](opal_native::LineAppearanceApi). This crate provides
//! the implementations:
//!
//! - [`InProcessApi`]: a Rust-hosted record engine exported with C ABI
//!   (`rust_opal_sla_*`), always available
//! - `LinkedApi`: `extern "C"` bindings to `libopal`, built with the
//!   `opal-link` feature
//!
//! # Safety
//!
//! All exported functions use `extern "C"` ABI and follow these rules:
//!
//! 1. Null record pointers are tolerated: getters return null/0, setters and
//!    delete do nothing
//! 2. Strings cross the boundary as NUL-terminated C strings and are copied on set
//! 3. A returned string is valid until the same field is set again or the
//!    record is deleted
//! 4. Callers serialize access to a single record

mod backend;
mod c_bindings;
mod rust_exports;

pub use backend::Backend;
pub use c_bindings::*;
pub use rust_exports::*;
