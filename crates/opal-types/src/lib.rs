//! Common OPAL value types shared by the binding crates.
//!
//! These are plain Rust values with no native storage behind them:
//!
//! - [`LineAppearanceState`]: the closed set of line appearance states
//! - [`LineAppearance`]: an owned copy of a whole status line appearance record

mod appearance;
mod state;

pub use appearance::LineAppearance;
pub use state::LineAppearanceState;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid line appearance state: {0}")]
    InvalidStateName(String),

    #[error("invalid raw line appearance state: {0}")]
    InvalidStateValue(i32),
}
