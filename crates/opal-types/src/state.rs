//! Line appearance state as reported by the OPAL engine.

use crate::ParseError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// State of a line appearance.
///
/// Matches `OpalLineAppearanceStates`. The native record stores this as a
/// plain `int`; [`LineAppearanceState::from_raw`] is the only way back.
#[repr(i32)]
///
/// Serializes as the lowercase name. Deserialization goes through
/// [`FromStr`], so documents accept the same spellings as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAppearanceState {
    /// No call on the line (OPAL also calls this "terminated").
    #[default]
    Idle = 0,
    /// Outgoing call is being attempted.
    Trying = 1,
    /// Remote has accepted the attempt and is proceeding.
    Proceeding = 2,
    /// Line is ringing.
    Ringing = 3,
    /// Call on the line is connected.
    Connected = 4,
    /// Subscription to the line succeeded.
    Subscribed = 5,
    /// Subscription to the line was removed.
    Unsubscribed = 6,
}

impl LineAppearanceState {
    /// Every state, in raw value order.
    pub const ALL: [LineAppearanceState; 7] = [
        LineAppearanceState::Idle,
        LineAppearanceState::Trying,
        LineAppearanceState::Proceeding,
        LineAppearanceState::Ringing,
        LineAppearanceState::Connected,
        LineAppearanceState::Subscribed,
        LineAppearanceState::Unsubscribed,
    ];

    /// Converts a raw native value.
    ///
    /// Unlike `SaiStatus::from_raw`, unknown values are an error rather than
    /// being folded into a catch-all variant.
    pub fn from_raw(raw: i32) -> Result<Self, ParseError> {
        match raw {
            0 => Ok(LineAppearanceState::Idle),
            1 => Ok(LineAppearanceState::Trying),
            2 => Ok(LineAppearanceState::Proceeding),
            3 => Ok(LineAppearanceState::Ringing),
            4 => Ok(LineAppearanceState::Connected),
            5 => Ok(LineAppearanceState::Subscribed),
            6 => Ok(LineAppearanceState::Unsubscribed),
            _ => Err(ParseError::InvalidStateValue(raw)),
        }
    }

    /// Returns the raw native value.
    pub const fn as_raw(&self) -> i32 {
        *self as i32
    }

    /// Returns true while a call occupies the line.
    pub const fn is_call_active(&self) -> bool {
        matches!(
            self,
            LineAppearanceState::Trying
                | LineAppearanceState::Proceeding
                | LineAppearanceState::Ringing
                | LineAppearanceState::Connected
        )
    }
}

impl TryFrom<i32> for LineAppearanceState {
    type Error = ParseError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<LineAppearanceState> for i32 {
    fn from(state: LineAppearanceState) -> Self {
        state.as_raw()
    }
}

impl fmt::Display for LineAppearanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LineAppearanceState::Idle => "idle",
            LineAppearanceState::Trying => "trying",
            LineAppearanceState::Proceeding => "proceeding",
            LineAppearanceState::Ringing => "ringing",
            LineAppearanceState::Connected => "connected",
            LineAppearanceState::Subscribed => "subscribed",
            LineAppearanceState::Unsubscribed => "unsubscribed",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for LineAppearanceState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" | "terminated" => Ok(LineAppearanceState::Idle),
            "trying" => Ok(LineAppearanceState::Trying),
            "proceeding" => Ok(LineAppearanceState::Proceeding),
            "ringing" => Ok(LineAppearanceState::Ringing),
            "connected" => Ok(LineAppearanceState::Connected),
            "subscribed" => Ok(LineAppearanceState::Subscribed),
            "unsubscribed" => Ok(LineAppearanceState::Unsubscribed),
            _ => Err(ParseError::InvalidStateName(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for LineAppearanceState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
