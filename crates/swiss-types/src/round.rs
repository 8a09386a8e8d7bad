//! Round numbers attached to recorded matches.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The round a match was played in.
///
/// Rounds are numbered from 1. The sentinel `-1` ([`Round::UNSPECIFIED`])
/// marks a match reported without a round, and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct Round(pub i32);

impl Round {
    /// Round value for matches reported without a round number.
    pub const UNSPECIFIED: Self = Self(-1);

    /// The first round of a tournament.
    pub const FIRST: Self = Self(1);

    /// Return the raw round number.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Whether a concrete round number was given.
    pub const fn is_specified(self) -> bool {
        self.0 != Self::UNSPECIFIED.0
    }

    /// Whether this value can be stored: either unspecified or `>= 1`.
    pub const fn is_valid(self) -> bool {
        !self.is_specified() || self.0 >= Self::FIRST.0
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

impl core::fmt::Display for Round {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_specified() {
            write!(f, "round {}", self.0)
        } else {
            f.write_str("unspecified round")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unspecified() {
        assert_eq!(Round::default(), Round::UNSPECIFIED);
        assert!(!Round::default().is_specified());
        assert!(Round::default().is_valid());
    }

    #[test]
    fn zero_and_negative_rounds_are_invalid() {
        assert!(!Round(0).is_valid());
        assert!(!Round(-2).is_valid());
        assert!(Round(1).is_valid());
        assert!(Round(12).is_valid());
    }

    #[test]
    fn missing_round_deserializes_to_default() {
        #[derive(Deserialize)]
        struct Body {
            #[serde(default)]
            round: Round,
        }
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.round, Round::UNSPECIFIED);
    }
}
