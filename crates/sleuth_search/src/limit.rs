//! Bounded-or-unbounded counts.
//!
//! Content files use `-1` for "no limit" (inventory capacity, search
//! limits). In Rust that becomes [`Limit::Unlimited`] so nobody has to
//! remember the sentinel.

use serde::{Deserialize, Serialize};

/// A count that is either unbounded or capped at some value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Limit {
    /// No cap.
    #[default]
    Unlimited,
    /// At most this many.
    AtMost(u32),
}

impl Limit {
    /// Returns the cap, if any.
    #[inline]
    #[must_use]
    pub const fn cap(self) -> Option<u32> {
        match self {
            Self::Unlimited => None,
            Self::AtMost(n) => Some(n),
        }
    }

    /// Returns true once `count` has reached the cap.
    #[inline]
    #[must_use]
    pub const fn is_reached(self, count: u32) -> bool {
        match self {
            Self::Unlimited => false,
            Self::AtMost(n) => count >= n,
        }
    }

    /// Remaining room below the cap, or `None` when unbounded.
    #[inline]
    #[must_use]
    pub const fn remaining(self, count: u32) -> Option<u32> {
        match self {
            Self::Unlimited => None,
            Self::AtMost(n) => Some(n.saturating_sub(count)),
        }
    }
}

impl From<i64> for Limit {
    fn from(raw: i64) -> Self {
        if raw < 0 {
            Self::Unlimited
        } else {
            Self::AtMost(u32::try_from(raw).unwrap_or(u32::MAX))
        }
    }
}

impl From<Limit> for i64 {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Unlimited => -1,
            Limit::AtMost(n) => i64::from(n),
        }
    }
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unlimited => f.write_str("∞"),
            Self::AtMost(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_means_unlimited() {
        assert_eq!(Limit::from(-1), Limit::Unlimited);
        assert_eq!(Limit::from(-7), Limit::Unlimited);
        assert_eq!(Limit::from(0), Limit::AtMost(0));
        assert_eq!(i64::from(Limit::Unlimited), -1);
    }

    #[test]
    fn test_reached_and_remaining() {
        let one = Limit::AtMost(1);
        assert!(!one.is_reached(0));
        assert!(one.is_reached(1));
        assert_eq!(one.remaining(0), Some(1));
        assert_eq!(one.remaining(5), Some(0));
        assert!(!Limit::Unlimited.is_reached(u32::MAX));
        assert_eq!(Limit::Unlimited.remaining(3), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Limit::Unlimited.to_string(), "∞");
        assert_eq!(Limit::AtMost(50).to_string(), "50");
    }
}
