//! Executor flags passed to scan startup.

use std::fmt;
use std::ops::BitOr;

/// Bit set of executor startup flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExecFlags(u32);

impl ExecFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// The plan is only being explained; no scan will run.
    pub const EXPLAIN_ONLY: Self = Self(0x0001);
    /// The scan may be rescanned.
    pub const REWIND: Self = Self(0x0002);

    /// Returns true if every flag in `other` is set.
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ExecFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for ExecFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}
