//! Switches for interoperating with deployments whose arithmetic differs from the documented
//! protocol. The defaults follow the documented protocol.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub reverse_alignment: ReverseAlignment,
    pub reverse_verification: ReverseVerification,
}

/// Where the reversed candidate pattern sits inside the voter's mirrored slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReverseAlignment {
    /// Shift by `N*R - (L*N + bitLength(pattern))`: the highest set bit of the reversed pattern
    /// lands on the top bit of the mirrored slot.
    ///
    /// For a one-candidate selection every candidate sets the same bit, the top bit of the
    /// voter's mirrored slot. The reverse vector then only cross-checks the location, not the
    /// choice.
    SlotTop,
    /// Shift by `N*R - (L*N + N)`: the reverse vector is the exact bit mirror of the forward
    /// vector inside the `N*R`-bit field.
    Mirrored,
}

/// Which collector shares are summed into the reverse verification total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReverseVerification {
    /// Sum each collector's reverse verification share.
    ReverseShares,
    /// Sum each collector's *forward* verification share, as some deployed backends do.
    ForwardShares,
}

impl Default for ReverseAlignment {
    fn default() -> Self {
        ReverseAlignment::SlotTop
    }
}

impl Default for ReverseVerification {
    fn default() -> Self {
        ReverseVerification::ReverseShares
    }
}
