#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Completion state reported by a node or an engine.
///
/// "Not started" is never reported; it is modelled as the absence of a cached status
/// (`Option<BtStatus>::None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BtStatus {
    Running,
    Success,
    Failure,
}

impl BtStatus {
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, BtStatus::Running)
    }

    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, BtStatus::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, BtStatus::Failure)
    }

    /// `true` for `Success` and `Failure`.
    #[inline]
    pub fn is_done(self) -> bool {
        !self.is_running()
    }

    /// Swaps `Success` and `Failure`; `Running` is unchanged.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            BtStatus::Running => BtStatus::Running,
            BtStatus::Success => BtStatus::Failure,
            BtStatus::Failure => BtStatus::Success,
        }
    }

    /// Maps any completion to `Success`; `Running` is unchanged.
    #[inline]
    pub fn mute(self) -> Self {
        match self {
            BtStatus::Running => BtStatus::Running,
            BtStatus::Success | BtStatus::Failure => BtStatus::Success,
        }
    }
}

impl From<bool> for BtStatus {
    fn from(value: bool) -> Self {
        if value {
            BtStatus::Success
        } else {
            BtStatus::Failure
        }
    }
}
