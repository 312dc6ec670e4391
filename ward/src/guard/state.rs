//! Guard state store.
//!
//! `Clear → Captured` is the only transition. There is no way back: a
//! tripped guard stays tripped until a new guard is mounted.

use ward_common::error::ErrorDetail;

/// Whether a guard has captured a render failure.
///
/// "Has an error" and "has a detail" cannot disagree: the detail lives
/// inside the `Captured` variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GuardState {
    /// No failure captured; children render normally.
    #[default]
    Clear,
    /// A failure was captured; the fallback renders instead of children.
    Captured(ErrorDetail),
}

impl GuardState {
    /// True once a failure has been captured.
    #[inline]
    pub fn has_error(&self) -> bool {
        matches!(self, Self::Captured(_))
    }

    /// The captured failure, if any.
    #[inline]
    pub fn error_detail(&self) -> Option<&ErrorDetail> {
        match self {
            Self::Clear => None,
            Self::Captured(detail) => Some(detail),
        }
    }

    /// Record a failure.
    ///
    /// Returns `true` if the state changed. A guard that already captured a
    /// failure keeps the first one.
    pub fn capture(&mut self, detail: ErrorDetail) -> bool {
        match self {
            Self::Clear => {
                *self = Self::Captured(detail);
                true
            }
            Self::Captured(_) => false,
        }
    }
}
