//! Booking lifecycle status and transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use shuttlehub_core::AppError;

/// Lifecycle status of a booking.
///
/// Allowed transitions:
/// `pending → confirmed | canceled`, `confirmed → canceled | completed`.
/// `canceled` and `completed` are terminal. Requesting the status a booking
/// already holds is rejected rather than treated as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting driver confirmation. Initial state; the seat is already held.
    Pending,
    /// Confirmed by the driver.
    Confirmed,
    /// Canceled by either party. Terminal; the seat was returned.
    Canceled,
    /// Trip finished. Terminal; eligible for rating.
    Completed,
}

/// Seat ledger side effect produced by a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatEffect {
    /// The transition does not touch the seat ledger.
    None,
    /// Exactly one seat returns to the shuttle.
    ReleaseOne,
}

impl BookingStatus {
    /// Validate a transition from `self` to `next`.
    ///
    /// Returns the seat ledger effect the caller must apply in the same unit
    /// of work. `ReleaseOne` is produced exactly when entering `Canceled`
    /// from a non-canceled state.
    pub fn transition_to(self, next: BookingStatus) -> Result<SeatEffect, AppError> {
        if self == next {
            return Err(AppError::state_conflict(format!(
                "Booking status is already {self}"
            )));
        }

        let allowed = matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Canceled)
                | (Self::Confirmed, Self::Canceled)
                | (Self::Confirmed, Self::Completed)
        );

        if !allowed {
            return Err(AppError::state_conflict(format!(
                "Cannot change booking status from {self} to {next}"
            )));
        }

        if next == Self::Canceled {
            Ok(SeatEffect::ReleaseOne)
        } else {
            Ok(SeatEffect::None)
        }
    }

    /// Check whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Canceled | Self::Completed)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Canceled => "canceled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "canceled" => Ok(Self::Canceled),
            "completed" => Ok(Self::Completed),
            _ => Err(AppError::validation(format!(
                "Invalid status: '{s}'. Expected one of: pending, confirmed, canceled, completed"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuttlehub_core::error::ErrorKind;

    #[test]
    fn test_pending_can_confirm_or_cancel() {
        assert_eq!(
            BookingStatus::Pending
                .transition_to(BookingStatus::Confirmed)
                .unwrap(),
            SeatEffect::None
        );
        assert_eq!(
            BookingStatus::Pending
                .transition_to(BookingStatus::Canceled)
                .unwrap(),
            SeatEffect::ReleaseOne
        );
    }

    #[test]
    fn test_confirmed_can_cancel_or_complete() {
        assert_eq!(
            BookingStatus::Confirmed
                .transition_to(BookingStatus::Canceled)
                .unwrap(),
            SeatEffect::ReleaseOne
        );
        assert_eq!(
            BookingStatus::Confirmed
                .transition_to(BookingStatus::Completed)
                .unwrap(),
            SeatEffect::None
        );
    }

    #[test]
    fn test_same_status_is_rejected_not_noop() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Canceled,
            BookingStatus::Completed,
        ] {
            let err = status.transition_to(status).unwrap_err();
            assert_eq!(err.kind, ErrorKind::StateConflict);
            assert!(
                err.message.contains("already"),
                "unexpected message: {}",
                err.message
            );
        }
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for terminal in [BookingStatus::Canceled, BookingStatus::Completed] {
            for next in [
                BookingStatus::Pending,
                BookingStatus::Confirmed,
                BookingStatus::Canceled,
                BookingStatus::Completed,
            ] {
                assert!(terminal.transition_to(next).is_err());
            }
            assert!(terminal.is_terminal());
        }
    }

    #[test]
    fn test_no_backwards_transitions() {
        assert!(BookingStatus::Confirmed
            .transition_to(BookingStatus::Pending)
            .is_err());
        assert!(BookingStatus::Pending
            .transition_to(BookingStatus::Completed)
            .is_err());
    }

    #[test]
    fn test_release_only_when_entering_canceled() {
        // Every legal edge that does not enter Canceled must be seat-neutral.
        let neutral = [
            (BookingStatus::Pending, BookingStatus::Confirmed),
            (BookingStatus::Confirmed, BookingStatus::Completed),
        ];
        for (from, to) in neutral {
            assert_eq!(from.transition_to(to).unwrap(), SeatEffect::None);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "confirmed".parse::<BookingStatus>().unwrap(),
            BookingStatus::Confirmed
        );
        assert_eq!(
            "CANCELED".parse::<BookingStatus>().unwrap(),
            BookingStatus::Canceled
        );
        let err = "cancelled".parse::<BookingStatus>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
