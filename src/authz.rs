//! Pure authorization rules for booking lifecycle actions
//!
//! Role checks live here, injected into the lifecycle service, never
//! re-derived inline at call sites.

use crate::models::booking::BookingStatus;
use crate::models::principal::Role;

/// Action an actor wants to perform on a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Transition {
        from: BookingStatus,
        to: BookingStatus,
    },
    Delete,
}

/// Whether a status transition is legal at all, for any actor.
///
/// pending -> confirmed | cancelled
/// confirmed -> completed | cancelled
/// Terminal states admit nothing; nothing returns to pending.
pub fn transition_allowed(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
    )
}

/// Whether an actor may perform an action on a booking.
///
/// Admins may perform any legal transition and delete. The owning guest
/// may only cancel their own booking while it is still pending.
pub fn authorize(role: Role, is_owner: bool, action: BookingAction) -> bool {
    match action {
        BookingAction::Transition { from, to } => {
            if !transition_allowed(from, to) {
                return false;
            }
            match role {
                Role::Admin => true,
                Role::User | Role::Guest => {
                    is_owner && from == BookingStatus::Pending && to == BookingStatus::Cancelled
                }
            }
        }
        BookingAction::Delete => role == Role::Admin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingStatus::*;

    #[test]
    fn transition_table() {
        assert!(transition_allowed(Pending, Confirmed));
        assert!(transition_allowed(Pending, Cancelled));
        assert!(transition_allowed(Confirmed, Completed));
        assert!(transition_allowed(Confirmed, Cancelled));

        // cancelled is terminal, nothing re-enters pending
        assert!(!transition_allowed(Cancelled, Confirmed));
        assert!(!transition_allowed(Cancelled, Pending));
        assert!(!transition_allowed(Completed, Confirmed));
        assert!(!transition_allowed(Confirmed, Pending));
        assert!(!transition_allowed(Pending, Completed));
        assert!(!transition_allowed(Pending, Pending));
    }

    #[test]
    fn owner_may_cancel_only_pending() {
        let cancel_pending = BookingAction::Transition {
            from: Pending,
            to: Cancelled,
        };
        let cancel_confirmed = BookingAction::Transition {
            from: Confirmed,
            to: Cancelled,
        };

        assert!(authorize(Role::User, true, cancel_pending));
        // only admin may cancel a confirmed booking
        assert!(!authorize(Role::User, true, cancel_confirmed));
        assert!(authorize(Role::Admin, false, cancel_confirmed));
    }

    #[test]
    fn non_owner_may_not_cancel() {
        let cancel_pending = BookingAction::Transition {
            from: Pending,
            to: Cancelled,
        };
        assert!(!authorize(Role::User, false, cancel_pending));
    }

    #[test]
    fn only_admin_confirms_completes_and_deletes() {
        let confirm = BookingAction::Transition {
            from: Pending,
            to: Confirmed,
        };
        let complete = BookingAction::Transition {
            from: Confirmed,
            to: Completed,
        };
        assert!(!authorize(Role::User, true, confirm));
        assert!(!authorize(Role::User, true, complete));
        assert!(authorize(Role::Admin, false, confirm));
        assert!(authorize(Role::Admin, false, complete));

        assert!(authorize(Role::Admin, false, BookingAction::Delete));
        assert!(!authorize(Role::User, true, BookingAction::Delete));
    }

    #[test]
    fn admin_cannot_bypass_illegal_transitions() {
        let revive = BookingAction::Transition {
            from: Cancelled,
            to: Confirmed,
        };
        assert!(!authorize(Role::Admin, false, revive));
    }
}
