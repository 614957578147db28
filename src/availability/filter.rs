//! Eligibility selection over a fetched availability report

use super::model::{AvailabilityReport, Center, Session};

/// Minimum-age bracket a session must advertise to qualify
pub const ELIGIBLE_MIN_AGE: i64 = 18;

/// True when the session can actually be booked under the policy:
/// 18+ bracket with capacity left and at least one dose-1 slot.
pub fn session_is_bookable(session: &Session) -> bool {
    session.min_age_limit == ELIGIBLE_MIN_AGE
        && session.available_capacity > 0
        && session.available_capacity_dose1 > 0
}

/// Select the centers with at least one bookable session.
///
/// Pure: no I/O, no mutation. A center appears at most once, scanning its
/// sessions stops at the first bookable one, and the output preserves the
/// report's center order.
pub fn select_available(report: &AvailabilityReport) -> Vec<&Center> {
    report
        .centers
        .iter()
        .filter(|center| center.sessions.iter().any(session_is_bookable))
        .collect()
}
