//! Rotation scheduler.
//!
//! The payout schedule is a circular queue of active member uids: the front
//! is the next recipient, new members join at the tail, removal deletes the
//! member's single slot without reordering the rest. The whole schedule value
//! is computed in memory and written once per commit; the source app updated
//! the array twice in one call and the second write clobbered the first.

use crate::core::errors::StokvelError;

/// The uid at the front of the schedule, if any.
pub fn current_recipient(schedule: &[String]) -> Option<&String> {
    schedule.first()
}

/// Rotate left by one: the head moves to the tail. Called exactly once per
/// successful payout and nowhere else, so no recipient is skipped or repeated.
pub fn advance(schedule: &mut Vec<String>) -> Result<String, StokvelError> {
    if schedule.is_empty() {
        return Err(StokvelError::EmptySchedule);
    }
    let head = schedule.remove(0);
    schedule.push(head.clone());
    Ok(head)
}

/// New members join at the tail: last in, last served.
pub fn push_tail(schedule: &mut Vec<String>, uid: &str) {
    debug_assert!(!schedule.iter().any(|u| u == uid));
    schedule.push(uid.to_string());
}

/// Deletes the uid's slot wherever it sits, preserving the relative order of
/// everyone else. Removing the head implicitly promotes the next in line.
pub fn remove_uid(schedule: &mut Vec<String>, uid: &str) {
    schedule.retain(|u| u != uid);
}
