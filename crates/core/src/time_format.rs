//! Relative time labels for notification lists.

use crate::types::Timestamp;

/// Describe how long ago `then` was, at hour granularity.
///
/// Under one hour (including timestamps slightly in the future) reads
/// "a few minutes ago"; under a day "{h}h ago"; otherwise "{d}d ago".
pub fn relative_time(then: Timestamp, now: Timestamp) -> String {
    let hours = (now - then).num_hours();
    if hours < 1 {
        "a few minutes ago".to_string()
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{}d ago", hours / 24)
    }
}
