use chrono::{DateTime, Utc};

pub fn monthly_status_key(group_id: &str, period_start: DateTime<Utc>, period_end: DateTime<Utc>) -> String {
    format!(
        "monthly_status:{}:{}:{}",
        group_id,
        period_start.timestamp(),
        period_end.timestamp()
    )
}

pub fn group_prefix(group_id: &str) -> String {
    format!("monthly_status:{}:", group_id)
}
