use chrono::{DateTime, NaiveDate, Utc};

/// Format a timestamp as a human-readable relative time string.
pub fn relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(dt);

    let seconds = duration.num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = duration.num_minutes();
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }

    let hours = duration.num_hours();
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    let days = duration.num_days();
    if days < 7 {
        return format!("{}d ago", days);
    }

    if days < 30 {
        return format!("{}w ago", days / 7);
    }

    if days < 365 {
        return format!("{}mo ago", days / 30);
    }

    format!("{}y ago", days / 365)
}

/// Compact date label for chart axes, e.g. "Jun 05".
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Full date label for lists, e.g. "2023-06-05".
pub fn iso_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}
