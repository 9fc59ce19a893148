use chrono::NaiveDate;

/// Hours with one decimal place: "12.5h"
pub fn format_hours(hours: f64) -> String {
    format!("{:.1}h", hours)
}

/// Percentage with one decimal place: "87.5%"
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Dollar amount with thousands separators: "$1,795.00".
/// `None` means pay is not configured and renders as "not set".
pub fn format_currency(amount: Option<f64>) -> String {
    let Some(amount) = amount else {
        return "not set".to_string();
    };

    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Format a calendar day for reports: "Sep 02, 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}
