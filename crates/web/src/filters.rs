//! Custom Askama template filters.

use std::borrow::Borrow;
use std::fmt::Display;

use chrono::{DateTime, Utc};

/// Format a whole-shilling amount, e.g. `50` becomes `KES 50`.
///
/// Usage in templates: `{{ receipt.amount_kes|kes }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn kes(amount: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_kes(&amount))
}

/// Format a timestamp for display, e.g. `2026-03-14 09:21 UTC`.
///
/// Usage in templates: `{{ receipt.paid_at|datetime }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn datetime(
    value: impl Borrow<DateTime<Utc>>,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(format_datetime(value.borrow()))
}

fn format_kes(amount: &impl Display) -> String {
    format!("KES {amount}")
}

fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_kes() {
        assert_eq!(format_kes(&150), "KES 150");
    }

    #[test]
    fn test_format_datetime() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 14, 9, 21, 44).unwrap();
        assert_eq!(format_datetime(&ts), "2026-03-14 09:21 UTC");
    }
}
