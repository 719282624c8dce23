//! Formatting and input-validation helpers shared by every page.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::Account;

fn account_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+-\d{3}$").unwrap())
}

fn iso_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

/// Account codes follow `<divisionPrefix>-<seq>` with a three-digit
/// sequence, e.g. `5-001`.
pub fn is_valid_account_code(code: &str) -> bool {
    account_code_re().is_match(code)
}

/// Next free code for a division prefix, scanning the existing rack.
pub fn next_account_code(prefix: i64, accounts: &[Account]) -> String {
    let lead = format!("{prefix}-");
    let max_seq = accounts
        .iter()
        .filter_map(|a| a.account_code.strip_prefix(&lead))
        .filter_map(|seq| seq.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}-{:03}", max_seq + 1)
}

fn group_with_dots(value: i64) -> String {
    let digits = value.abs().to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('.');
        }
        out.push(*ch);
    }
    let grouped: String = out.into_iter().rev().collect();
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Indonesian rupiah, whole amounts, dot-grouped: `Rp1.000.000`.
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round() as i64;
    if rounded < 0 {
        format!("-Rp{}", group_with_dots(-rounded))
    } else {
        format!("Rp{}", group_with_dots(rounded))
    }
}

/// Unit counts, dot-grouped without a currency prefix.
pub fn format_quantity(amount: f64) -> String {
    group_with_dots(amount.round() as i64)
}

pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate)
}

/// Date part of an ISO-ish timestamp (`2026-08-07T10:00:00Z` →
/// `2026-08-07`). Empty or malformed dates yield `None` so callers
/// exclude the row from date filters.
pub fn normalize_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed
        .split('T')
        .next()
        .unwrap_or(trimmed)
        .split(' ')
        .next()
        .unwrap_or(trimmed);
    if iso_date_re().is_match(date_part) {
        Some(date_part.to_string())
    } else {
        None
    }
}

/// Today's date in the browser, normalized like the entries.
pub fn today_string() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    normalize_date(&iso).unwrap_or(iso)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Division, ValueType};

    fn account(code: &str) -> Account {
        Account {
            id: 1,
            account_code: code.to_string(),
            account_name: "Kas".to_string(),
            value_type: ValueType::Nominal,
            division: Division {
                id: 1,
                name: "Keuangan & Administrasi".to_string(),
            },
            status: "active".to_string(),
            created_by: None,
        }
    }

    #[test]
    fn account_code_accepts_prefix_dash_three_digits() {
        assert!(is_valid_account_code("5-001"));
        assert!(is_valid_account_code("3-002"));
        assert!(is_valid_account_code("12-045"));
    }

    #[test]
    fn account_code_rejects_malformed_codes() {
        assert!(!is_valid_account_code("5-1"), "sequence must be 3 digits");
        assert!(!is_valid_account_code("abc-001"), "prefix must be numeric");
        assert!(!is_valid_account_code("5_001"), "separator must be a dash");
        assert!(!is_valid_account_code("5-0012"), "sequence must be exactly 3 digits");
        assert!(!is_valid_account_code(""));
    }

    #[test]
    fn next_code_increments_highest_sequence() {
        let rack = vec![account("4-001"), account("4-007"), account("2-010")];
        assert_eq!(next_account_code(4, &rack), "4-008");
        assert_eq!(next_account_code(2, &rack), "2-011");
        assert_eq!(next_account_code(9, &rack), "9-001", "empty prefix starts at 001");
    }

    #[test]
    fn rupiah_uses_dot_grouping_without_decimals() {
        assert_eq!(format_rupiah(1_000_000.0), "Rp1.000.000");
        assert_eq!(format_rupiah(1_500.0), "Rp1.500");
        assert_eq!(format_rupiah(0.0), "Rp0");
        assert_eq!(format_rupiah(999.6), "Rp1.000", "amounts round to whole rupiah");
        assert_eq!(format_rupiah(-250_000.0), "-Rp250.000");
    }

    #[test]
    fn quantity_groups_like_rupiah_without_prefix() {
        assert_eq!(format_quantity(12_500.0), "12.500");
        assert_eq!(format_quantity(7.0), "7");
    }

    #[test]
    fn normalize_strips_time_component() {
        assert_eq!(
            normalize_date("2026-08-07T10:23:00.000Z").as_deref(),
            Some("2026-08-07")
        );
        assert_eq!(normalize_date("2026-08-07").as_deref(), Some("2026-08-07"));
        assert_eq!(
            normalize_date("2026-08-07 10:23:00").as_deref(),
            Some("2026-08-07")
        );
    }

    #[test]
    fn normalize_rejects_missing_or_malformed_dates() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("   "), None);
        assert_eq!(normalize_date("07/08/2026"), None);
        assert_eq!(normalize_date("besok"), None);
    }
}
