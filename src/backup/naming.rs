// autobackup/src/backup/naming.rs
use chrono::{Datelike, Days, NaiveDate};

/// Format of the date suffix carried by every backup table name.
pub const DATE_SUFFIX_FORMAT: &str = "%Y%m%d";

/// Number of characters in the date suffix.
pub const DATE_SUFFIX_LEN: usize = 8;

pub fn format_date_suffix(date: NaiveDate) -> String {
    date.format(DATE_SUFFIX_FORMAT).to_string()
}

/// `{prefix}_{source}_{YYYYMMDD}`
pub fn backup_table_name(prefix: &str, source: &str, date_suffix: &str) -> String {
    format!("{}_{}_{}", prefix, source, date_suffix)
}

/// Lowest threshold handed out, so the threshold is always eight digits.
pub const THRESHOLD_FLOOR: &str = "00000101";

/// Date suffix below which backups are expired: `today - retention_days`.
///
/// Clamped at year 0. A suffix starting with a character below `'0'` still
/// sorts under the floor and counts as expired.
pub fn retention_threshold(today: NaiveDate, retention_days: u32) -> String {
    match today.checked_sub_days(Days::new(u64::from(retention_days))) {
        Some(threshold) if threshold.year() >= 0 => format_date_suffix(threshold),
        _ => THRESHOLD_FLOOR.to_string(),
    }
}

/// Last eight characters of `table_name`, or `None` when it is shorter.
pub fn date_suffix(table_name: &str) -> Option<&str> {
    let (start, _) = table_name.char_indices().rev().nth(DATE_SUFFIX_LEN - 1)?;
    Some(&table_name[start..])
}

/// Plain string comparison against the threshold; the suffix is never parsed.
pub fn is_expired(table_name: &str, threshold: &str) -> bool {
    date_suffix(table_name).is_some_and(|suffix| suffix < threshold)
}

/// Best-effort recovery of the source name from a backup name.
///
/// Only strips `{prefix}_` and `_{8 chars}`; a source name that itself ends
/// in an underscore and eight characters cannot be told apart.
pub fn original_table_name<'a>(prefix: &str, backup_name: &'a str) -> Option<&'a str> {
    let rest = backup_name.strip_prefix(prefix)?.strip_prefix('_')?;
    let suffix = date_suffix(rest)?;
    let body = rest[..rest.len() - suffix.len()].strip_suffix('_')?;
    (!body.is_empty()).then_some(body)
}
