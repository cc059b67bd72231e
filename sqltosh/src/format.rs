//! Conversions from raw stat values to display strings.

use crate::error::{SqlError, SqlResult};
use chrono::{Local, TimeZone};

const SIZE_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Renders epoch seconds as `YYYY-MM-DD HH:MM:SS` in local time.
pub fn format_timestamp(epoch_seconds: i64) -> String {
    Local
        .timestamp_opt(epoch_seconds, 0)
        .earliest()
        .map_or_else(
            || crate::metadata::UNKNOWN.to_string(),
            |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
}

/// Renders a byte count with the largest base-1024 unit that keeps the
/// value at or above 1, rounded to two decimals: `1536` -> `"1.5 KB"`.
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }

    let index = (bytes.ilog(1024) as usize).min(SIZE_UNITS.len() - 1);
    let divisor = 1024_f64.powi(i32::try_from(index).unwrap_or(0));
    let value = bytes as f64 / divisor;

    format!("{} {}", trim_decimal(&format!("{value:.2}")), SIZE_UNITS[index])
}

/// Drops trailing zeros but keeps one fractional digit: `"1.50"` -> `"1.5"`,
/// `"1.00"` -> `"1.0"`.
fn trim_decimal(fixed: &str) -> String {
    let mut s = fixed.trim_end_matches('0').to_string();
    if s.ends_with('.') {
        s.push('0');
    }
    s
}

/// Maps three octal digits (owner, group, other) to a symbolic string:
/// `"755"` -> `"rwxr-xr-x"`.
pub fn format_permissions(mode: &str) -> SqlResult<String> {
    mode.chars()
        .map(|digit| {
            let triad = match digit {
                '7' => "rwx",
                '6' => "rw-",
                '5' => "r-x",
                '4' => "r--",
                '3' => "-wx",
                '2' => "-w-",
                '1' => "--x",
                '0' => "---",
                other => return Err(SqlError::InvalidPermissionDigit(other)),
            };
            Ok(triad)
        })
        .collect()
}

/// The last three octal digits of a raw `st_mode`.
pub fn permission_digits(mode: u32) -> String {
    format!("{:03o}", mode & 0o777)
}
