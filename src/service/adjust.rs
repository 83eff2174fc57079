// src/service/adjust.rs

//! 时间调整
//!
//! 把原始时间字符串、偏移分钟数和参考日期合成为带时区的绝对时间点。
//! 无法解析的输入一律视为"未就绪"，不会返回错误。

use jiff::civil::{Date, Time};
use jiff::tz::TimeZone;
use jiff::{ToSpan, Zoned};

use crate::service::schedule::UNRESOLVED_MARKER;

/// 解析 `HH:MM`、`H:MM`、`HH` 以及 `h:mm AM/PM`
///
/// 返回 `(hour, minute)`，超出范围的值视为格式错误
pub fn parse_time_of_day(raw: &str) -> Option<(i8, i8)> {
    let text = raw.trim();
    if text.is_empty() || text == UNRESOLVED_MARKER {
        return None;
    }

    let upper = text.to_ascii_uppercase();
    let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some(true))
    } else {
        (upper.as_str(), None)
    };

    let (hour_text, minute_text) = match clock.split_once(':') {
        Some((h, m)) => (h, m),
        None => (clock, "0"),
    };
    if !is_digits(hour_text, 2) || !is_digits(minute_text, 2) {
        return None;
    }
    let hour: i8 = hour_text.parse().ok()?;
    let minute: i8 = minute_text.parse().ok()?;
    if minute > 59 {
        return None;
    }

    let hour = match meridiem {
        None if hour <= 23 => hour,
        Some(is_pm) if (1..=12).contains(&hour) => (hour % 12) + if is_pm { 12 } else { 0 },
        _ => return None,
    };

    Some((hour, minute))
}

fn is_digits(text: &str, max_len: usize) -> bool {
    !text.is_empty() && text.len() <= max_len && text.bytes().all(|b| b.is_ascii_digit())
}

/// 计算调整后的时间点
///
/// 原始时间按 `tz` 解释为 `reference_date` 当天的本地时间，落在夏令时空档内的
/// 时间取空档之后。偏移按绝对分钟数累加，可以跨越午夜和夏令时切换。
pub fn adjust(
    raw: &str,
    offset_minutes: i32,
    reference_date: Date,
    tz: &TimeZone,
) -> Option<Zoned> {
    let (hour, minute) = parse_time_of_day(raw)?;
    let time = Time::new(hour, minute, 0, 0).ok()?;
    let base = reference_date.to_datetime(time).to_zoned(tz.clone()).ok()?;
    base.checked_add(i64::from(offset_minutes).minutes()).ok()
}
