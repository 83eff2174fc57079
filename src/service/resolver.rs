// src/service/resolver.rs

//! 下一个礼拜的判定
//!
//! 按固定顺序扫描五个调整后的时间点，第一个严格晚于当前时间的即为下一个礼拜；
//! 全部已过时回绕到明天的晨礼（当天晨礼的本地时间加一个日历日）。
//! 剩余时间按绝对时间戳计算，跨越夏令时切换时仍然准确。

use jiff::{ToSpan, Zoned};

use crate::common::types::{Countdown, PrayerKey};

/// 五个礼拜按固定顺序排列的调整后时间
pub type AdjustedPrayers = [(PrayerKey, Option<Zoned>); 5];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NextPrayerState {
    /// 至少有一个时间尚未就绪
    #[default]
    Pending,
    Resolved {
        prayer: PrayerKey,
        at: Zoned,
        remaining: Countdown,
    },
}

impl NextPrayerState {
    pub fn prayer(&self) -> Option<PrayerKey> {
        match self {
            NextPrayerState::Resolved { prayer, .. } => Some(*prayer),
            NextPrayerState::Pending => None,
        }
    }

    pub fn at(&self) -> Option<&Zoned> {
        match self {
            NextPrayerState::Resolved { at, .. } => Some(at),
            NextPrayerState::Pending => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, NextPrayerState::Pending)
    }
}

/// 剩余时间，向下取整到秒，负值归零
pub fn remaining_until(at: &Zoned, now: &Zoned) -> Countdown {
    Countdown::from_secs(at.timestamp().duration_since(now.timestamp()).as_secs())
}

pub fn resolve_next(adjusted: &AdjustedPrayers, now: &Zoned) -> NextPrayerState {
    let mut instants = Vec::with_capacity(adjusted.len());
    for (prayer, instant) in adjusted {
        let Some(at) = instant else {
            log::debug!("{} is unresolved, next prayer pending", prayer);
            return NextPrayerState::Pending;
        };
        instants.push((*prayer, at));
    }

    let upcoming = instants
        .iter()
        .find(|(_, at)| at.timestamp() > now.timestamp());
    let (prayer, at) = match upcoming {
        Some(&(prayer, at)) => (prayer, at.clone()),
        None => {
            let (fajr, fajr_at) = instants[0];
            match fajr_at.checked_add(1.day()) {
                Ok(tomorrow) => (fajr, tomorrow),
                Err(e) => {
                    log::warn!("Cannot roll {} to the next day: {}", fajr, e);
                    return NextPrayerState::Pending;
                }
            }
        }
    };

    let remaining = remaining_until(&at, now);
    NextPrayerState::Resolved {
        prayer,
        at,
        remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::adjust::adjust;
    use jiff::civil::{Date, date};
    use jiff::tz::TimeZone;

    const DAY: Date = date(2024, 4, 2);

    fn utc(day: Date, hour: i8, minute: i8, second: i8) -> Zoned {
        day.at(hour, minute, second, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    fn board_in(times: [&str; 5], day: Date, tz: &TimeZone) -> AdjustedPrayers {
        let mut prayers = PrayerKey::ALL.into_iter().zip(times);
        core::array::from_fn(|_| {
            let (prayer, raw) = prayers.next().unwrap();
            (prayer, adjust(raw, 0, day, tz))
        })
    }

    fn board(times: [&str; 5]) -> AdjustedPrayers {
        board_in(times, DAY, &TimeZone::UTC)
    }

    fn standard() -> AdjustedPrayers {
        board(["05:00", "12:00", "15:30", "18:00", "19:30"])
    }

    #[test]
    fn one_second_before_maghrib() {
        let next = resolve_next(&standard(), &utc(DAY, 17, 59, 59));
        assert_eq!(
            next,
            NextPrayerState::Resolved {
                prayer: PrayerKey::Maghrib,
                at: utc(DAY, 18, 0, 0),
                remaining: Countdown::from_secs(1),
            }
        );
        if let NextPrayerState::Resolved { remaining, .. } = next {
            assert_eq!(remaining.to_string(), "00:00:01");
        }
    }

    #[test]
    fn just_after_maghrib_moves_to_isha() {
        let next = resolve_next(&standard(), &utc(DAY, 18, 0, 1));
        assert_eq!(next.prayer(), Some(PrayerKey::Isha));
        assert_eq!(next.at(), Some(&utc(DAY, 19, 30, 0)));
    }

    #[test]
    fn exact_instant_is_not_upcoming() {
        let next = resolve_next(&standard(), &utc(DAY, 12, 0, 0));
        assert_eq!(next.prayer(), Some(PrayerKey::Asr));
    }

    #[test]
    fn sub_second_remainder_is_floored() {
        let now = DAY
            .at(4, 59, 58, 300_000_000)
            .to_zoned(TimeZone::UTC)
            .unwrap();
        match resolve_next(&standard(), &now) {
            NextPrayerState::Resolved {
                prayer, remaining, ..
            } => {
                assert_eq!(prayer, PrayerKey::Fajr);
                assert_eq!(remaining, Countdown::from_secs(1));
            }
            NextPrayerState::Pending => panic!("expected a resolved prayer"),
        }
    }

    #[test]
    fn after_isha_wraps_to_tomorrow_fajr() {
        let next = resolve_next(&standard(), &utc(DAY, 23, 0, 0));
        assert_eq!(
            next,
            NextPrayerState::Resolved {
                prayer: PrayerKey::Fajr,
                at: utc(date(2024, 4, 3), 5, 0, 0),
                remaining: Countdown::from_secs(6 * 3600),
            }
        );
    }

    #[test]
    fn wrap_is_exactly_one_day_after_adjusted_fajr() {
        let mut adjusted = standard();
        adjusted[0].1 = adjust("05:00", -17, DAY, &TimeZone::UTC);
        let next = resolve_next(&adjusted, &utc(DAY, 21, 0, 0));
        let fajr_today = adjusted[0].1.clone().unwrap();
        let wrapped = next.at().unwrap();
        assert_eq!(
            wrapped
                .timestamp()
                .duration_since(fajr_today.timestamp())
                .as_hours(),
            24
        );
    }

    #[test]
    fn countdown_across_spring_forward_uses_real_elapsed_time() {
        let tz = TimeZone::posix("EST5EDT,M3.2.0,M11.1.0").unwrap();
        let day = date(2025, 3, 8);
        let adjusted = board_in(["05:00", "12:15", "15:10", "17:55", "19:20"], day, &tz);
        let now = day.at(23, 0, 0, 0).to_zoned(tz.clone()).unwrap();

        let next = resolve_next(&adjusted, &now);
        assert_eq!(next.prayer(), Some(PrayerKey::Fajr));
        // 明天 05:00 EDT，距今晚 23:00 EST 只有5小时
        assert_eq!(next.at().unwrap().datetime(), date(2025, 3, 9).at(5, 0, 0, 0));
        match next {
            NextPrayerState::Resolved { remaining, .. } => {
                assert_eq!(remaining.to_string(), "05:00:00")
            }
            NextPrayerState::Pending => panic!("expected a resolved prayer"),
        }
    }

    #[test]
    fn ties_resolve_in_fixed_order() {
        let next = resolve_next(
            &board(["05:00", "13:00", "13:00", "18:00", "19:30"]),
            &utc(DAY, 12, 0, 0),
        );
        assert_eq!(next.prayer(), Some(PrayerKey::Dhuhr));
    }

    #[test]
    fn any_unresolved_input_is_pending() {
        for missing in 0..5 {
            let mut adjusted = standard();
            adjusted[missing].1 = None;
            assert_eq!(
                resolve_next(&adjusted, &utc(DAY, 10, 0, 0)),
                NextPrayerState::Pending
            );
        }
        let loading = board(["Loading...", "12:00", "15:30", "18:00", "19:30"]);
        assert!(resolve_next(&loading, &utc(DAY, 10, 0, 0)).is_pending());
    }

    #[test]
    fn resolution_is_idempotent() {
        let adjusted = standard();
        let now = utc(DAY, 15, 29, 0);
        assert_eq!(resolve_next(&adjusted, &now), resolve_next(&adjusted, &now));
    }

    #[test]
    fn late_recompute_clamps_to_zero() {
        assert_eq!(
            remaining_until(&utc(DAY, 18, 0, 0), &utc(DAY, 18, 0, 5)),
            Countdown::ZERO
        );
    }
}
