// src/common/types.rs

//! 看板核心数据类型
//!
//! 五个礼拜时间按固定顺序排列，日出只参与显示与偏移，不参与"下一个礼拜"的判定。

use core::fmt;
use core::str::FromStr;

use crate::common::error::AppError;

/// 五个礼拜时间，顺序即并列时的优先顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrayerKey {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerKey {
    pub const ALL: [PrayerKey; 5] = [
        PrayerKey::Fajr,
        PrayerKey::Dhuhr,
        PrayerKey::Asr,
        PrayerKey::Maghrib,
        PrayerKey::Isha,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            PrayerKey::Fajr => "Fajr",
            PrayerKey::Dhuhr => "Dhuhr",
            PrayerKey::Asr => "Asr",
            PrayerKey::Maghrib => "Maghrib",
            PrayerKey::Isha => "Isha",
        }
    }

    /// 乌尔都语名称
    pub const fn urdu_name(self) -> &'static str {
        match self {
            PrayerKey::Fajr => "فجر",
            PrayerKey::Dhuhr => "ظہر",
            PrayerKey::Asr => "عصر",
            PrayerKey::Maghrib => "مغرب",
            PrayerKey::Isha => "عشاء",
        }
    }
}

impl fmt::Display for PrayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 可调整偏移的时间点：五个礼拜时间加上日出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeKey {
    Prayer(PrayerKey),
    Sunrise,
}

impl TimeKey {
    /// 显示顺序
    pub const ALL: [TimeKey; 6] = [
        TimeKey::Prayer(PrayerKey::Fajr),
        TimeKey::Sunrise,
        TimeKey::Prayer(PrayerKey::Dhuhr),
        TimeKey::Prayer(PrayerKey::Asr),
        TimeKey::Prayer(PrayerKey::Maghrib),
        TimeKey::Prayer(PrayerKey::Isha),
    ];

    pub(crate) const fn index(self) -> usize {
        match self {
            TimeKey::Prayer(PrayerKey::Fajr) => 0,
            TimeKey::Sunrise => 1,
            TimeKey::Prayer(PrayerKey::Dhuhr) => 2,
            TimeKey::Prayer(PrayerKey::Asr) => 3,
            TimeKey::Prayer(PrayerKey::Maghrib) => 4,
            TimeKey::Prayer(PrayerKey::Isha) => 5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TimeKey::Prayer(p) => p.name(),
            TimeKey::Sunrise => "Sunrise",
        }
    }

    pub const fn urdu_name(self) -> &'static str {
        match self {
            TimeKey::Prayer(p) => p.urdu_name(),
            TimeKey::Sunrise => "طلوع آفتاب",
        }
    }

    /// 时间表文件中的字段名
    pub const fn field(self) -> &'static str {
        match self {
            TimeKey::Prayer(PrayerKey::Fajr) => "fajr",
            TimeKey::Sunrise => "sunrise",
            TimeKey::Prayer(PrayerKey::Dhuhr) => "dhuhr",
            TimeKey::Prayer(PrayerKey::Asr) => "asr",
            TimeKey::Prayer(PrayerKey::Maghrib) => "maghrib",
            TimeKey::Prayer(PrayerKey::Isha) => "isha",
        }
    }
}

impl From<PrayerKey> for TimeKey {
    fn from(prayer: PrayerKey) -> Self {
        TimeKey::Prayer(prayer)
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = s.trim().to_ascii_lowercase();
        TimeKey::ALL
            .into_iter()
            .find(|key| key.field() == field)
            .ok_or_else(|| AppError::InvalidCommand(s.to_string()))
    }
}

/// 操作员单次调整的步长，只能是 +1 或 -1 分钟
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetStep {
    Plus,
    Minus,
}

impl OffsetStep {
    pub const fn minutes(self) -> i32 {
        match self {
            OffsetStep::Plus => 1,
            OffsetStep::Minus => -1,
        }
    }
}

/// 倒计时，已向下取整到秒
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
}

impl Countdown {
    pub const ZERO: Countdown = Countdown {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// 负值按零处理
    pub fn from_secs(total_secs: i64) -> Self {
        let total = total_secs.max(0) as u64;
        Self {
            hours: total / 3600,
            minutes: ((total % 3600) / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}
