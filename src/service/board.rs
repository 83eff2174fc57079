// src/service/board.rs

//! 看板状态
//!
//! `BoardState` 是唯一修改状态的地方：当天的原始时间表、偏移、编辑模式
//! 以及最近一次判定的下一个礼拜都保存在这里。显示层只拿到不可变的 `BoardView`。

use core::str::FromStr;

use jiff::Zoned;
use jiff::civil::Date;

use crate::common::config::AppConfig;
use crate::common::error::AppError;
use crate::common::types::{Countdown, OffsetStep, PrayerKey, TimeKey};
use crate::service::adjust::{adjust, parse_time_of_day};
use crate::service::offsets::OffsetStore;
use crate::service::resolver::{AdjustedPrayers, NextPrayerState, remaining_until, resolve_next};
use crate::service::schedule::{RawDaySchedule, ScheduleTable, date_key};

/// 未就绪时间的显示文本
pub const UNRESOLVED_DISPLAY: &str = "...";
/// 倒计时未就绪时的显示文本
pub const LOADING_DISPLAY: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 至少一个礼拜时间未就绪
    Pending,
    Resolved,
}

/// 操作员命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCommand {
    ToggleEditMode,
    AdjustOffset(TimeKey, OffsetStep),
    ResetOffsets,
    Quit,
}

impl FromStr for OperatorCommand {
    type Err = AppError;

    /// 支持 `edit`/`e`、`+fajr`/`-isha`、`reset`、`quit`/`q`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        match input.to_ascii_lowercase().as_str() {
            "e" | "edit" => return Ok(OperatorCommand::ToggleEditMode),
            "reset" => return Ok(OperatorCommand::ResetOffsets),
            "q" | "quit" | "exit" => return Ok(OperatorCommand::Quit),
            _ => {}
        }

        let step = match input.chars().next() {
            Some('+') => OffsetStep::Plus,
            Some('-') => OffsetStep::Minus,
            _ => return Err(AppError::InvalidCommand(input.to_string())),
        };
        let key: TimeKey = input[1..]
            .parse()
            .map_err(|_| AppError::InvalidCommand(input.to_string()))?;
        Ok(OperatorCommand::AdjustOffset(key, step))
    }
}

/// 单行时间
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRow {
    pub key: TimeKey,
    pub name: &'static str,
    pub urdu_name: &'static str,
    pub time: String,
    pub offset: i32,
    pub is_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextPrayerView {
    pub name: String,
    pub urdu_name: String,
    pub time: String,
    pub countdown: String,
}

/// 一帧完整的看板内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub clock: String,
    pub weekday: String,
    pub date: String,
    pub phase: Phase,
    pub rows: Vec<TimeRow>,
    pub next: NextPrayerView,
    /// 开斋时间（调整后的昏礼）
    pub iftar: String,
    /// 封斋截止（调整后的晨礼）
    pub sehri_end: String,
    pub edit_mode: bool,
    pub mosque_name: String,
}

pub struct BoardState {
    schedule_date: Option<Date>,
    raw: RawDaySchedule,
    offsets: OffsetStore,
    edit_mode: bool,
    next: NextPrayerState,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            schedule_date: None,
            raw: RawDaySchedule::unresolved(),
            offsets: OffsetStore::new(),
            edit_mode: false,
            next: NextPrayerState::Pending,
        }
    }

    /// 最近一次查表得到的阶段
    pub fn phase(&self) -> Phase {
        let all_present = PrayerKey::ALL
            .into_iter()
            .all(|p| parse_time_of_day(self.raw.get(p.into())).is_some());
        if all_present {
            Phase::Resolved
        } else {
            Phase::Pending
        }
    }

    /// `today` 的阶段，日期变化后在重新查表之前一直是Pending
    pub fn phase_on(&self, today: Date) -> Phase {
        if self.is_current(today) {
            self.phase()
        } else {
            Phase::Pending
        }
    }

    pub fn schedule_date(&self) -> Option<Date> {
        self.schedule_date
    }

    fn is_current(&self, today: Date) -> bool {
        self.schedule_date == Some(today)
    }

    /// 日期变化（或仍处于Pending）时重新查表
    pub fn refresh_schedule(&mut self, table: &ScheduleTable, today: Date) -> Phase {
        let before = self.phase();
        if self.is_current(today) && before == Phase::Resolved {
            return before;
        }

        if !self.is_current(today) {
            log::info!("Date changed, looking up schedule for {}", date_key(today));
        }
        self.schedule_date = Some(today);
        self.raw = match table.lookup(today) {
            Some(day) => day.clone(),
            None => {
                if before == Phase::Resolved {
                    log::warn!("No schedule entry for {}", date_key(today));
                }
                RawDaySchedule::unresolved()
            }
        };

        let after = self.phase();
        if after != before {
            log::info!("Board phase {:?} -> {:?}", before, after);
        }
        if after == Phase::Pending {
            self.next = NextPrayerState::Pending;
        }
        after
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn offsets(&self) -> OffsetStore {
        self.offsets
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        log::info!(
            "Edit mode {}",
            if self.edit_mode { "enabled" } else { "disabled" }
        );
        self.edit_mode
    }

    /// 只有编辑模式下才允许调整，返回新的偏移值
    pub fn adjust_offset(&mut self, key: TimeKey, step: OffsetStep) -> Option<i32> {
        if !self.edit_mode {
            log::warn!("Ignoring offset change for {}: edit mode is off", key);
            return None;
        }
        self.offsets = self.offsets.increment(key, step);
        let minutes = self.offsets.get(key);
        log::info!("Offset for {} is now {:+} min", key, minutes);
        Some(minutes)
    }

    /// 应用一条操作员命令，返回状态是否改变
    ///
    /// 偏移改变后立即按 `now` 重新判定下一个礼拜。
    pub fn apply(&mut self, command: OperatorCommand, now: &Zoned) -> bool {
        let changed = match command {
            OperatorCommand::ToggleEditMode => {
                self.toggle_edit_mode();
                true
            }
            OperatorCommand::AdjustOffset(key, step) => self.adjust_offset(key, step).is_some(),
            OperatorCommand::ResetOffsets => {
                let changed = !self.offsets.is_zero();
                self.offsets = self.offsets.reset();
                log::info!("Offsets reset");
                changed
            }
            OperatorCommand::Quit => false,
        };

        if changed {
            self.resolve(now);
        }
        changed
    }

    /// 以 `now` 所在的日期和时区计算调整后的时间点
    ///
    /// 时间表不是 `now` 当天的（午夜之后尚未重新查表）时返回 `None`。
    pub fn adjusted_instant(&self, key: TimeKey, now: &Zoned) -> Option<Zoned> {
        let today = now.date();
        if !self.is_current(today) {
            return None;
        }
        adjust(self.raw.get(key), self.offsets.get(key), today, now.time_zone())
    }

    pub fn adjusted_prayers(&self, now: &Zoned) -> AdjustedPrayers {
        PrayerKey::ALL.map(|prayer| (prayer, self.adjusted_instant(prayer.into(), now)))
    }

    /// 调整后时间的显示文本
    pub fn adjusted_time(&self, key: TimeKey, now: &Zoned, time_format_24h: bool) -> String {
        format_time(self.adjusted_instant(key, now).as_ref(), time_format_24h)
    }

    /// 按当前快照重新计算下一个礼拜
    pub fn resolve(&mut self, now: &Zoned) -> &NextPrayerState {
        let adjusted = self.adjusted_prayers(now);
        let next = resolve_next(&adjusted, now);
        if next.prayer() != self.next.prayer() {
            match &next {
                NextPrayerState::Resolved { prayer, at, .. } => {
                    log::info!("Next prayer: {} at {}", prayer, at.datetime())
                }
                NextPrayerState::Pending => log::debug!("Next prayer pending"),
            }
        }
        self.next = next;
        &self.next
    }

    pub fn next_prayer(&self) -> &NextPrayerState {
        &self.next
    }

    /// 基于最近一次判定结果的倒计时
    pub fn countdown(&self, now: &Zoned) -> Option<Countdown> {
        self.next.at().map(|at| remaining_until(at, now))
    }

    pub fn view(&self, now: &Zoned, config: &AppConfig) -> BoardView {
        let next_prayer = self.next.prayer();

        let rows = TimeKey::ALL
            .into_iter()
            .map(|key| TimeRow {
                key,
                name: key.name(),
                urdu_name: key.urdu_name(),
                time: self.adjusted_time(key, now, config.time_format_24h),
                offset: self.offsets.get(key),
                is_next: matches!(key, TimeKey::Prayer(p) if Some(p) == next_prayer),
            })
            .collect();

        let next = match &self.next {
            NextPrayerState::Resolved { prayer, at, .. } => NextPrayerView {
                name: prayer.name().to_string(),
                urdu_name: prayer.urdu_name().to_string(),
                time: format_time(Some(at), config.time_format_24h),
                countdown: self
                    .countdown(now)
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| LOADING_DISPLAY.to_string()),
            },
            NextPrayerState::Pending => NextPrayerView {
                name: UNRESOLVED_DISPLAY.to_string(),
                urdu_name: UNRESOLVED_DISPLAY.to_string(),
                time: LOADING_DISPLAY.to_string(),
                countdown: LOADING_DISPLAY.to_string(),
            },
        };

        BoardView {
            clock: format_clock(now, config.time_format_24h),
            weekday: now.strftime("%A").to_string(),
            date: now.strftime("%B %-d, %Y").to_string(),
            phase: self.phase_on(now.date()),
            rows,
            next,
            iftar: self.adjusted_time(PrayerKey::Maghrib.into(), now, config.time_format_24h),
            sehri_end: self.adjusted_time(PrayerKey::Fajr.into(), now, config.time_format_24h),
            edit_mode: self.edit_mode,
            mosque_name: config.mosque_name.clone(),
        }
    }
}

/// `5:07 AM` 或 `05:07`，未就绪时为 `...`
pub fn format_time(instant: Option<&Zoned>, time_format_24h: bool) -> String {
    let Some(dt) = instant else {
        return UNRESOLVED_DISPLAY.to_string();
    };
    if time_format_24h {
        format!("{:02}:{:02}", dt.hour(), dt.minute())
    } else {
        let suffix = if dt.hour() < 12 { "AM" } else { "PM" };
        format!("{}:{:02} {}", twelve_hour(dt.hour()), dt.minute(), suffix)
    }
}

/// 大号时钟，12小时制不带AM/PM
pub fn format_clock(now: &Zoned, time_format_24h: bool) -> String {
    if time_format_24h {
        format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second())
    } else {
        format!(
            "{}:{:02}:{:02}",
            twelve_hour(now.hour()),
            now.minute(),
            now.second()
        )
    }
}

fn twelve_hour(hour: i8) -> i8 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}
