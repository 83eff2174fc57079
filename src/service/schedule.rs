// src/service/schedule.rs

//! 礼拜时间表
//!
//! 时间表按 `MM-DD` 索引（没有年份），每天包含六个 `HH:MM` 字符串：
//! `fajr, sunrise, dhuhr, asr, maghrib, isha`。

use std::collections::BTreeMap;
use std::fs;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::common::error::{AppError, Result};
use crate::common::types::{PrayerKey, TimeKey};

/// 尚未加载的时间使用的占位字符串
pub const UNRESOLVED_MARKER: &str = "Loading...";

/// 一天的原始时间字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDaySchedule {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl RawDaySchedule {
    /// 查表失败时的占位日程
    pub fn unresolved() -> Self {
        Self {
            fajr: UNRESOLVED_MARKER.to_string(),
            sunrise: UNRESOLVED_MARKER.to_string(),
            dhuhr: UNRESOLVED_MARKER.to_string(),
            asr: UNRESOLVED_MARKER.to_string(),
            maghrib: UNRESOLVED_MARKER.to_string(),
            isha: UNRESOLVED_MARKER.to_string(),
        }
    }

    pub fn get(&self, key: TimeKey) -> &str {
        match key {
            TimeKey::Prayer(PrayerKey::Fajr) => &self.fajr,
            TimeKey::Sunrise => &self.sunrise,
            TimeKey::Prayer(PrayerKey::Dhuhr) => &self.dhuhr,
            TimeKey::Prayer(PrayerKey::Asr) => &self.asr,
            TimeKey::Prayer(PrayerKey::Maghrib) => &self.maghrib,
            TimeKey::Prayer(PrayerKey::Isha) => &self.isha,
        }
    }
}

/// 生成查表键，例如 `03-07`
pub fn date_key(date: Date) -> String {
    format!("{:02}-{:02}", date.month(), date.day())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleTable {
    days: BTreeMap<String, RawDaySchedule>,
}

impl ScheduleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AppError::ScheduleLoad(e.to_string()))
    }

    /// 从文件加载时间表
    pub fn load(path: &str) -> Result<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| AppError::ScheduleLoad(format!("{}: {}", path, e)))?;
        let table = Self::from_json_str(&json)?;
        log::info!("Loaded schedule table from {} ({} days)", path, table.len());
        Ok(table)
    }

    pub fn insert(&mut self, key: &str, day: RawDaySchedule) {
        self.days.insert(key.to_string(), day);
    }

    /// 按日期查表，不存在时返回 `None`
    pub fn lookup(&self, date: Date) -> Option<&RawDaySchedule> {
        self.days.get(&date_key(date))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
