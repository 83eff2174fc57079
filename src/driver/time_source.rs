// src/driver/time_source.rs
use core::sync::atomic::{AtomicI64, Ordering};

use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

use crate::common::error::{AppError, Result};

pub trait TimeSource {
    /// 获取当前时间（带时区）
    fn get_time(&self) -> Result<Zoned>;
}

/// 主机时钟，按系统本地时区解释
pub struct SystemClock {
    timezone: TimeZone,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            timezone: TimeZone::system(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn get_time(&self) -> Result<Zoned> {
        Ok(Timestamp::now().to_zoned(self.timezone.clone()))
    }
}

/// 模拟时钟 - 时间只在显式设置或推进时改变
///
/// 内部保存微秒级Unix时间戳，可在任务之间共享
pub struct SimulatedClock {
    timestamp_us: AtomicI64,
    timezone: TimeZone,
}

impl SimulatedClock {
    pub fn new(timestamp: Timestamp, timezone: TimeZone) -> Self {
        Self {
            timestamp_us: AtomicI64::new(timestamp.as_microsecond()),
            timezone,
        }
    }

    /// 从 `timezone` 中的本地时间开始
    pub fn at_local(datetime: DateTime, timezone: TimeZone) -> Result<Self> {
        let zoned = datetime
            .to_zoned(timezone.clone())
            .map_err(|_| AppError::TimeError)?;
        Ok(Self::new(zoned.timestamp(), timezone))
    }

    /// 以UTC解释本地时间，测试中最方便
    pub fn at_civil(datetime: DateTime) -> Result<Self> {
        Self::at_local(datetime, TimeZone::UTC)
    }

    pub fn advance_secs(&self, secs: i64) {
        self.timestamp_us
            .fetch_add(secs * 1_000_000, Ordering::AcqRel);
    }
}

impl TimeSource for SimulatedClock {
    fn get_time(&self) -> Result<Zoned> {
        let timestamp_us = self.timestamp_us.load(Ordering::Acquire);
        let timestamp = Timestamp::from_microsecond(timestamp_us).map_err(|e| {
            log::error!("Simulated clock out of range: {}", e);
            AppError::TimeError
        })?;
        Ok(timestamp.to_zoned(self.timezone.clone()))
    }
}

pub type DefaultTimeSource = SystemClock;
