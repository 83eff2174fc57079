// src/common/mod.rs

/// 公共模块定义
///
/// 本模块定义了礼拜时间看板的公共类型、配置和错误处理
pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CountdownMode};
pub use error::{AppError, Result};
pub use types::{Countdown, OffsetStep, PrayerKey, TimeKey};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::{channel::Channel, mutex::Mutex, signal::Signal};

/// 全局互斥锁类型别名
///
/// 操作员输入来自独立的标准线程，因此统一使用CriticalSectionRawMutex
pub type GlobalMutex<T> = Mutex<CriticalSectionRawMutex, T>;

/// 全局通道类型别名
///
/// 通道容量固定为32个元素
pub type GlobalChannel<T> = Channel<CriticalSectionRawMutex, T, 32>;

/// 全局信号类型别名
pub type GlobalSignal<T> = Signal<CriticalSectionRawMutex, T>;
