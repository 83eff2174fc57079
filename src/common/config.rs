// src/common/config.rs
use serde::{Deserialize, Serialize};

/// 倒计时刷新粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownMode {
    /// 每秒时钟节拍同时重新计算下一个礼拜
    #[default]
    Seconds,
    /// 只按 `resolver_interval_secs` 重新计算
    Minutes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 时间表JSON文件路径
    pub schedule_path: String,

    // 显示配置
    pub time_format_24h: bool,
    pub countdown_mode: CountdownMode,
    pub clear_screen: bool,
    pub mosque_name: String,

    // 定时任务间隔（秒）
    pub clock_interval_secs: u64,
    pub resolver_interval_secs: u64,
    pub schedule_check_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schedule_path: String::from("data/prayer_times.json"),
            time_format_24h: false,
            countdown_mode: CountdownMode::Seconds,
            clear_screen: true,
            mosque_name: String::from("مسجد شریف توحید پورہ کلارووس کشمیر"),
            clock_interval_secs: 1,
            resolver_interval_secs: 1,
            schedule_check_interval_secs: 1,
        }
    }
}

impl AppConfig {
    /// 间隔为0会让调度器空转，统一修正为至少1秒
    pub fn normalized(mut self) -> Self {
        self.clock_interval_secs = self.clock_interval_secs.max(1);
        self.resolver_interval_secs = self.resolver_interval_secs.max(1);
        self.schedule_check_interval_secs = self.schedule_check_interval_secs.max(1);
        self
    }
}
