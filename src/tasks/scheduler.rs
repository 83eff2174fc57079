// src/tasks/scheduler.rs
//! 定时任务调度器
//! 单个静态任务按最小间隔运行一个Ticker，到期的命名任务以事件形式发给看板任务

use core::fmt;

use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Instant, Ticker};
use heapless::Vec;

use crate::common::GlobalMutex;
use crate::common::config::AppConfig;
use crate::common::error::{AppError, Result};
use crate::tasks::{BOARD_EVENTS, BoardEvent, SHUTDOWN};

/// 注册任务的上限
pub const MAX_TASKS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskId {
    /// 刷新时钟与显示
    ClockTick,
    /// 重新判定下一个礼拜
    NextPrayer,
    /// 检查日期并查询时间表
    ScheduleLookup,
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskId::ClockTick => "clock-tick",
            TaskId::NextPrayer => "next-prayer",
            TaskId::ScheduleLookup => "schedule-lookup",
        };
        f.write_str(name)
    }
}

/// 周期任务元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTask {
    pub id: TaskId,
    /// 间隔（秒）
    pub interval_secs: u64,
    /// 上次触发时间（毫秒），从未触发为 `None`
    pub last_run_ms: Option<u64>,
    pub enabled: bool,
}

impl PeriodicTask {
    fn is_due(&self, now_ms: u64) -> bool {
        if !self.enabled {
            return false;
        }
        match self.last_run_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_secs * 1000,
        }
    }
}

#[derive(Debug, Default)]
pub struct TaskScheduler {
    tasks: Vec<PeriodicTask, MAX_TASKS>,
}

impl TaskScheduler {
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// 按配置注册三个标准任务，查表排在最前，同一节拍内先换日再计算
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut scheduler = Self::new();
        scheduler.register(TaskId::ScheduleLookup, config.schedule_check_interval_secs)?;
        scheduler.register(TaskId::ClockTick, config.clock_interval_secs)?;
        scheduler.register(TaskId::NextPrayer, config.resolver_interval_secs)?;
        Ok(scheduler)
    }

    pub fn register(&mut self, id: TaskId, interval_secs: u64) -> Result<()> {
        if self.tasks.iter().any(|t| t.id == id) {
            log::warn!("Task {} already registered", id);
            return Ok(());
        }

        let interval_secs = interval_secs.max(1);
        self.tasks
            .push(PeriodicTask {
                id,
                interval_secs,
                last_run_ms: None,
                enabled: true,
            })
            .map_err(|_| {
                log::error!("Task registry full, cannot register {}", id);
                AppError::TaskSpawnError
            })?;

        log::info!(
            "Registered task {}, interval: {}s, min interval: {}s",
            id,
            interval_secs,
            self.min_interval_secs()
        );
        Ok(())
    }

    /// 取消单个任务，返回任务此前是否处于启用状态
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) if task.enabled => {
                task.enabled = false;
                log::info!("Task {} cancelled", id);
                true
            }
            _ => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for task in self.tasks.iter_mut() {
            task.enabled = false;
        }
        log::info!("All tasks cancelled");
    }

    pub fn tasks(&self) -> &[PeriodicTask] {
        &self.tasks
    }

    /// 所有任务间隔的最小值，没有任务时为1秒
    pub fn min_interval_secs(&self) -> u64 {
        self.tasks
            .iter()
            .map(|t| t.interval_secs)
            .min()
            .unwrap_or(1)
    }

    /// 取出到期的任务并记录触发时间
    pub fn take_due(&mut self, now_ms: u64) -> Vec<TaskId, MAX_TASKS> {
        let mut due = Vec::new();
        for task in self.tasks.iter_mut() {
            if task.is_due(now_ms) {
                task.last_run_ms = Some(now_ms);
                // 容量与注册表相同，不会溢出
                let _ = due.push(task.id);
            }
        }
        due
    }
}

/// 单静态任务：按最小间隔唤醒，把到期任务发送到看板事件通道
#[embassy_executor::task]
pub async fn scheduler_task(scheduler: &'static GlobalMutex<TaskScheduler>) {
    log::info!("Starting task scheduler");

    let min_interval = scheduler.lock().await.min_interval_secs();
    let mut ticker = Ticker::every(Duration::from_secs(min_interval));
    log::info!("Scheduler ticker set to {} seconds", min_interval);

    loop {
        let due = scheduler.lock().await.take_due(Instant::now().as_millis());
        for id in due {
            log::debug!("[{}] due", id);
            BOARD_EVENTS.send(BoardEvent::Tick(id)).await;
        }

        match select(ticker.next(), SHUTDOWN.wait()).await {
            Either::First(()) => {}
            Either::Second(()) => {
                log::info!("Task scheduler stopped");
                break;
            }
        }
    }
}
