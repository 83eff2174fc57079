// src/tasks/mod.rs
pub mod board_task;
pub mod scheduler;

pub use board_task::{BoardController, Handled, board_task};
pub use scheduler::{PeriodicTask, TaskId, TaskScheduler, scheduler_task};

use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use crate::common::{GlobalChannel, GlobalSignal};
use crate::service::board::OperatorCommand;

/// 看板事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// 调度器节拍
    Tick(TaskId),
    /// 操作员命令
    Operator(OperatorCommand),
}

/// 看板事件通道，调度器和操作员输入线程都向这里投递
pub static BOARD_EVENTS: GlobalChannel<BoardEvent> = Channel::new();

/// 通知调度器停止
pub static SHUTDOWN: GlobalSignal<()> = Signal::new();

/// 通知主函数退出进程
pub static EXIT: GlobalSignal<()> = Signal::new();
