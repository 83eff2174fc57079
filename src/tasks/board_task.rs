// src/tasks/board_task.rs
use jiff::Zoned;

use crate::common::GlobalMutex;
use crate::common::config::{AppConfig, CountdownMode};
use crate::driver::display::{DefaultDisplayDriver, DisplayDriver};
use crate::driver::time_source::{DefaultTimeSource, TimeSource};
use crate::service::board::{BoardState, BoardView, OperatorCommand};
use crate::service::schedule::ScheduleTable;
use crate::tasks::scheduler::{TaskId, TaskScheduler};
use crate::tasks::{BOARD_EVENTS, BoardEvent, EXIT, SHUTDOWN};

/// 处理一个事件之后需要做的事
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// 重新渲染看板
    Render,
    /// 状态没有变化
    Idle,
    /// 操作员要求退出
    Quit,
}

/// 看板控制器，持有唯一一份 `BoardState`
///
/// 不依赖执行器，事件处理是同步的，便于测试。
pub struct BoardController {
    board: BoardState,
    table: ScheduleTable,
    config: AppConfig,
}

impl BoardController {
    pub fn new(table: ScheduleTable, config: AppConfig) -> Self {
        Self {
            board: BoardState::new(),
            table,
            config,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn handle(&mut self, event: &BoardEvent, now: &Zoned) -> Handled {
        match *event {
            BoardEvent::Tick(TaskId::ScheduleLookup) => {
                let today = now.date();
                let date_changed = self.board.schedule_date() != Some(today);
                let phase_before = self.board.phase();
                let phase = self.board.refresh_schedule(&self.table, today);
                if date_changed || phase != phase_before {
                    self.board.resolve(now);
                    Handled::Render
                } else {
                    Handled::Idle
                }
            }
            BoardEvent::Tick(TaskId::NextPrayer) => {
                self.board.resolve(now);
                Handled::Render
            }
            BoardEvent::Tick(TaskId::ClockTick) => {
                if self.config.countdown_mode == CountdownMode::Seconds {
                    self.board.resolve(now);
                }
                Handled::Render
            }
            BoardEvent::Operator(OperatorCommand::Quit) => {
                log::info!("Quit requested by operator");
                Handled::Quit
            }
            BoardEvent::Operator(command) => {
                if self.board.apply(command, now) {
                    Handled::Render
                } else {
                    Handled::Idle
                }
            }
        }
    }

    pub fn view(&self, now: &Zoned) -> BoardView {
        self.board.view(now, &self.config)
    }
}

/// 看板任务：消费看板事件并驱动显示
#[embassy_executor::task]
pub async fn board_task(
    controller: BoardController,
    scheduler: &'static GlobalMutex<TaskScheduler>,
    time_source: DefaultTimeSource,
    display: DefaultDisplayDriver,
) {
    log::info!("Board task started");
    let mut controller = controller;
    let mut display = display;

    loop {
        let event = BOARD_EVENTS.receive().await;

        let now = match time_source.get_time() {
            Ok(now) => now,
            Err(e) => {
                log::warn!("Failed to read local time: {}", e);
                continue;
            }
        };

        match controller.handle(&event, &now) {
            Handled::Render => {
                if let Err(e) = display.render(&controller.view(&now)) {
                    log::warn!("Failed to render board: {}", e);
                }
            }
            Handled::Idle => {}
            Handled::Quit => {
                scheduler.lock().await.cancel_all();
                SHUTDOWN.signal(());
                EXIT.signal(());
                break;
            }
        }
    }

    log::info!("Board task stopped");
}
