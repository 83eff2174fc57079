// src/service/mod.rs

//! 服务模块 - 看板的核心业务逻辑
//!
//! 时间调整、偏移、时间表查询、下一个礼拜判定和看板状态都是纯逻辑，
//! 不依赖执行器，可以直接在测试中调用。

pub mod adjust;
pub mod board;
pub mod config_service;
pub mod offsets;
pub mod resolver;
pub mod schedule;

pub use board::{BoardState, BoardView, OperatorCommand, Phase};
pub use config_service::ConfigService;
pub use offsets::OffsetStore;
pub use resolver::NextPrayerState;
pub use schedule::{RawDaySchedule, ScheduleTable};
