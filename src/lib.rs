// src/lib.rs

//! 清真寺礼拜时间看板
//!
//! 根据按日期索引的时间表显示当天的礼拜时间，持续计算下一个礼拜及剩余时间，
//! 并允许操作员在编辑模式下按分钟微调显示的时间。
//!
//! - `service`：时间调整、时间表查询、下一个礼拜判定和看板状态，全部是纯逻辑
//! - `tasks`：embassy任务，调度器和看板事件循环
//! - `driver`：时钟、配置存储、控制台显示和操作员输入

pub mod common;
pub mod driver;
pub mod service;
pub mod tasks;
