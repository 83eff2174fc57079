// src/service/offsets.rs
use crate::common::types::{OffsetStep, TimeKey};

/// 每个时间点的手动偏移（分钟）
///
/// 值类型，每次修改都返回新的快照；不做上下限检查，也不持久化。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OffsetStore {
    minutes: [i32; 6],
}

impl OffsetStore {
    pub const fn new() -> Self {
        Self { minutes: [0; 6] }
    }

    pub fn get(&self, key: TimeKey) -> i32 {
        self.minutes[key.index()]
    }

    #[must_use]
    pub fn increment(&self, key: TimeKey, step: OffsetStep) -> Self {
        let mut next = *self;
        next.minutes[key.index()] = next.minutes[key.index()].saturating_add(step.minutes());
        next
    }

    #[must_use]
    pub fn reset(&self) -> Self {
        Self::new()
    }

    pub fn is_zero(&self) -> bool {
        self.minutes.iter().all(|&m| m == 0)
    }
}
