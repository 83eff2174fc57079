// src/driver/mod.rs
pub mod display;
pub mod operator_input;
pub mod storage;
pub mod time_source;
