// src/driver/operator_input.rs

//! 操作员输入
//!
//! 在独立的标准线程中逐行读取stdin，解析为 `OperatorCommand` 后投递到看板事件通道。
//! 通道使用CriticalSectionRawMutex，可以安全地从执行器之外的线程写入。

use std::io::BufRead;
use std::thread::JoinHandle;

use crate::common::error::{AppError, Result};
use crate::service::board::OperatorCommand;
use crate::tasks::{BOARD_EVENTS, BoardEvent};

/// 解析一行输入，空行返回 `Ok(None)`
pub fn parse_line(line: &str) -> Result<Option<OperatorCommand>> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    line.parse().map(Some)
}

/// 读取输入直到EOF或收到退出命令，返回投递成功的命令数
pub fn pump_commands<R: BufRead>(reader: R, mut post: impl FnMut(OperatorCommand) -> bool) -> usize {
    let mut posted = 0;
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read operator input: {}", e);
                break;
            }
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                log::warn!("{}", e);
                continue;
            }
        };

        if post(command) {
            posted += 1;
        }
        if command == OperatorCommand::Quit {
            break;
        }
    }
    posted
}

/// 启动stdin读取线程
pub fn spawn_stdin_reader() -> Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("operator-input".into())
        .spawn(|| {
            log::info!("Operator input thread started");
            let stdin = std::io::stdin();
            pump_commands(stdin.lock(), |command| {
                match BOARD_EVENTS.try_send(BoardEvent::Operator(command)) {
                    Ok(()) => true,
                    Err(_) => {
                        log::warn!("Board event queue full, dropping {:?}", command);
                        false
                    }
                }
            });
            log::info!("Operator input closed");
        })
        .map_err(|e| {
            log::error!("Failed to spawn operator input thread: {}", e);
            AppError::InputError
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{OffsetStep, PrayerKey};

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("e"), Ok(Some(OperatorCommand::ToggleEditMode)));
        assert!(parse_line("sunset").is_err());
    }

    #[test]
    fn stops_after_quit() {
        let input = "e\n\nbogus\n+maghrib\nq\n+isha\n";
        let mut seen = Vec::new();
        let posted = pump_commands(input.as_bytes(), |command| {
            seen.push(command);
            true
        });

        assert_eq!(posted, 3);
        assert_eq!(
            seen,
            vec![
                OperatorCommand::ToggleEditMode,
                OperatorCommand::AdjustOffset(PrayerKey::Maghrib.into(), OffsetStep::Plus),
                OperatorCommand::Quit,
            ]
        );
    }

    #[test]
    fn rejected_posts_are_not_counted() {
        let posted = pump_commands("reset\nreset\n".as_bytes(), |_| false);
        assert_eq!(posted, 0);
    }
}
