// src/driver/display.rs

/// 显示驱动模块
///
/// 看板只输出文本帧，控制台是唯一的实现
use std::io::Write;

use crate::common::error::{AppError, Result};
use crate::service::board::{BoardView, Phase};

/// 默认显示驱动
pub type DefaultDisplayDriver = ConsoleDisplay<std::io::Stdout>;

/// 显示驱动trait
pub trait DisplayDriver {
    /// 渲染一帧看板
    fn render(&mut self, view: &BoardView) -> Result<()>;
}

/// 控制台显示，内容未变化时不重绘
pub struct ConsoleDisplay<W: Write> {
    out: W,
    clear_screen: bool,
    last_frame: Option<String>,
}

impl ConsoleDisplay<std::io::Stdout> {
    pub fn stdout(clear_screen: bool) -> Self {
        Self::new(std::io::stdout(), clear_screen)
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self {
            out,
            clear_screen,
            last_frame: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplayDriver for ConsoleDisplay<W> {
    fn render(&mut self, view: &BoardView) -> Result<()> {
        let frame = render_text(view);
        if self.last_frame.as_deref() == Some(frame.as_str()) {
            return Ok(());
        }

        let write = |out: &mut W, clear: bool| -> std::io::Result<()> {
            if clear {
                // 清屏并移动光标到左上角
                out.write_all(b"\x1b[2J\x1b[H")?;
            }
            out.write_all(frame.as_bytes())?;
            out.flush()
        };
        write(&mut self.out, self.clear_screen).map_err(|e| {
            log::error!("Failed to write board frame: {}", e);
            AppError::DisplayError
        })?;

        self.last_frame = Some(frame);
        Ok(())
    }
}

/// 把一帧看板排版为纯文本
pub fn render_text(view: &BoardView) -> String {
    let mut text = String::new();

    text.push_str(&format!("{}\n", view.mosque_name));
    text.push_str(&format!("{}\n", view.clock));
    text.push_str(&format!("{}  {}\n", view.weekday, view.date));
    text.push('\n');

    for row in &view.rows {
        let marker = if row.is_next { ">" } else { " " };
        let offset = if view.edit_mode {
            format!("  [{:+}]", row.offset)
        } else {
            String::new()
        };
        text.push_str(&format!(
            "{} {:<8} {:>8}  {}{}\n",
            marker, row.name, row.time, row.urdu_name, offset
        ));
    }
    text.push('\n');

    text.push_str(&format!(
        "Next: {} {} at {}\n",
        view.next.name, view.next.urdu_name, view.next.time
    ));
    text.push_str(&format!("Countdown: {}\n", view.next.countdown));
    text.push_str(&format!(
        "Sehri ends: {}   Iftar: {}\n",
        view.sehri_end, view.iftar
    ));

    if view.phase == Phase::Pending {
        text.push_str("Waiting for today's schedule\n");
    }
    if view.edit_mode {
        text.push_str("EDIT MODE  (+name / -name, reset, e to leave)\n");
    }

    text
}
