// src/main.rs

//! 礼拜时间看板主入口

use embassy_executor::Spawner;
use static_cell::StaticCell;

use prayer_board::common::config::AppConfig;
use prayer_board::common::{AppError, GlobalMutex, Result};
use prayer_board::driver::display::ConsoleDisplay;
use prayer_board::driver::operator_input::spawn_stdin_reader;
use prayer_board::driver::storage::DefaultConfigStorage;
use prayer_board::driver::time_source::DefaultTimeSource;
use prayer_board::service::config_service::ConfigService;
use prayer_board::service::schedule::ScheduleTable;
use prayer_board::tasks::{BoardController, EXIT, TaskScheduler, board_task, scheduler_task};

/// 配置文件路径的环境变量
const CONFIG_ENV: &str = "PRAYER_BOARD_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "prayer_board.json";

static SCHEDULER: StaticCell<GlobalMutex<TaskScheduler>> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::init();
    log::info!("Prayer board starting");

    if let Err(e) = run(spawner) {
        log::error!("Prayer board failed to start: {}", e);
        std::process::exit(1);
    }

    EXIT.wait().await;
    log::info!("Prayer board exiting");
    std::process::exit(0);
}

fn run(spawner: Spawner) -> Result<()> {
    let config = load_config();
    let table = load_schedule(&config);

    let scheduler = SCHEDULER.init(GlobalMutex::new(TaskScheduler::from_config(&config)?));
    let display = ConsoleDisplay::stdout(config.clear_screen);
    let controller = BoardController::new(table, config);

    if let Err(e) = spawner.spawn(board_task(
        controller,
        scheduler,
        DefaultTimeSource::new(),
        display,
    )) {
        log::error!("Failed to spawn board task: {:?}", e);
        return Err(AppError::TaskSpawnError);
    }
    if let Err(e) = spawner.spawn(scheduler_task(scheduler)) {
        log::error!("Failed to spawn scheduler task: {:?}", e);
        return Err(AppError::TaskSpawnError);
    }

    // 没有操作员输入时看板照常运行
    if let Err(e) = spawn_stdin_reader() {
        log::warn!("Operator input disabled: {}", e);
    }

    Ok(())
}

fn load_config() -> AppConfig {
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut service = ConfigService::new(DefaultConfigStorage::new(&path));
    match service.load_config() {
        Ok(config) => {
            log::info!("Configuration loaded from {}", path);
            config
        }
        Err(e) => {
            log::error!("Failed to load configuration from {}: {}", path, e);
            AppConfig::default()
        }
    }
}

/// 时间表加载失败时使用空表，看板停留在未就绪状态
fn load_schedule(config: &AppConfig) -> ScheduleTable {
    match ScheduleTable::load(&config.schedule_path) {
        Ok(table) => {
            if table.is_empty() {
                log::warn!("Schedule table {} has no entries", config.schedule_path);
            }
            table
        }
        Err(e) => {
            log::error!("{}", e);
            ScheduleTable::new()
        }
    }
}
