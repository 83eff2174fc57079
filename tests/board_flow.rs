// tests/board_flow.rs
//! 用模拟时钟驱动看板走完一天

use jiff::Zoned;
use jiff::civil::date;
use jiff::tz::TimeZone;

use prayer_board::common::config::AppConfig;
use prayer_board::common::types::{OffsetStep, PrayerKey, TimeKey};
use prayer_board::driver::display::render_text;
use prayer_board::driver::time_source::{SimulatedClock, TimeSource};
use prayer_board::service::board::{OperatorCommand, Phase};
use prayer_board::service::schedule::ScheduleTable;
use prayer_board::tasks::{BoardController, BoardEvent, Handled, TaskId};

const TABLE: &str = r#"{
    "03-08": { "fajr": "05:40", "sunrise": "06:30", "dhuhr": "12:15",
               "asr": "15:25", "maghrib": "18:05", "isha": "19:20" },
    "03-09": { "fajr": "06:38", "sunrise": "07:29", "dhuhr": "13:15",
               "asr": "16:26", "maghrib": "19:06", "isha": "20:21" },
    "04-01": { "fajr": "05:00", "sunrise": "06:15", "dhuhr": "12:00",
               "asr": "15:30", "maghrib": "18:00", "isha": "19:30" },
    "04-02": { "fajr": "04:58", "sunrise": "06:13", "dhuhr": "12:00",
               "asr": "15:31", "maghrib": "18:01", "isha": "19:31" }
}"#;

fn controller() -> BoardController {
    let table = ScheduleTable::from_json_str(TABLE).unwrap();
    BoardController::new(table, AppConfig::default())
}

fn now(clock: &SimulatedClock) -> Zoned {
    clock.get_time().unwrap()
}

/// 按调度器的注册顺序投递一轮节拍
fn tick_all(controller: &mut BoardController, clock: &SimulatedClock) {
    let now = now(clock);
    for id in [TaskId::ScheduleLookup, TaskId::ClockTick, TaskId::NextPrayer] {
        controller.handle(&BoardEvent::Tick(id), &now);
    }
}

#[test]
fn walks_through_a_day() {
    let day = date(2025, 4, 1);
    let clock = SimulatedClock::at_civil(day.at(4, 0, 0, 0)).unwrap();
    let mut controller = controller();

    let expected = [
        (4 * 3600, PrayerKey::Fajr),
        (5 * 3600, PrayerKey::Dhuhr),
        (7 * 3600, PrayerKey::Dhuhr),
        (8 * 3600, PrayerKey::Dhuhr),
        (12 * 3600 + 60, PrayerKey::Asr),
        (17 * 3600 + 59 * 60 + 59, PrayerKey::Maghrib),
        (18 * 3600 + 1, PrayerKey::Isha),
        (23 * 3600, PrayerKey::Fajr),
    ];

    let mut elapsed = 4 * 3600;
    for (second_of_day, prayer) in expected {
        clock.advance_secs(second_of_day - elapsed);
        elapsed = second_of_day;
        tick_all(&mut controller, &clock);
        assert_eq!(
            controller.board().next_prayer().prayer(),
            Some(prayer),
            "at second {second_of_day}"
        );
    }

    // 23:00 之后回绕到明天的晨礼
    let at = controller.board().next_prayer().at().unwrap();
    assert_eq!(at.datetime(), date(2025, 4, 2).at(5, 0, 0, 0));
    assert_eq!(
        controller.board().countdown(&now(&clock)).unwrap().to_string(),
        "06:00:00"
    );
}

#[test]
fn midnight_picks_up_the_next_day() {
    let clock = SimulatedClock::at_civil(date(2025, 4, 1).at(23, 59, 59, 0)).unwrap();
    let mut controller = controller();
    tick_all(&mut controller, &clock);
    assert_eq!(controller.board().schedule_date(), Some(date(2025, 4, 1)));

    clock.advance_secs(2);
    tick_all(&mut controller, &clock);
    assert_eq!(controller.board().schedule_date(), Some(date(2025, 4, 2)));
    assert_eq!(controller.board().phase(), Phase::Resolved);
    assert_eq!(
        controller.board().next_prayer().at().map(Zoned::datetime),
        Some(date(2025, 4, 2).at(4, 58, 0, 0))
    );
}

#[test]
fn clock_tick_ahead_of_lookup_after_midnight_is_pending() {
    let clock = SimulatedClock::at_civil(date(2025, 4, 1).at(23, 59, 59, 0)).unwrap();
    let mut controller = controller();
    tick_all(&mut controller, &clock);
    assert!(!controller.board().next_prayer().is_pending());

    clock.advance_secs(2);
    let after_midnight = now(&clock);
    controller.handle(&BoardEvent::Tick(TaskId::ClockTick), &after_midnight);
    assert!(controller.board().next_prayer().is_pending());
    assert_eq!(controller.view(&after_midnight).phase, Phase::Pending);

    controller.handle(&BoardEvent::Tick(TaskId::ScheduleLookup), &after_midnight);
    assert_eq!(
        controller.board().next_prayer().prayer(),
        Some(PrayerKey::Fajr)
    );
}

#[test]
fn countdown_is_exact_across_spring_forward() {
    let tz = TimeZone::posix("EST5EDT,M3.2.0,M11.1.0").unwrap();
    let clock = SimulatedClock::at_local(date(2025, 3, 8).at(23, 0, 0, 0), tz).unwrap();
    let mut controller = controller();
    tick_all(&mut controller, &clock);

    // 今天的晨礼已过，下一个是 03-08 晨礼本地时间加一天，即 03-09 05:40 EDT
    let next = controller.board().next_prayer();
    assert_eq!(next.prayer(), Some(PrayerKey::Fajr));
    assert_eq!(
        next.at().map(Zoned::datetime),
        Some(date(2025, 3, 9).at(5, 40, 0, 0))
    );
    assert_eq!(
        controller.board().countdown(&now(&clock)).unwrap().to_string(),
        "05:40:00"
    );

    // 换日后按 03-09 的时间表计算，02:00 的跳变不影响倒计时
    clock.advance_secs(4 * 3600);
    tick_all(&mut controller, &clock);
    let now = now(&clock);
    assert_eq!(now.datetime(), date(2025, 3, 9).at(4, 0, 0, 0));
    assert_eq!(
        controller.board().countdown(&now).unwrap().to_string(),
        "02:38:00"
    );
}

#[test]
fn missing_day_falls_back_to_pending() {
    let clock = SimulatedClock::at_civil(date(2025, 4, 2).at(21, 0, 0, 0)).unwrap();
    let mut controller = controller();
    tick_all(&mut controller, &clock);
    assert_eq!(controller.board().phase(), Phase::Resolved);

    // 04-03 不在表中
    clock.advance_secs(4 * 3600);
    tick_all(&mut controller, &clock);
    assert_eq!(controller.board().phase(), Phase::Pending);
    assert!(controller.board().next_prayer().is_pending());

    let view = controller.view(&now(&clock));
    assert_eq!(view.next.countdown, "Loading...");
    assert!(render_text(&view).contains("Waiting for today's schedule"));
}

#[test]
fn operator_edits_are_visible_in_the_frame() {
    let clock = SimulatedClock::at_civil(date(2025, 4, 1).at(6, 0, 0, 0)).unwrap();
    let mut controller = controller();
    tick_all(&mut controller, &clock);
    let now = now(&clock);

    for input in ["e", "+sunrise", "+sunrise", "-fajr"] {
        let command: OperatorCommand = input.parse().unwrap();
        assert_eq!(
            controller.handle(&BoardEvent::Operator(command), &now),
            Handled::Render
        );
    }

    let board = controller.board();
    assert_eq!(board.offsets().get(TimeKey::Sunrise), 2);
    assert_eq!(board.offsets().get(PrayerKey::Fajr.into()), -1);
    assert_eq!(board.adjusted_time(TimeKey::Sunrise, &now, false), "6:17 AM");

    let frame = render_text(&controller.view(&now));
    assert!(frame.contains("EDIT MODE"));
    assert!(frame.contains("[+2]"));
    assert!(frame.contains("Sehri ends: 4:59 AM"));

    controller.handle(
        &BoardEvent::Operator(OperatorCommand::AdjustOffset(
            TimeKey::Sunrise,
            OffsetStep::Minus,
        )),
        &now,
    );
    assert_eq!(controller.board().offsets().get(TimeKey::Sunrise), 1);
}
