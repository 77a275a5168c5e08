use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal_macros::dec;

use crate::{
    BalanceService, BalanceStore, CatalogService, CoreError, FixedClock, SimulationService,
    SummaryService,
};
use forecast_domain::{
    BalanceRecord, EventCatalog, Money, MonthlyExpense, MonthlyExpenseTable, Outlook,
    RecurrenceRule, RecurringEvent,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn money(value: rust_decimal::Decimal) -> Money {
    Money::new(value)
}

fn paycheck_catalog() -> EventCatalog {
    EventCatalog::new(vec![RecurringEvent::new(
        "Bi-weekly pay",
        money(dec!(2700.00)),
        RecurrenceRule::interval(date(2025, 6, 13), 14),
    )])
}

fn household_catalog() -> EventCatalog {
    let mut table = MonthlyExpenseTable::new();
    table.insert(
        2,
        vec![
            MonthlyExpense::new("Kindle", money(dec!(13.93))),
            MonthlyExpense::new("Harp", money(dec!(150.00))),
            MonthlyExpense::new("Kohls", money(dec!(100.00))),
            MonthlyExpense::new("Grass Roots Coop", money(dec!(158.76))),
        ],
    );
    table.insert(15, vec![MonthlyExpense::new("Netflix", money(dec!(20.00)))]);
    table.insert(
        22,
        vec![
            MonthlyExpense::new("Allstate Car insurance", money(dec!(322.88))),
            MonthlyExpense::new("T-Mobile", money(dec!(113.00))),
        ],
    );
    EventCatalog::with_monthly_expenses(
        vec![
            RecurringEvent::new(
                "Bi-weekly pay",
                money(dec!(2700.00)),
                RecurrenceRule::interval(date(2025, 6, 13), 14),
            ),
            RecurringEvent::new(
                "Social Security",
                money(dec!(2600.00)),
                RecurrenceRule::nth_weekday(Weekday::Wed, 4),
            ),
        ],
        &table,
    )
}

#[test]
fn paycheck_lands_on_day_twelve() {
    let forecast = SimulationService::simulate(
        money(dec!(1000.00)),
        date(2025, 6, 1),
        14,
        &paycheck_catalog(),
        money(dec!(100.00)),
    )
    .expect("simulate");

    let entries = forecast.entries();
    assert_eq!(entries.len(), 15);
    assert_eq!(entries[12].date, date(2025, 6, 13));
    assert_eq!(entries[12].net_change, money(dec!(2600.00)));
    assert_eq!(entries[12].applied_events.len(), 1);
    assert_eq!(entries[12].applied_events[0].description, "Bi-weekly pay");
    for (offset, entry) in entries.iter().enumerate().skip(1) {
        if offset != 12 {
            assert_eq!(entry.net_change, money(dec!(-100.00)), "offset {offset}");
        }
    }
    assert_eq!(forecast.ending_balance(), money(dec!(2300.00)));
}

#[test]
fn running_balance_chains_for_every_horizon() {
    let catalog = household_catalog();
    let start = money(dec!(512.34));
    for horizon in [0_i64, 7, 14, 20, 30] {
        let forecast = SimulationService::simulate(
            start,
            date(2025, 6, 10),
            horizon,
            &catalog,
            money(dec!(100.00)),
        )
        .expect("simulate");
        let entries = forecast.entries();
        assert_eq!(entries.len() as i64, horizon + 1);
        assert_eq!(entries[0].net_change, Money::ZERO);
        assert_eq!(entries[0].running_balance, start);
        assert!(entries[0].applied_events.is_empty());
        for pair in entries.windows(2) {
            assert_eq!(
                pair[1].running_balance,
                pair[0].running_balance + pair[1].net_change
            );
            assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        }
    }
}

#[test]
fn simulate_is_idempotent() {
    let catalog = household_catalog();
    let run = || {
        SimulationService::simulate(
            money(dec!(1500.00)),
            date(2025, 6, 1),
            30,
            &catalog,
            money(dec!(100.00)),
        )
        .expect("simulate")
    };
    assert_eq!(run(), run());
}

#[test]
fn horizon_past_the_monthly_calendar_limit_is_rejected() {
    let as_of = date(2025, 6, 1);
    let catalog = EventCatalog::new(vec![
        RecurringEvent::new(
            "Mortgage",
            money(dec!(-930.00)),
            RecurrenceRule::day_of_month(12),
        ),
        RecurringEvent::new(
            "Bi-weekly pay",
            money(dec!(2700.00)),
            RecurrenceRule::interval(date(2025, 6, 13), 14),
        ),
    ]);
    let last_day = (date(2125, 5, 31) - as_of).num_days();

    let forecast =
        SimulationService::simulate(Money::ZERO, as_of, last_day, &catalog, Money::ZERO)
            .expect("horizon inside the limit");
    let last_mortgage = forecast
        .projected_days()
        .iter()
        .rev()
        .find(|entry| entry.applied_events.iter().any(|e| e.description == "Mortgage"))
        .map(|entry| entry.date);
    assert_eq!(last_mortgage, Some(date(2125, 5, 12)));

    for horizon in [last_day + 1, 40_000, i64::MAX] {
        let err = SimulationService::simulate(Money::ZERO, as_of, horizon, &catalog, Money::ZERO)
            .expect_err("horizon past the limit");
        assert!(matches!(err, CoreError::HorizonTooLong(days) if days == horizon));
    }
}

#[test]
fn negative_horizon_is_rejected() {
    let err = SimulationService::simulate(
        Money::ZERO,
        date(2025, 6, 1),
        -1,
        &paycheck_catalog(),
        money(dec!(100.00)),
    )
    .expect_err("negative horizon");
    assert!(matches!(err, CoreError::InvalidHorizon(-1)));
}

#[test]
fn same_day_events_keep_catalog_order() {
    let forecast = SimulationService::simulate(
        money(dec!(5000.00)),
        date(2025, 6, 20),
        5,
        &household_catalog(),
        money(dec!(100.00)),
    )
    .expect("simulate");
    let day = forecast
        .entries()
        .iter()
        .find(|entry| entry.date == date(2025, 6, 22))
        .expect("june 22");
    let names: Vec<_> = day
        .applied_events
        .iter()
        .map(|event| event.description.as_str())
        .collect();
    assert_eq!(names, ["Allstate Car insurance", "T-Mobile"]);
    assert_eq!(day.net_change, money(dec!(-535.88)));
    assert_eq!(day.weekday_name, "Sunday");

    let benefit = forecast
        .entries()
        .iter()
        .find(|entry| entry.date == date(2025, 6, 25))
        .expect("june 25");
    assert_eq!(benefit.net_change, money(dec!(2500.00)));
}

#[test]
fn day_of_month_events_only_fire_on_their_day() {
    let catalog = EventCatalog::new(vec![RecurringEvent::new(
        "Netflix",
        money(dec!(-20.00)),
        RecurrenceRule::day_of_month(15),
    )]);
    let forecast = SimulationService::simulate(
        Money::ZERO,
        date(2025, 1, 1),
        120,
        &catalog,
        Money::ZERO,
    )
    .expect("simulate");
    let hits: Vec<_> = forecast
        .projected_days()
        .iter()
        .filter(|entry| !entry.applied_events.is_empty())
        .collect();
    assert_eq!(hits.len(), 4);
    assert!(hits.iter().all(|entry| entry.date.day() == 15));
    assert_eq!(forecast.ending_balance(), money(dec!(-80.00)));
}

#[test]
fn summary_of_healthy_ledger_has_no_flags() {
    let forecast = SimulationService::simulate(
        money(dec!(10000.00)),
        date(2025, 6, 1),
        14,
        &paycheck_catalog(),
        money(dec!(100.00)),
    )
    .expect("simulate");
    let stats = SummaryService::summarize(&forecast, money(dec!(300)));
    assert_eq!(stats.days_negative, 0);
    assert!(stats.major_expense_days.is_empty());
    assert_eq!(stats.starting_balance, money(dec!(10000.00)));
    assert_eq!(stats.minimum_balance, money(dec!(8900.00)));
    assert_eq!(stats.maximum_balance, money(dec!(11500.00)));
    assert_eq!(stats.ending_balance, money(dec!(11300.00)));
    assert_eq!(stats.total_change, money(dec!(1300.00)));
    assert_eq!(
        SummaryService::assess_outlook(&stats, money(dec!(500))),
        Outlook::Healthy
    );
}

#[test]
fn summary_flags_major_expense_days() {
    let forecast = SimulationService::simulate(
        money(dec!(5000.00)),
        date(2025, 6, 1),
        30,
        &household_catalog(),
        money(dec!(100.00)),
    )
    .expect("simulate");
    let stats = SummaryService::summarize(&forecast, money(dec!(300)));
    assert_eq!(
        stats.major_expense_days,
        vec![date(2025, 6, 2), date(2025, 6, 22)]
    );

    let strict = SummaryService::summarize(&forecast, money(dec!(500)));
    assert!(strict.major_expense_days.is_empty());
}

#[test]
fn days_negative_excludes_opening_entry() {
    let forecast = SimulationService::simulate(
        money(dec!(-10.00)),
        date(2025, 6, 1),
        0,
        &EventCatalog::default(),
        money(dec!(100.00)),
    )
    .expect("simulate");
    let stats = SummaryService::summarize(&forecast, money(dec!(300)));
    assert_eq!(stats.days_negative, 0);
    assert_eq!(stats.minimum_balance, money(dec!(-10.00)));

    let forecast = SimulationService::simulate(
        money(dec!(150.00)),
        date(2025, 6, 1),
        3,
        &EventCatalog::default(),
        money(dec!(100.00)),
    )
    .expect("simulate");
    let stats = SummaryService::summarize(&forecast, money(dec!(300)));
    assert_eq!(stats.days_negative, 2);
    assert_eq!(
        SummaryService::assess_outlook(&stats, money(dec!(500))),
        Outlook::Negative {
            minimum: money(dec!(-150.00))
        }
    );
}

#[test]
fn low_ending_balance_is_reported() {
    let forecast = SimulationService::simulate(
        money(dec!(900.00)),
        date(2025, 6, 1),
        5,
        &EventCatalog::default(),
        money(dec!(100.00)),
    )
    .expect("simulate");
    let stats = SummaryService::summarize(&forecast, money(dec!(300)));
    assert_eq!(
        SummaryService::assess_outlook(&stats, money(dec!(500))),
        Outlook::Low {
            ending: money(dec!(400.00))
        }
    );
}

#[test]
fn monthly_expense_summary_groups_by_day() {
    let summary = CatalogService::monthly_expense_summary(&household_catalog());
    let days: Vec<u32> = summary.days.iter().map(|group| group.day).collect();
    assert_eq!(days, vec![2, 15, 22]);
    assert_eq!(summary.days[0].expenses.len(), 4);
    assert_eq!(summary.days[0].total, money(dec!(422.69)));
    assert_eq!(summary.days[2].total, money(dec!(435.88)));
    assert_eq!(summary.total, money(dec!(878.57)));
}

struct MemoryStore {
    record: Mutex<Option<BalanceRecord>>,
    fail_load: bool,
    fail_save: bool,
    path: PathBuf,
}

impl MemoryStore {
    fn new() -> Self {
        Self {
            record: Mutex::new(None),
            fail_load: false,
            fail_save: false,
            path: PathBuf::from("memory"),
        }
    }
}

impl BalanceStore for MemoryStore {
    fn load_balance(&self) -> Result<BalanceRecord, CoreError> {
        if self.fail_load {
            return Err(CoreError::Serde("corrupt".into()));
        }
        Ok(self.record.lock().unwrap().clone().unwrap_or_default())
    }

    fn save_balance(&self, record: &BalanceRecord) -> Result<(), CoreError> {
        if self.fail_save {
            return Err(CoreError::Storage("read-only".into()));
        }
        *self.record.lock().unwrap() = Some(record.clone());
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

#[test]
fn balance_service_sets_and_adjusts() {
    let store = MemoryStore::new();
    let clock = FixedClock::new(date(2025, 6, 1));

    assert_eq!(
        BalanceService::current(&store).record.current_balance,
        Money::ZERO
    );

    let record = BalanceService::set(&store, &clock, money(dec!(1200.50))).expect("set");
    assert_eq!(record.current_balance, money(dec!(1200.50)));
    assert_eq!(
        record.last_updated.map(|ts| ts.date()),
        Some(date(2025, 6, 1))
    );

    let adjustment =
        BalanceService::adjust(&store, &clock, money(dec!(-200.25)), "Groceries").expect("adjust");
    assert_eq!(adjustment.message, "Groceries: -200.25");
    assert_eq!(
        BalanceService::current(&store).record.current_balance,
        money(dec!(1000.25))
    );
}

#[test]
fn unreadable_balance_falls_back_to_zero_with_warning() {
    let mut store = MemoryStore::new();
    store.fail_load = true;
    let snapshot = BalanceService::current(&store);
    assert_eq!(snapshot.record, BalanceRecord::default());
    assert!(snapshot
        .load_warning
        .as_deref()
        .is_some_and(|message| message.contains("corrupt")));
}

#[test]
fn adjust_leaves_an_unreadable_balance_untouched() {
    let mut store = MemoryStore::new();
    let clock = FixedClock::new(date(2025, 6, 1));
    BalanceService::set(&store, &clock, money(dec!(750))).expect("set");
    store.fail_load = true;

    let err = BalanceService::adjust(&store, &clock, money(dec!(-50)), "Coffee")
        .expect_err("unreadable balance");
    assert!(matches!(&err, CoreError::Storage(message) if message.contains("not applied")));
    assert_eq!(
        store.record.lock().unwrap().as_ref().map(|r| r.current_balance),
        Some(money(dec!(750)))
    );
}

#[test]
fn failed_save_is_reported_not_swallowed() {
    let mut store = MemoryStore::new();
    store.fail_save = true;
    let clock = FixedClock::new(date(2025, 6, 1));
    let err = BalanceService::set(&store, &clock, money(dec!(10))).expect_err("save fails");
    assert!(matches!(err, CoreError::Storage(_)));
}
