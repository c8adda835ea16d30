mod common;
use common::test_engine;

use chrono::{NaiveDate, TimeZone, Utc};
use fieldledger::engine::Engine;
use fieldledger::models::summary::{DayStatus, MonthlySummary};

fn work_day(engine: &Engine, manager: &str, day: u32, in_h: u32, out_h: u32) {
    let t_in = Utc.with_ymd_and_hms(2025, 6, day, in_h, 0, 0).unwrap();
    let t_out = Utc.with_ymd_and_hms(2025, 6, day, out_h, 0, 0).unwrap();
    engine.clock_in(manager, t_in, None).unwrap();
    engine.clock_out(manager, t_out, None).unwrap();
}

#[test]
fn test_monthly_summary_counts_and_hours() {
    let (engine, _) = test_engine("summary_counts");

    // Two full days and one missed clock-out. June 2025 has 30 days.
    work_day(&engine, "mgr-a", 2, 9, 17);
    work_day(&engine, "mgr-a", 3, 9, 13);
    let t = Utc.with_ymd_and_hms(2025, 6, 4, 9, 0, 0).unwrap();
    engine.clock_in("mgr-a", t, None).unwrap();

    let s = engine.monthly_summary("mgr-a", 2025, 6).unwrap();
    assert_eq!(s.present_days, 2);
    assert_eq!(s.partial_days, 1);
    assert_eq!(s.absent_days, 27);
    assert_eq!(s.total_hours, 12.0);
    assert_eq!(s.average_hours_per_present_day, 6.0);
}

#[test]
fn test_empty_month_is_all_absent() {
    let (engine, _) = test_engine("summary_empty");

    let s = engine.monthly_summary("mgr-a", 2025, 2).unwrap();
    assert_eq!(s.present_days, 0);
    assert_eq!(s.partial_days, 0);
    assert_eq!(s.absent_days, 28);
    assert_eq!(s.total_hours, 0.0);
    assert_eq!(s.average_hours_per_present_day, 0.0);
}

#[test]
fn test_no_session_weekday_counts_absent() {
    let (engine, _) = test_engine("summary_absent_day");

    work_day(&engine, "mgr-a", 2, 9, 17);

    // Wednesday June 4th has no record.
    assert_eq!(
        engine
            .daily_status("mgr-a", NaiveDate::from_ymd_opt(2025, 6, 4).unwrap())
            .unwrap(),
        DayStatus::Absent
    );
}

#[test]
fn test_future_day_is_classified_future() {
    let (engine, _) = test_engine("summary_future");

    assert_eq!(
        engine
            .daily_status("mgr-a", NaiveDate::from_ymd_opt(2099, 1, 1).unwrap())
            .unwrap(),
        DayStatus::Future
    );
}

#[test]
fn test_synthesized_session_counts_present_with_zero_hours() {
    let (engine, _) = test_engine("summary_synth");

    let t = Utc.with_ymd_and_hms(2025, 6, 5, 17, 0, 0).unwrap();
    engine.clock_out("mgr-a", t, None).unwrap();

    let s = engine.monthly_summary("mgr-a", 2025, 6).unwrap();
    assert_eq!(s.present_days, 1);
    assert_eq!(s.total_hours, 0.0);
    assert_eq!(s.average_hours_per_present_day, 0.0);
}

fn fields(s: &MonthlySummary) -> (u32, u32, u32, f64, f64) {
    (
        s.present_days,
        s.partial_days,
        s.absent_days,
        s.total_hours,
        s.average_hours_per_present_day,
    )
}

#[test]
fn test_summary_invariant_to_interleaving_of_independent_managers() {
    // Same clock events for two managers, applied in different interleavings,
    // must produce identical summaries.
    let (sequential, _) = test_engine("summary_seq");
    work_day(&sequential, "mgr-a", 2, 9, 17);
    work_day(&sequential, "mgr-a", 3, 8, 16);
    work_day(&sequential, "mgr-b", 2, 10, 18);
    work_day(&sequential, "mgr-b", 3, 9, 12);

    let (interleaved, _) = test_engine("summary_ilv");
    let a_in2 = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
    let b_in2 = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
    let a_out2 = Utc.with_ymd_and_hms(2025, 6, 2, 17, 0, 0).unwrap();
    let b_out2 = Utc.with_ymd_and_hms(2025, 6, 2, 18, 0, 0).unwrap();
    interleaved.clock_in("mgr-b", b_in2, None).unwrap();
    interleaved.clock_in("mgr-a", a_in2, None).unwrap();
    interleaved.clock_out("mgr-b", b_out2, None).unwrap();
    interleaved.clock_out("mgr-a", a_out2, None).unwrap();
    let a_in3 = Utc.with_ymd_and_hms(2025, 6, 3, 8, 0, 0).unwrap();
    let b_in3 = Utc.with_ymd_and_hms(2025, 6, 3, 9, 0, 0).unwrap();
    let a_out3 = Utc.with_ymd_and_hms(2025, 6, 3, 16, 0, 0).unwrap();
    let b_out3 = Utc.with_ymd_and_hms(2025, 6, 3, 12, 0, 0).unwrap();
    interleaved.clock_in("mgr-a", a_in3, None).unwrap();
    interleaved.clock_in("mgr-b", b_in3, None).unwrap();
    interleaved.clock_out("mgr-a", a_out3, None).unwrap();
    interleaved.clock_out("mgr-b", b_out3, None).unwrap();

    for manager in ["mgr-a", "mgr-b"] {
        let lhs = sequential.monthly_summary(manager, 2025, 6).unwrap();
        let rhs = interleaved.monthly_summary(manager, 2025, 6).unwrap();
        assert_eq!(fields(&lhs), fields(&rhs), "summary diverged for {manager}");
    }
}

#[test]
fn test_all_managers_summary_covers_the_directory() {
    let (engine, _) = test_engine("summary_all");

    work_day(&engine, "mgr-a", 2, 9, 17);

    let all = engine.all_managers_summary(2025, 6).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all["mgr-a"].present_days, 1);
    assert_eq!(all["mgr-b"].present_days, 0);
    assert_eq!(all["mgr-c"].present_days, 0);
}
