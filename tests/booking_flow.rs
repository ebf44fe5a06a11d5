//! End-to-end tests for the booking flow.
//!
//! The catalog is loaded from a JSON file on disk, the wizard is driven
//! through its public API and the payload is checked as the platform
//! receives it.

use std::io::Write;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

use salon_booking::bridge::{BridgeEvent, RecordingBridge};
use salon_booking::catalog::Catalog;
use salon_booking::channels::cli::drive;
use salon_booking::config::ScheduleConfig;
use salon_booking::error::InvalidSelection;
use salon_booking::session::BookingSession;
use salon_booking::slots;
use salon_booking::wizard::{BookingWizard, Step};

const CATALOG_JSON: &str = r#"{
    "salon": "Test salon",
    "services": [
        {"name": "Haircut", "price": 500},
        {"name": "Shave", "price": 300}
    ],
    "staff": [
        {"name": "Alex", "specialization": ["haircut", "shave"]}
    ],
    "booked_slots": {
        "2025-11-18": ["09:00"]
    }
}"#;

fn date(s: &str) -> NaiveDate {
    slots::parse_date(s).unwrap()
}

fn time(s: &str) -> NaiveTime {
    slots::parse_time(s).unwrap()
}

fn load_catalog() -> Arc<Catalog> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOG_JSON.as_bytes()).unwrap();
    Arc::new(Catalog::load(Some(file.path())).unwrap())
}

fn wizard() -> BookingWizard {
    BookingWizard::new(load_catalog(), ScheduleConfig::default(), date("2025-11-17"))
}

/// A wizard parked on `step`, filled in along the happy path.
fn wizard_at(step: Step) -> BookingWizard {
    let mut w = wizard();
    if step == Step::SelectingService {
        return w;
    }
    w.choose_service("Haircut").unwrap();
    if step == Step::SelectingStaff {
        return w;
    }
    w.choose_staff("Alex").unwrap();
    if step == Step::SelectingDate {
        return w;
    }
    w.choose_date(date("2025-11-20")).unwrap();
    if step == Step::SelectingTime {
        return w;
    }
    w.choose_time(time("09:00")).unwrap();
    if step == Step::Confirming {
        return w;
    }
    w.confirm(&RecordingBridge::new()).unwrap();
    w
}

#[test]
fn booking_sends_exact_payload() {
    let bridge = RecordingBridge::new();
    let mut w = wizard();

    assert_eq!(w.choose_service("Haircut").unwrap(), Step::SelectingStaff);
    assert_eq!(w.choose_staff("Alex").unwrap(), Step::SelectingDate);
    assert_eq!(w.choose_date(date("2025-11-20")).unwrap(), Step::SelectingTime);
    assert_eq!(w.choose_time(time("09:00")).unwrap(), Step::Confirming);

    let receipt = w.confirm(&bridge).unwrap();
    assert_eq!(w.step(), Step::Success);
    assert_eq!(receipt.payload.price, 500);

    let sent = bridge.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0],
        r#"{"service":"Haircut","staff":"Alex","date":"2025-11-20","time":"09:00","price":500}"#
    );
    let value: Value = serde_json::from_str(&sent[0]).unwrap();
    assert_eq!(value["price"], 500);
}

#[test]
fn booked_slot_is_not_offered() {
    let mut w = wizard_at(Step::SelectingDate);
    w.choose_date(date("2025-11-18")).unwrap();

    let times: Vec<NaiveTime> = w.times_on(date("2025-11-18")).collect();
    assert!(!times.contains(&time("09:00")));
    assert!(times.contains(&time("09:30")));

    let err = w.choose_time(time("09:00")).unwrap_err();
    assert!(matches!(err, InvalidSelection::TimeUnavailable { .. }));
    assert_eq!(w.step(), Step::SelectingTime);
    assert_eq!(w.selection().time, None);
}

#[test]
fn back_keeps_choice_until_overwritten() {
    let mut w = wizard_at(Step::Confirming);
    assert_eq!(w.back(), Step::SelectingTime);
    assert_eq!(w.selection().time, Some(time("09:00")));

    w.choose_time(time("10:30")).unwrap();
    assert_eq!(w.step(), Step::Confirming);
    assert_eq!(w.payload().unwrap().time, "10:30");
}

#[test]
fn reset_is_idempotent() {
    for step in Step::ALL {
        let mut w = wizard_at(step);
        w.reset();
        let once = (w.step(), w.selection().clone());
        w.reset();
        assert_eq!((w.step(), w.selection().clone()), once);
        assert_eq!(w.step(), Step::SelectingService);
        assert!(w.selection().is_empty());
    }
}

#[test]
fn back_reaches_start_from_every_step() {
    for step in Step::ALL {
        let mut w = wizard_at(step);
        let mut presses = 0;
        while w.step() != Step::SelectingService {
            w.back();
            presses += 1;
            assert!(presses <= 5, "stuck going back from {step}");
        }
    }
}

#[test]
fn choose_back_choose_round_trip() {
    let mut direct = wizard();
    direct.choose_service("Shave").unwrap();

    let mut w = wizard();
    w.choose_service("Shave").unwrap();
    assert_eq!(w.back(), Step::SelectingService);
    w.choose_service("Shave").unwrap();

    assert_eq!(w.selection(), direct.selection());
    assert_eq!(w.step(), direct.step());
}

#[test]
fn date_round_trip_keeps_later_steps_reachable() {
    let mut w = wizard_at(Step::SelectingDate);
    w.choose_date(date("2025-11-21")).unwrap();
    w.back();
    assert_eq!(w.step(), Step::SelectingDate);
    w.choose_date(date("2025-11-21")).unwrap();
    assert_eq!(w.step(), Step::SelectingTime);
    assert_eq!(w.selection().date, Some(date("2025-11-21")));
}

#[tokio::test]
async fn terminal_session_books_and_reports() {
    let mut session = BookingSession::new(wizard(), RecordingBridge::new());
    let script = ["2", "1", "2025-11-18", "09:30", "yes", "stats", "new", "q"]
        .map(String::from)
        .to_vec();
    let mut out = Vec::new();

    drive(&mut session, futures::stream::iter(script), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Shave with Alex, 2025-11-18 at 09:30"), "{text}");
    assert!(text.contains("Alex: 1 booking(s), 300"), "{text}");
    assert_eq!(session.wizard().step(), Step::SelectingService);
    assert_eq!(session.ledger().len(), 1);

    let events = session.bridge().events();
    assert_eq!(events[..2], [BridgeEvent::Ready, BridgeEvent::Expand]);
    assert!(matches!(&events[2], BridgeEvent::Data(json) if json.contains("\"Shave\"")));
}
