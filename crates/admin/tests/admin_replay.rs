use std::path::PathBuf;

use tradeline_admin::{AdminConfig, parse_commands, replay, run};
use tradeline_timeline::{JsonFileSource, TimelineState, TimelineStore};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../timeline/tests/fixtures/trade_timeline.json")
}

#[test]
fn run_without_commands_renders_the_fixture() {
    let view = run(&AdminConfig {
        fixture: fixture(),
        fixture_defaulted: false,
        commands: None,
        log_format: None,
    })
    .unwrap();

    assert_eq!(view.state, TimelineState::Ready);
    assert_eq!(view.events.len(), 2);
    assert_eq!(view.events[1].offers.len(), 1);
}

#[test]
fn run_reports_a_missing_fixture() {
    let err = run(&AdminConfig {
        fixture: PathBuf::from("/definitely/not/here.json"),
        fixture_defaulted: false,
        commands: None,
        log_format: None,
    })
    .unwrap_err();

    assert!(format!("{err:#}").contains("/definitely/not/here.json"));
}

#[test]
fn replay_skips_rejected_commands() {
    let commands = parse_commands(
        r#"[
            {"command": "add_offer", "parent_event_id": "O1", "advance_rate": 0.6,
             "event_date": "2024-01-14", "expiry_date": "2024-01-28"},
            {"command": "edit_offer", "offer_id": "OF001", "advance_rate": 4.0},
            {"command": "delete_offer", "offer_id": "OF001"},
            {"command": "delete_offer", "offer_id": "MISSING"}
        ]"#,
    )
    .unwrap();

    let mut store = TimelineStore::load(&JsonFileSource::new(fixture())).unwrap();
    let summary = replay(&mut store, &commands);

    assert_eq!(summary.applied, 3);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.added_offer_ids, ["OF003"]);

    let view = store.view();
    assert_eq!(view.events[0].offers[0].event_id, "OF003");
    assert!(view.events[1].offers.is_empty());
}

#[test]
fn malformed_commands_are_an_error() {
    assert!(parse_commands(r#"{"command": "add_offer"}"#).is_err());
    assert!(parse_commands(r#"[{"command": "refund"}]"#).is_err());
}
