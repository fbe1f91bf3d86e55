//! Selection, approach navigation and mitigation through the command messages.

mod common;

use bevy::prelude::*;
use neo_mitigation::catalog::TrackedAsteroids;
use neo_mitigation::config::AppConfig;
use neo_mitigation::mitigation::{DeltaV, MitigationMethod};
use neo_mitigation::physics::ORBIT_DAYS;
use neo_mitigation::session::{MitigationSession, SessionCommand};
use neo_mitigation::time::{ClockCommand, SimulationClock};

use common::{DataDir, EPOCH_JD, date, send};

fn app(dir: &DataDir) -> App {
    common::simulation_app(common::catalog(), dir.config())
}

fn session(app: &App) -> &MitigationSession {
    app.world().resource::<MitigationSession>()
}

fn select(app: &mut App, id: &str) {
    send(app, SessionCommand::Select(id.to_string()));
}

#[test]
fn test_select_tracks_and_builds_cursor() {
    let dir = DataDir::new("select");
    let mut app = app(&dir);
    select(&mut app, "apophis");

    assert_eq!(session(&app).selected(), Some("apophis"));
    assert!(app.world().resource::<TrackedAsteroids>().contains("apophis"));

    let cursor = session(&app).cursor();
    assert_eq!(cursor.len(), 2);
    assert_eq!(cursor.current().unwrap().date, date(2029, 4, 13));
}

#[test]
fn test_unknown_asteroid_is_not_selected() {
    let dir = DataDir::new("unknown");
    let mut app = app(&dir);
    select(&mut app, "ghost");

    assert!(session(&app).selected().is_none());
    assert!(app.world().resource::<TrackedAsteroids>().is_empty());
}

#[test]
fn test_selection_refused_at_tracking_limit() {
    let dir = DataDir::new("limit");
    let config = AppConfig {
        max_tracked: 1,
        ..dir.config()
    };
    let mut app = common::simulation_app(common::catalog(), config);

    select(&mut app, "apophis");
    select(&mut app, "pebble");

    assert_eq!(session(&app).selected(), Some("apophis"));
    assert_eq!(app.world().resource::<TrackedAsteroids>().ids(), ["apophis".to_string()]);
}

#[test]
fn test_untracking_focused_asteroid_deselects() {
    let dir = DataDir::new("untrack");
    let mut app = app(&dir);
    select(&mut app, "apophis");
    send(&mut app, SessionCommand::ToggleFocusMode);
    assert!(session(&app).focus_mode);

    send(&mut app, SessionCommand::ToggleTracked("apophis".into()));
    assert!(session(&app).selected().is_none());
    assert!(!session(&app).focus_mode);
}

#[test]
fn test_approach_navigation_wraps() {
    let dir = DataDir::new("navigate");
    let mut app = app(&dir);
    select(&mut app, "apophis");

    send(&mut app, SessionCommand::NextApproach);
    assert_eq!(session(&app).cursor().current().unwrap().date, date(2036, 4, 13));
    send(&mut app, SessionCommand::NextApproach);
    assert_eq!(session(&app).cursor().index(), 0);
    send(&mut app, SessionCommand::PrevApproach);
    assert_eq!(session(&app).cursor().index(), 1);

    let today = app.world().resource::<SimulationClock>().date();
    assert_eq!(today, date(2025, 1, 1), "Navigation leaves the clock alone");
}

#[test]
fn test_go_to_approach_moves_clock() {
    let dir = DataDir::new("goto");
    let mut app = app(&dir);
    select(&mut app, "apophis");
    send(&mut app, SessionCommand::SelectApproach(1));
    send(&mut app, SessionCommand::GoToApproach);

    let clock = app.world().resource::<SimulationClock>();
    assert_eq!(clock.date(), date(2036, 4, 13));
}

#[test]
fn test_apply_kinetic_builds_deflected_track() {
    let dir = DataDir::new("apply");
    let mut app = app(&dir);
    select(&mut app, "apophis");
    send(&mut app, SessionCommand::Apply);

    let applied = session(&app).applied().expect("mitigation applied");
    assert_eq!(applied.result.method, MitigationMethod::Kinetic);
    assert_eq!(applied.applied_on, date(2025, 1, 1));
    assert_eq!(applied.approach.date, date(2029, 4, 13));
    assert!(matches!(applied.result.delta_v, DeltaV::Valid(dv) if dv > 0.0));

    let change = applied.result.miss_change.unwrap();
    assert!(change.change > 0.0);
    assert!(change.safe);

    let track = applied.track.as_ref().expect("deflected track");
    assert_eq!(track.len(), ORBIT_DAYS);
    assert_eq!(track.first().unwrap().time_jd, EPOCH_JD);
    assert!(session(&app).mitigated_track().is_some());
}

#[test]
fn test_apply_uses_clock_date() {
    let dir = DataDir::new("apply-date");
    let mut app = app(&dir);
    select(&mut app, "apophis");
    send(&mut app, ClockCommand::JumpTo(date(2028, 4, 13)));
    send(&mut app, SessionCommand::Apply);

    let applied = session(&app).applied().unwrap();
    assert_eq!(applied.applied_on, date(2028, 4, 13));
}

#[test]
fn test_laser_on_small_body_has_no_track() {
    let dir = DataDir::new("laser");
    let mut app = app(&dir);
    select(&mut app, "pebble");
    send(&mut app, SessionCommand::SetMethod(MitigationMethod::Laser));
    send(&mut app, SessionCommand::Apply);

    let applied = session(&app).applied().unwrap();
    assert!(matches!(applied.result.delta_v, DeltaV::ExceedsCapacity { .. }));
    assert!(applied.result.miss_change.is_none());
    assert!(applied.track.is_none());
}

#[test]
fn test_asteroid_without_positions_gets_result_only() {
    let dir = DataDir::new("bare");
    let mut app = app(&dir);
    select(&mut app, "bare");
    send(&mut app, SessionCommand::Apply);

    let applied = session(&app).applied().unwrap();
    assert!(applied.result.miss_change.is_some());
    assert!(applied.track.is_none());
}

#[test]
fn test_param_edits_snap_and_survive_method_switch() {
    let dir = DataDir::new("params");
    let mut app = app(&dir);
    select(&mut app, "apophis");
    send(
        &mut app,
        SessionCommand::SetParam {
            id: "impactorMass",
            value: 1234.0,
        },
    );
    assert_eq!(session(&app).params().get("impactorMass").unwrap(), 1200.0);

    send(&mut app, SessionCommand::SetMethod(MitigationMethod::Nuclear));
    send(&mut app, SessionCommand::SetMethod(MitigationMethod::Kinetic));
    assert_eq!(session(&app).params().get("impactorMass").unwrap(), 1200.0);

    send(&mut app, SessionCommand::ResetParams);
    assert_eq!(session(&app).params().get("impactorMass").unwrap(), 500.0);
}

#[test]
fn test_selecting_another_asteroid_clears_result() {
    let dir = DataDir::new("reselect");
    let mut app = app(&dir);
    select(&mut app, "apophis");
    send(&mut app, SessionCommand::Apply);
    assert!(session(&app).applied().is_some());

    select(&mut app, "pebble");
    assert!(session(&app).applied().is_none());
    assert!(app.world().resource::<TrackedAsteroids>().contains("apophis"));
}
