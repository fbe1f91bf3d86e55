//! Mitigation session: the focused asteroid, its approach cursor, the chosen
//! method with per-method slider values, and the last applied result.
//!
//! Panels and keyboard shortcuts never mutate the session directly. They emit
//! [`SessionCommand`] messages which [`apply_session_commands`] resolves
//! against the catalog and the clock.

use bevy::prelude::*;
use chrono::NaiveDate;

use crate::approach::{ApproachCursor, CloseApproach};
use crate::catalog::{Catalog, CatalogAsteroid, PositionTrack, TrackedAsteroids};
use crate::mitigation::{
    ALL_METHODS, DeltaV, MitigationContext, MitigationError, MitigationMethod, MitigationResult,
    ParamValues,
};
use crate::physics::{PropagationError, calculate_new_orbit, estimate_velocity};
use crate::time::{ClockCommand, ClockSet, SimulationClock};

/// Plugin wiring the session resource and its command handler.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MitigationSession>()
            .init_resource::<TrackedAsteroids>()
            .add_message::<SessionCommand>()
            .add_message::<ClockCommand>()
            .add_systems(Update, apply_session_commands.before(ClockSet));
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("no asteroid is selected")]
    NoSelection,

    #[error("asteroid {0} has no close approach inside the table window")]
    NoApproach(String),

    #[error(transparent)]
    Mitigation(#[from] MitigationError),

    #[error(transparent)]
    Propagation(#[from] PropagationError),
}

/// Requests emitted by panels and shortcuts.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum SessionCommand {
    /// Focus an asteroid, tracking it first when needed.
    Select(String),
    /// Track or untrack an asteroid without changing focus.
    ToggleTracked(String),
    Deselect,
    NextApproach,
    PrevApproach,
    SelectApproach(usize),
    /// Move the clock to the current approach date.
    GoToApproach,
    SetMethod(MitigationMethod),
    SetParam { id: &'static str, value: f64 },
    ResetParams,
    Apply,
    ClearMitigation,
    ToggleFocusMode,
}

/// A mitigation that has been applied to the focused asteroid.
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedMitigation {
    pub result: MitigationResult,
    /// Simulated date of the apply.
    pub applied_on: NaiveDate,
    /// Approach the result refers to.
    pub approach: CloseApproach,
    /// Deflected track; absent when the delta-v is not physical or the
    /// asteroid has fewer than two position samples.
    pub track: Option<PositionTrack>,
}

#[derive(Resource, Clone, Debug, PartialEq)]
pub struct MitigationSession {
    selected: Option<String>,
    cursor: ApproachCursor,
    method: MitigationMethod,
    /// Slider values, indexed like [`ALL_METHODS`].
    params: [ParamValues; 4],
    applied: Option<AppliedMitigation>,
    /// Hide everything except Earth and the focused asteroid.
    pub focus_mode: bool,
}

impl Default for MitigationSession {
    fn default() -> Self {
        Self {
            selected: None,
            cursor: ApproachCursor::default(),
            method: MitigationMethod::default(),
            params: ALL_METHODS.map(ParamValues::defaults),
            applied: None,
            focus_mode: false,
        }
    }
}

impl MitigationSession {
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn cursor(&self) -> &ApproachCursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut ApproachCursor {
        &mut self.cursor
    }

    pub fn method(&self) -> MitigationMethod {
        self.method
    }

    pub fn applied(&self) -> Option<&AppliedMitigation> {
        self.applied.as_ref()
    }

    /// Deflected track of the focused asteroid, when one was produced.
    pub fn mitigated_track(&self) -> Option<&PositionTrack> {
        self.applied.as_ref()?.track.as_ref()
    }

    /// Focus `asteroid`, rebuilding the approach cursor and dropping any
    /// previous result. Slider values are kept.
    pub fn select(&mut self, asteroid: &CatalogAsteroid) {
        self.selected = Some(asteroid.id().to_string());
        self.cursor = ApproachCursor::from_records(&asteroid.record.close_approach_data);
        self.applied = None;
    }

    pub fn deselect(&mut self) {
        self.selected = None;
        self.cursor = ApproachCursor::default();
        self.applied = None;
        self.focus_mode = false;
    }

    pub fn set_method(&mut self, method: MitigationMethod) {
        self.method = method;
    }

    /// Slider values of the current method.
    pub fn params(&self) -> &ParamValues {
        &self.params[self.method as usize]
    }

    /// Set a slider of the current method, returning the stored value.
    pub fn set_param(&mut self, id: &str, value: f64) -> Result<f64, MitigationError> {
        self.params[self.method as usize].set(id, value)
    }

    pub fn reset_params(&mut self) {
        self.params[self.method as usize].reset();
    }

    pub fn clear_mitigation(&mut self) {
        self.applied = None;
    }

    /// Run the current method against the selected approach and store the
    /// result together with the deflected track.
    pub fn apply(
        &mut self,
        asteroid: &CatalogAsteroid,
        current_date: NaiveDate,
    ) -> Result<&AppliedMitigation, SessionError> {
        if self.selected() != Some(asteroid.id()) {
            return Err(SessionError::NoSelection);
        }
        let applied = apply_mitigation(
            asteroid,
            self.method,
            self.params(),
            self.cursor.current(),
            current_date,
        )?;
        Ok(self.applied.insert(applied))
    }
}

/// Compute a mitigation for `asteroid` without touching any session state.
pub fn apply_mitigation(
    asteroid: &CatalogAsteroid,
    method: MitigationMethod,
    params: &ParamValues,
    approach: Option<&CloseApproach>,
    current_date: NaiveDate,
) -> Result<AppliedMitigation, SessionError> {
    let approach = approach.ok_or_else(|| SessionError::NoApproach(asteroid.id().to_string()))?;
    let ctx = MitigationContext {
        asteroid_mass_kg: asteroid.mass_kg(),
        approach,
        current_date,
    };
    let result = method.calculate(params, &ctx)?;

    // A single sample propagates from rest
    let track = match (result.delta_v, asteroid.track.first()) {
        (DeltaV::Valid(dv), Some(epoch)) => {
            let velocity = estimate_velocity(asteroid.track.positions());
            let orbit = calculate_new_orbit(epoch.pos, velocity, dv, method)?;
            Some(PositionTrack::from_orbit(epoch.time_jd, &orbit))
        }
        (DeltaV::Valid(_), None) => {
            debug!("Asteroid {} has no position samples for a deflected track", asteroid.id());
            None
        }
        (DeltaV::ExceedsCapacity { .. }, _) => None,
    };

    Ok(AppliedMitigation {
        result,
        applied_on: current_date,
        approach: approach.clone(),
        track,
    })
}

/// Resolve queued [`SessionCommand`]s.
pub fn apply_session_commands(
    mut commands: MessageReader<SessionCommand>,
    mut session: ResMut<MitigationSession>,
    mut tracked: ResMut<TrackedAsteroids>,
    mut clock_commands: MessageWriter<ClockCommand>,
    catalog: Option<Res<Catalog>>,
    clock: Option<Res<SimulationClock>>,
) {
    for command in commands.read() {
        match command {
            SessionCommand::Select(id) => {
                let Some(asteroid) = catalog.as_ref().and_then(|c| c.get(id)) else {
                    warn!("Cannot select unknown asteroid {id}");
                    continue;
                };
                if !tracked.contains(id)
                    && let Err(err) = tracked.track(id)
                {
                    warn!("Cannot select {id}: {err}");
                    continue;
                }
                session.select(asteroid);
                info!(
                    "Selected {} with {} close approaches in range",
                    asteroid.record.display_name(),
                    session.cursor().len()
                );
            }
            SessionCommand::ToggleTracked(id) => match tracked.toggle(id) {
                Ok(true) => info!("Tracking {id}"),
                Ok(false) => {
                    info!("Stopped tracking {id}");
                    if session.selected() == Some(id.as_str()) {
                        session.deselect();
                    }
                }
                Err(err) => warn!("{err}"),
            },
            SessionCommand::Deselect => session.deselect(),
            SessionCommand::NextApproach => {
                session.cursor_mut().next();
            }
            SessionCommand::PrevApproach => {
                session.cursor_mut().prev();
            }
            SessionCommand::SelectApproach(index) => {
                session.cursor_mut().select(*index);
            }
            SessionCommand::GoToApproach => {
                if let Some(approach) = session.cursor().current() {
                    clock_commands.write(ClockCommand::JumpTo(approach.date));
                }
            }
            SessionCommand::SetMethod(method) => session.set_method(*method),
            SessionCommand::SetParam { id, value } => {
                if let Err(err) = session.set_param(id, *value) {
                    warn!("{err}");
                }
            }
            SessionCommand::ResetParams => session.reset_params(),
            SessionCommand::Apply => {
                let Some(id) = session.selected().map(str::to_string) else {
                    warn!("{}", SessionError::NoSelection);
                    continue;
                };
                let Some(asteroid) = catalog.as_ref().and_then(|c| c.get(&id)) else {
                    warn!("Selected asteroid {id} is not in the catalog");
                    continue;
                };
                let today = clock.as_ref().map_or_else(
                    crate::types::table_start_date,
                    |c| c.date(),
                );
                match session.apply(asteroid, today) {
                    Ok(applied) => info!(
                        "Applied {} to {}: {}",
                        applied.result.method.title(),
                        id,
                        if applied.result.is_safe() { "safe" } else { "not safe" }
                    ),
                    Err(err) => warn!("Mitigation failed: {err}"),
                }
            }
            SessionCommand::ClearMitigation => session.clear_mitigation(),
            SessionCommand::ToggleFocusMode => {
                if session.selected().is_some() {
                    session.focus_mode = !session.focus_mode;
                }
            }
        }
    }
}
