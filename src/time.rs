//! Calendar clock driving the scene.
//!
//! While playing, each frame advances the date one day at a time, `speed`
//! times. The date wraps from the end of the position tables back to their
//! start.

use bevy::prelude::*;
use chrono::{Days, NaiveDate};

use crate::config::AppConfig;
use crate::types::{LAST_TABLE_YEAR, in_table_window, julian_day, table_start_date};

/// Speed multipliers cycled by the speed control.
pub const SPEEDS: [u32; 5] = [1, 2, 4, 8, 16];

/// Plugin providing the simulation clock.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ClockCommand>()
            .add_systems(PreStartup, init_clock)
            .add_systems(
                Update,
                (apply_clock_commands, advance_clock).chain().in_set(ClockSet),
            );
    }
}

/// System set of the clock update.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClockSet;

/// Requests from input and panels to change the clock.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockCommand {
    TogglePlay,
    CycleSpeed,
    /// Move by a signed number of days with wraparound.
    Step(i64),
    JumpTo(NaiveDate),
}

/// Simulated calendar date with play state.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationClock {
    date: NaiveDate,
    pub playing: bool,
    speed: u32,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(table_start_date())
    }
}

impl SimulationClock {
    /// Paused clock at `date`, moved into the table window when outside it.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: if in_table_window(date) {
                date
            } else {
                table_start_date()
            },
            playing: false,
            speed: SPEEDS[0],
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Julian day of the current date.
    pub fn julian_day(&self) -> f64 {
        julian_day(self.date) as f64
    }

    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// 1 → 2 → 4 → 8 → 16 → 1.
    pub fn cycle_speed(&mut self) -> u32 {
        let next = SPEEDS
            .iter()
            .position(|&s| s == self.speed)
            .map_or(0, |i| (i + 1) % SPEEDS.len());
        self.speed = SPEEDS[next];
        self.speed
    }

    /// Move by `days`, one day at a time, wrapping at either end of the window.
    pub fn step_days(&mut self, days: i64) {
        for _ in 0..days.unsigned_abs() {
            self.date = if days > 0 {
                next_day(self.date)
            } else {
                previous_day(self.date)
            };
        }
    }

    /// Jump to `date`; dates outside the window are ignored.
    pub fn jump_to(&mut self, date: NaiveDate) -> bool {
        if in_table_window(date) {
            self.date = date;
            true
        } else {
            false
        }
    }

    /// One frame of playback: advances `speed` days when playing.
    pub fn tick(&mut self) {
        if self.playing {
            self.step_days(i64::from(self.speed));
        }
    }
}

fn window_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(LAST_TABLE_YEAR, 12, 31).unwrap_or_else(table_start_date)
}

fn next_day(date: NaiveDate) -> NaiveDate {
    match date.checked_add_days(Days::new(1)) {
        Some(next) if in_table_window(next) => next,
        _ => table_start_date(),
    }
}

fn previous_day(date: NaiveDate) -> NaiveDate {
    match date.checked_sub_days(Days::new(1)) {
        Some(prev) if in_table_window(prev) => prev,
        _ => window_end(),
    }
}

fn init_clock(mut commands: Commands, config: Option<Res<AppConfig>>) {
    let start = config.map_or_else(table_start_date, |c| c.start_date);
    commands.insert_resource(SimulationClock::new(start));
}

fn apply_clock_commands(
    mut commands: MessageReader<ClockCommand>,
    clock: Option<ResMut<SimulationClock>>,
) {
    let Some(mut clock) = clock else {
        return;
    };
    for command in commands.read() {
        match *command {
            ClockCommand::TogglePlay => {
                let playing = clock.toggle_play();
                info!("Simulation {}", if playing { "playing" } else { "paused" });
            }
            ClockCommand::CycleSpeed => {
                let speed = clock.cycle_speed();
                info!("Simulation speed: {speed}x");
            }
            ClockCommand::Step(days) => clock.step_days(days),
            ClockCommand::JumpTo(date) => {
                if clock.jump_to(date) {
                    info!("Jumped to {date}");
                } else {
                    warn!("{date} is outside the position tables, not jumping");
                }
            }
        }
    }
}

fn advance_clock(clock: Option<ResMut<SimulationClock>>) {
    if let Some(mut clock) = clock
        && clock.playing
    {
        clock.tick();
    }
}
