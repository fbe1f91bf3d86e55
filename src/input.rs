//! Keyboard shortcuts.
//!
//! | Key          | Action                              |
//! |--------------|-------------------------------------|
//! | Space        | Play / pause                        |
//! | S            | Cycle speed 1→2→4→8→16              |
//! | ← / →        | Step one day back / forward         |
//! | ↑ / ↓        | Previous / next close approach      |
//! | F            | Toggle focus mode                   |
//! | Enter        | Apply the selected mitigation       |
//! | Escape       | Clear the focused asteroid          |

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::session::SessionCommand;
use crate::time::ClockCommand;

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, keyboard_shortcuts);
    }
}

/// Clock command bound to a key press, if any.
pub fn clock_shortcut(key: KeyCode) -> Option<ClockCommand> {
    match key {
        KeyCode::Space => Some(ClockCommand::TogglePlay),
        KeyCode::KeyS => Some(ClockCommand::CycleSpeed),
        KeyCode::ArrowLeft => Some(ClockCommand::Step(-1)),
        KeyCode::ArrowRight => Some(ClockCommand::Step(1)),
        _ => None,
    }
}

/// Session command bound to a key press, if any.
pub fn session_shortcut(key: KeyCode) -> Option<SessionCommand> {
    match key {
        KeyCode::ArrowUp => Some(SessionCommand::PrevApproach),
        KeyCode::ArrowDown => Some(SessionCommand::NextApproach),
        KeyCode::KeyF => Some(SessionCommand::ToggleFocusMode),
        KeyCode::Enter => Some(SessionCommand::Apply),
        KeyCode::Escape => Some(SessionCommand::Deselect),
        _ => None,
    }
}

fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut clock_commands: MessageWriter<ClockCommand>,
    mut session_commands: MessageWriter<SessionCommand>,
    mut contexts: EguiContexts,
) {
    // Typing into a text field must not drive the scene
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    for &key in keys.get_just_pressed() {
        if let Some(command) = clock_shortcut(key) {
            clock_commands.write(command);
        }
        if let Some(command) = session_shortcut(key) {
            session_commands.write(command);
        }
    }
}
