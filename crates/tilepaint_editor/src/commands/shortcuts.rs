//! Keyboard shortcut handling

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use tilepaint_core::{Command, Tool};

use crate::project::Project;
use crate::ui::PendingAction;
use crate::EditorState;

/// What a key press resolves to
#[derive(Debug, Clone, PartialEq)]
pub enum Shortcut {
    /// Queue a menu-level action
    Action(PendingAction),
    /// Switch the active tool
    Tool(Tool),
}

/// Resolve a key press with the current modifier state
pub fn shortcut_for(key: KeyCode, ctrl: bool, shift: bool) -> Option<Shortcut> {
    if ctrl {
        let action = match key {
            KeyCode::KeyZ if shift => PendingAction::Redo,
            KeyCode::KeyZ => PendingAction::Undo,
            KeyCode::KeyY => PendingAction::Redo,
            KeyCode::KeyS if shift => PendingAction::SaveAs,
            KeyCode::KeyS => PendingAction::Save,
            KeyCode::KeyO => PendingAction::Open,
            KeyCode::KeyE => PendingAction::Export,
            KeyCode::KeyN => PendingAction::New,
            _ => return None,
        };
        return Some(Shortcut::Action(action));
    }

    let tool = match key {
        KeyCode::KeyB => Tool::Brush,
        KeyCode::KeyE => Tool::Eraser,
        KeyCode::KeyG => Tool::Fill,
        KeyCode::KeyR => Tool::Rect,
        KeyCode::KeyI => Tool::Picker,
        _ => return None,
    };
    Some(Shortcut::Tool(tool))
}

/// Handle keyboard shortcuts
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut editor_state: ResMut<EditorState>,
    mut project: ResMut<Project>,
) {
    // Leave keys alone while a text field has focus
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return;
        }
    }

    let ctrl = keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    for key in keyboard.get_just_pressed() {
        match shortcut_for(*key, ctrl, shift) {
            Some(Shortcut::Action(action)) => editor_state.pending_action = Some(action),
            Some(Shortcut::Tool(tool)) => {
                if project.session.current_tool() != tool {
                    project.send(Command::SelectTool(tool));
                }
            }
            None => {}
        }
    }
}
