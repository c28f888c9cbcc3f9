use eframe::egui::{Key, Modifiers, PointerButton};

use super::InputEvent;
use crate::geometry::ScreenPos;
use crate::state::EditorSession;
use crate::tool::PointerInput;
use crate::view::ZoomDirection;

/// Routes input events to the session: space-bar panning and wheel zoom are
/// handled here, editing shortcuts become session commands, everything else
/// reaches the active tool in grid coordinates.
#[derive(Debug, Default)]
pub struct InputRouter {
    space_down: bool,
    /// Last pointer position of an active pan drag
    pan_start: Option<ScreenPos>,
}

fn command_held(modifiers: Modifiers) -> bool {
    modifiers.ctrl || modifiers.command
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Space is held, so a primary drag pans instead of drawing
    pub fn is_pan_armed(&self) -> bool {
        self.space_down
    }

    pub fn is_panning(&self) -> bool {
        self.pan_start.is_some()
    }

    /// Returns whether the canvas needs repainting.
    pub fn route(&mut self, event: &InputEvent, session: &mut EditorSession) -> bool {
        match event {
            InputEvent::PointerDown {
                pos,
                button,
                modifiers,
            } => {
                if *button != PointerButton::Primary {
                    return false;
                }
                if self.space_down {
                    self.pan_start = Some(*pos);
                    return false;
                }
                let input = PointerInput::new(session.screen_to_grid(*pos))
                    .with_button(*button)
                    .with_primary_held(true)
                    .with_modifiers(*modifiers);
                session.pointer_down(input);
                true
            }
            InputEvent::PointerMove {
                pos,
                held_buttons,
                modifiers,
            } => {
                if let Some(last) = self.pan_start {
                    session.pan_by(pos.x.saturating_sub(last.x), pos.y.saturating_sub(last.y));
                    self.pan_start = Some(*pos);
                    return true;
                }
                let input = PointerInput::new(session.screen_to_grid(*pos))
                    .with_primary_held(held_buttons.contains(&PointerButton::Primary))
                    .with_modifiers(*modifiers);
                session.pointer_move(input);
                session.is_gesture_active()
            }
            InputEvent::PointerUp {
                pos,
                button,
                modifiers,
            } => {
                if *button != PointerButton::Primary {
                    return false;
                }
                if self.pan_start.take().is_some() {
                    return false;
                }
                let input = PointerInput::new(session.screen_to_grid(*pos))
                    .with_button(*button)
                    .with_modifiers(*modifiers);
                session.pointer_up(input);
                true
            }
            InputEvent::KeyDown { key, modifiers } => self.key_down(*key, *modifiers, session),
            InputEvent::KeyUp { key, .. } => {
                if *key == Key::Space {
                    self.space_down = false;
                    self.pan_start = None;
                }
                false
            }
            InputEvent::Wheel {
                pos,
                delta,
                modifiers,
            } => {
                // Plain wheel is left to the host for scrolling
                if !(command_held(*modifiers) || modifiers.alt) {
                    return false;
                }
                match ZoomDirection::from_wheel(*delta) {
                    Some(direction) => session.zoom_at(*pos, direction),
                    None => false,
                }
            }
        }
    }

    fn key_down(&mut self, key: Key, modifiers: Modifiers, session: &mut EditorSession) -> bool {
        if key == Key::Space {
            self.space_down = true;
            return false;
        }
        if command_held(modifiers) {
            let handled = match key {
                Key::Z if modifiers.shift => session.redo(),
                Key::Z => session.undo(),
                Key::Y => session.redo(),
                Key::C => session.copy_selection(),
                Key::X => session.cut_selection(),
                Key::V => session.paste(),
                _ => {
                    session.key_down(key, modifiers);
                    return true;
                }
            };
            log::debug!("shortcut {key:?} handled: {handled}");
            return handled;
        }
        session.key_down(key, modifiers);
        true
    }
}
