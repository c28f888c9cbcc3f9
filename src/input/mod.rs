use eframe::egui::{self, Context, Key, Modifiers, PointerButton, Pos2, Rect};
use crate::geometry::ScreenPos;

mod router;
pub use router::InputRouter;

/// Host input, already made relative to the canvas widget's top-left corner
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button was pressed over the canvas
    PointerDown {
        pos: ScreenPos,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// Mouse button was released
    PointerUp {
        pos: ScreenPos,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        pos: ScreenPos,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
        modifiers: Modifiers,
    },
    /// One wheel step over the canvas; positive `delta` scrolls up
    Wheel {
        pos: ScreenPos,
        delta: f32,
        modifiers: Modifiers,
    },
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    held_buttons: Vec<PointerButton>,
    /// A press started on the canvas and has not been released yet
    captured: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect: Rect::NOTHING,
            held_buttons: Vec::new(),
            captured: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_canvas(&self, pos: Pos2) -> ScreenPos {
        ScreenPos::from_pos2((pos - self.canvas_rect.min).to_pos2())
    }

    fn is_over_canvas(&self, pos: Pos2) -> bool {
        self.canvas_rect.contains(pos)
    }

    /// Process raw egui input and generate our InputEvents, in arrival order.
    ///
    /// Presses only count over the canvas; once captured, moves and the
    /// release are reported wherever the pointer goes.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let keyboard_free = !ctx.wants_keyboard_input();
        let mut events = Vec::new();

        ctx.input(|input| {
            for event in &input.raw.events {
                match event {
                    egui::Event::PointerMoved(pos) => {
                        self.last_pointer_pos = Some(*pos);
                        if self.captured || self.is_over_canvas(*pos) {
                            events.push(InputEvent::PointerMove {
                                pos: self.to_canvas(*pos),
                                held_buttons: self.held_buttons.clone(),
                                modifiers: input.modifiers,
                            });
                        }
                    }
                    egui::Event::PointerButton {
                        pos,
                        button,
                        pressed,
                        modifiers,
                    } => {
                        if *pressed {
                            if !self.is_over_canvas(*pos) {
                                continue;
                            }
                            self.captured = true;
                            if !self.held_buttons.contains(button) {
                                self.held_buttons.push(*button);
                            }
                            events.push(InputEvent::PointerDown {
                                pos: self.to_canvas(*pos),
                                button: *button,
                                modifiers: *modifiers,
                            });
                        } else if self.held_buttons.contains(button) {
                            self.held_buttons.retain(|held| held != button);
                            self.captured = !self.held_buttons.is_empty();
                            events.push(InputEvent::PointerUp {
                                pos: self.to_canvas(*pos),
                                button: *button,
                                modifiers: *modifiers,
                            });
                        }
                    }
                    egui::Event::PointerGone => {
                        self.last_pointer_pos = None;
                    }
                    egui::Event::MouseWheel { delta, modifiers, .. } => {
                        let Some(pos) = self.last_pointer_pos else {
                            continue;
                        };
                        if self.is_over_canvas(pos) && delta.y != 0.0 {
                            events.push(InputEvent::Wheel {
                                pos: self.to_canvas(pos),
                                delta: delta.y,
                                modifiers: *modifiers,
                            });
                        }
                    }
                    egui::Event::Key {
                        key,
                        pressed,
                        repeat,
                        modifiers,
                        ..
                    } if keyboard_free => {
                        if *pressed && !*repeat {
                            events.push(InputEvent::KeyDown {
                                key: *key,
                                modifiers: *modifiers,
                            });
                        } else if !*pressed {
                            events.push(InputEvent::KeyUp {
                                key: *key,
                                modifiers: *modifiers,
                            });
                        }
                    }
                    // The host turns Ctrl/Cmd+C/X/V into clipboard events
                    // instead of key presses
                    egui::Event::Copy if keyboard_free => {
                        events.push(clipboard_shortcut(Key::C));
                    }
                    egui::Event::Cut if keyboard_free => {
                        events.push(clipboard_shortcut(Key::X));
                    }
                    egui::Event::Paste(_) if keyboard_free => {
                        events.push(clipboard_shortcut(Key::V));
                    }
                    _ => {}
                }
            }
        });

        events
    }
}

fn clipboard_shortcut(key: Key) -> InputEvent {
    InputEvent::KeyDown {
        key,
        modifiers: Modifiers::COMMAND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Event, RawInput, vec2};

    fn run_frame(handler: &mut InputHandler, ctx: &Context, events: Vec<Event>) -> Vec<InputEvent> {
        let raw = RawInput {
            modifiers: Modifiers::COMMAND,
            events,
            ..Default::default()
        };
        let mut produced = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            produced = handler.process_input(ctx);
        });
        produced
    }

    #[test]
    fn test_clipboard_events_become_shortcuts() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        handler.set_canvas_rect(Rect::from_min_size(Pos2::ZERO, vec2(512.0, 512.0)));

        let produced = run_frame(
            &mut handler,
            &ctx,
            vec![Event::Copy, Event::Cut, Event::Paste(String::new())],
        );
        assert_eq!(
            produced,
            vec![
                clipboard_shortcut(Key::C),
                clipboard_shortcut(Key::X),
                clipboard_shortcut(Key::V),
            ]
        );
    }

    #[test]
    fn test_pointer_events_are_canvas_relative() {
        let ctx = Context::default();
        let mut handler = InputHandler::new();
        handler.set_canvas_rect(Rect::from_min_size(Pos2::new(100.0, 50.0), vec2(256.0, 256.0)));

        let produced = run_frame(
            &mut handler,
            &ctx,
            vec![
                Event::PointerMoved(Pos2::new(120.0, 70.0)),
                Event::PointerButton {
                    pos: Pos2::new(120.0, 70.0),
                    button: PointerButton::Primary,
                    pressed: true,
                    modifiers: Modifiers::NONE,
                },
                // Outside the canvas, but the press captured the pointer
                Event::PointerButton {
                    pos: Pos2::new(10.0, 10.0),
                    button: PointerButton::Primary,
                    pressed: false,
                    modifiers: Modifiers::NONE,
                },
            ],
        );
        assert_eq!(produced.len(), 3);
        assert!(matches!(
            produced[1],
            InputEvent::PointerDown { pos: ScreenPos { x: 20, y: 20 }, .. }
        ));
        assert!(matches!(
            produced[2],
            InputEvent::PointerUp { pos: ScreenPos { x: -90, y: -40 }, .. }
        ));
    }
}
