use egui::{Context, Event, Key, Modifiers, PointerButton, Pos2, RawInput, Rect, vec2};
use texel_paint::{
    EditorSession, GridPos, GridRect, InputEvent, InputHandler, InputRouter, Rgba, ScreenPos,
    ToolKind,
};

const CTRL_SHIFT: Modifiers = Modifiers {
    ctrl: true,
    shift: true,
    ..Modifiers::NONE
};

fn down(x: i32, y: i32) -> InputEvent {
    InputEvent::PointerDown {
        pos: ScreenPos::new(x, y),
        button: PointerButton::Primary,
        modifiers: Modifiers::NONE,
    }
}

fn drag_to(x: i32, y: i32) -> InputEvent {
    InputEvent::PointerMove {
        pos: ScreenPos::new(x, y),
        held_buttons: vec![PointerButton::Primary],
        modifiers: Modifiers::NONE,
    }
}

fn up(x: i32, y: i32) -> InputEvent {
    InputEvent::PointerUp {
        pos: ScreenPos::new(x, y),
        button: PointerButton::Primary,
        modifiers: Modifiers::NONE,
    }
}

fn key(key: Key, modifiers: Modifiers) -> InputEvent {
    InputEvent::KeyDown { key, modifiers }
}

fn route_all(router: &mut InputRouter, session: &mut EditorSession, events: &[InputEvent]) {
    for event in events {
        router.route(event, session);
    }
}

#[test]
fn test_pointer_is_translated_to_grid() {
    let mut router = InputRouter::new();
    let mut session = EditorSession::default();

    // 16px cells: (40, 20) is cell (2, 1)
    assert!(router.route(&down(40, 20), &mut session));
    assert!(router.route(&up(40, 20), &mut session));
    assert_eq!(session.buffer().get(2, 1), Some(Rgba::BLACK));
    assert_eq!(session.history().undo_count(), 1);
}

#[test]
fn test_secondary_button_is_ignored() {
    let mut router = InputRouter::new();
    let mut session = EditorSession::default();
    let press = InputEvent::PointerDown {
        pos: ScreenPos::new(5, 5),
        button: PointerButton::Secondary,
        modifiers: Modifiers::NONE,
    };
    assert!(!router.route(&press, &mut session));
    assert_eq!(session.buffer().get(0, 0), Some(Rgba::TRANSPARENT));
}

#[test]
fn test_space_drag_pans_instead_of_drawing() {
    let mut router = InputRouter::new();
    let mut session = EditorSession::default();

    router.route(&key(Key::Space, Modifiers::NONE), &mut session);
    assert!(router.is_pan_armed());

    router.route(&down(10, 10), &mut session);
    assert!(router.is_panning());
    assert!(router.route(&drag_to(30, 25), &mut session));
    router.route(&drag_to(35, 25), &mut session);
    router.route(&up(35, 25), &mut session);

    assert!(!router.is_panning());
    assert_eq!(session.view().pan(), ScreenPos::new(25, 15));
    assert_eq!(session.buffer().get(0, 0), Some(Rgba::TRANSPARENT));
    assert!(!session.can_undo());

    // Once space is released, the pen draws again at the panned offset
    router.route(&InputEvent::KeyUp { key: Key::Space, modifiers: Modifiers::NONE }, &mut session);
    route_all(&mut router, &mut session, &[down(25 + 16, 15), up(25 + 16, 15)]);
    assert_eq!(session.buffer().get(1, 0), Some(Rgba::BLACK));
}

#[test]
fn test_releasing_space_ends_pan() {
    let mut router = InputRouter::new();
    let mut session = EditorSession::default();
    route_all(
        &mut router,
        &mut session,
        &[key(Key::Space, Modifiers::NONE), down(0, 0)],
    );
    router.route(&InputEvent::KeyUp { key: Key::Space, modifiers: Modifiers::NONE }, &mut session);
    assert!(!router.is_panning());

    // The pointer keeps moving; nothing pans and nothing is drawn
    router.route(&drag_to(40, 40), &mut session);
    assert_eq!(session.view().pan(), ScreenPos::new(0, 0));
    assert_eq!(session.buffer().get(2, 2), Some(Rgba::TRANSPARENT));
    assert!(!session.can_undo());
}

#[test]
fn test_wheel_zoom_needs_modifier() {
    let mut router = InputRouter::new();
    let mut session = EditorSession::default();
    let anchor = ScreenPos::new(100, 60);
    let wheel = |delta: f32, modifiers: Modifiers| InputEvent::Wheel {
        pos: anchor,
        delta,
        modifiers,
    };

    assert!(!router.route(&wheel(1.0, Modifiers::NONE), &mut session));
    assert_eq!(session.view().cell_size(), 16);

    let before = session.screen_to_grid(anchor);
    assert!(router.route(&wheel(1.0, Modifiers::CTRL), &mut session));
    assert_eq!(session.view().cell_size(), 18);
    assert_eq!(session.screen_to_grid(anchor), before);

    assert!(router.route(&wheel(-1.0, Modifiers::ALT), &mut session));
    assert!(router.route(&wheel(-1.0, Modifiers::ALT), &mut session));
    assert_eq!(session.view().cell_size(), 14);
    assert_eq!(session.screen_to_grid(anchor), before);
}

#[test]
fn test_zoom_to_cursor_at_every_size() {
    let mut router = InputRouter::new();
    let mut session = EditorSession::default();
    let anchor = ScreenPos::new(333, 217);
    let zoom_in = InputEvent::Wheel {
        pos: anchor,
        delta: 1.0,
        modifiers: Modifiers::CTRL,
    };
    let zoom_out = InputEvent::Wheel {
        pos: anchor,
        delta: -1.0,
        modifiers: Modifiers::CTRL,
    };

    let before = session.screen_to_grid(anchor);
    while router.route(&zoom_out, &mut session) {
        assert_eq!(session.screen_to_grid(anchor), before);
    }
    assert_eq!(session.view().cell_size(), 4);
    while router.route(&zoom_in, &mut session) {
        assert_eq!(session.screen_to_grid(anchor), before);
    }
    assert_eq!(session.view().cell_size(), 64);
}

#[test]
fn test_undo_redo_shortcuts() {
    let mut router = InputRouter::new();
    let mut session = EditorSession::default();
    route_all(&mut router, &mut session, &[down(0, 0), up(0, 0), down(16, 0), up(16, 0)]);
    assert_eq!(session.history().undo_count(), 2);

    assert!(router.route(&key(Key::Z, Modifiers::CTRL), &mut session));
    assert_eq!(session.buffer().get(1, 0), Some(Rgba::TRANSPARENT));

    assert!(router.route(&key(Key::Y, Modifiers::CTRL), &mut session));
    assert_eq!(session.buffer().get(1, 0), Some(Rgba::BLACK));

    router.route(&key(Key::Z, Modifiers::CTRL), &mut session);
    router.route(&key(Key::Z, Modifiers::CTRL), &mut session);
    assert!(!router.route(&key(Key::Z, Modifiers::CTRL), &mut session));
    assert!(router.route(&key(Key::Z, CTRL_SHIFT), &mut session));
    assert_eq!(session.buffer().get(0, 0), Some(Rgba::BLACK));
    assert_eq!(session.buffer().get(1, 0), Some(Rgba::TRANSPARENT));
}

#[test]
fn test_cut_and_paste_shortcuts() {
    let mut router = InputRouter::new();
    let mut session = EditorSession::default();
    session.set_active_color(Rgba::opaque(255, 0, 0));
    route_all(&mut router, &mut session, &[down(0, 0), drag_to(16, 0), up(16, 0)]);

    session.set_tool(ToolKind::Select);
    route_all(&mut router, &mut session, &[down(0, 0), drag_to(20, 4), up(20, 4)]);
    let rect = GridRect::from_corners(GridPos::new(0, 0), GridPos::new(1, 0));
    assert_eq!(session.selection_rect(), Some(rect));

    assert!(router.route(&key(Key::X, Modifiers::CTRL), &mut session));
    assert_eq!(session.buffer().get(0, 0), Some(Rgba::TRANSPARENT));
    assert_eq!(session.selection_rect(), None);

    assert!(router.route(&key(Key::V, Modifiers::CTRL), &mut session));
    assert_eq!(session.buffer().get(1, 0), Some(Rgba::opaque(255, 0, 0)));
    assert_eq!(session.selection_rect(), Some(rect));
    // stroke, cut, paste
    assert_eq!(session.history().undo_count(), 3);
}

#[test]
fn test_delete_key_clears_selection() {
    let mut router = InputRouter::new();
    let mut session = EditorSession::default();
    session.set_tool(ToolKind::Fill);
    route_all(&mut router, &mut session, &[down(0, 0), up(0, 0)]);

    session.set_tool(ToolKind::Select);
    route_all(&mut router, &mut session, &[down(16, 16), drag_to(48, 48), up(48, 48)]);
    assert!(router.route(&key(Key::Delete, Modifiers::NONE), &mut session));

    assert_eq!(session.buffer().get(1, 1), Some(Rgba::TRANSPARENT));
    assert_eq!(session.buffer().get(3, 3), Some(Rgba::TRANSPARENT));
    assert_eq!(session.buffer().get(0, 0), Some(Rgba::BLACK));
    assert_eq!(session.buffer().get(4, 4), Some(Rgba::BLACK));
    assert!(!session.selection().has_selection());

    session.undo();
    assert_eq!(session.buffer().get(2, 2), Some(Rgba::BLACK));
}

#[test]
fn test_host_clipboard_events_reach_session() {
    let ctx = Context::default();
    let mut handler = InputHandler::new();
    handler.set_canvas_rect(Rect::from_min_size(Pos2::ZERO, vec2(1024.0, 1024.0)));
    let mut router = InputRouter::new();
    let mut session = EditorSession::default();
    session.set_active_color(Rgba::WHITE);
    route_all(&mut router, &mut session, &[down(0, 0), up(0, 0)]);
    session.set_tool(ToolKind::Select);
    route_all(&mut router, &mut session, &[down(0, 0), drag_to(16, 16), up(16, 16)]);

    let mut frame = |session: &mut EditorSession, events: Vec<Event>| {
        let raw = RawInput {
            modifiers: Modifiers::COMMAND,
            events,
            ..Default::default()
        };
        let _ = ctx.run(raw, |ctx| {
            for event in handler.process_input(ctx) {
                router.route(&event, session);
            }
        });
    };

    frame(&mut session, vec![Event::Copy]);
    assert!(session.has_clipboard());

    frame(&mut session, vec![Event::Cut]);
    assert_eq!(session.buffer().get(0, 0), Some(Rgba::TRANSPARENT));
    assert!(!session.selection().has_selection());

    frame(&mut session, vec![Event::Paste(String::new())]);
    assert_eq!(session.buffer().get(0, 0), Some(Rgba::WHITE));
    assert_eq!(
        session.selection_rect(),
        Some(GridRect::from_corners(GridPos::new(0, 0), GridPos::new(1, 1)))
    );
}
