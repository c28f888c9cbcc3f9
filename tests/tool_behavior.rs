use std::cell::RefCell;
use std::rc::Rc;

use egui::{Modifiers, PointerButton};
use texel_paint::tool::PointerInput;
use texel_paint::{
    EditorEvent, EditorSession, GridPos, GridRect, PixelBuffer, Rgba, SelectionState, ToolKind,
};

const RED: Rgba = Rgba::opaque(255, 0, 0);
const BLUE: Rgba = Rgba::opaque(0, 0, 255);

fn p(x: i32, y: i32) -> GridPos {
    GridPos::new(x, y)
}

fn press(pos: GridPos) -> PointerInput {
    PointerInput::new(pos)
        .with_button(PointerButton::Primary)
        .with_primary_held(true)
}

fn held(pos: GridPos) -> PointerInput {
    PointerInput::new(pos).with_primary_held(true)
}

fn release(pos: GridPos) -> PointerInput {
    PointerInput::new(pos).with_button(PointerButton::Primary)
}

fn click(session: &mut EditorSession, pos: GridPos) {
    session.pointer_down(press(pos));
    session.pointer_up(release(pos));
}

fn drag(session: &mut EditorSession, from: GridPos, to: GridPos, modifiers: Modifiers) {
    session.pointer_down(press(from).with_modifiers(modifiers));
    session.pointer_move(held(to).with_modifiers(modifiers));
    session.pointer_up(release(to).with_modifiers(modifiers));
}

fn record_events(session: &EditorSession) -> Rc<RefCell<Vec<EditorEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session.subscribe(Box::new(move |event: &EditorEvent| sink.borrow_mut().push(event.clone())));
    events
}

fn painted(buffer: &PixelBuffer) -> Vec<GridPos> {
    let mut cells = Vec::new();
    buffer.scan(|x, y, color| {
        if !color.is_transparent() {
            cells.push(p(x, y));
        }
    });
    cells
}

#[test]
fn test_pen_paints_while_held() {
    let mut session = EditorSession::default();
    session.set_active_color(RED);

    session.pointer_down(press(p(1, 1)));
    session.pointer_move(held(p(2, 1)));
    session.pointer_move(held(p(3, 1)));
    session.pointer_up(release(p(3, 1)));
    // Hover without a button does nothing
    session.pointer_move(PointerInput::new(p(9, 9)));

    assert_eq!(painted(session.buffer()), vec![p(1, 1), p(2, 1), p(3, 1)]);
    assert_eq!(session.buffer().get(1, 1), Some(RED));
}

// Deliberate change from older editor builds, where pen, eraser and fill wrote
// straight to the canvas with no history entry: every mutating tool now
// records exactly one PixelEdit per gesture, like the shape tools.
#[test]
fn test_pen_stroke_is_one_undo_action() {
    let mut session = EditorSession::default();
    session.pointer_down(press(p(0, 0)));
    for x in 1..10 {
        session.pointer_move(held(p(x, 0)));
    }
    assert!(session.is_gesture_active());
    session.pointer_up(release(p(9, 0)));

    assert_eq!(session.history().undo_count(), 1);
    assert!(session.undo());
    assert!(painted(session.buffer()).is_empty());
}

#[test]
fn test_eraser_stroke_is_one_undo_action() {
    let mut session = EditorSession::default();
    session.set_active_color(BLUE);
    drag(&mut session, p(0, 0), p(0, 0), Modifiers::NONE);
    click(&mut session, p(1, 0));

    session.set_tool(ToolKind::Eraser);
    session.pointer_down(press(p(0, 0)));
    session.pointer_move(held(p(1, 0)));
    session.pointer_up(release(p(1, 0)));

    assert!(painted(session.buffer()).is_empty());
    assert_eq!(session.history().undo_count(), 3);
    session.undo();
    assert_eq!(painted(session.buffer()), vec![p(0, 0), p(1, 0)]);
}

#[test]
fn test_fill_is_one_undo_action() {
    let mut session = EditorSession::default();
    session.set_active_color(RED);
    session.set_tool(ToolKind::Fill);
    click(&mut session, p(10, 10));

    assert_eq!(painted(session.buffer()).len(), 64 * 64);
    assert_eq!(session.history().undo_count(), 1);

    // Filling with the colour already there records nothing
    click(&mut session, p(3, 3));
    assert_eq!(session.history().undo_count(), 1);

    session.undo();
    assert!(painted(session.buffer()).is_empty());
}

#[test]
fn test_repainting_same_colour_records_nothing() {
    let mut session = EditorSession::default();
    click(&mut session, p(4, 4));
    click(&mut session, p(4, 4));
    assert_eq!(session.history().undo_count(), 1);
}

#[test]
fn test_painting_outside_never_mutates() {
    for kind in ToolKind::ALL {
        let mut session = EditorSession::default();
        session.set_active_color(RED);
        session.set_tool(kind);

        drag(&mut session, p(70, 70), p(90, 80), Modifiers::NONE);
        drag(&mut session, p(-5, -5), p(-1, -20), Modifiers::NONE);
        click(&mut session, p(64, 0));
        click(&mut session, p(0, -1));

        assert!(painted(session.buffer()).is_empty(), "{kind:?} wrote outside");
        assert!(!session.can_undo(), "{kind:?} recorded an action");
    }
}

#[test]
fn test_line_tool_commits_on_release() {
    let mut session = EditorSession::default();
    session.set_tool(ToolKind::Line);

    session.pointer_down(press(p(0, 0)));
    session.pointer_move(held(p(0, 5)));
    assert!(painted(session.buffer()).is_empty());
    assert_eq!(session.selection().state(), SelectionState::Dragging);

    session.pointer_up(release(p(0, 5)));
    assert_eq!(painted(session.buffer()), (0..=5).map(|y| p(0, y)).collect::<Vec<_>>());
    assert_eq!(session.selection().state(), SelectionState::Idle);
    assert_eq!(session.history().undo_count(), 1);
}

#[test]
fn test_line_click_draws_one_cell() {
    let mut session = EditorSession::default();
    session.set_tool(ToolKind::Line);
    click(&mut session, p(7, 7));
    assert_eq!(painted(session.buffer()), vec![p(7, 7)]);
}

#[test]
fn test_rectangle_tool_draws_perimeter() {
    let mut session = EditorSession::default();
    session.set_tool(ToolKind::Rectangle);
    drag(&mut session, p(1, 1), p(4, 4), Modifiers::NONE);

    let cells = painted(session.buffer());
    assert_eq!(cells.len(), 12);
    assert_eq!(session.buffer().get(2, 2), Some(Rgba::TRANSPARENT));
    assert_eq!(session.history().undo_count(), 1);
}

#[test]
fn test_proportional_rectangle() {
    let mut session = EditorSession::default();
    session.set_tool(ToolKind::Rectangle);
    drag(&mut session, p(0, 0), p(5, 2), Modifiers::SHIFT);

    // 6x6 box perimeter
    assert_eq!(painted(session.buffer()).len(), 20);
    assert_ne!(session.buffer().get(5, 5), Some(Rgba::TRANSPARENT));
    assert_ne!(session.buffer().get(0, 5), Some(Rgba::TRANSPARENT));
}

#[test]
fn test_degenerate_rectangle_is_noop() {
    let mut session = EditorSession::default();
    session.set_tool(ToolKind::Rectangle);
    drag(&mut session, p(3, 3), p(3, 9), Modifiers::NONE);
    drag(&mut session, p(6, 6), p(6, 6), Modifiers::NONE);

    assert!(painted(session.buffer()).is_empty());
    assert!(!session.can_undo());
}

#[test]
fn test_ellipse_tool() {
    let mut session = EditorSession::default();
    session.set_tool(ToolKind::Ellipse);
    drag(&mut session, p(0, 0), p(4, 4), Modifiers::NONE);
    assert_eq!(painted(session.buffer()).len(), 12);

    drag(&mut session, p(10, 10), p(11, 20), Modifiers::NONE);
    assert_eq!(session.history().undo_count(), 1);
}

#[test]
fn test_tool_switch_cancels_shape_preview() {
    let mut session = EditorSession::default();
    session.set_tool(ToolKind::Rectangle);
    session.pointer_down(press(p(1, 1)));
    session.pointer_move(held(p(5, 5)));
    assert!(session.is_gesture_active());

    session.set_tool(ToolKind::Pen);
    assert!(!session.is_gesture_active());
    assert_eq!(session.selection().state(), SelectionState::Idle);
    assert!(painted(session.buffer()).is_empty());
    assert!(!session.can_undo());

    // The stale release reaches the pen, which has no stroke to end
    session.pointer_up(release(p(5, 5)));
    assert!(!session.can_undo());
}

#[test]
fn test_tool_switch_keeps_partial_pen_stroke() {
    let mut session = EditorSession::default();
    session.pointer_down(press(p(0, 0)));
    session.pointer_move(held(p(1, 0)));
    session.set_tool(ToolKind::Fill);

    assert_eq!(painted(session.buffer()), vec![p(0, 0), p(1, 0)]);
    assert_eq!(session.history().undo_count(), 1);
}

#[test]
fn test_tool_switch_emits_event() {
    let mut session = EditorSession::default();
    let events = record_events(&session);
    session.set_tool(ToolKind::Eyedropper);
    session.set_tool(ToolKind::Eyedropper);

    assert_eq!(
        *events.borrow(),
        vec![EditorEvent::ToolChanged {
            old: ToolKind::Pen,
            new: ToolKind::Eyedropper,
        }]
    );
}

#[test]
fn test_eyedropper_samples_opaque_cells() {
    let mut session = EditorSession::default();
    session.set_active_color(RED);
    click(&mut session, p(2, 2));

    session.set_active_color(BLUE);
    session.set_tool(ToolKind::Eyedropper);
    let events = record_events(&session);

    click(&mut session, p(2, 2));
    assert_eq!(session.active_color(), RED);
    assert_eq!(*events.borrow(), vec![EditorEvent::ColorSampled(RED)]);

    // Transparent cells are ignored
    session.set_active_color(BLUE);
    click(&mut session, p(30, 30));
    assert_eq!(session.active_color(), BLUE);
    assert_eq!(events.borrow().len(), 1);
    assert_eq!(session.history().undo_count(), 1);
}

#[test]
fn test_select_commits_rectangle() {
    let mut session = EditorSession::default();
    session.set_tool(ToolKind::Select);
    let events = record_events(&session);

    drag(&mut session, p(5, 4), p(2, 1), Modifiers::NONE);
    let rect = GridRect::from_corners(p(2, 1), p(5, 4));
    assert_eq!(session.selection().state(), SelectionState::Committed);
    assert_eq!(session.selection_rect(), Some(rect));
    assert_eq!(*events.borrow(), vec![EditorEvent::SelectionChanged(Some(rect))]);
    assert!(!session.can_undo());

    // A new drag starts over
    session.pointer_down(press(p(9, 9)));
    assert_eq!(session.selection().state(), SelectionState::Dragging);
    assert_eq!(session.selection_rect(), None);
}

#[test]
fn test_select_drag_is_clamped() {
    let mut session = EditorSession::default();
    session.set_tool(ToolKind::Select);
    drag(&mut session, p(60, 60), p(100, 70), Modifiers::NONE);
    assert_eq!(
        session.selection_rect(),
        Some(GridRect::from_corners(p(60, 60), p(63, 63)))
    );
}

#[test]
fn test_other_tool_press_clears_selection() {
    let mut session = EditorSession::default();
    session.set_tool(ToolKind::Select);
    drag(&mut session, p(0, 0), p(1, 1), Modifiers::NONE);
    assert!(session.copy_selection());

    // Paste leaves the pasted region selected under any tool
    session.set_tool(ToolKind::Pen);
    assert!(session.paste());
    assert!(session.selection().has_selection());

    click(&mut session, p(20, 20));
    assert!(!session.selection().has_selection());
}
