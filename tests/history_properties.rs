use egui::{Pos2, pos2};
use raster_paint::{Editor, InputEvent, PaintConfig, UiAction};

fn small_editor() -> Editor {
    let config = PaintConfig {
        canvas_width: 64,
        canvas_height: 48,
        ..PaintConfig::default()
    };
    Editor::new(&config).unwrap()
}

fn drag(editor: &mut Editor, points: &[Pos2]) {
    let (first, rest) = points.split_first().unwrap();
    editor.handle_input(InputEvent::PointerDown { pos: *first });
    for pos in rest {
        editor.handle_input(InputEvent::PointerMove { pos: *pos });
    }
    let last = *points.last().unwrap();
    editor.handle_input(InputEvent::PointerUp { pos: last });
}

fn pixels(editor: &Editor) -> Vec<u8> {
    editor.surface().data().to_vec()
}

#[test]
fn test_undo_walks_back_to_blank_canvas() {
    let mut editor = small_editor();
    let blank = pixels(&editor);

    drag(&mut editor, &[pos2(5.0, 5.0), pos2(30.0, 5.0)]);
    drag(&mut editor, &[pos2(5.0, 20.0), pos2(30.0, 20.0)]);
    assert_eq!(editor.history().undo_len(), 3);

    for _ in 0..3 {
        editor.dispatch(UiAction::Undo);
    }
    assert_eq!(pixels(&editor), blank);
    assert!(!editor.history().can_undo());
    assert_eq!(editor.history().redo_len(), 3);
}

#[test]
fn test_undo_redo_round_trip() {
    let mut editor = small_editor();
    drag(&mut editor, &[pos2(5.0, 5.0), pos2(30.0, 5.0)]);
    drag(&mut editor, &[pos2(5.0, 20.0), pos2(30.0, 20.0)]);
    editor.dispatch(UiAction::Undo);
    editor.dispatch(UiAction::Undo);

    let before = pixels(&editor);
    editor.dispatch(UiAction::Undo);
    editor.dispatch(UiAction::Redo);
    assert_eq!(pixels(&editor), before);

    editor.dispatch(UiAction::Redo);
    editor.dispatch(UiAction::Undo);
    assert_eq!(pixels(&editor), before);
}

#[test]
fn test_new_edit_clears_redo() {
    let mut editor = small_editor();
    drag(&mut editor, &[pos2(5.0, 5.0), pos2(30.0, 5.0)]);
    editor.dispatch(UiAction::Undo);
    editor.dispatch(UiAction::Undo);
    assert!(editor.history().can_redo());

    drag(&mut editor, &[pos2(5.0, 30.0), pos2(30.0, 30.0)]);
    assert!(!editor.history().can_redo());
}

#[test]
fn test_clear_is_recorded_and_clears_redo() {
    let mut editor = small_editor();
    drag(&mut editor, &[pos2(5.0, 10.0), pos2(30.0, 10.0)]);
    let painted = pixels(&editor);
    editor.dispatch(UiAction::Undo);
    assert!(editor.history().can_redo());

    editor.dispatch(UiAction::Redo);
    editor.dispatch(UiAction::Clear);
    assert!(!editor.history().can_redo());
    assert!(pixels(&editor).iter().all(|byte| *byte == 0));

    // the snapshot taken before clearing brings the stroke back
    editor.dispatch(UiAction::Undo);
    assert_eq!(pixels(&editor), painted);
}

#[test]
fn test_empty_stacks_are_noops() {
    let mut editor = small_editor();
    drag(&mut editor, &[pos2(5.0, 10.0), pos2(30.0, 10.0)]);

    let before = pixels(&editor);
    let lens = (editor.history().undo_len(), editor.history().redo_len());
    editor.dispatch(UiAction::Redo);
    assert_eq!(pixels(&editor), before);
    assert_eq!((editor.history().undo_len(), editor.history().redo_len()), lens);

    while editor.history().can_undo() {
        editor.dispatch(UiAction::Undo);
    }
    let before = pixels(&editor);
    let lens = (editor.history().undo_len(), editor.history().redo_len());
    editor.dispatch(UiAction::Undo);
    assert_eq!(pixels(&editor), before);
    assert_eq!((editor.history().undo_len(), editor.history().redo_len()), lens);
}

#[test]
fn test_history_capacity_evicts_oldest() {
    let config = PaintConfig {
        canvas_width: 64,
        canvas_height: 48,
        history_capacity: 3,
        ..PaintConfig::default()
    };
    let mut editor = Editor::new(&config).unwrap();
    for row in 0..5 {
        let y = 5.0 + row as f32 * 8.0;
        drag(&mut editor, &[pos2(5.0, y), pos2(30.0, y)]);
    }
    assert_eq!(editor.history().undo_len(), 3);

    for _ in 0..3 {
        editor.dispatch(UiAction::Undo);
    }
    // the blank canvas is gone, the oldest survivor still has strokes on it
    assert!(pixels(&editor).iter().any(|byte| *byte != 0));
}
