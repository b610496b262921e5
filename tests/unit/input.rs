use crossterm::event::{KeyEvent, MouseButton, MouseEvent};

use super::*;

fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

#[test]
fn cancel_events() {
    assert!(InputEvent::Quit.is_cancel());
    assert!(InputEvent::Escape.is_cancel());
    assert!(InputEvent::PointerClick.is_cancel());
    assert!(!InputEvent::Key('q').is_cancel());
    assert!(!InputEvent::Resize(10, 10).is_cancel());
}

#[test]
fn scripted_input_serves_batches_in_order() {
    let mut input = ScriptedInput::quit_after(2);
    assert!(input.poll_pending().unwrap().is_empty());
    assert!(input.poll_pending().unwrap().is_empty());
    assert_eq!(input.poll_pending().unwrap(), vec![InputEvent::Quit]);
    assert!(input.poll_pending().unwrap().is_empty());
    assert_eq!(input.polls(), 4);
}

#[test]
fn terminal_keys_map() {
    assert_eq!(
        map_terminal_event(key(KeyCode::Esc, KeyModifiers::NONE)),
        Some(InputEvent::Escape)
    );
    assert_eq!(
        map_terminal_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(InputEvent::Quit)
    );
    assert_eq!(
        map_terminal_event(key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
        Some(InputEvent::Key('Q'))
    );
    assert_eq!(
        map_terminal_event(key(KeyCode::Enter, KeyModifiers::NONE)),
        None
    );
}

#[test]
fn key_release_is_ignored() {
    let ev = Event::Key(KeyEvent::new_with_kind(
        KeyCode::Esc,
        KeyModifiers::NONE,
        KeyEventKind::Release,
    ));
    assert_eq!(map_terminal_event(ev), None);
}

#[test]
fn mouse_down_is_a_click() {
    let down = Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 3,
        row: 4,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(map_terminal_event(down), Some(InputEvent::PointerClick));

    let moved = Event::Mouse(MouseEvent {
        kind: MouseEventKind::Moved,
        column: 3,
        row: 4,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(map_terminal_event(moved), None);
}

#[test]
fn resize_passes_through() {
    assert_eq!(
        map_terminal_event(Event::Resize(80, 24)),
        Some(InputEvent::Resize(80, 24))
    );
}
