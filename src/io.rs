use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use crate::cell::State;
use crate::events::AppEvent;
use crate::events::EngineEvent;
use crate::events::Event;
use crate::keymap::KeyMap;

/// Converts a crossterm event into an application event, using `keys` for key presses.
///
/// Key releases and repeats, focus changes and pastes are dropped.
pub fn convert_event(event: CrossTermEvent, keys: &KeyMap) -> Option<Event> {
    match event {
        CrossTermEvent::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                return None;
            }

            let event = if keys.quit.matches(&key_event) {
                Event::AppEvent(AppEvent::Exit)
            } else if keys.start.matches(&key_event) {
                Event::AppEvent(AppEvent::TogglePause)
            } else if keys.next.matches(&key_event) {
                Event::EngineEvent(EngineEvent::Advance(1))
            } else if keys.clear.matches(&key_event) {
                Event::EngineEvent(EngineEvent::Clear)
            } else if keys.help.matches(&key_event) {
                Event::AppEvent(AppEvent::ToggleHelp)
            } else {
                return None;
            };

            Some(event)
        }
        CrossTermEvent::Mouse(mouse_event) => convert_mouse(mouse_event),
        CrossTermEvent::Resize(cols, rows) => {
            Some(Event::EngineEvent(EngineEvent::Resize { cols, rows }))
        }
        _ => None,
    }
}

fn convert_mouse(event: MouseEvent) -> Option<Event> {
    let MouseEvent { column, row, .. } = event;

    let paint = |state| {
        Some(Event::EngineEvent(EngineEvent::Paint {
            x: column,
            y: row,
            state,
        }))
    };

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            paint(State::Alive)
        }
        MouseEventKind::Down(MouseButton::Right) | MouseEventKind::Drag(MouseButton::Right) => {
            paint(State::Dead)
        }
        MouseEventKind::Moved => Some(Event::AppEvent(AppEvent::PointerMoved {
            x: column,
            y: row,
        })),
        _ => None,
    }
}
