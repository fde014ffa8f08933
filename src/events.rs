use crate::ScreenSize;
use crate::cell::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    EngineEvent(EngineEvent),
    AppEvent(AppEvent),
}

/// Events that touch the grid or the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// Advance the world state by `n`, paused or not
    Advance(usize),

    /// The one-shot animation timer fired
    Tick,

    /// Set the cell under the pointer
    Paint {
        x: ScreenSize,
        y: ScreenSize,
        state: State,
    },

    /// Kill every cell and restart the generation count
    Clear,

    /// The terminal was resized
    Resize { cols: ScreenSize, rows: ScreenSize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    TogglePause,
    ToggleHelp,

    /// The pointer moved without a button held
    PointerMoved { x: ScreenSize, y: ScreenSize },

    /// Exit the application
    Exit,
}
