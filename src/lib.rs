pub mod automaton;
pub mod cell;
pub mod config;
pub mod events;
pub mod grid;
pub mod help;
pub mod io;
pub mod keymap;
pub mod logging;
pub mod model;
pub mod rule_set;

/// Terminal columns and rows.
pub type ScreenSize = u16;

/// Grid coordinates and sizes as accepted from callers. Signed so that negative input can be
/// rejected rather than wrapped.
pub type GridCoord = i32;
