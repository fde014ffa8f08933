use std::fmt;

/// Glyph drawn for an alive cell unless configured otherwise.
pub const ALIVE_GLYPH: char = '@';

/// Glyph drawn for a dead cell unless configured otherwise.
pub const DEAD_GLYPH: char = '.';

/// The state of a single cell. There are exactly two.
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl State {
    pub fn is_alive(self) -> bool {
        self == State::Alive
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            State::Dead => State::Alive,
            State::Alive => State::Dead,
        }
    }

    /// The character used to draw this state with the given glyph set.
    pub fn glyph(self, glyphs: &Glyphs) -> char {
        match self {
            State::Alive => glyphs.alive,
            State::Dead => glyphs.dead,
        }
    }
}

impl From<bool> for State {
    fn from(alive: bool) -> Self {
        if alive { State::Alive } else { State::Dead }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph(&Glyphs::default()))
    }
}

/// Characters used to draw cells in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub alive: char,
    pub dead: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            alive: ALIVE_GLYPH,
            dead: DEAD_GLYPH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dead() {
        assert_eq!(State::default(), State::Dead);
    }

    #[test]
    fn toggled_flips() {
        assert_eq!(State::Dead.toggled(), State::Alive);
        assert_eq!(State::Alive.toggled(), State::Dead);
    }

    #[test]
    fn glyphs_match_state() {
        let glyphs = Glyphs::default();
        assert_eq!(State::Alive.glyph(&glyphs), '@');
        assert_eq!(State::Dead.glyph(&glyphs), '.');

        let custom = Glyphs {
            alive: '#',
            dead: ' ',
        };
        assert_eq!(State::Alive.glyph(&custom), '#');
        assert_eq!(State::Dead.glyph(&custom), ' ');
    }

    #[test]
    fn from_bool() {
        assert_eq!(State::from(true), State::Alive);
        assert_eq!(State::from(false), State::Dead);
    }
}
