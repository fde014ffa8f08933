use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::GridCoord;
use crate::ScreenSize;
use crate::automaton::Automaton;
use crate::cell::Glyphs;
use crate::cell::State;
use crate::events::AppEvent;
use crate::events::EngineEvent;
use crate::events::Event;
use crate::grid::Grid;
use crate::grid::GridError;
use crate::help::Help;
use crate::keymap::KeyMap;
use crate::rule_set::RuleSet;

/// By default a quarter of the terminal is kept free for the status lines.
pub const DEFAULT_MARGIN: ScreenSize = 4;

/// How the grid size follows the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// A square grid of side `min(cols - cols / margin, rows - rows / margin)`
    Viewport { margin: ScreenSize },

    /// A fixed size; terminal resizes leave the grid alone
    Fixed {
        width: ScreenSize,
        height: ScreenSize,
    },
}

impl Default for Sizing {
    fn default() -> Self {
        Sizing::Viewport {
            margin: DEFAULT_MARGIN,
        }
    }
}

impl Sizing {
    /// The grid size for a `cols` x `rows` terminal, or `None` when the size is fixed.
    pub fn grid_size(&self, cols: ScreenSize, rows: ScreenSize) -> Option<(GridCoord, GridCoord)> {
        match *self {
            Sizing::Viewport { margin } => {
                let margin = margin.max(1);
                let side = (cols - cols / margin).min(rows - rows / margin);

                Some((side as GridCoord, side as GridCoord))
            }
            Sizing::Fixed { .. } => None,
        }
    }
}

/// Everything the model is configured with for one session.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub keys: KeyMap,
    pub glyphs: Glyphs,
    pub rule: RuleSet,
    pub sizing: Sizing,
}

/// What the event loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,

    /// Schedule a one-shot [`EngineEvent::Tick`] one frame from now
    Tick,

    /// Drop the pending tick, if any
    Stop,

    Quit,
}

/// The simulation and the state of the UI around it.
#[derive(Debug, Clone)]
pub struct Model {
    grid: Grid,
    automaton: Automaton,

    paused: bool,

    /// Last known pointer location, in terminal cells
    mouse: (ScreenSize, ScreenSize),

    keys: KeyMap,
    help: Help,
    glyphs: Glyphs,
    sizing: Sizing,
}

impl Model {
    /// A paused model. With viewport sizing the grid is empty until the first resize.
    pub fn new(settings: Settings) -> Result<Self, GridError> {
        let Settings {
            keys,
            glyphs,
            rule,
            sizing,
        } = settings;

        let grid = match sizing {
            Sizing::Fixed { width, height } => Grid::new(width as GridCoord, height as GridCoord)?,
            Sizing::Viewport { .. } => Grid::new(0, 0)?,
        };

        Ok(Self {
            grid,
            automaton: Automaton::new(rule),
            paused: true,
            mouse: (0, 0),
            keys,
            help: Help::default(),
            glyphs,
            sizing,
        })
    }

    pub fn update(&mut self, event: Event) -> Command {
        match event {
            Event::EngineEvent(event) => self.handle_engine_event(event),
            Event::AppEvent(event) => self.handle_app_event(event),
        }
    }

    fn handle_engine_event(&mut self, event: EngineEvent) -> Command {
        match event {
            EngineEvent::Tick => {
                if self.paused {
                    return Command::None;
                }

                self.automaton.step(&mut self.grid);
                Command::Tick
            }
            EngineEvent::Advance(n) => {
                self.automaton.advance(&mut self.grid, n);
                Command::None
            }
            EngineEvent::Paint { x, y, state } => {
                self.mouse = (x, y);
                self.grid.set_cell(x as GridCoord, y as GridCoord, state);
                Command::None
            }
            EngineEvent::Clear => {
                self.grid.clear();
                self.automaton.reset_generation();
                Command::None
            }
            EngineEvent::Resize { cols, rows } => {
                self.handle_resize(cols, rows);
                Command::None
            }
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) -> Command {
        match event {
            AppEvent::TogglePause => {
                self.paused = !self.paused;
                info!(paused = self.paused, "Toggled animation");

                if self.paused {
                    Command::Stop
                } else {
                    Command::Tick
                }
            }
            AppEvent::ToggleHelp => {
                self.help.toggle();
                Command::None
            }
            AppEvent::PointerMoved { x, y } => {
                self.mouse = (x, y);
                Command::None
            }
            AppEvent::Exit => Command::Quit,
        }
    }

    fn handle_resize(&mut self, cols: ScreenSize, rows: ScreenSize) {
        self.help.width = cols as usize;

        let Some((width, height)) = self.sizing.grid_size(cols, rows) else {
            return;
        };

        // The side also has to leave room for everything drawn under the grid
        let fit = rows.saturating_sub(self.footer_height()) as GridCoord;
        let (width, height) = (width.min(fit), height.min(fit));

        match self.grid.resize(width, height) {
            Ok(()) => debug!(cols, rows, width, height, "Resized grid"),
            Err(e) => warn!("Ignoring resize to {cols}x{rows}: {e}"),
        }
    }

    /// Lines drawn under the grid: a blank line, the mouse, the status, another blank line and
    /// the help at its tallest.
    fn footer_height(&self) -> ScreenSize {
        let help = self
            .keys
            .full_help()
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(1);

        4 + help as ScreenSize
    }

    /// Draw the grid followed by the status lines and the help.
    pub fn view(&self) -> String {
        let mut s = self.grid.render(&self.glyphs);

        let (mx, my) = self.mouse;
        let status = if self.paused { "Paused" } else { "Running" };

        s.push('\n');
        s.push_str(&format!("Mouse: ({mx}, {my})\n"));
        s.push_str(&format!(
            "Generation: {}  Population: {}  {status}\n",
            self.automaton.generation(),
            self.grid.population(),
        ));
        s.push('\n');
        s.push_str(&self.help.view(&self.keys));

        s
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn cell(&self, x: GridCoord, y: GridCoord) -> Option<State> {
        self.grid.cell(x, y)
    }

    pub fn set_cell(&mut self, x: GridCoord, y: GridCoord, state: State) {
        self.grid.set_cell(x, y, state);
    }

    pub fn generation(&self) -> u64 {
        self.automaton.generation()
    }

    pub fn rule(&self) -> RuleSet {
        self.automaton.rule()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn mouse(&self) -> (ScreenSize, ScreenSize) {
        self.mouse
    }

    pub fn keys(&self) -> &KeyMap {
        &self.keys
    }

    pub fn help(&self) -> &Help {
        &self.help
    }
}
