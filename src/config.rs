use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::ScreenSize;
use crate::cell::ALIVE_GLYPH;
use crate::cell::DEAD_GLYPH;
use crate::cell::Glyphs;
use crate::keymap::KeyError;
use crate::keymap::KeyMap;
use crate::model::DEFAULT_MARGIN;
use crate::model::Settings;
use crate::model::Sizing;
use crate::rule_set::B3S23;
use crate::rule_set::RuleSet;

pub const DEFAULT_FPS: u32 = 60;

/// Conway's Game of Life in the terminal.
///
/// Left click brings a cell to life, right click kills it.
#[derive(Debug, Clone, Parser)]
#[command(name = "automata", version, about)]
pub struct Config {
    /// Generations per second while the animation runs
    #[arg(
        long,
        default_value_t = DEFAULT_FPS,
        value_parser = clap::value_parser!(u32).range(1..=240)
    )]
    pub fps: u32,

    /// Birth/survival rule, e.g. B3/S23 or B36/S23
    #[arg(long, default_value_t = B3S23)]
    pub rule: RuleSet,

    /// Character drawn for alive cells
    #[arg(long, default_value_t = ALIVE_GLYPH)]
    pub alive: char,

    /// Character drawn for dead cells
    #[arg(long, default_value_t = DEAD_GLYPH)]
    pub dead: char,

    /// Keep `1/MARGIN` of the terminal free around the grid
    #[arg(
        long,
        value_name = "MARGIN",
        default_value_t = DEFAULT_MARGIN,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub margin: ScreenSize,

    /// Fixed grid width instead of following the terminal size
    #[arg(long, requires = "height")]
    pub width: Option<ScreenSize>,

    /// Fixed grid height instead of following the terminal size
    #[arg(long, requires = "width")]
    pub height: Option<ScreenSize>,

    /// Rebind an action, e.g. `--bind next=enter` or `--bind quit=q,ctrl+d`.
    /// Actions are start, next, clear, help and quit
    #[arg(long = "bind", value_name = "ACTION=KEYS")]
    pub bindings: Vec<String>,

    /// Write logs to this file. Filter with RUST_LOG (default: info)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Time between two animation steps.
    pub fn frametime(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    pub fn sizing(&self) -> Sizing {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Sizing::Fixed { width, height },
            _ => Sizing::Viewport {
                margin: self.margin,
            },
        }
    }

    pub fn keys(&self) -> Result<KeyMap, KeyError> {
        let mut keys = KeyMap::default();

        for entry in &self.bindings {
            keys.rebind(entry)?;
        }

        Ok(keys)
    }

    /// Settings for [`Model::new`](crate::model::Model::new).
    pub fn settings(&self) -> Result<Settings, KeyError> {
        Ok(Settings {
            keys: self.keys()?,
            glyphs: Glyphs {
                alive: self.alive,
                dead: self.dead,
            },
            rule: self.rule,
            sizing: self.sizing(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use crossterm::event::KeyEvent;
    use crossterm::event::KeyModifiers;

    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("automata").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();

        assert_eq!(config.fps, 60);
        assert_eq!(config.rule, B3S23);
        assert_eq!(config.frametime(), Duration::from_secs(1) / 60);
        assert_eq!(config.sizing(), Sizing::Viewport { margin: 4 });
        assert!(config.log_file.is_none());

        let settings = config.settings().unwrap();
        assert_eq!(settings.glyphs, Glyphs::default());
        assert_eq!(settings.keys, KeyMap::default());
    }

    #[test]
    fn overrides() {
        let config = parse(&[
            "--fps",
            "10",
            "--rule",
            "B36/S23",
            "--alive",
            "#",
            "--dead",
            "-",
            "--width",
            "40",
            "--height",
            "20",
        ])
        .unwrap();

        assert_eq!(config.frametime(), Duration::from_millis(100));
        assert_eq!(config.rule, RuleSet::new(0b100_1000, 0b1100));
        assert_eq!(
            config.sizing(),
            Sizing::Fixed {
                width: 40,
                height: 20
            }
        );

        let settings = config.settings().unwrap();
        assert_eq!(settings.glyphs.alive, '#');
        assert_eq!(settings.glyphs.dead, '-');
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse(&["--fps", "0"]).is_err());
        assert!(parse(&["--fps", "500"]).is_err());
        assert!(parse(&["--rule", "B9/S23"]).is_err());
        assert!(parse(&["--margin", "0"]).is_err());
        assert!(parse(&["--width", "-1", "--height", "5"]).is_err());
        assert!(parse(&["--width", "10"]).is_err());
    }

    #[test]
    fn bindings() {
        let config = parse(&["--bind", "next=enter", "--bind", "quit=x"]).unwrap();
        let keys = config.keys().unwrap();

        assert!(
            keys.next
                .matches(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
        );
        assert!(
            keys.quit
                .matches(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))
        );

        let config = parse(&["--bind", "fly=f"]).unwrap();
        assert!(config.settings().is_err());
    }
}
