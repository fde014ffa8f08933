use std::io;
use std::io::Write;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::cursor;
use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::info;
use tracing::warn;

use automata::config::Config;
use automata::events::EngineEvent;
use automata::events::Event;
use automata::io::convert_event;
use automata::logging;
use automata::model::Command;
use automata::model::Model;

/// How long to wait for input when no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Puts the terminal in raw mode on the alternate screen with mouse capture, and restores it on
/// drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;

        // From here on the guard restores raw mode even if the rest fails
        let guard = Self;
        let mut stdout = io::stdout();

        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )
        .context("Failed to set up the terminal")?;

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();

        if let Err(e) = execute!(
            stdout,
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        ) {
            warn!("Failed to restore the terminal: {e}");
        }

        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to disable raw mode: {e}");
        }
    }
}

/// Overwrite the previous frame in place, clearing only line tails and what is left below.
fn draw(stdout: &mut impl Write, frame: &str) -> io::Result<()> {
    queue!(stdout, cursor::MoveTo(0, 0))?;

    for line in frame.lines() {
        queue!(
            stdout,
            style::Print(line),
            terminal::Clear(terminal::ClearType::UntilNewLine),
            cursor::MoveToNextLine(1)
        )?;
    }

    queue!(stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;

    stdout.flush()
}

fn run(model: &mut Model, frametime: Duration) -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    let (cols, rows) = terminal::size().context("Failed to read the terminal size")?;
    model.update(Event::EngineEvent(EngineEvent::Resize { cols, rows }));

    // At most one tick is ever pending. It's only scheduled once the previous step is done.
    let mut deadline: Option<Instant> = None;
    let mut last_frame = String::new();

    loop {
        let frame = model.view();
        if frame != last_frame {
            draw(&mut stdout, &frame).context("Failed to draw")?;
            last_frame = frame;
        }

        let event = match deadline {
            Some(d) if Instant::now() >= d => {
                deadline = None;
                Some(Event::EngineEvent(EngineEvent::Tick))
            }
            _ => {
                let timeout =
                    deadline.map_or(IDLE_POLL, |d| d.saturating_duration_since(Instant::now()));

                if event::poll(timeout)? {
                    convert_event(event::read()?, model.keys())
                } else {
                    None
                }
            }
        };

        let Some(event) = event else { continue };

        match model.update(event) {
            Command::None => {}
            Command::Tick => deadline = Some(Instant::now() + frametime),
            Command::Stop => deadline = None,
            Command::Quit => break,
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    if let Some(path) = &config.log_file {
        logging::init(path)?;
    }

    let settings = config.settings().context("Invalid key binding")?;
    let mut model = Model::new(settings)?;

    info!(rule = %model.rule(), fps = config.fps, "Starting");

    {
        let _guard = TerminalGuard::enter()?;
        run(&mut model, config.frametime())?;
    }

    info!(generation = model.generation(), "Exiting");

    Ok(())
}
