use std::error::Error;
use std::io::{self, Stdout};

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::controller::ViewController;

mod app;
mod views;

pub use app::{Mode, TuiApp};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Puts the terminal into raw mode on the alternate screen with mouse
/// capture enabled.
pub fn init() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Runs the interactive loop until the user quits. The terminal is restored
/// on both exit paths before the result is returned.
pub fn run(controller: ViewController) -> Result<(), Box<dyn Error>> {
    let mut terminal = init()?;
    let result = run_event_loop(&mut terminal, controller);

    let _ = terminal.show_cursor();
    let _ = restore();

    result
}

// Everything is user-event driven: each iteration draws a full frame and
// then blocks until the next input event. There is no background work to
// tick.
fn run_event_loop(terminal: &mut Tui, controller: ViewController) -> Result<(), Box<dyn Error>> {
    let mut app = TuiApp::new(controller);
    log::info!("ui: entering event loop");

    loop {
        terminal.draw(|frame| views::render(&mut app, frame))?;
        if app.should_quit {
            break;
        }

        match event::read()? {
            Event::Key(key) => app.handle_key(key)?,
            Event::Mouse(mouse) => app.handle_mouse(mouse)?,
            _ => {}
        }
    }

    log::info!("ui: event loop finished");
    Ok(())
}
