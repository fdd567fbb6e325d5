use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;
use tarot_fan::config::FanConfig;
use tarot_fan::tarot;
use tarot_fan::tui::{app::AppState, controller};
use tarot_fan::viewport::Platform;

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// `tarot-fan [--desktop] [config.json]`
fn parse_args() -> (FanConfig, Platform) {
    let mut platform = Platform::Touch;
    let mut config = FanConfig::default();
    for arg in std::env::args().skip(1) {
        if arg == "--desktop" {
            platform = Platform::Desktop;
            continue;
        }
        match FanConfig::load(&arg) {
            Ok(cfg) => {
                log::info!("loaded config from {arg}");
                config = cfg;
            }
            Err(err) => log::warn!("ignoring config {arg}: {err}; using defaults"),
        }
    }
    (config, platform)
}

fn main() -> io::Result<()> {
    env_logger::init();
    if !io::stdout().is_terminal() {
        println!(
            "tarot-fan TUI requires a real terminal (TTY).\nRun in Terminal and press q to quit. Version: {}",
            tarot_fan::VERSION
        );
        return Ok(());
    }
    let (config, platform) = parse_args();
    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(33);
    let mut app = AppState::new(tarot::full_deck(), config, platform);

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
