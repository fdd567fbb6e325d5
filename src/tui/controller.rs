use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::{CrosstermBackend, Rect, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        let (width, height) = crossterm::terminal::size()?;
        app.set_fan_area(ui::fan_area(Rect::new(0, 0, width, height)));
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key.code, Instant::now()) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse, Instant::now()),
                Event::FocusLost => {
                    let _ = app.handle_input(InputAction::PointerCancel, Instant::now());
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick(Instant::now());
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent, now: Instant) {
    let (col, row) = (mouse.column, mouse.row);
    let action = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => InputAction::PointerDown { col, row },
        MouseEventKind::Drag(MouseButton::Left) => InputAction::PointerDrag { col, row },
        MouseEventKind::Up(MouseButton::Left) => InputAction::PointerUp { col, row },
        MouseEventKind::ScrollDown => InputAction::ScrollNext,
        MouseEventKind::ScrollUp => InputAction::ScrollPrev,
        _ => return,
    };
    let _ = app.handle_input(action, now);
}

fn handle_key(app: &mut AppState, code: KeyCode, now: Instant) -> bool {
    if matches!(code, KeyCode::Char('?')) {
        let _ = app.handle_input(InputAction::ToggleHelp, now);
        return false;
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            let _ = app.handle_input(InputAction::ToggleHelp, now);
        }
        return false;
    }

    match app.scene {
        Scene::Menu => match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::MenuPrev, now);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::MenuNext, now);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let _ = app.handle_input(InputAction::MenuInc, now);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                let _ = app.handle_input(InputAction::MenuDec, now);
            }
            KeyCode::Enter => {
                let _ = app.handle_input(InputAction::MenuApply, now);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::MenuCancel, now);
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                let _ = app.handle_input(InputAction::ToggleMenu, now);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
        Scene::Fan => match code {
            KeyCode::Char('m') | KeyCode::Char('M') => {
                let _ = app.handle_input(InputAction::ToggleMenu, now);
            }
            KeyCode::Char(' ') | KeyCode::Char('s') | KeyCode::Char('S') => {
                let _ = app.handle_input(InputAction::Shuffle, now);
            }
            KeyCode::Right | KeyCode::Char(']') => {
                let _ = app.handle_input(InputAction::FocusNext, now);
            }
            KeyCode::Left | KeyCode::Char('[') => {
                let _ = app.handle_input(InputAction::FocusPrev, now);
            }
            KeyCode::Enter => {
                let _ = app.handle_input(InputAction::TapFocused, now);
            }
            KeyCode::Char(',') | KeyCode::Char('<') => {
                let _ = app.handle_input(InputAction::ScrollPrev, now);
            }
            KeyCode::Char('.') | KeyCode::Char('>') => {
                let _ = app.handle_input(InputAction::ScrollNext, now);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::PointerCancel, now);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => {}
        },
    }
    false
}
