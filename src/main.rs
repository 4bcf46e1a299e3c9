use std::{
    io::{self},
    time::Duration,
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, MouseEventKind},
    ExecutableCommand,
};
use ratatui::{
    layout::Alignment,
    style::Style,
    widgets::{Block, BorderType, Borders, Paragraph},
    DefaultTerminal, Frame,
};

mod aurora;
mod frame;
mod game;
mod game_theme;
mod helpers;

use crate::{
    frame::FrameClock,
    game::{GameState, InputEvent},
    game_theme::GameTheme,
    helpers::centered_rect_with_percentage,
};

const MIN_WIDTH: u16 = 80;
const MIN_HEIGHT: u16 = 24;
const FPS: u32 = 60;

struct App {
    game: GameState,
    clock: FrameClock,
}

impl App {
    fn new() -> Self {
        Self {
            game: GameState::new(),
            clock: FrameClock::new(FPS),
        }
    }

    pub fn run(&mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
        while !self.game.should_exit() {
            // Waiting for the next frame and waiting for input are the same
            // wait: poll blocks for at most the remaining frame budget.
            self.pump_events(self.clock.time_until_tick())?;

            if self.clock.tick_due() {
                self.game.update();
                self.clock.tick();
            }

            let size = terminal.size()?;
            if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
                let theme = self.game.theme();
                terminal.draw(|frame| draw_resize_warning(frame, theme))?;
            } else {
                let time_ms = self.clock.elapsed_ms();
                terminal.draw(|frame| self.game.draw(frame, time_ms))?;
            }
        }
        Ok(())
    }

    /// Translate terminal events into queued input messages. The queue is
    /// drained by `GameState::update` at the start of the tick, so nothing
    /// here touches paddle state directly.
    fn pump_events(&mut self, timeout: Duration) -> io::Result<()> {
        let mut wait = timeout;
        loop {
            if !event::poll(wait)? {
                return Ok(());
            }
            match event::read()? {
                Event::Mouse(mouse_event) => match mouse_event.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        self.game.queue_input(InputEvent::PointerMoved {
                            row: mouse_event.row,
                        });
                    }
                    _ => {}
                },
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    match key_event.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            self.game.queue_input(InputEvent::Quit)
                        }
                        KeyCode::Char('p') => self.game.queue_input(InputEvent::TogglePause),
                        KeyCode::Char('d') => self.game.queue_input(InputEvent::CycleTheme),
                        KeyCode::Enter if self.game.is_paused() => {
                            self.game.queue_input(InputEvent::TogglePause)
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
            // Drain whatever else is already pending without blocking again.
            wait = Duration::ZERO;
        }
    }
}

fn draw_resize_warning(frame: &mut Frame, theme: GameTheme) {
    let colors = theme.colors();
    let area = frame.area();
    let popup_area = centered_rect_with_percentage(60, 20, area.width, area.height);
    let popup = Paragraph::new("Terminal too small!\nPlease resize.")
        .block(
            Block::default()
                .title("Warning")
                .borders(Borders::ALL)
                .border_type(BorderType::Thick),
        )
        .style(Style::default().fg(colors.ball))
        .alignment(Alignment::Center);
    frame.render_widget(popup, popup_area);
}

fn main() -> io::Result<()> {
    let terminal = ratatui::init();
    let mut app = App::new();

    let mut stdout = io::stdout();
    stdout.execute(event::EnableMouseCapture)?;

    let app_result = app.run(terminal);

    stdout.lock().execute(event::DisableMouseCapture)?;

    ratatui::restore();

    match &app_result {
        Ok(()) => {
            let (you, cpu) = app.game.scores();
            println!("Thanks for playing neon.pong! 🏓");
            println!("Final Score: {} - {}", you, cpu);
        }
        Err(e) => {
            eprintln!("Game ended with error: {}", e);
        }
    }

    app_result
}
