use std::collections::VecDeque;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::{aurora::Aurora, game_theme::GameTheme, helpers::centered_rect};

/// Physics space dimensions. All paddle/ball coordinates live in this space;
/// the renderer maps them to terminal cells each frame.
pub const ARENA_WIDTH: f32 = 800.0;
pub const ARENA_HEIGHT: f32 = 600.0;

const PADDLE_WIDTH: f32 = 16.0;
const PADDLE_HEIGHT: f32 = 140.0;
const BALL_SIZE: f32 = 40.0;
const BALL_SPEED: f32 = 9.0;

// Step-wise AI tracking: fixed step, a dead-zone around the paddle center to
// avoid jitter, and a look-ahead bias on the ball's vertical velocity. The
// look-ahead is a tuning constant, not a derived prediction.
const AI_SPEED: f32 = 7.0;
const AI_DEAD_ZONE: f32 = 10.0;
const AI_LOOK_AHEAD: f32 = 8.0;

#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub dx: f32,
    pub dy: f32,
}

/// Serve direction after a scoring event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Serve {
    TowardPlayer,
    TowardAi,
}

impl Serve {
    fn sign(self) -> f32 {
        match self {
            Serve::TowardPlayer => -1.0,
            Serve::TowardAi => 1.0,
        }
    }
}

/// Input messages queued by the event pump and applied at the start of each
/// tick, so the frame driver stays the only writer of game state per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer moved to this absolute terminal row.
    PointerMoved { row: u16 },
    TogglePause,
    CycleTheme,
    Quit,
}

#[derive(Debug)]
pub struct GameState {
    left_paddle: Paddle,
    right_paddle: Paddle,
    ball: Ball,
    left_score: u32,
    right_score: u32,
    game_area: Rect,
    input_queue: VecDeque<InputEvent>,
    is_paused: bool,
    should_exit: bool,
    theme: GameTheme,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            left_paddle: Paddle {
                x: 0.0,
                y: ARENA_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
                width: PADDLE_WIDTH,
                height: PADDLE_HEIGHT,
            },
            right_paddle: Paddle {
                x: ARENA_WIDTH - PADDLE_WIDTH,
                y: ARENA_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
                width: PADDLE_WIDTH,
                height: PADDLE_HEIGHT,
            },
            ball: Ball {
                x: ARENA_WIDTH / 2.0 - BALL_SIZE / 2.0,
                y: ARENA_HEIGHT / 2.0 - BALL_SIZE / 2.0,
                size: BALL_SIZE,
                speed: BALL_SPEED,
                dx: BALL_SPEED,
                dy: BALL_SPEED,
            },
            left_score: 0,
            right_score: 0,
            game_area: Rect::default(),
            input_queue: VecDeque::new(),
            is_paused: false,
            should_exit: false,
            theme: GameTheme::Neon,
        }
    }

    pub fn theme(&self) -> GameTheme {
        self.theme
    }

    pub fn set_area(&mut self, game_area: Rect) {
        self.game_area = game_area;
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.left_score, self.right_score)
    }

    pub fn queue_input(&mut self, event: InputEvent) {
        self.input_queue.push_back(event);
    }

    /// One tick: apply queued input, then physics, then the AI paddle.
    pub fn update(&mut self) {
        self.drain_input();
        if self.is_paused || self.should_exit {
            return;
        }
        self.step_ball();
        self.move_ai_paddle();
    }

    fn drain_input(&mut self) {
        while let Some(event) = self.input_queue.pop_front() {
            match event {
                InputEvent::PointerMoved { row } => self.apply_pointer(row),
                InputEvent::TogglePause => self.is_paused = !self.is_paused,
                InputEvent::CycleTheme => {
                    if self.is_paused {
                        self.theme = self.theme.next();
                    }
                }
                InputEvent::Quit => self.should_exit = true,
            }
        }
    }

    /// Map an absolute terminal row to the left paddle's position. Rows
    /// outside the play area clamp; there is no error path.
    fn apply_pointer(&mut self, row: u16) {
        let inner = self.inner_area();
        if inner.height == 0 {
            return;
        }
        let offset = row.saturating_sub(inner.y);
        let arena_y = (offset as f32 + 0.5) / inner.height as f32 * ARENA_HEIGHT;
        self.left_paddle.y = (arena_y - self.left_paddle.height / 2.0)
            .clamp(0.0, ARENA_HEIGHT - self.left_paddle.height);
    }

    fn step_ball(&mut self) {
        let ball = &mut self.ball;
        ball.x += ball.dx;
        ball.y += ball.dy;

        // Top/bottom wall bounce. No positional correction: the ball may
        // overlap the wall by up to one frame's travel.
        if ball.y <= 0.0 || ball.y + ball.size >= ARENA_HEIGHT {
            ball.dy = -ball.dy;
        }

        // Left paddle: reflect, snap flush to the paddle face, and perturb the
        // vertical velocity a little so rebounds vary.
        if ball.dx < 0.0 && overlaps(ball, &self.left_paddle) {
            ball.dx = -ball.dx;
            ball.x = self.left_paddle.x + self.left_paddle.width;
            ball.dy += (rand::random::<f32>() - 0.5) * 2.0;
        }

        if ball.dx > 0.0 && overlaps(ball, &self.right_paddle) {
            ball.dx = -ball.dx;
            ball.x = self.right_paddle.x - ball.size;
            ball.dy += (rand::random::<f32>() - 0.5) * 2.0;
        }

        if ball.x < 0.0 {
            self.right_score += 1;
            self.reset_ball(Serve::TowardAi);
        } else if ball.x + ball.size > ARENA_WIDTH {
            self.left_score += 1;
            self.reset_ball(Serve::TowardPlayer);
        }
    }

    /// Recenter the ball and serve it. The vertical sign is a coin flip;
    /// everything else is deterministic for a given direction.
    fn reset_ball(&mut self, serve: Serve) {
        let ball = &mut self.ball;
        ball.x = ARENA_WIDTH / 2.0 - ball.size / 2.0;
        ball.y = ARENA_HEIGHT / 2.0 - ball.size / 2.0;
        ball.dx = ball.speed * serve.sign();
        ball.dy = ball.speed * if rand::random() { 1.0 } else { -1.0 };
    }

    fn move_ai_paddle(&mut self) {
        let paddle = &mut self.right_paddle;
        let paddle_center = paddle.y + paddle.height / 2.0;
        let ball_center = self.ball.y + self.ball.size / 2.0;

        let target = ball_center + self.ball.dy * AI_LOOK_AHEAD;
        if target < paddle_center - AI_DEAD_ZONE {
            paddle.y -= AI_SPEED;
        } else if target > paddle_center + AI_DEAD_ZONE {
            paddle.y += AI_SPEED;
        }
        paddle.y = paddle.y.clamp(0.0, ARENA_HEIGHT - paddle.height);
    }

    fn inner_area(&self) -> Rect {
        Rect::new(
            self.game_area.x + 1,
            self.game_area.y + 1,
            self.game_area.width.saturating_sub(2),
            self.game_area.height.saturating_sub(2),
        )
    }

    /// Map an arena-space rectangle to terminal cells inside `inner`.
    fn arena_to_cells(&self, inner: Rect, x: f32, y: f32, w: f32, h: f32) -> Rect {
        let sx = inner.width as f32 / ARENA_WIDTH;
        let sy = inner.height as f32 / ARENA_HEIGHT;
        let rect = Rect::new(
            inner.x + (x.max(0.0) * sx) as u16,
            inner.y + (y.max(0.0) * sy) as u16,
            ((w * sx).round() as u16).max(1),
            ((h * sy).round() as u16).max(1),
        );
        rect.intersection(inner)
    }

    fn draw_core_elements(&self, frame: &mut Frame, time_ms: f32) {
        let colors = self.theme.colors();
        let inner = self.inner_area();

        // The aurora writes every cell of the play field, which doubles as the
        // per-frame clear of stale buffer content.
        frame.render_widget(Aurora::new(time_ms), inner);

        self.draw_scores(frame, inner);

        let left = self.arena_to_cells(
            inner,
            self.left_paddle.x,
            self.left_paddle.y,
            self.left_paddle.width,
            self.left_paddle.height,
        );
        frame.render_widget(
            Block::default().style(Style::default().bg(colors.left_paddle)),
            left,
        );

        let right = self.arena_to_cells(
            inner,
            self.right_paddle.x,
            self.right_paddle.y,
            self.right_paddle.width,
            self.right_paddle.height,
        );
        frame.render_widget(
            Block::default().style(Style::default().bg(colors.right_paddle)),
            right,
        );

        let ball = self.arena_to_cells(inner, self.ball.x, self.ball.y, self.ball.size, self.ball.size);
        frame.render_widget(Block::default().style(Style::default().bg(colors.ball)), ball);
    }

    /// Big score digits over each half of the court, shadow first.
    fn draw_scores(&self, frame: &mut Frame, inner: Rect) {
        let colors = self.theme.colors();
        let half = inner.width / 2;
        let digits = [
            (self.left_score, inner.x, colors.left_paddle),
            (self.right_score, inner.x + half, colors.right_paddle),
        ];
        for (score, x, color) in digits {
            let area = Rect::new(x, inner.y + 1, half, 3).intersection(inner);
            let shadow_area = Rect::new(area.x + 1, area.y + 1, area.width, area.height)
                .intersection(inner);
            let shadow = BigText::builder()
                .pixel_size(PixelSize::Sextant)
                .style(Style::default().fg(colors.score_shadow))
                .lines(vec![Line::from(score.to_string())])
                .alignment(Alignment::Center)
                .build();
            frame.render_widget(shadow, shadow_area);
            let text = BigText::builder()
                .pixel_size(PixelSize::Sextant)
                .style(Style::default().fg(color))
                .lines(vec![Line::from(score.to_string())])
                .alignment(Alignment::Center)
                .build();
            frame.render_widget(text, area);
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, time_ms: f32) {
        let area = frame.area();
        let colors = self.theme.colors();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Fill(1),   // game block - fills available space
                Constraint::Length(3), // controls block
            ])
            .split(area);

        let game_area = layout[0];
        self.set_area(game_area);

        let title = self.block_title("neon.pong");
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .style(Style::default().fg(colors.border).bg(colors.background))
            .title_alignment(Alignment::Center);
        frame.render_widget(block, game_area);

        self.draw_core_elements(frame, time_ms);

        let controls = Paragraph::new(" Mouse = move paddle  |  P = pause  |  Q / Esc = quit ")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .style(Style::default().fg(colors.border)),
            )
            .style(Style::default().fg(colors.text))
            .alignment(Alignment::Center);
        frame.render_widget(controls, layout[1]);

        if self.is_paused {
            let popup_area = centered_rect(46, 9, area.width, area.height);
            let popup_block = Block::default()
                .title("Paused")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(colors.accent))
                .title_alignment(Alignment::Center);
            frame.render_widget(popup_block, popup_area);

            let options_text = format!(
                "\n  Theme: {}\n  [D] Cycle Theme\n  [P/Enter] Resume  [Q/Esc] Quit\n",
                self.theme.label()
            );
            let options = Paragraph::new(options_text)
                .style(Style::default().fg(colors.text))
                .alignment(Alignment::Center);
            let options_area = Rect::new(
                popup_area.x + 2,
                popup_area.y + 2,
                popup_area.width.saturating_sub(4),
                popup_area.height.saturating_sub(4),
            );
            frame.render_widget(options, options_area);
        }
    }

    fn block_title(&self, app_name: &'static str) -> String {
        let p1_text = format!("You ({})", self.left_score);
        let p2_text = format!("({}) CPU", self.right_score);

        let used = p1_text.len() + app_name.len() + p2_text.len() + 6; // spaces + separators
        let total_width = self.game_area.width as usize;
        let dashes = total_width.saturating_sub(used) / 2;

        format!(
            " {} {} {} {} {} ",
            p1_text,
            "─".repeat(dashes),
            app_name,
            "─".repeat(dashes),
            p2_text,
        )
    }
}

fn overlaps(ball: &Ball, paddle: &Paddle) -> bool {
    ball.x < paddle.x + paddle.width
        && ball.x + ball.size > paddle.x
        && ball.y < paddle.y + paddle.height
        && ball.y + ball.size > paddle.y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_state() -> GameState {
        let mut state = GameState::new();
        state.set_area(Rect::new(0, 0, 130, 28));
        state
    }

    fn paddle_bounds_ok(paddle: &Paddle) -> bool {
        paddle.y >= 0.0 && paddle.y <= ARENA_HEIGHT - paddle.height
    }

    #[test]
    fn pointer_always_clamps_paddle_to_arena() {
        let mut state = setup_state();
        for row in [0u16, 1, 5, 14, 26, 27, 100, 10_000, u16::MAX] {
            state.apply_pointer(row);
            assert!(
                paddle_bounds_ok(&state.left_paddle),
                "Left paddle out of bounds for pointer row {row}: y={}",
                state.left_paddle.y
            );
        }
    }

    #[test]
    fn ai_paddle_stays_in_bounds_across_frames() {
        let mut state = setup_state();
        for frame in 0..1000 {
            state.update();
            assert!(
                paddle_bounds_ok(&state.right_paddle),
                "AI paddle out of bounds at frame {frame}: y={}",
                state.right_paddle.y
            );
        }
    }

    #[test]
    fn wall_bounce_flips_vertical_velocity_only() {
        let mut state = setup_state();
        state.ball = Ball {
            x: 400.0,
            y: 3.0,
            size: BALL_SIZE,
            speed: BALL_SPEED,
            dx: 6.0,
            dy: -6.0,
        };
        state.step_ball();
        assert!(state.ball.dy > 0.0, "dy should flip positive at the top wall");
        assert!(state.ball.dx > 0.0, "dx sign must be untouched by a wall bounce");
    }

    #[test]
    fn left_paddle_bounce_reflects_and_snaps() {
        let mut state = setup_state();
        state.left_paddle.y = 230.0;
        state.ball = Ball {
            x: 20.0,
            y: 260.0,
            size: BALL_SIZE,
            speed: BALL_SPEED,
            dx: -9.0,
            dy: 0.0,
        };
        state.step_ball();
        assert!(state.ball.dx > 0.0, "Ball should reflect off the left paddle");
        assert_eq!(
            state.ball.x,
            state.left_paddle.x + state.left_paddle.width,
            "Ball must snap flush to the paddle face"
        );
    }

    #[test]
    fn right_paddle_bounce_reflects_and_snaps() {
        let mut state = setup_state();
        state.right_paddle.y = 230.0;
        state.ball = Ball {
            x: 760.0,
            y: 260.0,
            size: BALL_SIZE,
            speed: BALL_SPEED,
            dx: 9.0,
            dy: 0.0,
        };
        state.step_ball();
        assert!(state.ball.dx < 0.0, "Ball should reflect off the right paddle");
        assert_eq!(
            state.ball.x,
            state.right_paddle.x - state.ball.size,
            "Ball must snap flush to the paddle face"
        );
    }

    #[test]
    fn left_player_scores_when_ball_exits_right() {
        let mut state = setup_state();
        state.ball = Ball {
            x: 775.0,
            y: 560.0, // clear of the right paddle
            size: BALL_SIZE,
            speed: BALL_SPEED,
            dx: 9.0,
            dy: 0.0,
        };
        state.step_ball();
        assert_eq!(state.left_score, 1, "Left score should increment exactly once");
        assert_eq!(state.right_score, 0);
        assert_eq!(state.ball.x, ARENA_WIDTH / 2.0 - state.ball.size / 2.0);
        assert_eq!(state.ball.y, ARENA_HEIGHT / 2.0 - state.ball.size / 2.0);
        assert!(state.ball.dx < 0.0, "Serve should head back toward the player");
    }

    #[test]
    fn right_player_scores_when_ball_exits_left() {
        let mut state = setup_state();
        state.ball = Ball {
            x: 4.0,
            y: 500.0, // clear of the left paddle
            size: BALL_SIZE,
            speed: BALL_SPEED,
            dx: -9.0,
            dy: 0.0,
        };
        state.step_ball();
        assert_eq!(state.right_score, 1, "Right score should increment exactly once");
        assert_eq!(state.left_score, 0);
        assert!(state.ball.dx > 0.0, "Serve should head toward the AI side");
    }

    #[test]
    fn reset_is_idempotent_up_to_serve_spin() {
        let mut state = setup_state();
        state.reset_ball(Serve::TowardAi);
        let first = state.ball;
        state.reset_ball(Serve::TowardAi);
        let second = state.ball;
        assert_eq!(first.x, second.x);
        assert_eq!(first.y, second.y);
        assert_eq!(first.dx, second.dx);
        assert_eq!(first.dy.abs(), second.dy.abs());
    }

    #[test]
    fn free_flight_bounces_off_the_bottom_wall_exactly_once() {
        let mut state = setup_state();
        // No paddles in play.
        state.left_paddle.x = -10_000.0;
        state.right_paddle.x = 10_000.0;
        state.ball = Ball {
            x: ARENA_WIDTH / 2.0 - 9.0,
            y: ARENA_HEIGHT / 2.0 - 9.0,
            size: 18.0,
            speed: BALL_SPEED,
            dx: 6.0,
            dy: 6.0,
        };

        let mut flips = Vec::new();
        for frame in 1..=60 {
            let dy_before = state.ball.dy;
            state.step_ball();
            if state.ball.dy.signum() != dy_before.signum() {
                flips.push(frame);
            }
        }
        // y reaches 585 on frame 49; 585 + 18 >= 600 triggers the first flip.
        assert_eq!(flips, vec![49], "dy should flip exactly once, at frame 49");
    }

    #[test]
    fn queued_pointer_event_is_applied_on_update() {
        let mut state = setup_state();
        state.queue_input(InputEvent::PointerMoved { row: 2 });
        state.update();
        assert!(
            state.left_paddle.y < ARENA_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
            "Paddle should move up toward the pointer"
        );
        assert!(paddle_bounds_ok(&state.left_paddle));
    }

    #[test]
    fn pause_freezes_the_ball() {
        let mut state = setup_state();
        state.queue_input(InputEvent::TogglePause);
        let before = (state.ball.x, state.ball.y);
        state.update();
        assert!(state.is_paused());
        assert_eq!((state.ball.x, state.ball.y), before, "Ball must not move while paused");
        state.queue_input(InputEvent::TogglePause);
        state.update();
        assert!(!state.is_paused());
        assert_ne!((state.ball.x, state.ball.y), before, "Ball moves again after resume");
    }

    #[test]
    fn theme_only_cycles_while_paused() {
        let mut state = setup_state();
        let initial = state.theme();
        state.queue_input(InputEvent::CycleTheme);
        state.update();
        assert_eq!(state.theme(), initial);

        state.queue_input(InputEvent::TogglePause);
        state.queue_input(InputEvent::CycleTheme);
        state.update();
        assert_eq!(state.theme(), initial.next());
    }

    #[test]
    fn quit_event_sets_the_exit_flag() {
        let mut state = setup_state();
        state.queue_input(InputEvent::Quit);
        state.update();
        assert!(state.should_exit());
    }
}
