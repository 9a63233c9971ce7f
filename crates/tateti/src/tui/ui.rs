//! Stateless UI rendering for the game screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::time::Instant;
use tateti_engine::{GameEngine, GameStatus, Player, Position, ScoreStore, Square};

use super::app::App;
use super::confetti::Confetti;
use super::modal::Modal;

const HELP: &str = "Arrows move · Enter/Space or 1-9 place · r new game · s reset scores · q quit";

/// Renders the whole screen.
pub fn draw<S: ScoreStore>(frame: &mut Frame, app: &App<S>, now: Instant) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Turn
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Scores
            Constraint::Length(3), // Status
        ])
        .split(area);

    let title = Paragraph::new("Tateti - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    frame.render_widget(turn_line(app.engine()), chunks[1]);
    draw_board(frame, chunks[2], app);
    draw_scores(frame, chunks[3], app.engine());

    let (status, color) = match app.status_message() {
        Some(message) => (message, Color::Red),
        None => (HELP, Color::Yellow),
    };
    let status_text = Paragraph::new(status)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[4]);

    draw_confetti(frame, area, app.confetti(), now);

    if let Some(modal) = app.modal() {
        draw_modal(frame, area, modal);
    }
}

fn player_style(player: Player) -> Style {
    let color = match player {
        Player::X => Color::Blue,
        Player::O => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn turn_line<S: ScoreStore>(engine: &GameEngine<S>) -> Paragraph<'static> {
    let line = match engine.status() {
        GameStatus::InProgress => Line::from(vec![
            Span::raw("Turn: "),
            Span::styled(engine.current().to_string(), player_style(engine.current())),
        ]),
        GameStatus::Won(player) => Line::from(vec![
            Span::styled(player.to_string(), player_style(player)),
            Span::raw(" wins!"),
        ]),
        GameStatus::Draw => Line::from("Draw!"),
    };
    Paragraph::new(line).alignment(Alignment::Center)
}

fn draw_board<S: ScoreStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, chunk) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        let positions = [
            Position::ALL[row * 3],
            Position::ALL[row * 3 + 1],
            Position::ALL[row * 3 + 2],
        ];
        draw_row(frame, chunk, app, &positions);
    }
    draw_separator(frame, rows[1]);
    draw_separator(frame, rows[3]);
}

fn draw_row<S: ScoreStore>(frame: &mut Frame, area: Rect, app: &App<S>, positions: &[Position; 3]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    draw_cell(frame, cols[0], app, positions[0]);
    draw_separator_vertical(frame, cols[1]);
    draw_cell(frame, cols[2], app, positions[1]);
    draw_separator_vertical(frame, cols[3]);
    draw_cell(frame, cols[4], app, positions[2]);
}

fn draw_cell<S: ScoreStore>(frame: &mut Frame, area: Rect, app: &App<S>, pos: Position) {
    let engine = app.engine();

    let (symbol, mut style) = match engine.board().get(pos) {
        Square::Empty => (format!(" {} ", pos.to_index() + 1), Style::default().fg(Color::DarkGray)),
        Square::Occupied(player) => (format!(" {} ", player), player_style(player)),
    };

    if engine.winning_line().is_some_and(|line| line.contains(pos)) {
        style = style.bg(Color::Green).fg(Color::Black);
    } else if pos == app.cursor() && engine.is_active() {
        style = style.bg(Color::White).fg(Color::Black);
    }

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(symbol, style)),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("────────────┼────────────┼────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_scores<S: ScoreStore>(frame: &mut Frame, area: Rect, engine: &GameEngine<S>) {
    let scores = engine.scores();
    let line = Line::from(vec![
        Span::styled("X ", player_style(Player::X)),
        Span::raw(format!("{}    ", scores.x())),
        Span::styled("O ", player_style(Player::O)),
        Span::raw(format!("{}    ", scores.o())),
        Span::styled("Draws ", Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
        Span::raw(scores.draw().to_string()),
    ]);
    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Score"));
    frame.render_widget(paragraph, area);
}

fn draw_confetti(frame: &mut Frame, area: Rect, confetti: &Confetti, now: Instant) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let buffer = frame.buffer_mut();
    for particle in confetti.particles() {
        let Some((fx, fy)) = particle.position(now) else {
            continue;
        };
        let x = area.x + ((fx * f32::from(area.width)) as u16).min(area.width - 1);
        let y = area.y + ((fy * f32::from(area.height)) as u16).min(area.height - 1);
        if let Some(cell) = buffer.cell_mut((x, y)) {
            cell.set_symbol(particle.shape.symbol()).set_fg(particle.color);
        }
    }
}

fn draw_modal(frame: &mut Frame, area: Rect, modal: &Modal) {
    let modal_area = center_rect(area, 40, 9);
    frame.render_widget(Clear, modal_area);

    let text = vec![
        Line::from(""),
        Line::from(modal.icon),
        Line::from(Span::styled(
            modal.title.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(modal.message.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to play again",
            Style::default().fg(Color::Yellow),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, modal_area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
