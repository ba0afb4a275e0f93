use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use lq_challenge::{ArcadeOutcome, ArcadeSession, Cell, ChallengeSession};

pub fn draw(frame: &mut Frame, session: &ArcadeSession) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Score bar
            Constraint::Min(0),    // Grid
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    draw_score_bar(frame, session, chunks[0]);
    draw_grid(frame, session, chunks[1]);

    let help = Paragraph::new(" arrows/WASD steer   q quit ")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);
}

fn draw_score_bar(frame: &mut Frame, session: &ArcadeSession, area: Rect) {
    let status = match session.outcome() {
        ArcadeOutcome::Won => Span::styled(" CLEARED ", Style::default().fg(Color::Green).bold()),
        ArcadeOutcome::Lost => Span::styled(" CRASHED ", Style::default().fg(Color::Red).bold()),
        ArcadeOutcome::TimedOut => {
            Span::styled(" TIME UP ", Style::default().fg(Color::Yellow).bold())
        }
        _ => Span::raw(""),
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" Score {}/{} ", session.score(), session.target_score()),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{}s left", session.remaining_secs()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  "),
        status,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_grid(frame: &mut Frame, session: &ArcadeSession, area: Rect) {
    let size = session.grid_size() as i32;
    let head = session.head();
    let lines: Vec<Line> = (0..size)
        .map(|y| {
            let spans: Vec<Span> = (0..size)
                .map(|x| cell_span(session, head, Cell::new(x, y)))
                .collect();
            Line::from(spans)
        })
        .collect();

    let grid = Paragraph::new(lines).block(
        Block::default()
            .title(" Arcade ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(grid, area);
}

fn cell_span(session: &ArcadeSession, head: Cell, cell: Cell) -> Span<'static> {
    if cell == head {
        Span::styled("██", Style::default().fg(Color::LightGreen))
    } else if session.body().contains(&cell) {
        Span::styled("▓▓", Style::default().fg(Color::Green))
    } else if session.target() == Some(cell) {
        Span::styled("◆ ", Style::default().fg(Color::Yellow).bold())
    } else {
        Span::styled("· ", Style::default().fg(Color::DarkGray))
    }
}
