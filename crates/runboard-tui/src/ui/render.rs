use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use runboard_core::progress::{marker_column, ProgressBoard};
use runboard_core::utils::{format_distance, truncate_string};

use crate::app::{App, AppState, BoardView};

use super::styles;

/// Names longer than this are shortened in the leaderboard.
const MAX_NAME_WIDTH: usize = 24;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(8),    // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);

    match app.view() {
        BoardView::Loading => render_loading(frame, chunks[1]),
        BoardView::Error => render_error(frame, app, chunks[1]),
        BoardView::Ready => render_board(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);

    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  Runboard";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Loading runner data...", styles::muted_style())),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_error(frame: &mut Frame, app: &App, area: Rect) {
    let message = app
        .error
        .as_ref()
        .map(|e| e.message.clone())
        .unwrap_or_default();

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("⚠️ Something went wrong", styles::error_style())),
        Line::from(""),
        Line::from(message),
        Line::from(""),
        Line::from(Span::styled(
            "Retrying on the next scheduled refresh. Press [r] to retry now.",
            styles::muted_style(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::error_style());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_board(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Goal line
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Marker track
            Constraint::Length(1), // Progress bar
            Constraint::Length(1), // Spacer
            Constraint::Min(3),    // Leaderboard
        ])
        .split(area);

    render_goal_line(frame, &app.board, chunks[0]);
    render_marker_track(frame, &app.board, chunks[2]);
    render_progress_bar(frame, &app.board, chunks[3]);
    render_leaderboard(frame, app, chunks[5]);
}

fn render_goal_line(frame: &mut Frame, board: &ProgressBoard, area: Rect) {
    let goal = format!(" {}", board.goal_label());
    let progress = format!("{} ", board.progress_label());
    // Emoji take two cells
    let used = goal.chars().count() + 1 + progress.chars().count();
    let padding = (area.width as usize).saturating_sub(used);

    let line = Line::from(vec![
        Span::styled(goal, styles::help_desc_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(progress, styles::title_style()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// One row above the bar with a marker per runner, leader painted last.
fn render_marker_track(frame: &mut Frame, board: &ProgressBoard, area: Rect) {
    frame.render_widget(Paragraph::new(marker_track_line(board, area.width)), area);
}

fn marker_track_line(board: &ProgressBoard, width: u16) -> Line<'static> {
    let mut cells: Vec<(char, Style)> = vec![(' ', Style::default()); width as usize];

    for entry in board.draw_order() {
        let column = marker_column(entry.position, width) as usize;
        if let Some(cell) = cells.get_mut(column) {
            *cell = (marker_glyph(entry.rank), styles::rank_style(entry.rank));
        }
    }

    Line::from(
        cells
            .into_iter()
            .map(|(glyph, style)| Span::styled(glyph.to_string(), style))
            .collect::<Vec<_>>(),
    )
}

/// Ranks 1-9 are shown as their digit, everyone else as a dot.
fn marker_glyph(rank: usize) -> char {
    char::from_digit(rank as u32 + 1, 10)
        .filter(|_| rank < 9)
        .unwrap_or('•')
}

fn render_progress_bar(frame: &mut Frame, board: &ProgressBoard, area: Rect) {
    let gauge = Gauge::default()
        .gauge_style(styles::gauge_style())
        .ratio(board.fill_percentage() / 100.0)
        .label("");
    frame.render_widget(gauge, area);
}

fn render_leaderboard(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Leaderboard ")
        .borders(Borders::ALL)
        .border_style(styles::muted_style());

    if app.board.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "No records yet",
            styles::muted_style(),
        )))
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .board
        .entries
        .iter()
        .map(|entry| {
            let style = styles::rank_style(entry.rank);
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:>5}  ", entry.rank_label()), style),
                Span::styled(
                    format!("{:<width$}", truncate_string(&entry.name, MAX_NAME_WIDTH), width = MAX_NAME_WIDTH),
                    styles::help_desc_style(),
                ),
                Span::styled(format!("{:>9}km", format_distance(entry.distance_km)), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(styles::selected_style());

    let mut state = ListState::default().with_selected(Some(app.leaderboard_selection));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match (&app.status_message, &app.error) {
        (Some(message), Some(_)) => (message.clone(), styles::error_style()),
        (Some(message), None) => (message.clone(), styles::status_bar_style()),
        (None, _) => (
            format!("{}  |  {}", app.last_updated_display(), app.base_url),
            styles::status_bar_style(),
        ),
    };

    let line = Line::from(vec![
        Span::styled(format!(" {}", text), style),
        Span::styled(
            format!("  ({} runners)", app.dataset.len()),
            styles::muted_style(),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(50, 50, frame.area());

    let bindings = [
        ("r", "Refresh (uses cache while fresh)"),
        ("R", "Force reload from server"),
        ("j / ↓", "Next runner"),
        ("k / ↑", "Previous runner"),
        ("PgDn / PgUp", "Scroll a page"),
        ("g / G", "Top / bottom"),
        ("q / Esc", "Quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (key, desc) in bindings {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", key), styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        styles::muted_style(),
    )));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(styles::title_style());

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
