use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use prepcheck_core::utils::{single_line, truncate_string};

use crate::app::{App, AppState};

use super::styles;
use super::{results, review, steps};

/// Width of the review column on the result screen, in percent.
const REVIEW_WIDTH_PERCENT: u16 = 35;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Progress
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_progress(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Disaster Preparedness Assessment";
    let mode = if app.is_live() { "" } else { "[demo] " };
    let help_hint = "[?] Help";
    let used = title.len() + mode.len() + help_hint.len() + 4;

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat((area.width as usize).saturating_sub(used))),
        Span::styled(mode, styles::highlight_style()),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
    let step = app.step();
    let percent = app.progress_percent();

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(styles::muted_style()),
        )
        .gauge_style(styles::gauge_style())
        .percent(percent)
        .label(format!("{}  ({}%)", step.title(), percent));

    frame.render_widget(gauge, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.base_state() {
        AppState::Assessing => results::render_pending(frame, app, area),
        AppState::ShowingResult => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(100 - REVIEW_WIDTH_PERCENT),
                    Constraint::Percentage(REVIEW_WIDTH_PERCENT),
                ])
                .split(area);
            results::render(frame, app, columns[0]);
            review::render(frame, app, columns[1]);
        }
        _ => steps::render(frame, app, area),
    }
}

fn shortcuts(app: &App) -> &'static str {
    match app.base_state() {
        AppState::Assessing => "[?] help | [q]uit",
        AppState::ShowingResult => "↑↓ scroll | [e]dit answers | [r] start over | [q]uit",
        _ => {
            let step = app.step();
            if step.is_first() {
                "↑↓ field | ←→ change | [n]ext | [q]uit"
            } else if step.is_last() {
                "↑↓ field | ←→ change | [p]revious | [s]ubmit | [q]uit"
            } else {
                "↑↓ field | ←→ change | [p]revious | [n]ext | [q]uit"
            }
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let right_text = format!(" {} ", shortcuts(app));
    let width = area.width as usize;

    // Error messages can span lines; keep the status bar to one
    let room = width.saturating_sub(right_text.chars().count() + 2);
    let left_text = match app.status_message {
        Some(ref msg) => format!(" {} ", truncate_string(&single_line(msg), room)),
        None => format!(" {} ", app.step().title()),
    };

    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.chars().count());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 27, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled(
            "   Disaster Preparedness Assessment",
            styles::title_style(),
        )),
        Line::from(Span::styled(
            format!("              version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Wizard", styles::highlight_style())),
        help_line("↑/↓", "Move between fields"),
        help_line("←/→ -/+", "Change value or move in a list"),
        help_line("Space", "Toggle option or checkbox"),
        help_line("0-9", "Type a number"),
        help_line("n / Tab", "Next step"),
        help_line("p / S-Tab", "Previous step"),
        help_line("s / Enter", "Submit (on the last step)"),
        Line::from(""),
        Line::from(Span::styled(" Results", styles::highlight_style())),
        help_line("↑/↓ PgUp", "Scroll the assessment"),
        help_line("e / Esc", "Back to the answers"),
        help_line("r", "Start a new assessment"),
        Line::from(""),
        Line::from(Span::styled(" General", styles::highlight_style())),
        help_line("?", "Toggle this help"),
        help_line("q", "Quit"),
        help_line("Ctrl+C", "Quit immediately"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 8, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(Span::styled(
            "   Your answers will not be saved.",
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed() {
        let outer = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect_fixed(46, 8, outer), Rect::new(27, 16, 46, 8));

        // Never larger than the screen
        let small = Rect::new(0, 0, 30, 5);
        assert_eq!(centered_rect_fixed(46, 8, small), Rect::new(0, 0, 30, 5));
    }
}
