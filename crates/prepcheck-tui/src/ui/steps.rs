//! Rendering of the current wizard step.
//!
//! Every visible field gets a label line followed by its widget. The
//! buttons row stays pinned below the fields so it is reachable even when
//! a long multiselect pushes the fields out of view.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use prepcheck_core::wizard::{Field, Widget};
use prepcheck_core::Step;

use crate::app::App;
use crate::ui::styles;

/// Width of the slider track in cells.
const SLIDER_WIDTH: u32 = 20;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let mut lines = Vec::new();
    let mut cursor_line = 0;

    for field in app.form.visible_fields() {
        let focused = app.form.is_focused(field.id);
        let before = lines.len();
        let cursor = field_lines(field, focused, &mut lines);
        if focused {
            cursor_line = before + cursor;
        }
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .title(format!(" {} ", app.step().title()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    // Keep the focused line on screen
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let scroll = (cursor_line + 2).saturating_sub(visible);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, chunks[0]);

    frame.render_widget(Paragraph::new(buttons(app.step())), chunks[1]);
}

/// Push the lines of one field. Returns the offset of the line that holds
/// the cursor, relative to the field's first line.
fn field_lines(field: &Field, focused: bool, lines: &mut Vec<Line<'static>>) -> usize {
    let marker = if focused { " ▶ " } else { "   " };
    let value_style = if focused {
        styles::selected_style()
    } else {
        styles::text_style()
    };

    // Checkboxes carry their label on the same line
    if let Widget::Checkbox(checked) = field.widget {
        let mark = if checked { "[x]" } else { "[ ]" };
        lines.push(Line::from(vec![
            Span::styled(marker, styles::label_style(focused)),
            Span::styled(mark, value_style),
            Span::raw(" "),
            Span::styled(field.label, styles::label_style(focused)),
        ]));
        return 0;
    }

    lines.push(Line::from(vec![
        Span::styled(marker, styles::label_style(focused)),
        Span::styled(field.label, styles::label_style(focused)),
    ]));

    match &field.widget {
        Widget::Select { options, selected } => {
            let option = options.get(*selected).copied().unwrap_or_default();
            lines.push(Line::from(vec![
                Span::raw("     "),
                Span::styled(format!("◀ {} ▶", option), value_style),
                Span::styled(
                    format!("  ({}/{})", selected + 1, options.len()),
                    styles::muted_style(),
                ),
            ]));
            1
        }
        Widget::Slider { min, max, value } => {
            let span = max.saturating_sub(*min).max(1);
            let filled = (value.saturating_sub(*min) * SLIDER_WIDTH / span) as usize;
            let empty = (SLIDER_WIDTH as usize).saturating_sub(filled);
            lines.push(Line::from(vec![
                Span::styled(format!("     {} ", min), styles::muted_style()),
                Span::styled("■".repeat(filled), styles::highlight_style()),
                Span::styled("□".repeat(empty), styles::muted_style()),
                Span::styled(format!(" {}   ", max), styles::muted_style()),
                Span::styled(format!(" {} ", value), value_style),
            ]));
            1
        }
        Widget::Radio { options, selected } => {
            let mut spans = vec![Span::raw("     ")];
            for (i, option) in options.iter().enumerate() {
                if i == *selected {
                    spans.push(Span::styled(format!("(•) {}", option), styles::highlight_style()));
                } else {
                    spans.push(Span::styled(format!("( ) {}", option), styles::muted_style()));
                }
                spans.push(Span::raw("   "));
            }
            lines.push(Line::from(spans));
            1
        }
        Widget::Number { min, value, typing } => {
            // An emptied field shows blank until a digit is typed
            let shown = if value < min {
                String::new()
            } else {
                value.to_string()
            };
            let cursor = if focused && *typing { "▌" } else { " " };
            lines.push(Line::from(vec![
                Span::raw("     "),
                Span::styled(format!("[ {:>5}{}]", shown, cursor), value_style),
            ]));
            1
        }
        Widget::MultiSelect {
            options,
            chosen,
            cursor,
        } => {
            for (i, option) in options.iter().enumerate() {
                let is_chosen = chosen.get(i).copied().unwrap_or(false);
                let mark = if is_chosen { "[x]" } else { "[ ]" };
                let style = if focused && i == *cursor {
                    styles::selected_style()
                } else if is_chosen {
                    styles::success_style()
                } else {
                    styles::text_style()
                };
                lines.push(Line::from(vec![
                    Span::raw("     "),
                    Span::styled(format!("{} {}", mark, option), style),
                ]));
            }
            1 + *cursor
        }
        Widget::Text(text) => {
            let cursor = if focused { "▌" } else { "" };
            lines.push(Line::from(vec![
                Span::raw("     "),
                Span::styled("[", styles::muted_style()),
                Span::styled(format!("{}{}", text, cursor), value_style),
                Span::styled("]", styles::muted_style()),
            ]));
            1
        }
        Widget::Checkbox(_) => 0,
    }
}

fn buttons(step: Step) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    if !step.is_first() {
        spans.push(Span::styled("[p]", styles::help_key_style()));
        spans.push(Span::styled(" ← Previous   ", styles::help_desc_style()));
    }
    if step.is_last() {
        spans.push(Span::styled("[s]", styles::help_key_style()));
        spans.push(Span::styled(" Submit Assessment", styles::help_desc_style()));
    } else {
        spans.push(Span::styled("[n]", styles::help_key_style()));
        spans.push(Span::styled(" Next →", styles::help_desc_style()));
    }
    Line::from(spans)
}
