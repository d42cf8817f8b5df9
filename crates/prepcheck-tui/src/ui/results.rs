use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use prepcheck_core::assessment::{Notice, NoticeLevel};
use prepcheck_core::AssessmentOutcome;

use crate::app::App;
use crate::ui::styles;

/// Format for the generation timestamp under a live result.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

fn notice_line(notice: &Notice) -> Line<'static> {
    let (icon, style) = match notice.level {
        NoticeLevel::Error => ("✗ ", styles::error_style()),
        NoticeLevel::Info => ("ℹ ", styles::highlight_style()),
    };
    Line::from(Span::styled(format!("{}{}", icon, notice.message), style))
}

fn outcome_lines(outcome: &AssessmentOutcome) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = outcome.notices().iter().map(notice_line).collect();
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(outcome.heading(), styles::title_style())));
    lines.push(Line::from(""));
    lines.extend(
        outcome
            .body()
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), styles::text_style()))),
    );

    if let AssessmentOutcome::Live {
        model_id,
        generated_at,
        ..
    } = outcome
    {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Generated by {} at {}",
                model_id,
                generated_at.format(TIMESTAMP_FORMAT)
            ),
            styles::muted_style(),
        )));
    }

    lines
}

/// Rows the outcome takes up when wrapped to `width` columns.
pub fn row_count(outcome: &AssessmentOutcome, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = outcome_lines(outcome)
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    rows.min(u16::MAX as usize) as u16
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.outcome {
        Some(ref outcome) => {
            app.set_result_rows(row_count(outcome, area.width.saturating_sub(2)));
            outcome_lines(outcome)
        }
        None => vec![Line::from(Span::styled("No assessment yet", styles::muted_style()))],
    };

    let block = Block::default()
        .title(" Assessment ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(styles::panel_style());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.result_scroll.min(app.max_result_scroll()), 0));
    frame.render_widget(paragraph, area);
}

/// Placeholder while the assessment runs.
pub fn render_pending(frame: &mut Frame, app: &App, area: Rect) {
    let message = if app.is_live() {
        "Assessing your preparedness with WatsonX..."
    } else {
        "Preparing sample results..."
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", message), styles::highlight_style())),
        Line::from(""),
        Line::from(Span::styled(
            "  This can take a little while. Press ? for help.",
            styles::muted_style(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use prepcheck_core::assessment::{DemoReason, DEMO_HEADING, DEMO_NOTICE, RESULT_HEADING};

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_live_outcome_lines() {
        let outcome = AssessmentOutcome::Live {
            text: "Safety Scores:\n- Shelter: 40/100".to_string(),
            model_id: "ibm/granite-13b-chat-v2".to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        };
        let lines = text(&outcome_lines(&outcome));

        assert_eq!(lines[0], RESULT_HEADING);
        assert_eq!(lines[2], "Safety Scores:");
        assert_eq!(lines[3], "- Shelter: 40/100");
        assert_eq!(
            lines.last().unwrap(),
            "Generated by ibm/granite-13b-chat-v2 at 2024-03-01 12:30 UTC"
        );
    }

    #[test]
    fn test_row_count_includes_wrapped_rows() {
        let outcome = AssessmentOutcome::Live {
            text: "x".repeat(25),
            model_id: "m".to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        };
        // heading, blank, body, blank, footer
        assert_eq!(row_count(&outcome, u16::MAX), 5);
        // At ten columns the heading and body take three rows each, the footer four
        assert_eq!(row_count(&outcome, 10), 3 + 1 + 3 + 1 + 4);
    }

    #[test]
    fn test_failed_outcome_shows_error_before_demo() {
        let outcome = AssessmentOutcome::Demo {
            reason: DemoReason::Failed("Unauthorized".to_string()),
        };
        let lines = text(&outcome_lines(&outcome));

        assert_eq!(lines[0], "✗ Error processing assessment: Unauthorized");
        assert!(lines[2].ends_with(DEMO_NOTICE));
        assert!(lines.iter().any(|l| l == DEMO_HEADING));
        assert!(!lines.iter().any(|l| l.starts_with("Generated by")));
    }
}
