use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use prepcheck_core::summary::{review, ReviewSection};

use crate::app::App;
use crate::ui::styles;

fn section_lines(sections: &[ReviewSection]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for section in sections {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(section.title, styles::title_style())));
        for (label, value) in &section.entries {
            lines.push(Line::from(vec![
                Span::styled("- ", styles::muted_style()),
                Span::styled(format!("{}: ", label), styles::label_style(false)),
                Span::styled(value.clone(), styles::highlight_style()),
            ]));
        }
    }
    lines
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let sections = review(&app.draft());

    let block = Block::default()
        .title(" Your Answers ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(section_lines(&sections))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_lines() {
        let sections = vec![
            ReviewSection {
                title: "Disaster Information",
                entries: vec![("Type", "Flood".to_string()), ("In Disaster Zone", "No".to_string())],
            },
            ReviewSection {
                title: "Supplies Information",
                entries: vec![("Available Gear", "None".to_string())],
            },
        ];
        let lines: Vec<String> = section_lines(&sections)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        assert_eq!(
            lines,
            vec![
                "Disaster Information",
                "- Type: Flood",
                "- In Disaster Zone: No",
                "",
                "Supplies Information",
                "- Available Gear: None",
            ]
        );
    }
}
