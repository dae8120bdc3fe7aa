//! Venue popup drawn over the map

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use geodash_core::PopupContent;

use super::Component;

const POPUP_WIDTH: u16 = 48;

/// Rect of at most `width` x `height`, centered in `area` with a one-cell
/// margin.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

pub struct VenuePopupProps<'a> {
    pub content: &'a PopupContent,
}

pub struct VenuePopup;

impl VenuePopup {
    fn lines(content: &PopupContent) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if content.tips.is_empty() {
            lines.push(Line::from(Span::styled(
                "No tips yet.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for tip in &content.tips {
            lines.push(Line::from(tip.text.clone()));
            if let Some(author) = &tip.author {
                lines.push(Line::from(Span::styled(
                    format!("- {author}"),
                    Style::default().fg(Color::DarkGray).italic(),
                )));
            }
            lines.push(Line::default());
        }
        lines
    }
}

impl Component for VenuePopup {
    type Props<'a> = VenuePopupProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let lines = Self::lines(props.content);
        let inner_width = POPUP_WIDTH.saturating_sub(2).max(1) as usize;
        // Wrapped height estimate; tips are short
        let body: usize = lines
            .iter()
            .map(|line| line.width().div_ceil(inner_width).max(1))
            .sum();
        let height = (body as u16).saturating_add(2);
        let rect = centered_rect(POPUP_WIDTH, height, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(format!(" {} ", props.content.title))
            .title_style(Style::default().fg(Color::White).bold())
            .title_bottom(Line::from(" Esc close ").right_aligned().fg(Color::DarkGray));

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Left)
                .wrap(Wrap { trim: true }),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RenderHarness;
    use geodash_core::Tip;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
        // Clamped to the area minus a margin
        assert_eq!(centered_rect(100, 30, area), Rect::new(1, 1, 78, 22));
    }

    #[test]
    fn test_popup_renders_tips_and_authors() {
        let content = PopupContent {
            title: "Cafe Nordic".into(),
            tips: vec![
                Tip {
                    text: "Get the cardamom bun".into(),
                    author: Some("Ann".into()),
                },
                Tip {
                    text: "Busy at noon".into(),
                    author: None,
                },
            ],
        };
        let mut harness = RenderHarness::new(80, 24);

        let output = harness.render_to_string_plain(|frame| {
            VenuePopup.render(frame, frame.area(), VenuePopupProps { content: &content });
        });

        assert!(output.contains("Cafe Nordic"));
        assert!(output.contains("Get the cardamom bun"));
        assert!(output.contains("- Ann"));
        assert!(output.contains("Busy at noon"));
        assert!(output.contains("Esc close"));
    }

    #[test]
    fn test_popup_without_tips() {
        let content = PopupContent {
            title: "Empty Lot".into(),
            tips: vec![],
        };
        let mut harness = RenderHarness::new(60, 12);

        let output = harness.render_to_string_plain(|frame| {
            VenuePopup.render(frame, frame.area(), VenuePopupProps { content: &content });
        });

        assert!(output.contains("Empty Lot"));
        assert!(output.contains("No tips yet."));
    }
}
