//! Scrollable list of news cards

use geodash_core::{ArticleLayout, NewsArticle};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{contains, Component};
use crate::action::Action;
use crate::event::EventKind;

/// Placeholder drawn in the thumbnail cell of a split card.
pub const THUMBNAIL_CELL: &str = "[img] ";
const CELL_PAD: &str = "      ";

pub struct NewsListProps<'a> {
    pub articles: &'a [NewsArticle],
    /// Index of the first visible article
    pub scroll: usize,
}

#[derive(Default)]
pub struct NewsList {
    last_area: Option<Rect>,
}

impl NewsList {
    pub fn new() -> Self {
        Self::default()
    }

    fn card(article: &NewsArticle) -> Vec<Line<'static>> {
        let (first, rest) = match article.layout() {
            ArticleLayout::Split { .. } => (
                Span::styled(THUMBNAIL_CELL, Style::default().fg(Color::Magenta)),
                Span::raw(CELL_PAD),
            ),
            ArticleLayout::FullWidth => (Span::raw(""), Span::raw("")),
        };

        vec![
            Line::from(vec![
                first,
                Span::styled(article.headline.clone(), Style::default().fg(Color::White).bold()),
            ]),
            Line::from(vec![
                rest.clone(),
                Span::styled(article.description.clone(), Style::default().fg(Color::Gray)),
            ]),
            Line::from(vec![
                rest,
                Span::styled(
                    article.url.clone(),
                    Style::default().fg(Color::Blue).underlined(),
                ),
            ]),
            Line::default(),
        ]
    }
}

impl Component for NewsList {
    type Props<'a> = NewsListProps<'a>;

    fn handle_event(&mut self, event: &EventKind, _props: Self::Props<'_>) -> Vec<Action> {
        match (event, self.last_area) {
            (EventKind::Scroll { column, row, delta }, Some(area))
                if contains(area, *column, *row) =>
            {
                vec![Action::NewsScroll(*delta)]
            }
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.last_area = Some(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" News ({}) ", props.articles.len()))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);

        let lines: Vec<Line> = if props.articles.is_empty() {
            vec![Line::from(Span::styled(
                "No stories yet.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            props
                .articles
                .iter()
                .skip(props.scroll)
                .flat_map(Self::card)
                .collect()
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ActionAssertions, RenderHarness};

    fn article(headline: &str, thumbnail: Option<&str>) -> NewsArticle {
        NewsArticle {
            headline: headline.into(),
            url: format!("https://news.test/{}", headline.to_lowercase()),
            description: format!("About {headline}"),
            thumbnail: thumbnail.map(String::from),
        }
    }

    #[test]
    fn test_split_and_full_width_cards() {
        let articles = vec![
            article("Budget", Some("https://img.test/1.jpg")),
            article("Parade", None),
        ];
        let mut render = RenderHarness::new(60, 14);
        let mut list = NewsList::new();

        let output = render.render_to_string_plain(|frame| {
            list.render(
                frame,
                frame.area(),
                NewsListProps {
                    articles: &articles,
                    scroll: 0,
                },
            );
        });

        assert!(output.contains("News (2)"));
        assert!(output.contains("[img] Budget"));
        assert!(output.contains("      About Budget"));
        assert!(output.contains("│Parade"));
        assert!(!output.contains("[img] Parade"));
    }

    #[test]
    fn test_scroll_skips_articles() {
        let articles = vec![article("First", None), article("Second", None)];
        let mut render = RenderHarness::new(60, 10);
        let mut list = NewsList::new();

        let output = render.render_to_string_plain(|frame| {
            list.render(
                frame,
                frame.area(),
                NewsListProps {
                    articles: &articles,
                    scroll: 1,
                },
            );
        });

        assert!(!output.contains("First"));
        assert!(output.contains("Second"));
    }

    #[test]
    fn test_empty_state() {
        let mut render = RenderHarness::new(40, 5);
        let mut list = NewsList::new();

        let output = render.render_to_string_plain(|frame| {
            list.render(
                frame,
                frame.area(),
                NewsListProps {
                    articles: &[],
                    scroll: 0,
                },
            );
        });

        assert!(output.contains("News (0)"));
        assert!(output.contains("No stories yet."));
    }

    #[test]
    fn test_wheel_scrolls_inside_area_only() {
        let mut render = RenderHarness::new(40, 10);
        let mut list = NewsList::new();
        render.render(|frame| {
            list.render(
                frame,
                Rect::new(0, 0, 40, 5),
                NewsListProps {
                    articles: &[],
                    scroll: 0,
                },
            );
        });

        let inside = EventKind::Scroll {
            column: 3,
            row: 2,
            delta: 1,
        };
        let outside = EventKind::Scroll {
            column: 3,
            row: 8,
            delta: 1,
        };
        let props = || NewsListProps {
            articles: &[],
            scroll: 0,
        };

        list.handle_event(&inside, props())
            .assert_first(Action::NewsScroll(1));
        list.handle_event(&outside, props()).assert_empty();
    }
}
