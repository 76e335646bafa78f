//! # Scope Card Component
//!
//! Renders one project-scope component as a bordered card. The card is a
//! transient component: it is built fresh each frame from the scope data and
//! the sequencer's typed-prefix lengths, so the typewriter effect falls out
//! of rendering whatever the sequencer says is typed so far.
//!
//! Text is pre-wrapped with `textwrap` into individual `Line`s; the same
//! wrapping feeds `calculate_height`, so the height the layout reserves
//! always matches what rendering produces and the last items never get
//! clipped.
//!
//! A hidden card renders nothing but still occupies its grid cell, so cards
//! don't shift when their neighbors appear.

use std::borrow::Cow;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::reveal::{Field, RevealSequencer, typed_prefix};
use crate::scope::ScopeComponent;
use crate::tui::component::Component;

/// Total horizontal space consumed by borders (1 left + 1 right).
const HORIZONTAL_OVERHEAD: u16 = 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Display columns taken by the item bullet ("• ") and its hanging indent.
const BULLET_WIDTH: usize = 2;

/// Wraps text for a content area `width` columns wide.
/// Used by both height prediction and rendering.
fn wrap_to_width(text: &str, width: usize) -> Vec<Cow<'_, str>> {
    let options = textwrap::Options::new(width.max(1))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(text, options)
}

pub struct ScopeCard<'a> {
    component: &'a ScopeComponent,
    visible: bool,
    title_chars: usize,
    overview_chars: usize,
    item_chars: Vec<usize>,
}

impl<'a> ScopeCard<'a> {
    /// Builds the card for `index` from the sequencer's view at `elapsed`.
    pub fn new(
        component: &'a ScopeComponent,
        index: usize,
        sequencer: &RevealSequencer,
        elapsed: std::time::Duration,
    ) -> Self {
        Self {
            component,
            visible: sequencer.is_visible(index, elapsed),
            title_chars: sequencer.typed_chars(index, Field::Title, elapsed),
            overview_chars: sequencer.typed_chars(index, Field::Overview, elapsed),
            item_chars: (0..component.items.len())
                .map(|i| sequencer.typed_chars(index, Field::Item(i), elapsed))
                .collect(),
        }
    }

    /// Predicts the rendered height of the fully-typed card at `width`.
    /// Layout is computed against the full text so the card doesn't grow
    /// while typing.
    pub fn calculate_height(component: &ScopeComponent, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        if content_width == 0 {
            return 1;
        }

        let mut lines = wrap_to_width(&component.title, content_width).len();
        lines += wrap_to_width(&component.overview, content_width).len();
        lines += 1; // blank separator
        for item in &component.items {
            lines += wrap_to_width(item, content_width.saturating_sub(BULLET_WIDTH)).len();
        }
        lines as u16 + VERTICAL_OVERHEAD
    }
}

impl Component for ScopeCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }
        let content_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;

        let title_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let overview_style = Style::default().add_modifier(Modifier::DIM);

        let mut lines: Vec<Line> = Vec::new();
        for segment in wrap_to_width(
            typed_prefix(&self.component.title, self.title_chars),
            content_width,
        ) {
            lines.push(Line::from(Span::styled(segment, title_style)));
        }
        for segment in wrap_to_width(
            typed_prefix(&self.component.overview, self.overview_chars),
            content_width,
        ) {
            lines.push(Line::from(Span::styled(segment, overview_style)));
        }
        lines.push(Line::default());

        for (item, &chars) in self.component.items.iter().zip(&self.item_chars) {
            let wrapped = wrap_to_width(
                typed_prefix(item, chars),
                content_width.saturating_sub(BULLET_WIDTH),
            );
            for (i, segment) in wrapped.into_iter().enumerate() {
                let lead = if i == 0 {
                    Span::styled("• ", Style::default().fg(Color::Blue))
                } else {
                    Span::raw("  ")
                };
                lines.push(Line::from(vec![lead, Span::raw(segment)]));
            }
        }

        let card = Paragraph::new(lines).block(
            Block::bordered()
                .border_type(ratatui::widgets::BorderType::Rounded)
                .border_style(Style::default().fg(Color::Blue).add_modifier(Modifier::DIM)),
        );

        frame.render_widget(card, area);
    }
}
