//! # Thinking Indicator Component
//!
//! Shown while a generation is in flight: a spinner, a cycling pair of step
//! captions, and a row of progress dots. Steps advance every three seconds
//! and wrap, so the indicator stays alive however long the request takes.

use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

/// Step captions shown while the model works.
pub const THINKING_STEPS: [(&str, &str); 4] = [
    ("Neural Processing", "Analyzing patterns and requirements..."),
    ("Synthesizing Ideas", "Connecting relevant concepts and solutions..."),
    ("Refining Approach", "Optimizing the proposed framework..."),
    ("Finalizing Solution", "Crystalizing recommendations..."),
];

/// How long each step caption stays on screen.
pub const STEP_INTERVAL: Duration = Duration::from_secs(3);

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Index of the step caption shown at `elapsed` since loading started.
pub fn step_at(elapsed: Duration) -> usize {
    (elapsed.as_millis() / STEP_INTERVAL.as_millis()) as usize % THINKING_STEPS.len()
}

pub struct ThinkingIndicator {
    /// Time since the generation started (prop).
    pub elapsed: Duration,
    /// Free-running animation frame counter (prop).
    pub spinner_frame: usize,
}

impl Component for ThinkingIndicator {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let step = step_at(self.elapsed);
        let (title, subtitle) = THINKING_STEPS[step];
        let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];

        let dots: Vec<Span> = (0..THINKING_STEPS.len())
            .flat_map(|index| {
                let style = if index == step {
                    Style::default().fg(Color::Blue)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                [Span::styled("●", style), Span::raw(" ")]
            })
            .collect();

        let lines = vec![
            Line::from(Span::styled(
                format!("{spinner} {title}"),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                subtitle,
                Style::default().fg(Color::Blue).add_modifier(Modifier::DIM),
            )),
            Line::default(),
            Line::from(dots),
        ];

        let [centered] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered,
        );
    }
}
