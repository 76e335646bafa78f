//! # Brief Form Component
//!
//! The three inline inputs that make up a project brief, phrased as one
//! sentence: "We're in [sector] industry based out of [location] and we need
//! [goal]". Tab cycles focus, Enter submits.
//!
//! ## State Management
//!
//! The three buffers and the focus are internal state. `disabled` is a prop
//! synced from the application state each frame: while a generation is in
//! flight the form stops accepting submits (the original disables its
//! trigger button the same way).

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph};

use crate::scope::ScopeBrief;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the BriefForm
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// User triggered generation with a complete brief (Enter pressed)
    Submit(ScopeBrief),
    /// Text content changed
    Changed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Sector,
    Location,
    Goal,
}

impl Focus {
    fn next(self) -> Focus {
        match self {
            Focus::Sector => Focus::Location,
            Focus::Location => Focus::Goal,
            Focus::Goal => Focus::Sector,
        }
    }

    fn prev(self) -> Focus {
        match self {
            Focus::Sector => Focus::Goal,
            Focus::Location => Focus::Sector,
            Focus::Goal => Focus::Location,
        }
    }
}

/// Placeholders from the original walkthrough copy.
const PLACEHOLDER_SECTOR: &str = "education";
const PLACEHOLDER_LOCATION: &str = "noida";
const PLACEHOLDER_GOAL: &str = "attract more small to medium sized businesses for growth.";

/// Total height the form needs: three bordered inputs plus a hint line.
pub const FORM_HEIGHT: u16 = 10;

pub struct BriefForm {
    sector: String,
    location: String,
    goal: String,
    focus: Focus,
    /// Prop: true while a generation is in flight.
    pub disabled: bool,
}

impl BriefForm {
    pub fn new() -> Self {
        Self {
            sector: String::new(),
            location: String::new(),
            goal: String::new(),
            focus: Focus::Sector,
            disabled: false,
        }
    }

    /// The brief as currently typed.
    pub fn brief(&self) -> ScopeBrief {
        ScopeBrief::new(&self.sector, &self.location, &self.goal)
    }

    fn focused_buffer(&mut self) -> &mut String {
        match self.focus {
            Focus::Sector => &mut self.sector,
            Focus::Location => &mut self.location,
            Focus::Goal => &mut self.goal,
        }
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        value: &str,
        placeholder: &str,
        focused: bool,
    ) {
        let border_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let content = if value.is_empty() {
            Span::styled(placeholder, Style::default().add_modifier(Modifier::DIM))
        } else {
            Span::raw(value)
        };

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title(title)
            .title_style(border_style);

        frame.render_widget(Paragraph::new(content).block(block), area);

        // Place the cursor at the end of the focused field.
        if focused && !self.disabled {
            let inner = block_inner(area);
            let x = inner.x + (value.chars().count() as u16).min(inner.width.saturating_sub(1));
            frame.set_cursor_position((x, inner.y));
        }
    }

    fn hint_line(&self) -> Span<'static> {
        if self.disabled {
            Span::styled(
                "Generating...",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::DIM),
            )
        } else if !self.brief().is_complete() {
            Span::styled(
                "Fill in all three fields to generate a project scope",
                Style::default().add_modifier(Modifier::DIM),
            )
        } else {
            Span::styled(
                "Enter: generate project scope  •  Tab: next field",
                Style::default().fg(Color::Cyan),
            )
        }
    }
}

impl Default for BriefForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Inner area of a bordered block (1-cell margin on each side).
fn block_inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

impl Component for BriefForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::Length;
        let [sector_area, location_area, goal_area, hint_area] =
            Layout::vertical([Length(3), Length(3), Length(3), Length(1)]).areas(area);

        self.render_field(
            frame,
            sector_area,
            "We're in ... industry",
            &self.sector,
            PLACEHOLDER_SECTOR,
            self.focus == Focus::Sector,
        );
        self.render_field(
            frame,
            location_area,
            "based out of ...",
            &self.location,
            PLACEHOLDER_LOCATION,
            self.focus == Focus::Location,
        );
        self.render_field(
            frame,
            goal_area,
            "and we need ...",
            &self.goal,
            PLACEHOLDER_GOAL,
            self.focus == Focus::Goal,
        );

        frame.render_widget(Paragraph::new(self.hint_line()), hint_area);
    }
}

impl EventHandler for BriefForm {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::InputChar(c) if !c.is_control() => {
                self.focused_buffer().push(*c);
                Some(FormEvent::Changed)
            }
            TuiEvent::Paste(data) => {
                // Brief fields are single-line; collapse pasted newlines.
                let cleaned: String = data
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.focused_buffer().push_str(&cleaned);
                Some(FormEvent::Changed)
            }
            TuiEvent::Backspace => {
                self.focused_buffer().pop();
                Some(FormEvent::Changed)
            }
            TuiEvent::FocusNext => {
                self.focus = self.focus.next();
                None
            }
            TuiEvent::FocusPrev => {
                self.focus = self.focus.prev();
                None
            }
            TuiEvent::Submit => {
                let brief = self.brief();
                if !self.disabled && brief.is_complete() {
                    Some(FormEvent::Submit(brief))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
