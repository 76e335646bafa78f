use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::{App, Phase};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{FORM_HEIGHT, ScopeCard, ThinkingIndicator};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(FORM_HEIGHT), Min(0)]);
    let [title_area, form_area, main_area] = layout.areas(frame.area());

    // Title bar
    let title_text = if app.status_message.is_empty() {
        format!("Marvin (model: {})", app.model_name)
    } else {
        format!("Marvin (model: {}) | {}", app.model_name, app.status_message)
    };
    frame.render_widget(Span::raw(title_text), title_area);

    // Brief form
    tui.form.render(frame, form_area);

    // Main area - welcome, thinking, error, or cards
    match app.phase {
        Phase::Idle => draw_welcome_view(frame, main_area),
        Phase::Loading => {
            let mut indicator = ThinkingIndicator {
                elapsed: tui.thinking_elapsed(),
                spinner_frame,
            };
            indicator.render(frame, main_area);
        }
        Phase::Error => {
            if let Some(error_msg) = &app.error {
                draw_error_view(frame, main_area, error_msg);
            }
        }
        Phase::Ready => draw_cards_view(frame, main_area, app, tui),
    }
}

fn draw_welcome_view(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Hey, I'm Marvin",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Share your project vision, and I'll turn it into a detailed scope.",
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Example briefs:",
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(
            "  banking / Nigeria / digitalise my processes and operations",
            Style::default().add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(
            "  food and beverage / UAE / optimise e-retail operations",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        area,
    );
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(error_msg)
        .style(Style::default().fg(Color::Red))
        .block(Block::bordered().title("ERROR"))
        .alignment(Alignment::Center);

    frame.render_widget(error_paragraph, area);
}

/// Lays the four cards out as a 2x2 grid, each rendered with the sequencer's
/// typed prefixes for the current elapsed time.
fn draw_cards_view(frame: &mut Frame, area: Rect, app: &App, tui: &TuiState) {
    let (Some(scope), Some(sequencer)) = (&app.scope, &app.reveal) else {
        return;
    };
    let elapsed = tui.reveal_elapsed();

    use Constraint::{Fill, Length};
    let column_width = area.width / 2;

    // Row height follows the taller card of the pair, clamped by Fill.
    let row_height = |left: usize| -> u16 {
        scope.components[left..(left + 2).min(scope.components.len())]
            .iter()
            .map(|c| ScopeCard::calculate_height(c, column_width))
            .max()
            .unwrap_or(1)
    };

    let [top_row, bottom_row] =
        Layout::vertical([Length(row_height(0)), Length(row_height(2))]).areas(area);

    for (index, component) in scope.components.iter().enumerate() {
        let row = if index < 2 { top_row } else { bottom_row };
        let [left_cell, right_cell] = Layout::horizontal([Fill(1), Fill(1)]).areas(row);
        let cell = if index % 2 == 0 { left_cell } else { right_cell };

        let mut card = ScopeCard::new(component, index, sequencer, elapsed);
        card.render(frame, cell);
    }
}
