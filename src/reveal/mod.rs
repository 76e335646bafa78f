//! # Staged Reveal Sequencer
//!
//! Drives the card reveal and typewriter animation for one generation cycle.
//!
//! The sequencer holds no timers and never reads a clock. It is a pure
//! function of elapsed time since the cycle started: the event loop passes
//! wall-clock elapsed time, tests pass synthetic durations. This keeps every
//! animation property deterministic:
//!
//! - Card `i` becomes visible at `i × reveal_stagger`.
//! - Each text field of a visible card types one character per
//!   `type_interval`, starting at that card's visibility instant.
//! - Visibility and typed lengths only grow within a cycle; a new cycle gets
//!   a fresh sequencer, which is how everything resets.

use std::time::Duration;

use crate::scope::ScopeResponse;

/// Pacing knobs for one reveal cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTimings {
    /// Delay between consecutive cards becoming visible.
    pub reveal_stagger: Duration,
    /// Delay between consecutive characters of a typing field.
    pub type_interval: Duration,
}

impl Default for RevealTimings {
    fn default() -> Self {
        Self {
            reveal_stagger: Duration::from_millis(1000),
            type_interval: Duration::from_millis(20),
        }
    }
}

/// A text field within a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Overview,
    Item(usize),
}

/// Character counts for one card's text fields.
#[derive(Debug, Clone)]
struct CardLengths {
    title: usize,
    overview: usize,
    items: Vec<usize>,
}

/// Reveal schedule for one generation cycle.
#[derive(Debug, Clone)]
pub struct RevealSequencer {
    timings: RevealTimings,
    cards: Vec<CardLengths>,
}

impl RevealSequencer {
    /// Builds the schedule for a validated scope response.
    pub fn for_scope(scope: &ScopeResponse, timings: RevealTimings) -> Self {
        let cards = scope
            .components
            .iter()
            .map(|component| CardLengths {
                title: component.title.chars().count(),
                overview: component.overview.chars().count(),
                items: component
                    .items
                    .iter()
                    .map(|item| item.chars().count())
                    .collect(),
            })
            .collect();
        Self { timings, cards }
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// The instant card `index` becomes visible, relative to the cycle start.
    fn reveal_at(&self, index: usize) -> Duration {
        self.timings.reveal_stagger * index as u32
    }

    pub fn is_visible(&self, index: usize, elapsed: Duration) -> bool {
        index < self.cards.len() && elapsed >= self.reveal_at(index)
    }

    /// Number of cards visible at `elapsed`. Monotone in `elapsed`.
    pub fn visible_count(&self, elapsed: Duration) -> usize {
        (0..self.cards.len())
            .take_while(|&index| self.is_visible(index, elapsed))
            .count()
    }

    /// Number of characters of the given field typed out at `elapsed`.
    /// Zero while the card is hidden; clamped to the field length.
    pub fn typed_chars(&self, index: usize, field: Field, elapsed: Duration) -> usize {
        if !self.is_visible(index, elapsed) {
            return 0;
        }
        let len = match (field, &self.cards[index]) {
            (Field::Title, card) => card.title,
            (Field::Overview, card) => card.overview,
            (Field::Item(i), card) => card.items.get(i).copied().unwrap_or(0),
        };

        let since_visible = elapsed - self.reveal_at(index);
        let interval = self.timings.type_interval.as_millis();
        if interval == 0 {
            return len;
        }
        // The first character lands one interval after the card appears.
        ((since_visible.as_millis() / interval) as usize).min(len)
    }

    /// True once every card is visible and every field fully typed.
    pub fn is_settled(&self, elapsed: Duration) -> bool {
        self.cards.iter().enumerate().all(|(index, card)| {
            self.is_visible(index, elapsed)
                && self.typed_chars(index, Field::Title, elapsed) == card.title
                && self.typed_chars(index, Field::Overview, elapsed) == card.overview
                && card.items.iter().enumerate().all(|(i, &len)| {
                    self.typed_chars(index, Field::Item(i), elapsed) == len
                })
        })
    }
}

/// Returns the first `chars` characters of `text`, respecting char boundaries.
pub fn typed_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_scope;

    const MS: fn(u64) -> Duration = Duration::from_millis;

    fn sequencer() -> RevealSequencer {
        RevealSequencer::for_scope(&sample_scope(), RevealTimings::default())
    }

    #[test]
    fn test_cards_reveal_at_one_second_intervals() {
        let seq = sequencer();
        assert_eq!(seq.visible_count(MS(0)), 1);
        assert_eq!(seq.visible_count(MS(999)), 1);
        assert_eq!(seq.visible_count(MS(1000)), 2);
        assert_eq!(seq.visible_count(MS(2500)), 3);
        assert_eq!(seq.visible_count(MS(3000)), 4);
        assert_eq!(seq.visible_count(MS(60_000)), 4);
    }

    #[test]
    fn test_hidden_card_has_no_typed_chars() {
        let seq = sequencer();
        assert_eq!(seq.typed_chars(3, Field::Title, MS(2999)), 0);
        assert!(seq.typed_chars(3, Field::Title, MS(3020)) > 0);
    }

    #[test]
    fn test_typing_is_monotone_while_visible() {
        let seq = sequencer();
        let mut last = 0;
        for elapsed_ms in (0..5000).step_by(7) {
            let typed = seq.typed_chars(0, Field::Overview, MS(elapsed_ms));
            assert!(typed >= last, "typed length regressed at {elapsed_ms}ms");
            last = typed;
        }
    }

    #[test]
    fn test_typing_advances_one_char_per_interval() {
        let seq = sequencer();
        assert_eq!(seq.typed_chars(0, Field::Title, MS(0)), 0);
        assert_eq!(seq.typed_chars(0, Field::Title, MS(20)), 1);
        assert_eq!(seq.typed_chars(0, Field::Title, MS(45)), 2);
        // Second card starts its own typing clock at its reveal instant.
        assert_eq!(seq.typed_chars(1, Field::Title, MS(1000)), 0);
        assert_eq!(seq.typed_chars(1, Field::Title, MS(1040)), 2);
    }

    #[test]
    fn test_typed_chars_clamps_to_field_length() {
        let seq = sequencer();
        let title_len = sample_scope().components[0].title.chars().count();
        assert_eq!(seq.typed_chars(0, Field::Title, MS(600_000)), title_len);
    }

    #[test]
    fn test_settles_after_all_cards_fully_typed() {
        let seq = sequencer();
        assert!(!seq.is_settled(MS(3000)));
        assert!(seq.is_settled(MS(600_000)));
    }

    #[test]
    fn test_new_cycle_starts_hidden() {
        // A fresh sequencer at t=0 has typed nothing — the reset semantics.
        let seq = sequencer();
        for index in 0..seq.card_count() {
            assert_eq!(seq.typed_chars(index, Field::Overview, MS(0)), 0);
        }
    }

    #[test]
    fn test_zero_type_interval_types_instantly() {
        let timings = RevealTimings {
            reveal_stagger: Duration::ZERO,
            type_interval: Duration::ZERO,
        };
        let seq = RevealSequencer::for_scope(&sample_scope(), timings);
        assert!(seq.is_settled(Duration::ZERO));
    }

    #[test]
    fn test_typed_prefix_respects_char_boundaries() {
        assert_eq!(typed_prefix("héllo", 2), "hé");
        assert_eq!(typed_prefix("héllo", 0), "");
        assert_eq!(typed_prefix("héllo", 99), "héllo");
    }
}
