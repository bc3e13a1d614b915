//! Wild-color selection heuristic.
//!
//! When a wild card is played the server requires a replacement color. The
//! client chooses one automatically: the color the player holds most of,
//! counted across the current hand with wilds excluded. Ties resolve to the
//! first color reaching the maximum in the fixed order red, yellow, green,
//! blue. The server is never consulted for the choice.

use crate::protocol::{Card, CardColor};

/// Pick the replacement color to submit alongside a wild-card play.
///
/// Counts each standard color in `hand` and returns the most common one;
/// on a tie the earliest color in [`CardColor::STANDARD`] wins. A hand with
/// no standard-colored cards (all wilds, or empty) falls back to red, the
/// first color in the order.
pub fn most_common_color(hand: &[Card]) -> CardColor {
    let mut best = CardColor::Red;
    let mut best_count = 0usize;
    for color in CardColor::STANDARD {
        let count = hand.iter().filter(|c| c.color == color).count();
        // Strictly greater keeps the earliest color on ties.
        if count > best_count {
            best = color;
            best_count = count;
        }
    }
    best
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;

    fn card(color: CardColor, value: &str) -> Card {
        Card::new(color, value)
    }

    #[test]
    fn strict_maximum_wins() {
        let hand = vec![
            card(CardColor::Red, "5"),
            card(CardColor::Blue, "2"),
            card(CardColor::Red, "9"),
            card(CardColor::Wild, "wild"),
        ];
        assert_eq!(most_common_color(&hand), CardColor::Red);
    }

    #[test]
    fn strict_maximum_wins_for_a_late_color() {
        let hand = vec![
            card(CardColor::Blue, "1"),
            card(CardColor::Blue, "4"),
            card(CardColor::Blue, "skip"),
            card(CardColor::Green, "7"),
            card(CardColor::Red, "0"),
        ];
        assert_eq!(most_common_color(&hand), CardColor::Blue);
    }

    #[test]
    fn three_way_tie_resolves_to_earliest_in_order() {
        let hand = vec![
            card(CardColor::Yellow, "1"),
            card(CardColor::Green, "1"),
            card(CardColor::Blue, "1"),
            card(CardColor::Wild, "wild"),
        ];
        // Yellow precedes green and blue in the fixed order.
        assert_eq!(most_common_color(&hand), CardColor::Yellow);
    }

    #[test]
    fn red_beats_every_tie() {
        let hand = vec![
            card(CardColor::Blue, "3"),
            card(CardColor::Red, "3"),
            card(CardColor::Green, "3"),
            card(CardColor::Yellow, "3"),
        ];
        assert_eq!(most_common_color(&hand), CardColor::Red);
    }

    #[test]
    fn wilds_are_excluded_from_the_count() {
        let hand = vec![
            card(CardColor::Wild, "wild"),
            card(CardColor::Wild, "wild_draw_four"),
            card(CardColor::Green, "6"),
        ];
        assert_eq!(most_common_color(&hand), CardColor::Green);
    }

    #[test]
    fn all_wild_hand_falls_back_to_red() {
        let hand = vec![
            card(CardColor::Wild, "wild"),
            card(CardColor::Wild, "wild"),
        ];
        assert_eq!(most_common_color(&hand), CardColor::Red);
    }

    #[test]
    fn empty_hand_falls_back_to_red() {
        assert_eq!(most_common_color(&[]), CardColor::Red);
    }
}
