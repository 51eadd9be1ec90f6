//! Balanced bot strategy
//!
//! Takes rounds as cheaply as possible and concedes cheaply when beaten;
//! accepts a raise only on genuinely strong material.

use super::{BotStrategy, TurnView};
use crate::domain::services::match_rules::leading_power;
use crate::domain::value_objects::Card;

/// Heuristic strategy: win minimally, concede cheaply.
pub struct BalancedBot;

impl BalancedBot {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BalancedBot {
    fn default() -> Self {
        Self::new()
    }
}

impl BotStrategy for BalancedBot {
    fn decide_move(&self, view: &TurnView<'_>, hand: &[Card]) -> usize {
        if hand.is_empty() {
            return 0;
        }

        // Hand indices, weakest first
        let mut by_power: Vec<usize> = (0..hand.len()).collect();
        by_power.sort_by_key(|&i| hand[i].power(view.vira));

        if let Some(top) = leading_power(view.round_cards, view.vira) {
            // Cheapest card that takes the round
            for &i in &by_power {
                if hand[i].power(view.vira) > top {
                    return i;
                }
            }
            // Nothing beats the table: throw the weakest
            return by_power[0];
        }

        // Leading the round: open with the weakest card
        by_power[0]
    }

    fn should_accept_truco(&self, view: &TurnView<'_>, hand: &[Card]) -> bool {
        // A Manilha, or a 2 or 3 (base strength 8 and 9), is worth the stake
        hand.iter()
            .any(|c| c.is_manilha(view.vira) || c.power(view.vira) >= 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{PlayedCard, Rank, Suit};

    fn view(vira: Rank, round_cards: &[PlayedCard]) -> TurnView<'_> {
        TurnView {
            vira,
            round_cards,
            hand_score: [0, 0],
        }
    }

    fn played(seat: u8, suit: Suit, rank: Rank) -> PlayedCard {
        PlayedCard {
            seat,
            card: Card::new(suit, rank),
        }
    }

    #[test]
    fn test_leads_with_weakest_card() {
        let bot = BalancedBot::new();
        let hand = vec![
            Card::new(Suit::Spades, Rank::Three),
            Card::new(Suit::Hearts, Rank::Four),
            Card::new(Suit::Clubs, Rank::King),
        ];

        let idx = bot.decide_move(&view(Rank::Seven, &[]), &hand);
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_wins_minimally_over_the_table() {
        let bot = BalancedBot::new();
        // Table shows a King (6); cheapest winner is the Ace (7), not the 3 (9)
        let table = [played(0, Suit::Hearts, Rank::King)];
        let hand = vec![
            Card::new(Suit::Spades, Rank::Three),
            Card::new(Suit::Diamonds, Rank::Ace),
            Card::new(Suit::Clubs, Rank::Four),
        ];

        let idx = bot.decide_move(&view(Rank::Seven, &table), &hand);
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_concedes_cheaply_when_beaten() {
        let bot = BalancedBot::new();
        // Vira 4: the 5 of Clubs on the table is the top Manilha
        let table = [played(0, Suit::Clubs, Rank::Five)];
        let hand = vec![
            Card::new(Suit::Spades, Rank::Three),
            Card::new(Suit::Hearts, Rank::Queen),
            Card::new(Suit::Clubs, Rank::King),
        ];

        let idx = bot.decide_move(&view(Rank::Four, &table), &hand);
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_accepts_truco_with_a_manilha() {
        let bot = BalancedBot::new();
        let hand = vec![
            Card::new(Suit::Diamonds, Rank::Five),
            Card::new(Suit::Hearts, Rank::Four),
            Card::new(Suit::Spades, Rank::Six),
        ];
        assert!(bot.should_accept_truco(&view(Rank::Four, &[]), &hand));
    }

    #[test]
    fn test_accepts_truco_with_a_high_common_card() {
        let bot = BalancedBot::new();
        let hand = vec![
            Card::new(Suit::Hearts, Rank::Two),
            Card::new(Suit::Hearts, Rank::Four),
        ];
        assert!(bot.should_accept_truco(&view(Rank::Seven, &[]), &hand));
    }

    #[test]
    fn test_refuses_truco_on_weak_material() {
        let bot = BalancedBot::new();
        let hand = vec![
            Card::new(Suit::Hearts, Rank::Four),
            Card::new(Suit::Spades, Rank::Six),
            Card::new(Suit::Clubs, Rank::Jack),
        ];
        assert!(!bot.should_accept_truco(&view(Rank::Seven, &[]), &hand));
    }
}
