//! The standard 78-card tarot deck, usable as the engine's card source.
//!
//! Ids follow a fixed scheme: major arcana are 0..=21 in traditional order,
//! minor arcana start at 22 with 14 cards per suit (Ace..Ten, then the four
//! court cards).

use crate::cards::{Card, CardId, ContentRef};

/// Face asset shared by every card until real art is wired in.
pub const PLACEHOLDER_FRONT: &str = "assets/images/placeholder.png";

const MAJOR_ARCANA: [&str; 22] = [
    "The Fool",
    "The Magician",
    "The High Priestess",
    "The Empress",
    "The Emperor",
    "The Hierophant",
    "The Lovers",
    "The Chariot",
    "Strength",
    "The Hermit",
    "Wheel of Fortune",
    "Justice",
    "The Hanged Man",
    "Death",
    "Temperance",
    "The Devil",
    "The Tower",
    "The Star",
    "The Moon",
    "The Sun",
    "Judgement",
    "The World",
];

/// Minor arcana suits in id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Wands,
    Cups,
    Swords,
    Pentacles,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles];

    pub const fn index(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Wands => "Wands",
            Suit::Cups => "Cups",
            Suit::Swords => "Swords",
            Suit::Pentacles => "Pentacles",
        }
    }
}

const COURT: [&str; 4] = ["Page", "Knight", "Queen", "King"];
const CARDS_PER_SUIT: u32 = 14;
const FIRST_MINOR_ID: u32 = 22;

pub fn major_arcana() -> Vec<Card> {
    MAJOR_ARCANA
        .iter()
        .enumerate()
        .map(|(i, name)| Card::new(CardId::new(i as u32), *name, ContentRef::new(PLACEHOLDER_FRONT)))
        .collect()
}

/// The 14 cards of one suit.
pub fn suit_cards(suit: Suit) -> Vec<Card> {
    let base = FIRST_MINOR_ID + suit.index() * CARDS_PER_SUIT;
    let numbers = (0..10u32).map(|i| (base + i, format!("{} of {}", i + 1, suit.name())));
    let courts = COURT
        .iter()
        .enumerate()
        .map(|(i, court)| (base + 10 + i as u32, format!("{court} of {}", suit.name())));
    numbers
        .chain(courts)
        .map(|(id, name)| Card::new(CardId::new(id), name, ContentRef::new(PLACEHOLDER_FRONT)))
        .collect()
}

pub fn minor_arcana() -> Vec<Card> {
    Suit::ALL.iter().flat_map(|&s| suit_cards(s)).collect()
}

/// All 78 cards, majors first.
pub fn full_deck() -> Vec<Card> {
    let mut cards = major_arcana();
    cards.extend(minor_arcana());
    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn full_deck_has_78_unique_ids() {
        let cards = full_deck();
        assert_eq!(cards.len(), 78);
        let ids: HashSet<_> = cards.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), 78);
        assert!(cards.iter().all(|c| c.id().value() < 78));
    }

    #[test]
    fn minor_ids_follow_suit_blocks() {
        let cups = suit_cards(Suit::Cups);
        assert_eq!(cups[0].id(), CardId::new(36));
        assert_eq!(cups[0].name(), "1 of Cups");
        assert_eq!(cups[10].name(), "Page of Cups");
        assert_eq!(cups[13].id(), CardId::new(49));
        assert_eq!(cups[13].name(), "King of Cups");
    }

    #[test]
    fn majors_in_traditional_order() {
        let majors = major_arcana();
        assert_eq!(majors[0].name(), "The Fool");
        assert_eq!(majors[21].name(), "The World");
    }
}
