use crate::cards::{Card, CardId};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// An ordered deck. Shuffling never mutates a deck in place; it hands back a
/// new permutation of the same cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use tarot_fan::deck::Deck;
    /// use tarot_fan::tarot;
    ///
    /// let deck = Deck::from_cards(tarot::full_deck());
    /// assert_eq!(deck.len(), 78);
    /// ```
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(Card::id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id() == id)
    }

    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == id)
    }

    pub fn find(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id() == id)
    }

    /// Uniform random permutation (Fisher-Yates) drawn from `rng`.
    pub fn shuffled_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Deck {
        let mut cards = self.cards.clone();
        cards.shuffle(rng);
        Deck { cards }
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffled_seeded(&self, seed: u64) -> Deck {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffled_with(&mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tarot;

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let d = Deck::from_cards(tarot::full_deck());
        let d1 = d.shuffled_seeded(42);
        let d2 = d.shuffled_seeded(42);
        assert_eq!(d1, d2);
        assert_ne!(d1, d);
    }

    #[test]
    fn shuffle_keeps_composition() {
        let d = Deck::from_cards(tarot::full_deck());
        let s = d.shuffled_seeded(7);
        assert_eq!(s.len(), d.len());
        let mut a: Vec<_> = d.ids().collect();
        let mut b: Vec<_> = s.ids().collect();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn lookup_by_id() {
        let d = Deck::from_cards(tarot::major_arcana());
        assert!(d.contains(CardId::new(21)));
        assert!(!d.contains(CardId::new(22)));
        assert_eq!(d.position_of(CardId::new(3)), Some(3));
        assert_eq!(d.find(CardId::new(0)).map(|c| c.name()), Some("The Fool"));
    }

    #[test]
    fn empty_deck_shuffles_to_empty() {
        let d = Deck::default();
        assert!(d.shuffled_seeded(1).is_empty());
    }
}
