use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};
use tarot_fan::cards::{Card, CardId, ContentRef};
use tarot_fan::config::FanConfig;
use tarot_fan::deck::Deck;
use tarot_fan::reading::Reading;
use tarot_fan::tarot;
use tarot_fan::viewport::{Platform, Viewport};

fn numbered(n: usize) -> Vec<Card> {
    (0..n as u32).map(|i| Card::new(CardId::new(i), format!("card {i}"), ContentRef::default())).collect()
}

fn sorted_ids(deck: &Deck) -> Vec<CardId> {
    let mut ids: Vec<_> = deck.ids().collect();
    ids.sort();
    ids
}

proptest! {
    #[test]
    fn shuffle_is_a_permutation(n in 0usize..120, seed in any::<u64>()) {
        let deck = Deck::from_cards(numbered(n));
        let shuffled = deck.shuffled_seeded(seed);
        prop_assert_eq!(shuffled.len(), n);
        prop_assert_eq!(sorted_ids(&shuffled), sorted_ids(&deck));
    }

    #[test]
    fn reading_shuffles_keep_composition(seed in any::<u64>(), rounds in 1usize..5) {
        let cfg = FanConfig { reshuffle_delay_ms: 0, seed: Some(seed), ..FanConfig::default() };
        let mut r = Reading::new(tarot::full_deck(), Viewport::new(400.0, Platform::Touch), cfg);
        let original = sorted_ids(r.deck());
        let t0 = Instant::now();
        for i in 0..rounds {
            r.shuffle(t0 + Duration::from_millis(i as u64));
            prop_assert_eq!(sorted_ids(r.deck()), original.clone());
        }
    }
}

/// Chi-square of every card's landing position against uniform.
#[test]
fn card_positions_are_uniform() {
    const N: usize = 6;
    const TRIALS: usize = 60_000;
    let deck = Deck::from_cards(numbered(N));
    let mut rng = ChaCha8Rng::seed_from_u64(0x7a40);
    let mut counts = [[0usize; N]; N];
    for _ in 0..TRIALS {
        let shuffled = deck.shuffled_with(&mut rng);
        for (pos, id) in shuffled.ids().enumerate() {
            counts[id.value() as usize][pos] += 1;
        }
    }
    let expected = TRIALS as f64 / N as f64;
    for (card, row) in counts.iter().enumerate() {
        let chi2: f64 = row
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum();
        // df = 5; 40 is far beyond the 1e-6 tail, while a biased shuffle
        // lands in the hundreds at this trial count
        assert!(chi2 < 40.0, "card {card} chi2 {chi2:.1}, counts {row:?}");
    }
}
