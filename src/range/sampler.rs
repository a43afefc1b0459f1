//! Sampling concrete combos for a designation.
//!
//! The sampler keeps, per designation, the table of every matching combo in
//! a full deck. A draw filters that table against the removed-card mask and
//! picks uniformly among the survivors, which is the same set produced by
//! enumerating every available two-card pair and keeping the matches.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashMap;

use super::designation::Designation;
use crate::cards::card::{Deck, HoleCards};

/// Draws combos consistent with a designation and a set of removed cards.
#[derive(Debug, Clone)]
pub struct HandSampler {
    tables: FxHashMap<Designation, Vec<HoleCards>>,
}

impl HandSampler {
    /// Create a sampler with combo tables for the given designations.
    pub fn with_designations<'a, I>(designations: I) -> Self
    where
        I: IntoIterator<Item = &'a Designation>,
    {
        let mut tables = FxHashMap::default();
        for designation in designations {
            tables
                .entry(*designation)
                .or_insert_with(|| designation.combos());
        }
        Self { tables }
    }

    /// Number of designations with a precomputed table.
    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    /// Draw a combo matching `designation` that avoids every card in `removed`.
    ///
    /// Returns `None` when the visible cards leave no matching combo. A
    /// designation without a table is drawn with [`sample_from_deck`].
    pub fn sample<R: Rng + ?Sized>(
        &self,
        designation: &Designation,
        removed: u64,
        rng: &mut R,
    ) -> Option<HoleCards> {
        match self.tables.get(designation) {
            Some(table) => {
                let available: Vec<HoleCards> = table
                    .iter()
                    .filter(|combo| combo.mask() & removed == 0)
                    .copied()
                    .collect();
                available.choose(rng).copied()
            }
            None => sample_from_deck(designation, &Deck::without_mask(removed), rng),
        }
    }
}

/// Enumerate all matching two-card combos in `deck` and pick one uniformly.
///
/// This is the reference enumeration the combo tables reproduce; it scans
/// every available pair on each call.
pub fn sample_from_deck<R: Rng + ?Sized>(
    designation: &Designation,
    deck: &Deck,
    rng: &mut R,
) -> Option<HoleCards> {
    let cards: Vec<_> = deck.cards().collect();
    let mut combos = Vec::new();
    for (i, &c1) in cards.iter().enumerate() {
        for &c2 in &cards[i + 1..] {
            if designation.matches(c1, c2) {
                combos.push(HoleCards::new(c1, c2));
            }
        }
    }
    combos.choose(rng).copied()
}
