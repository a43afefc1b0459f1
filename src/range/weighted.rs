//! Weighted opponent ranges.
//!
//! Range text is a comma-separated list of `DESIGNATION` or
//! `DESIGNATION:FREQUENCY` tokens, e.g. `AA:1,AKs:0.5,72o`. Each entry's
//! sampling weight is its base combo count times the declared frequency
//! (1.0 when omitted). Weights are used as relative masses and are never
//! normalised.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

use super::designation::Designation;
use super::sampler::HandSampler;
use super::RangeParseError;
use crate::cards::card::HoleCards;

/// A parsed opponent range ready for sampling.
#[derive(Debug, Clone)]
pub struct WeightedRange {
    /// (designation, weight) pairs in input order.
    entries: Vec<(Designation, f64)>,
    /// Distribution over `entries` by weight.
    index: WeightedIndex<f64>,
    /// Per-designation combo tables.
    sampler: HandSampler,
}

impl WeightedRange {
    /// Parse range text.
    pub fn parse(text: &str) -> Result<Self, RangeParseError> {
        let mut entries = Vec::new();

        for token in text.split(',').map(str::trim) {
            if token.is_empty() {
                continue;
            }
            entries.push(Self::parse_token(token)?);
        }

        Self::from_entries(entries)
    }

    /// Build a range from explicit (designation, weight) pairs.
    pub fn from_entries(entries: Vec<(Designation, f64)>) -> Result<Self, RangeParseError> {
        if entries.is_empty() {
            return Err(RangeParseError::EmptyRange);
        }
        if let Some((designation, weight)) =
            entries.iter().find(|(_, w)| !w.is_finite() || *w < 0.0)
        {
            return Err(RangeParseError::InvalidFrequency(format!("{}:{}", designation, weight)));
        }

        let index = WeightedIndex::new(entries.iter().map(|(_, w)| *w))
            .map_err(|_| RangeParseError::ZeroWeight)?;
        let sampler = HandSampler::with_designations(entries.iter().map(|(d, _)| d));

        Ok(Self {
            entries,
            index,
            sampler,
        })
    }

    /// Parse one `DESIGNATION[:FREQUENCY]` token.
    fn parse_token(token: &str) -> Result<(Designation, f64), RangeParseError> {
        let parts: Vec<&str> = token.split(':').collect();
        let (designation, frequency) = match parts.as_slice() {
            [designation] => (*designation, 1.0),
            [designation, frequency] => {
                let frequency = frequency.trim();
                let value: f64 = frequency
                    .parse()
                    .map_err(|_| RangeParseError::InvalidFrequency(frequency.to_string()))?;
                if !value.is_finite() || value < 0.0 {
                    return Err(RangeParseError::InvalidFrequency(frequency.to_string()));
                }
                (*designation, value)
            }
            _ => return Err(RangeParseError::InvalidFormat(token.to_string())),
        };

        let designation: Designation = designation.trim().parse()?;
        Ok((designation, designation.base_weight() * frequency))
    }

    /// The (designation, weight) pairs in input order.
    pub fn entries(&self) -> &[(Designation, f64)] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A parsed range always has at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Draw a designation with probability proportional to its weight.
    pub fn sample_designation<R: Rng + ?Sized>(&self, rng: &mut R) -> &Designation {
        &self.entries[self.index.sample(rng)].0
    }

    /// Draw a designation, then a combo for it avoiding `removed`.
    ///
    /// `None` means the drawn designation has no combo left given the
    /// visible cards; callers skip that iteration.
    pub fn sample_combo<R: Rng + ?Sized>(&self, removed: u64, rng: &mut R) -> Option<HoleCards> {
        let designation = *self.sample_designation(rng);
        self.sampler.sample(&designation, removed, rng)
    }
}

impl FromStr for WeightedRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for WeightedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (designation, weight)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{}", designation, weight / designation.base_weight())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn weight_of(text: &str) -> f64 {
        WeightedRange::parse(text).unwrap().entries()[0].1
    }

    #[test]
    fn test_base_weights() {
        assert_eq!(weight_of("AA:1"), 12.0);
        assert_eq!(weight_of("AKs:1"), 4.0);
        assert_eq!(weight_of("AKo:1"), 12.0);
        assert_eq!(weight_of("AK:1"), 16.0);
    }

    #[test]
    fn test_frequency_scales_weight() {
        assert_eq!(weight_of("AKs:0.5"), 2.0);
        assert_eq!(weight_of("QQ"), 12.0);
        assert_eq!(weight_of(" 72o : 0.25 "), 3.0);
        assert_eq!(weight_of("AKz:1"), 16.0);
    }

    #[test]
    fn test_parse_list() {
        let range = WeightedRange::parse("AA:1, AKs:0.5,72o:1,").unwrap();
        assert_eq!(range.len(), 3);
        assert_eq!(range.total_weight(), 12.0 + 2.0 + 12.0);
        assert_eq!(range.to_string(), "AA:1,AKs:0.5,72o:1");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            WeightedRange::parse("AA:abc"),
            Err(RangeParseError::InvalidFrequency(_))
        ));
        assert!(matches!(
            WeightedRange::parse("AA:-1"),
            Err(RangeParseError::InvalidFrequency(_))
        ));
        assert!(matches!(
            WeightedRange::parse("AA:1:2"),
            Err(RangeParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            WeightedRange::parse("AKQJ"),
            Err(RangeParseError::InvalidFormat(_))
        ));
        assert!(matches!(WeightedRange::parse("ZZ"), Err(RangeParseError::InvalidRank('Z'))));
        assert!(matches!(WeightedRange::parse(""), Err(RangeParseError::EmptyRange)));
        assert!(matches!(WeightedRange::parse(" , ,"), Err(RangeParseError::EmptyRange)));
        assert!(matches!(WeightedRange::parse("AA:0,KK:0"), Err(RangeParseError::ZeroWeight)));
    }

    #[test]
    fn test_zero_weight_entry_is_never_drawn() {
        let range = WeightedRange::parse("AA:0,KK:1").unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            assert_eq!(range.sample_designation(&mut rng).to_string(), "KK");
        }
    }

    #[test]
    fn test_weighted_draws_fit_chi_square() {
        // Weights 12 : 4 : 12 : 16
        let range = WeightedRange::parse("AA,AKs,AKo,QJ").unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let draws = 40_000;
        let mut counts = [0usize; 4];
        for _ in 0..draws {
            let drawn = range.sample_designation(&mut rng);
            let idx = range.entries().iter().position(|(d, _)| d == drawn).unwrap();
            counts[idx] += 1;
        }

        let total = range.total_weight();
        let chi_square: f64 = range
            .entries()
            .iter()
            .zip(counts.iter())
            .map(|((_, w), &observed)| {
                let expected = draws as f64 * w / total;
                (observed as f64 - expected).powi(2) / expected
            })
            .sum();

        // 3 degrees of freedom, p = 0.001 critical value
        assert!(chi_square < 16.27, "chi-square {} too large, counts {:?}", chi_square, counts);
    }

    #[test]
    fn test_sample_combo_avoids_removed() {
        let range = WeightedRange::parse("AA,KK").unwrap();
        let removed = crate::cards::card::parse_cards("AhAsAd")
            .unwrap()
            .iter()
            .fold(0u64, |m, c| m | c.mask());
        let mut rng = StdRng::seed_from_u64(9);
        let mut skipped = 0;
        for _ in 0..1000 {
            match range.sample_combo(removed, &mut rng) {
                Some(combo) => assert_eq!(combo.card1.to_string().chars().next(), Some('K')),
                None => skipped += 1,
            }
        }
        // AA is fully blocked, so roughly half the draws come back empty
        assert!(skipped > 400 && skipped < 600, "skipped {}", skipped);
    }
}
