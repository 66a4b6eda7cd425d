use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::domain::{Category, Statement};

/// Sample a category-balanced, shuffled question set from `bank`.
///
/// Every category contributes `min(target_size / 4, smallest category)` statements, so the
/// result can be shorter than `target_size` and is empty when that quota is zero.
pub fn build_quiz_set<R>(bank: &[Statement], target_size: usize, rng: &mut R) -> Vec<Statement>
where
    R: Rng + ?Sized,
{
    let mut partitions: BTreeMap<Category, Vec<&Statement>> =
        Category::ALL.iter().map(|category| (*category, Vec::new())).collect();
    for statement in bank {
        partitions
            .entry(statement.category)
            .or_default()
            .push(statement);
    }

    let smallest = partitions.values().map(Vec::len).min().unwrap_or(0);
    let per_category = (target_size / Category::ALL.len()).min(smallest);
    if per_category == 0 {
        return Vec::new();
    }

    let mut selected = Vec::with_capacity(per_category * Category::ALL.len());
    for category in Category::ALL {
        if let Some(mut pool) = partitions.remove(&category) {
            pool.shuffle(&mut *rng);
            selected.extend(pool.into_iter().take(per_category).cloned());
        }
    }

    selected.shuffle(&mut *rng);
    selected
}

/// Owns the random source for question sampling; seed it for reproducible sets.
pub struct QuizBuilder {
    rng: StdRng,
}

impl QuizBuilder {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn build(&mut self, bank: &[Statement], target_size: usize) -> Vec<Statement> {
        build_quiz_set(bank, target_size, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::bank::all_statements;
    use std::collections::BTreeSet;

    fn per_category(set: &[Statement]) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for statement in set {
            *counts.entry(statement.category).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn full_target_takes_five_per_category() {
        let bank = all_statements();
        let set = QuizBuilder::seeded(7).build(&bank, 20);

        assert_eq!(set.len(), 20);
        assert!(per_category(&set).values().all(|count| *count == 5));
    }

    #[test]
    fn output_has_unique_ids_and_is_a_multiple_of_four() {
        let bank = all_statements();
        let mut builder = QuizBuilder::seeded(11);
        for target in 4..=23 {
            let set = builder.build(&bank, target);
            let ids: BTreeSet<_> = set.iter().map(|statement| statement.id).collect();
            assert_eq!(ids.len(), set.len());
            assert_eq!(set.len() % 4, 0);
            assert_eq!(set.len(), (target / 4).min(5) * 4);
        }
    }

    #[test]
    fn oversized_target_is_clamped_to_smallest_category() {
        let mut bank = all_statements();
        bank.retain(|statement| statement.id.0 != 20 && statement.id.0 != 19);
        let set = QuizBuilder::seeded(3).build(&bank, 40);

        assert_eq!(set.len(), 12);
        assert!(per_category(&set).values().all(|count| *count == 3));
    }

    #[test]
    fn degenerate_inputs_yield_empty_sets() {
        let bank = all_statements();
        let mut builder = QuizBuilder::seeded(1);
        assert!(builder.build(&bank, 3).is_empty());
        assert!(builder.build(&[], 20).is_empty());

        let economic_only: Vec<_> = bank
            .into_iter()
            .filter(|statement| statement.category == Category::Economic)
            .collect();
        assert!(builder.build(&economic_only, 20).is_empty());
    }

    #[test]
    fn same_seed_reproduces_the_same_set() {
        let bank = all_statements();
        let first = QuizBuilder::seeded(99).build(&bank, 12);
        let second = QuizBuilder::seeded(99).build(&bank, 12);
        assert_eq!(first, second);
    }

    #[test]
    fn repeated_builds_keep_category_balance() {
        let bank = all_statements();
        let mut builder = QuizBuilder::from_entropy();
        for _ in 0..25 {
            let set = builder.build(&bank, 8);
            assert_eq!(set.len(), 8);
            assert!(per_category(&set).values().all(|count| *count == 2));
        }
    }
}
