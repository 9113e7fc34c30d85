use std::collections::{BTreeMap, btree_map};

use crate::Value;

/// Occurrence counts of the output values observed for one input vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputCounter {
    counts: BTreeMap<Value, u32>,
}

impl OutputCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `value`, saturating at `u32::MAX`. Zero
    /// counts are ignored.
    pub fn add(&mut self, value: Value, count: u32) {
        if count > 0 {
            let entry = self.counts.entry(value).or_default();
            *entry = entry.saturating_add(count);
        }
    }

    /// Number of occurrences of `value` (zero when never observed).
    #[must_use]
    pub fn get(&self, value: &Value) -> u32 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Sum of all occurrence counts.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.counts.values().fold(0, |total, count| total.saturating_add(*count))
    }

    /// Count of the most frequent value, i.e. the most observations a single
    /// prediction can satisfy for this input.
    #[must_use]
    pub fn majority_count(&self) -> u32 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Number of distinct output values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, u32)> + '_ {
        self.counts.iter().map(|(v, c)| (v, *c))
    }
}

impl FromIterator<(Value, u32)> for OutputCounter {
    fn from_iter<I: IntoIterator<Item = (Value, u32)>>(iter: I) -> Self {
        let mut counter = Self::new();
        for (value, count) in iter {
            counter.add(value, count);
        }
        counter
    }
}

impl<'a> IntoIterator for &'a OutputCounter {
    type Item = (&'a Value, &'a u32);
    type IntoIter = btree_map::Iter<'a, Value, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
