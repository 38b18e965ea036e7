//! Integer array dataset with per-element visual tags

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Visual tag on one array element. Rendering is external; the engine
/// only stores these so the routine's progress is observable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tag {
    #[default]
    Clear,
    Compared,
    Swapped,
    Pivot,
    Sorted,
    Visited,
}

/// Values plus a parallel tag per element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayData {
    values: Vec<i64>,
    tags: Vec<Tag>,
}

impl ArrayData {
    pub fn from_values(values: Vec<i64>) -> Self {
        let tags = vec![Tag::Clear; values.len()];
        ArrayData { values, tags }
    }

    /// Seeded random values in 0..1000.
    pub fn random(len: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let values = (0..len).map(|_| rng.gen_range(0..1000)).collect();
        Self::from_values(values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<i64> {
        self.values.get(index).copied()
    }

    pub fn set(&mut self, index: usize, value: i64) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
    }

    pub fn tag(&self, index: usize) -> Tag {
        self.tags.get(index).copied().unwrap_or_default()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn set_tag(&mut self, index: usize, tag: Tag) {
        if let Some(slot) = self.tags.get_mut(index) {
            *slot = tag;
        }
    }

    /// Reset every tag to [`Tag::Clear`].
    pub fn clear_tags(&mut self) {
        for t in &mut self.tags {
            *t = Tag::Clear;
        }
    }

    pub fn is_sorted_ascending(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_is_reproducible() {
        let a = ArrayData::random(32, 7);
        let b = ArrayData::random(32, 7);
        assert_eq!(a, b);
        assert_ne!(a, ArrayData::random(32, 8));
    }

    #[test]
    fn tags_track_elements() {
        let mut a = ArrayData::from_values(vec![5, 2, 9]);
        a.set_tag(1, Tag::Compared);
        assert_eq!(a.tag(1), Tag::Compared);
        assert_eq!(a.tag(0), Tag::Clear);
        a.clear_tags();
        assert_eq!(a.tag(1), Tag::Clear);
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut a = ArrayData::from_values(vec![1]);
        a.set(5, 42);
        a.set_tag(5, Tag::Pivot);
        assert_eq!(a.values(), &[1]);
    }

    #[test]
    fn sortedness_check() {
        assert!(ArrayData::from_values(vec![1, 2, 2, 3]).is_sorted_ascending());
        assert!(!ArrayData::from_values(vec![2, 1]).is_sorted_ascending());
        assert!(ArrayData::from_values(vec![]).is_sorted_ascending());
    }
}
