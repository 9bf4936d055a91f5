//! Deduplication and set comparison of line collections
//!
//! Every run owns its own seen-set. Membership test and insertion are O(1)
//! amortized through an `ahash`-keyed `hashbrown` set.

use ahash::RandomState;
use hashbrown::HashSet;

/// Trait for deduplication implementations
pub trait Deduplicator {
    /// Record `item`. Returns true if it had not been seen before.
    fn insert(&mut self, item: &str) -> bool;

    /// Get the number of unique items
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory HashSet-based deduplicator
pub struct MemoryDeduplicator {
    set: HashSet<String, RandomState>,
}

impl MemoryDeduplicator {
    pub fn new() -> Self {
        Self {
            set: HashSet::with_hasher(RandomState::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            set: HashSet::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Forget `item`. Returns true if it was present.
    pub fn remove(&mut self, item: &str) -> bool {
        self.set.remove(item)
    }
}

impl Default for MemoryDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Deduplicator for MemoryDeduplicator {
    fn insert(&mut self, item: &str) -> bool {
        if self.set.contains(item) {
            return false;
        }
        self.set.insert(item.to_string())
    }

    fn len(&self) -> usize {
        self.set.len()
    }
}

/// Accepts everything, used when deduplication is off
pub struct NoOpDeduplicator {
    count: usize,
}

impl NoOpDeduplicator {
    pub fn new() -> Self {
        Self { count: 0 }
    }
}

impl Default for NoOpDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Deduplicator for NoOpDeduplicator {
    fn insert(&mut self, _item: &str) -> bool {
        self.count += 1;
        true
    }

    fn len(&self) -> usize {
        self.count
    }
}

/// Pick the deduplicator for a run
pub fn create_deduplicator(enabled: bool) -> Box<dyn Deduplicator> {
    if enabled {
        Box::new(MemoryDeduplicator::new())
    } else {
        Box::new(NoOpDeduplicator::new())
    }
}

/// Unique lines in first-seen order.
pub fn dedupe<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String> + AsRef<str>,
{
    let mut seen = MemoryDeduplicator::new();
    lines
        .into_iter()
        .filter(|line| seen.insert(line.as_ref()))
        .map(Into::into)
        .collect()
}

/// Output of [`diff_and_intersect`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Lines of A also in B, deduplicated, in A's order
    pub same: Vec<String>,
    /// Lines only in A (A's order), then lines only in B (B's order).
    /// Repeated occurrences are kept.
    pub diff: Vec<String>,
}

/// Partition two line sequences into shared and one-sided lines in
/// O(|A| + |B|).
pub fn diff_and_intersect(a: &[String], b: &[String]) -> Comparison {
    let set_a: HashSet<&str, RandomState> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str, RandomState> = b.iter().map(String::as_str).collect();

    let mut emitted: HashSet<&str, RandomState> = HashSet::with_hasher(RandomState::new());
    let mut result = Comparison::default();

    for line in a {
        if set_b.contains(line.as_str()) {
            if emitted.insert(line.as_str()) {
                result.same.push(line.clone());
            }
        } else {
            result.diff.push(line.clone());
        }
    }

    result.diff.extend(
        b.iter()
            .filter(|line| !set_a.contains(line.as_str()))
            .cloned(),
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_memory_dedup() {
        let mut dedup = MemoryDeduplicator::new();

        assert!(dedup.insert("13800000000"));
        assert!(dedup.insert("13900000000"));
        assert!(!dedup.insert("13800000000"));
        assert_eq!(dedup.len(), 2);

        assert!(dedup.remove("13800000000"));
        assert!(!dedup.remove("13800000000"));
        assert_eq!(dedup.len(), 1);
        assert!(dedup.insert("13800000000"));
    }

    #[test]
    fn test_presized_dedup() {
        let mut dedup = MemoryDeduplicator::with_capacity(16);
        assert!(dedup.is_empty());
        assert!(dedup.insert("1"));
        assert!(!dedup.insert("1"));
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn test_noop_dedup_accepts_everything() {
        let mut dedup = create_deduplicator(false);
        assert!(dedup.insert("1"));
        assert!(dedup.insert("1"));
        assert_eq!(dedup.len(), 2);
    }

    #[test]
    fn test_dedupe_keeps_first_seen_order() {
        let input = lines(&["3", "1", "3", "2", "1"]);
        assert_eq!(dedupe(input.iter().map(String::as_str)), lines(&["3", "1", "2"]));
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let input = lines(&["a", "b", "a", "c", "b", "b", "d"]);
        let once = dedupe(input);
        let twice = dedupe(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_diff_and_intersect() {
        let a = lines(&["1", "2", "2", "3", "4", "4"]);
        let b = lines(&["4", "5", "2", "5", "6"]);
        let cmp = diff_and_intersect(&a, &b);

        assert_eq!(cmp.same, lines(&["2", "4"]));
        assert_eq!(cmp.diff, lines(&["1", "3", "5", "5", "6"]));
    }

    #[test]
    fn test_diff_and_intersect_set_properties() {
        let a = lines(&["x", "y", "z", "y", "w"]);
        let b = lines(&["z", "q", "x", "r", "q"]);
        let cmp = diff_and_intersect(&a, &b);

        for line in &cmp.same {
            assert!(a.contains(line) && b.contains(line));
        }
        for line in &cmp.diff {
            assert!(a.contains(line) ^ b.contains(line));
        }

        let mut covered: Vec<String> = dedupe(cmp.same.iter().chain(cmp.diff.iter()).map(String::as_str));
        let mut union: Vec<String> = dedupe(a.iter().chain(b.iter()).map(String::as_str));
        covered.sort();
        union.sort();
        assert_eq!(covered, union);
    }

    #[test]
    fn test_diff_and_intersect_one_side_empty() {
        let a = lines(&["1", "1"]);
        let cmp = diff_and_intersect(&a, &[]);
        assert!(cmp.same.is_empty());
        assert_eq!(cmp.diff, a);
    }
}
