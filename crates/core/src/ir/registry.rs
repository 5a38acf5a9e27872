//! Run-scoped set of emitted declaration names.

use indexmap::IndexSet;

/// Every declaration name claimed so far, in claim order.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    names: IndexSet<String>,
}

impl NameRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `base`, or `base` followed by the smallest non-negative integer
    /// that is still free. The returned name is registered.
    pub fn claim(&mut self, base: &str) -> String {
        if self.names.insert(base.to_string()) {
            return base.to_string();
        }

        let mut counter: u64 = 0;
        loop {
            let candidate = format!("{base}{counter}");
            if self.names.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Whether `name` has been claimed.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of claimed names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing has been claimed.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Claimed names in claim order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
