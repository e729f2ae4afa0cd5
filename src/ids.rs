// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

/// Source of record identifiers (`ord-1`, `tx-2`, ...).
pub trait IdSource {
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Monotonic counter shared by every record kind.
#[derive(Debug, Clone)]
pub struct Sequence {
    next: u64,
}

impl Sequence {
    pub fn new() -> Self {
        Sequence { next: 1 }
    }

    /// Starts after the largest numeric suffix found in `existing`.
    pub fn after<'a, I>(existing: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let max = existing
            .into_iter()
            .filter_map(|id| id.rsplit('-').next())
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Sequence {
            next: max.saturating_add(1),
        }
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for Sequence {
    fn next_id(&mut self, prefix: &str) -> String {
        let n = self.next;
        self.next = self.next.saturating_add(1);
        format!("{}-{}", prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic_across_prefixes() {
        let mut s = Sequence::new();
        assert_eq!(s.next_id("tx"), "tx-1");
        assert_eq!(s.next_id("ord"), "ord-2");
    }

    #[test]
    fn after_skips_past_existing_ids() {
        let mut s = Sequence::after(["tx-3", "ord-11", "legacy", "1700000000000"]);
        assert_eq!(s.next_id("bk"), "bk-1700000000001");

        let mut s = Sequence::after(["tx-3", "ord-11"]);
        assert_eq!(s.next_id("bk"), "bk-12");
    }
}
