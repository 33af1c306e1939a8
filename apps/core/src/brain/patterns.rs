//! Ordered regex tables shared by the input and mood analyzers.
//!
//! A table maps each category to its patterns, in declaration order. Tables
//! are built once behind a `LazyLock` and never mutated afterwards.

use regex::Regex;

/// Patterns for one category
pub(crate) struct PatternGroup<C> {
    pub category: C,
    pub patterns: Vec<Regex>,
}

/// Category → patterns, evaluated in declaration order
pub(crate) struct PatternTable<C> {
    groups: Vec<PatternGroup<C>>,
}

impl<C: Copy> PatternTable<C> {
    /// Compile a table. Every pattern is made case-insensitive.
    // NOTE: expect() is acceptable here: the tables are literals and are
    // exercised by the `all_tables_compile` tests.
    pub fn new(table: &[(C, &[&str])]) -> Self {
        let groups = table
            .iter()
            .map(|(category, sources)| PatternGroup {
                category: *category,
                patterns: sources
                    .iter()
                    .map(|source| {
                        Regex::new(&format!("(?i){source}"))
                            .expect("Invalid regex in pattern table")
                    })
                    .collect(),
            })
            .collect();

        Self { groups }
    }

    /// Categories with at least one matching pattern, in table order.
    ///
    /// Pattern testing for a category stops at its first match, so each
    /// category is reported at most once.
    pub fn detect(&self, text: &str) -> Vec<C> {
        self.groups
            .iter()
            .filter(|group| group.patterns.iter().any(|p| p.is_match(text)))
            .map(|group| group.category)
            .collect()
    }

    /// Total number of matches per category, in table order.
    pub fn score(&self, text: &str) -> Vec<(C, usize)> {
        self.groups
            .iter()
            .map(|group| {
                let hits = group
                    .patterns
                    .iter()
                    .map(|p| p.find_iter(text).count())
                    .sum();
                (group.category, hits)
            })
            .collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.groups.len()
    }
}
