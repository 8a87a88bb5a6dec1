//! Top-down evaluation of rule lists.

use crate::Rule;

/// The outcome of a table evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision<O> {
    /// Zero-based row index of the winning rule.
    pub index: usize,
    /// Name of the winning rule.
    pub rule: &'static str,
    pub outcome: O,
}

/// Evaluates rules in declaration order until one applies.
///
/// # Semantics
///
/// - The first rule returning `Some` **stops evaluation** and wins
/// - A rule returning `None` falls through to the next row
/// - If no rule applies, [`DecisionTable::decide`] returns `None`
///
/// This is analogous to an `if / else if` ladder, but with each branch
/// inspectable by name and index.
pub struct DecisionTable<C, O> {
    rules: Vec<Box<dyn Rule<C, O>>>,
}

impl<C, O> DecisionTable<C, O> {
    /// Creates a table from the given rows.
    ///
    /// # Panics
    ///
    /// Panics if `rules` is empty. A table with no rows is meaningless and
    /// likely indicates a programming error.
    pub fn new(rules: Vec<Box<dyn Rule<C, O>>>) -> Self {
        assert!(!rules.is_empty(), "DecisionTable must have at least one rule");
        Self { rules }
    }

    /// Returns the first applicable rule's outcome.
    pub fn decide(&self, ctx: &C) -> Option<Decision<O>> {
        self.rules.iter().enumerate().find_map(|(index, rule)| {
            rule.evaluate(ctx).map(|outcome| Decision {
                index,
                rule: rule.name(),
                outcome,
            })
        })
    }
}
