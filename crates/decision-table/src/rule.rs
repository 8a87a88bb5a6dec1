//! Core rule trait and the two stock rule shapes.
//!
//! Rules are generic over a context type `C` and an outcome type `O`. They
//! hold plain function pointers so tables can be built once and shared.

/// A single row of a decision table.
pub trait Rule<C, O>: Send + Sync {
    /// Short identifier used in logs and tests.
    fn name(&self) -> &'static str;

    /// Evaluates the rule.
    ///
    /// Returns `Some(outcome)` when the rule applies, `None` to fall through to
    /// the next row.
    fn evaluate(&self, ctx: &C) -> Option<O>;
}

/// Blanket implementation for boxed rules.
///
/// This allows `Box<dyn Rule<C, O>>` to be used wherever a rule is expected,
/// enabling heterogeneous tables.
impl<C, O> Rule<C, O> for Box<dyn Rule<C, O>> {
    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn evaluate(&self, ctx: &C) -> Option<O> {
        (**self).evaluate(ctx)
    }
}

/// A predicate paired with an outcome.
///
/// The outcome function only runs when the predicate holds.
pub struct When<C, O> {
    name: &'static str,
    predicate: fn(&C) -> bool,
    outcome: fn(&C) -> O,
}

impl<C, O> When<C, O> {
    pub fn new(name: &'static str, predicate: fn(&C) -> bool, outcome: fn(&C) -> O) -> Self {
        Self {
            name,
            predicate,
            outcome,
        }
    }
}

impl<C, O> Rule<C, O> for When<C, O> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn evaluate(&self, ctx: &C) -> Option<O> {
        if (self.predicate)(ctx) {
            Some((self.outcome)(ctx))
        } else {
            None
        }
    }
}

/// A rule whose applicability is decided by the search itself.
///
/// Useful for "nearest entity in category X" rows where an empty category means
/// the row does not apply.
pub struct Pick<C, O> {
    name: &'static str,
    pick: fn(&C) -> Option<O>,
}

impl<C, O> Pick<C, O> {
    pub fn new(name: &'static str, pick: fn(&C) -> Option<O>) -> Self {
        Self { name, pick }
    }
}

impl<C, O> Rule<C, O> for Pick<C, O> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn evaluate(&self, ctx: &C) -> Option<O> {
        (self.pick)(ctx)
    }
}
