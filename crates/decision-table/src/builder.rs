//! Builder utilities for ergonomic table construction.
//!
//! Instead of writing `Box::new(When::new(...))` for every row, tables can be
//! declared with `when(...)`, `pick(...)` and `otherwise(...)`.

use crate::{Pick, Rule, When};

/// Creates a predicate/outcome row.
///
/// Shorthand for `Box::new(When::new(name, predicate, outcome))`.
#[inline]
pub fn when<C: 'static, O: 'static>(
    name: &'static str,
    predicate: fn(&C) -> bool,
    outcome: fn(&C) -> O,
) -> Box<dyn Rule<C, O>> {
    Box::new(When::new(name, predicate, outcome))
}

/// Creates a search row that applies only when the search finds something.
///
/// Shorthand for `Box::new(Pick::new(name, pick))`.
#[inline]
pub fn pick<C: 'static, O: 'static>(
    name: &'static str,
    pick: fn(&C) -> Option<O>,
) -> Box<dyn Rule<C, O>> {
    Box::new(Pick::new(name, pick))
}

/// Creates a catch-all row. Place it last.
#[inline]
pub fn otherwise<C: 'static, O: 'static>(
    name: &'static str,
    outcome: fn(&C) -> O,
) -> Box<dyn Rule<C, O>> {
    Box::new(When::new(name, always, outcome))
}

fn always<C>(_: &C) -> bool {
    true
}
