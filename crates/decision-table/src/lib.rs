//! Ordered rule tables for fixed-priority decision making.
//!
//! A [`DecisionTable`] is a list of rules evaluated top-down against a
//! read-only context. The first rule that produces an outcome wins, which makes
//! precedence explicit and lets each rule be tested on its own.
//!
//! - **Deterministic**: evaluation order is the declaration order
//! - **Stateless**: rules read the context, they never mutate it
//! - **Zero dependencies**: pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Rule`]: core trait for all table rows
//! - [`When`]: predicate paired with an outcome function
//! - [`Pick`]: a rule that searches the context and may come up empty
//! - [`Decision`]: the winning outcome together with the row that produced it

pub mod builder;
pub mod rule;
pub mod table;

pub use builder::{otherwise, pick, when};
pub use rule::{Pick, Rule, When};
pub use table::{Decision, DecisionTable};
