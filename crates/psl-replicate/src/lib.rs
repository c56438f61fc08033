//! # psl-replicate
//!
//! Expansion of bounded `forall` / `forany` replicators.
//!
//! A replicated property `forall i in S : φ` is replaced by the conjunction of `φ`
//! instantiated at every value of `S` (`forany` by the disjunction), in declaration
//! order. Value sets may be `boolean`, lists of numbers or identifiers, and literal
//! ranges.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod expander;
mod value_set;

mod proptests;

pub use expander::{expand_replicators, ReplicatorExpander};
