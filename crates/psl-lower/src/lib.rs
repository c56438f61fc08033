//! # psl-lower
//!
//! Lowering of SERE-free PSL formulas to the core LTL and CTL vocabularies.
//!
//! This crate provides:
//!
//! - [`Lowering`]: the driver for linear-time and branching-time formulas
//! - Unrolling of the extended next-time family (`X[n]`, `next_a[lo..hi]`,
//!   `next_event(b)[n]`, ...), with a choice of [`NextRangeExpansion`]
//! - Rewriting of `never`, the weak and inclusive `until` forms and `before` into
//!   `U`, `G` and Boolean connectives
//! - `ite` lowering and in-place expansion of replicated properties
//! - [`convert_id`] for identifiers
//!
//! Every constructed operator goes through [`Target::op`](psl_core::Target::op), so
//! the same passes emit either PSL or core symbols.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod id;
pub mod lowering;

mod proptests;

pub use id::convert_id;
pub use lowering::{lower_ctl, lower_ltl, Lowering, NextRangeExpansion};
