//! # psl-sere
//!
//! Reduction of sequential extended regular expressions (SEREs) to LTL.
//!
//! This crate provides:
//!
//! - Unrolling of counted repetitions `r[*n]`
//! - Removal of `[*]` and `[+]` through strong until and `eventually!` holes
//! - Rewriting of suffix implications `r |-> p` and `r |=> p`
//! - Point-wise merging of `&`, `&&` and fusion `:`
//! - Hoisting of SERE disjunctions and the final collapse of chains into `X!` nests
//!
//! ## Design Principles
//!
//! - **Positional rewriting**: chains are split by position, never by comparing
//!   elements, so hash-consed duplicates inside a chain are safe
//! - **Absent means empty**: a SERE that only matches the empty sequence is
//!   represented by an absent term until the very end, where it becomes `true`
//! - **Fixed point**: the merging passes run until none of them changes the term

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod chain;
pub mod reducer;

mod proptests;

pub use reducer::{remove_sere, ReductionStats, SereReducer};
