//! # psl-core
//!
//! Term representation shared by every PSL reduction pass.
//!
//! This crate provides:
//! - A hash-consed term arena with 32-bit handles and optional children
//! - The operator vocabulary and the token / PSL / core dialect tables
//! - Makers and views for the composite PSL shapes (SEREs, replicators, ...)
//! - Literal resolution and the error type shared by the passes
//!
//! ## Design Principles
//!
//! - **Hash-Consing**: structurally equal terms share one handle, so equality is O(1)
//! - **Append-Only**: rewriting builds new nodes and never mutates existing ones
//! - **Absent Is Not False**: a missing child is `None`, distinct from the `FALSE` leaf

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod dialect;
pub mod display;
pub mod error;
pub mod handle;
pub mod intern;
pub mod literal;
pub mod op;
pub mod shape;
pub mod term;

mod proptests;

pub use arena::TermArena;
pub use dialect::{Dialect, Symbol, Target, Token};
pub use display::TermDisplay;
pub use error::{PslError, PslResult, INVALID_RANGE};
pub use handle::{AtomId, TermHandle};
pub use literal::{ConstantTable, LiteralResolver, NumberLiterals};
pub use op::Op;
pub use shape::{ExtendedNext, RepeatedSere, Replicator, SuffixImplication};
pub use term::TermNode;
