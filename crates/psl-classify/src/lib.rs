//! # psl-classify
//!
//! Structural classification of PSL formulas.
//!
//! The predicates decide which reduction path a property takes:
//!
//! - **Propositional**: no temporal operator at all
//! - **LTL**: foundation-language operators, bounded next-time forms and SEREs
//! - **OBE**: branching-time (CTL) operators over propositional structure
//!
//! [`Classifier::check_handled`] additionally vets a linear-time formula against the
//! fragment the SERE reduction supports, and reports the first construct outside it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod classifier;
pub mod predicates;

pub use classifier::{is_handled_ltl, Classification, Classifier};
pub use predicates::{
    contains_next, is_emptystar_free, is_id, is_leaf, is_ltl, is_obe, is_propositional,
    is_sere, is_star_free, is_trans_propositional,
};
