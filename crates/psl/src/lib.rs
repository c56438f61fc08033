//! # psl
//!
//! Reduction of PSL properties to the core LTL and CTL consumed by model-checking
//! engines.
//!
//! A property goes through:
//!
//! 1. expansion of `forall` / `forany` replicators
//! 2. for supported linear-time properties, removal of SEREs and suffix implications
//!    followed by lowering to core LTL
//! 3. for branching-time (OBE) properties, lowering to core CTL
//!
//! Anything else is rejected with the first unsupported construct. A property is
//! reduced completely or not at all.
//!
//! ## Quick Start
//!
//! ```rust
//! use psl::prelude::*;
//!
//! let mut session = Session::new();
//! let arena = session.arena_mut();
//! let (req, ack) = (arena.atom("req"), arena.atom("ack"));
//! let (req, ack) = (arena.sere(req), arena.sere(ack));
//! let implication = arena.suffix_implication(Op::PipeEqGt, req, ack, true);
//! let property = arena.unary(Op::Always, implication);
//!
//! let reduced = session.reduce_to_core(property).unwrap();
//! assert_eq!(reduced.logic, CoreLogic::Ltl);
//! assert_eq!(
//!     session.display(reduced.term).to_string(),
//!     "G((!req | (req & X(ack))))"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod reducer;
pub mod session;

pub use psl_classify as classify;
pub use psl_core as core;
pub use psl_lower as lower;
pub use psl_replicate as replicate;
pub use psl_sere as sere;

pub use reducer::{reduce_to_core, CoreLogic, CoreTerm, ReduceOptions, Reducer};
pub use session::Session;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::reducer::{reduce_to_core, CoreLogic, CoreTerm, ReduceOptions, Reducer};
    pub use crate::session::Session;
    pub use psl_classify::Classification;
    pub use psl_core::{
        ConstantTable, LiteralResolver, NumberLiterals, Op, PslError, PslResult, Target,
        TermArena, TermHandle,
    };
    pub use psl_lower::NextRangeExpansion;
}
