//! Views over concatenation and fusion chains.
//!
//! A chain is a tree of `;` and `:` nodes whose leaves are *elements*: braces `{x}`
//! around a non-SERE `x`. Elements whose content is a strong until, a strong next or
//! an `eventually!` are *holes*, positions where a pending continuation is inserted
//! when the chain is finally collapsed into LTL.

use psl_classify::{is_id, is_leaf, is_propositional, is_sere};
use psl_core::{Op, RepeatedSere, TermArena, TermHandle};

/// `{b}` for a propositional `b`, under any number of braces.
pub(crate) fn is_atomic(arena: &TermArena, term: Option<TermHandle>) -> bool {
    if !arena.is_op(term, Op::Sere) {
        return false;
    }
    let inner = arena.left(term);
    is_propositional(arena, inner) || is_atomic(arena, inner)
}

/// Atoms, identifiers and leaves pass through every rewrite untouched.
pub(crate) fn is_inert(arena: &TermArena, term: Option<TermHandle>) -> bool {
    is_leaf(arena, term) || is_id(arena, term)
}

/// Strips braces that only wrap further SERE structure.
pub(crate) fn peel(arena: &TermArena, mut term: Option<TermHandle>) -> Option<TermHandle> {
    while arena.is_op(term, Op::Sere) && is_sere(arena, arena.left(term)) {
        term = arena.left(term);
    }
    term
}

/// Strips every brace, leaving the proposition or property inside.
pub(crate) fn unbrace(arena: &TermArena, mut term: Option<TermHandle>) -> Option<TermHandle> {
    while arena.is_op(term, Op::Sere) {
        term = arena.left(term);
    }
    term
}

pub(crate) fn repetition(arena: &TermArena, term: Option<TermHandle>) -> Option<RepeatedSere> {
    arena.as_repeated(peel(arena, term))
}

/// Unbounded `[*]` without an operand.
pub(crate) fn is_standalone_star(arena: &TermArena, term: Option<TermHandle>) -> bool {
    repetition(arena, term).is_some_and(|r| r.is_star() && r.is_standalone())
}

/// Unbounded `[+]` without an operand.
pub(crate) fn is_standalone_plus(arena: &TermArena, term: Option<TermHandle>) -> bool {
    repetition(arena, term).is_some_and(|r| r.is_plus() && r.is_standalone())
}

/// The proposition `b` of a `b[*]`.
pub(crate) fn propstar_operand(arena: &TermArena, term: Option<TermHandle>) -> Option<TermHandle> {
    let rep = repetition(arena, term).filter(RepeatedSere::is_star)?;
    unbrace(arena, rep.expr).filter(|&expr| is_propositional(arena, Some(expr)))
}

fn is_element(arena: &TermArena, term: Option<TermHandle>) -> bool {
    arena.is_op(term, Op::Sere) && !is_sere(arena, arena.left(term))
}

fn is_hole_element(arena: &TermArena, term: Option<TermHandle>) -> bool {
    matches!(
        arena.op(arena.left(term)),
        Some(Op::UntilBang | Op::XBang | Op::EventuallyBang)
    )
}

/// A `;` chain of hole-free elements, possibly a single element.
pub(crate) fn is_concat_holes_free(arena: &TermArena, term: Option<TermHandle>) -> bool {
    if is_element(arena, term) {
        return !is_hole_element(arena, term);
    }
    match arena.op(term) {
        Some(Op::Sere) => is_concat_holes_free(arena, arena.left(term)),
        Some(Op::SereConcat) => {
            is_concat_holes_free(arena, arena.left(term))
                && is_concat_holes_free(arena, arena.right(term))
        }
        _ => false,
    }
}

/// A `;`/`:` chain of hole-free elements.
pub(crate) fn is_chain_holes_free(arena: &TermArena, term: Option<TermHandle>) -> bool {
    if is_element(arena, term) {
        return !is_hole_element(arena, term);
    }
    match arena.op(term) {
        Some(Op::Sere) => is_chain_holes_free(arena, arena.left(term)),
        Some(Op::SereConcat | Op::SereFusion) => {
            is_chain_holes_free(arena, arena.left(term))
                && is_chain_holes_free(arena, arena.right(term))
        }
        _ => false,
    }
}

/// A `;`/`:` chain of arbitrary elements.
pub(crate) fn is_chain(arena: &TermArena, term: Option<TermHandle>) -> bool {
    if is_element(arena, term) {
        return true;
    }
    match arena.op(term) {
        Some(Op::Sere) => is_chain(arena, arena.left(term)),
        Some(Op::SereConcat | Op::SereFusion) => {
            is_chain(arena, arena.left(term)) && is_chain(arena, arena.right(term))
        }
        _ => false,
    }
}

/// The two operands of a SERE disjunction `{r1 | r2}`, looking through braces.
pub(crate) fn disjuncts(
    arena: &TermArena,
    term: Option<TermHandle>,
) -> Option<(TermHandle, TermHandle)> {
    match arena.as_compound(peel(arena, term))? {
        (Op::Or, Some(l), Some(r)) => Some((l, r)),
        _ => None,
    }
}

/// Splits the first element off a chain.
///
/// Returns the element and the rest of the chain, absent when the chain is a single
/// element. The cut is positional: an element equal to the first one elsewhere in
/// the chain is kept.
pub(crate) fn split_first(
    arena: &mut TermArena,
    term: Option<TermHandle>,
) -> Option<(TermHandle, Option<TermHandle>)> {
    if is_element(arena, term) {
        return term.map(|t| (t, None));
    }
    match arena.op(term)? {
        Op::Sere => split_first(arena, arena.left(term)),
        op @ (Op::SereConcat | Op::SereFusion) => {
            let right = arena.right(term)?;
            let (first, rest) = split_first(arena, arena.left(term))?;
            let rest = match rest {
                Some(rest) => arena.binary(op, rest, right),
                None => right,
            };
            Some((first, Some(rest)))
        }
        _ => None,
    }
}

/// Splits the last element off a chain; the mirror image of [`split_first`].
pub(crate) fn split_last(
    arena: &mut TermArena,
    term: Option<TermHandle>,
) -> Option<(Option<TermHandle>, TermHandle)> {
    if is_element(arena, term) {
        return term.map(|t| (None, t));
    }
    match arena.op(term)? {
        Op::Sere => split_last(arena, arena.left(term)),
        op @ (Op::SereConcat | Op::SereFusion) => {
            let left = arena.left(term)?;
            let (rest, last) = split_last(arena, arena.right(term))?;
            let rest = match rest {
                Some(rest) => arena.binary(op, left, rest),
                None => left,
            };
            Some((Some(rest), last))
        }
        _ => None,
    }
}
