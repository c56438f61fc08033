//! Structural predicates over PSL terms.
//!
//! All predicates are total over `Option<TermHandle>`; how the absent term is treated
//! is stated per function.

use psl_core::{Op, TermArena, TermHandle, TermNode};

/// Returns true for the absent term, atoms, numbers, boolean constants and failures.
#[must_use]
pub fn is_leaf(arena: &TermArena, term: Option<TermHandle>) -> bool {
    arena.is_leaf(term)
}

/// Returns true for identifiers: atoms, dotted names and array accesses.
#[must_use]
pub fn is_id(arena: &TermArena, term: Option<TermHandle>) -> bool {
    match term.map(|t| arena.get(t)) {
        Some(TermNode::Atom(_)) => true,
        Some(TermNode::Node { op, .. }) => matches!(op, Op::Dot | Op::Array),
        _ => false,
    }
}

/// Returns true for terms built with one of the SERE structural operators.
#[must_use]
pub fn is_sere(arena: &TermArena, term: Option<TermHandle>) -> bool {
    arena.op(term).is_some_and(Op::is_sere)
}

/// Returns true if `term` contains no temporal operator. The absent term is
/// propositional.
#[must_use]
pub fn is_propositional(arena: &TermArena, term: Option<TermHandle>) -> bool {
    propositional(arena, term, false)
}

/// Like [`is_propositional`], but tolerates the transition operator `next(x)`, as
/// found in one-step transition bodies.
#[must_use]
pub fn is_trans_propositional(arena: &TermArena, term: Option<TermHandle>) -> bool {
    propositional(arena, term, true)
}

/// Operators whose operands are data, not formulas: the node is an atomic
/// proposition whatever its operands are.
fn is_atomic_operator(op: Op) -> bool {
    matches!(
        op,
        Op::Minus
            | Op::Plus
            | Op::UMinus
            | Op::Union
            | Op::SetIn
            | Op::Times
            | Op::Divide
            | Op::Mod
            | Op::EqEq
            | Op::Equal
            | Op::NotEqual
            | Op::Lt
            | Op::Le
            | Op::Gt
            | Op::Ge
            | Op::Xnor
            | Op::LShift
            | Op::RShift
            | Op::WordConcat
            | Op::BitSelection
            | Op::WSelect
            | Op::Extend
            | Op::Resize
            | Op::CastBool
            | Op::CastWord1
            | Op::CastToInt
            | Op::CastSigned
            | Op::CastUnsigned
    )
}

fn is_boolean_connective(op: Op) -> bool {
    matches!(
        op,
        Op::And | Op::Or | Op::PslOr | Op::Xor | Op::Caret | Op::Iff | Op::Implies
    )
}

/// The three arms of `Case(Colon(c, t), rest)` and `Ite(Colon(c, t), e)`.
fn arms(arena: &TermArena, term: Option<TermHandle>) -> [Option<TermHandle>; 3] {
    let arm = arena.left(term);
    [arena.left(arm), arena.right(arm), arena.right(term)]
}

fn propositional(arena: &TermArena, term: Option<TermHandle>, accept_next: bool) -> bool {
    if is_leaf(arena, term) || is_id(arena, term) {
        return true;
    }
    let Some(op) = arena.op(term) else {
        return true;
    };
    let rec = |t| propositional(arena, t, accept_next);

    match op {
        Op::Context => rec(arena.right(term)),
        _ if is_atomic_operator(op) => true,
        Op::Not | Op::Tilde => rec(arena.left(term)),
        _ if is_boolean_connective(op) => rec(arena.left(term)) && rec(arena.right(term)),
        Op::Case | Op::Ite => arms(arena, term).into_iter().all(rec),
        Op::ReplProp => rec(arena.right(term)),
        Op::NextState => accept_next,
        _ => false,
    }
}

/// Returns true if a (trans-)propositional formula uses the transition operator
/// `next(x)`.
#[must_use]
pub fn contains_next(arena: &TermArena, term: Option<TermHandle>) -> bool {
    if is_leaf(arena, term) || is_id(arena, term) {
        return false;
    }
    let Some(op) = arena.op(term) else {
        return false;
    };
    let rec = |t| contains_next(arena, t);

    match op {
        Op::NextState => true,
        Op::Context => rec(arena.right(term)),
        Op::Minus | Op::Plus | Op::UMinus | Op::Not | Op::Tilde => rec(arena.left(term)),
        Op::Case | Op::Ite => arms(arena, term).into_iter().any(rec),
        Op::ReplProp => rec(arena.right(term)),
        _ if is_atomic_operator(op) || is_boolean_connective(op) => {
            rec(arena.left(term)) || rec(arena.right(term))
        }
        _ => false,
    }
}

/// Returns true if `term` is a linear-time formula: propositional structure,
/// foundation-language operators and bounded next-time forms, but neither SEREs
/// nor branching-time operators. The absent term is LTL.
#[must_use]
pub fn is_ltl(arena: &TermArena, term: Option<TermHandle>) -> bool {
    if is_leaf(arena, term) || is_id(arena, term) {
        return true;
    }
    let Some(op) = arena.op(term) else {
        return true;
    };
    let rec = |t| is_ltl(arena, t);

    match op {
        _ if op.is_obe() => false,
        Op::Context => rec(arena.right(term)),
        _ if is_atomic_operator(op) => true,
        Op::Not | Op::Tilde => rec(arena.left(term)),
        _ if is_boolean_connective(op) => rec(arena.left(term)) && rec(arena.right(term)),
        Op::Case | Op::Ite => arms(arena, term).into_iter().all(rec),
        Op::CoreNext => rec(arena.left(term)),
        _ if op.is_extended_next() => {
            let Some(next) = arena.as_extended_next(term) else {
                return false;
            };
            // A range bound is checked for literal-ness when it is unrolled.
            rec(next.expr)
                && rec(next.condition)
                && (arena.is_op(next.when, Op::Range) || rec(next.when))
        }
        Op::Future | Op::Never | Op::Globally | Op::Always | Op::EventuallyBang => {
            rec(arena.left(term))
        }
        Op::Until
        | Op::W
        | Op::WeakUntil
        | Op::UntilBang
        | Op::UntilInclusive
        | Op::UntilBangInclusive
        | Op::Before
        | Op::BeforeBang
        | Op::BeforeInclusive
        | Op::BeforeBangInclusive => rec(arena.left(term)) && rec(arena.right(term)),
        Op::ReplProp => rec(arena.right(term)),
        _ => false,
    }
}

/// Returns true if `term` is a branching-time (OBE) formula: propositional structure
/// and CTL operators, with no foundation-language operator anywhere. The absent term
/// is OBE.
#[must_use]
pub fn is_obe(arena: &TermArena, term: Option<TermHandle>) -> bool {
    if is_leaf(arena, term) || is_id(arena, term) {
        return true;
    }
    let Some(op) = arena.op(term) else {
        return true;
    };
    let rec = |t| is_obe(arena, t);

    match op {
        _ if op.is_fl() => false,
        Op::Context => rec(arena.right(term)),
        _ if is_atomic_operator(op) => true,
        Op::Not | Op::Tilde => rec(arena.left(term)),
        _ if is_boolean_connective(op) => rec(arena.left(term)) && rec(arena.right(term)),
        Op::Ax | Op::Ex | Op::Ag | Op::Eg | Op::Af | Op::Ef => rec(arena.left(term)),
        Op::Eu | Op::Au => rec(arena.left(term)) && rec(arena.right(term)),
        Op::Case | Op::Ite => arms(arena, term).into_iter().all(rec),
        Op::ReplProp => rec(arena.right(term)),
        _ => false,
    }
}

/// Returns true if no repetition occurs anywhere in `term`.
#[must_use]
pub fn is_star_free(arena: &TermArena, term: Option<TermHandle>) -> bool {
    if is_leaf(arena, term) || is_id(arena, term) {
        return true;
    }
    !arena.is_op(term, Op::SereRepeated)
        && is_star_free(arena, arena.left(term))
        && is_star_free(arena, arena.right(term))
}

/// Returns true if `term` cannot match the empty sequence: `[*]` and `[*0]` can,
/// and so can `[+]` or `[*n]` of an operand that can, unless a concatenated sibling
/// is non-empty.
#[must_use]
pub fn is_emptystar_free(arena: &TermArena, term: Option<TermHandle>) -> bool {
    if is_leaf(arena, term) || is_id(arena, term) {
        return true;
    }
    if let Some(rep) = arena.as_repeated(term) {
        if rep.is_star() || (rep.is_star_count() && arena.number_value(rep.count) == Some(0)) {
            return false;
        }
        if rep.is_plus() || rep.is_star_count() {
            return is_emptystar_free(arena, rep.expr);
        }
    }
    let (l, r) = (arena.left(term), arena.right(term));
    if arena.is_op(term, Op::SereConcat) {
        is_emptystar_free(arena, l) || is_emptystar_free(arena, r)
    } else {
        is_emptystar_free(arena, l) && is_emptystar_free(arena, r)
    }
}
