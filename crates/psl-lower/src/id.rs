//! Identifier conversion.

use psl_classify::is_id;
use psl_core::{PslError, PslResult, Target, TermArena, TermHandle, TermNode};

/// Rewrites the operators of an identifier (`a`, `m.f`, `arr[3]`, `m.arr[i].f`) into
/// `target`.
///
/// # Errors
///
/// Returns [`PslError::NotSupportedFeature`] if `id` is not an identifier, and
/// [`PslError::UnsupportedConversion`] if a component has no symbol in `target`.
pub fn convert_id(arena: &mut TermArena, id: TermHandle, target: Target) -> PslResult<TermHandle> {
    let Some(converted) = convert(arena, Some(id), target, id)? else {
        unreachable!("identifier conversion erased a term");
    };
    Ok(converted)
}

fn convert(
    arena: &mut TermArena,
    term: Option<TermHandle>,
    target: Target,
    root: TermHandle,
) -> PslResult<Option<TermHandle>> {
    let Some(t) = term else { return Ok(None) };
    match arena.get(t) {
        TermNode::Atom(_) | TermNode::Number(_) => return Ok(term),
        TermNode::Node { op, left, right } if is_id(arena, term) => {
            let l = convert(arena, left, target, root)?;
            let r = convert(arena, right, target, root)?;
            let op = target.op(op)?;
            return Ok(Some(arena.make(op, l, r)));
        }
        _ => {}
    }
    Err(PslError::NotSupportedFeature {
        reason: "not an identifier".into(),
        term: arena.display(Some(root)).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use psl_core::Op;

    #[test]
    fn test_nested_identifier() {
        let mut arena = TermArena::new();
        let (m, arr, f) = (arena.atom("m"), arena.atom("arr"), arena.atom("f"));
        let two = arena.number(2);
        let field = arena.binary(Op::Dot, m, arr);
        let indexed = arena.binary(Op::Array, field, two);
        let id = arena.binary(Op::Dot, indexed, f);

        let converted = convert_id(&mut arena, id, Target::Core).unwrap();
        assert_eq!(converted, id);
        assert_eq!(arena.display(Some(converted)).to_string(), "m.arr[2].f");
    }

    #[test]
    fn test_expression_is_not_an_identifier() {
        let mut arena = TermArena::new();
        let (arr, i) = (arena.atom("arr"), arena.atom("i"));
        let one = arena.number(1);
        let index = arena.binary(Op::Plus, i, one);
        let id = arena.binary(Op::Array, arr, index);

        let err = convert_id(&mut arena, id, Target::Core).unwrap_err();
        assert_eq!(
            err,
            PslError::NotSupportedFeature {
                reason: "not an identifier".into(),
                term: "arr[(i + 1)]".into(),
            }
        );
    }
}
