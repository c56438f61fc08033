//! Property-based tests for the term store.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{Op, PslError, TermArena, TermHandle};

    #[derive(Clone, Debug)]
    enum Formula {
        Atom(u8),
        Number(i64),
        Unary(Op, Box<Formula>),
        Binary(Op, Box<Formula>, Box<Formula>),
    }

    impl Formula {
        fn depth(&self) -> usize {
            match self {
                Formula::Atom(_) | Formula::Number(_) => 1,
                Formula::Unary(_, f) => 1 + f.depth(),
                Formula::Binary(_, l, r) => 1 + l.depth().max(r.depth()),
            }
        }
    }

    fn formula() -> impl Strategy<Value = Formula> {
        let leaf = prop_oneof![
            3 => (0u8..4).prop_map(Formula::Atom),
            1 => (-3i64..4).prop_map(Formula::Number),
        ];
        leaf.prop_recursive(6, 48, 2, |inner| {
            prop_oneof![
                (
                    prop_oneof![Just(Op::Not), Just(Op::Always), Just(Op::XBang)],
                    inner.clone(),
                )
                    .prop_map(|(op, f)| Formula::Unary(op, Box::new(f))),
                (
                    prop_oneof![Just(Op::And), Just(Op::Or), Just(Op::Until)],
                    inner.clone(),
                    inner,
                )
                    .prop_map(|(op, l, r)| Formula::Binary(op, Box::new(l), Box::new(r))),
            ]
        })
    }

    fn build(arena: &mut TermArena, formula: &Formula) -> TermHandle {
        match formula {
            Formula::Atom(n) => arena.atom(&format!("p{n}")),
            Formula::Number(n) => arena.number(*n),
            Formula::Unary(op, f) => {
                let f = build(arena, f);
                arena.unary(*op, f)
            }
            Formula::Binary(op, l, r) => {
                let (l, r) = (build(arena, l), build(arena, r));
                arena.binary(*op, l, r)
            }
        }
    }

    proptest! {
        #[test]
        fn rebuilding_yields_the_same_handle(f in formula()) {
            let mut arena = TermArena::new();
            let first = build(&mut arena, &f);
            let len = arena.len();
            let second = build(&mut arena, &f);

            prop_assert_eq!(first, second);
            prop_assert_eq!(arena.len(), len);
        }

        #[test]
        fn depth_matches_structure(f in formula()) {
            let mut arena = TermArena::new();
            let t = build(&mut arena, &f);

            prop_assert_eq!(arena.depth(Some(t)), f.depth());
        }

        #[test]
        fn depth_limit_is_inclusive(f in formula()) {
            let mut arena = TermArena::new();
            let t = build(&mut arena, &f);
            let depth = f.depth();

            prop_assert_eq!(arena.check_depth(Some(t), Some(depth)), Ok(()));
            prop_assert_eq!(
                arena.check_depth(Some(t), Some(depth - 1)),
                Err(PslError::NestingTooDeep { depth, limit: depth - 1 })
            );
        }
    }
}
