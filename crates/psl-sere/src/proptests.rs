//! Property-based tests for SERE reduction.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use psl_classify::{is_ltl, Classifier};
    use psl_core::{NumberLiterals, Op, TermArena, TermHandle};

    use crate::{remove_sere, SereReducer};

    #[derive(Clone, Debug)]
    enum Shape {
        Atom(u8),
        Plus(u8),
        Concat(Box<Shape>, Box<Shape>),
        Fusion(Box<Shape>, Box<Shape>),
        Compound(Op, Box<Shape>, Box<Shape>),
    }

    fn shape() -> impl Strategy<Value = Shape> {
        let leaf = prop_oneof![
            4 => (0u8..4).prop_map(Shape::Atom),
            1 => (0u8..4).prop_map(Shape::Plus),
        ];
        leaf.prop_recursive(3, 16, 2, |inner| {
            prop_oneof![
                3 => (inner.clone(), inner.clone())
                    .prop_map(|(l, r)| Shape::Concat(Box::new(l), Box::new(r))),
                1 => (inner.clone(), inner.clone())
                    .prop_map(|(l, r)| Shape::Fusion(Box::new(l), Box::new(r))),
                2 => (
                    prop_oneof![Just(Op::Or), Just(Op::And), Just(Op::AmpAmp)],
                    inner.clone(),
                    inner,
                )
                    .prop_map(|(op, l, r)| Shape::Compound(op, Box::new(l), Box::new(r))),
            ]
        })
    }

    fn build(arena: &mut TermArena, shape: &Shape) -> TermHandle {
        match shape {
            Shape::Atom(n) => {
                let atom = arena.atom(&format!("p{n}"));
                arena.sere(atom)
            }
            Shape::Plus(n) => {
                let atom = arena.atom(&format!("p{n}"));
                let braced = arena.sere(atom);
                arena.plus(Some(braced))
            }
            Shape::Concat(l, r) => {
                let (l, r) = (build(arena, l), build(arena, r));
                arena.concat(l, r)
            }
            Shape::Fusion(l, r) => {
                let (l, r) = (build(arena, l), build(arena, r));
                arena.fusion(l, r)
            }
            Shape::Compound(op, l, r) => {
                let (l, r) = (build(arena, l), build(arena, r));
                arena.compound(*op, l, r)
            }
        }
    }

    /// Number of `X!` steps along the `x & X!(...)` spine.
    fn next_depth(arena: &TermArena, term: TermHandle) -> usize {
        let mut depth = 0;
        let mut cur = Some(term);
        while arena.is_op(cur, Op::And) && arena.is_op(arena.right(cur), Op::XBang) {
            depth += 1;
            cur = arena.left(arena.right(cur));
        }
        depth
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn star_count_unrolls_to_n_copies(n in 0i64..6) {
            let mut arena = TermArena::new();
            let (a, b) = (arena.atom("a"), arena.atom("b"));
            let (sa, sb) = (arena.sere(a), arena.sere(b));
            let ab = arena.concat(sa, sb);
            let unit = arena.sere(ab);
            let count = arena.number(n);
            let rep = arena.repeated(Op::Star, Some(unit), Some(count));

            let mut reducer = SereReducer::new(&mut arena, &NumberLiterals);
            let (unrolled, changed) = reducer.expand_star_counts(Some(rep)).unwrap();
            prop_assert!(changed);

            let mut copies = 0;
            let mut cur = unrolled;
            while arena.is_op(cur, Op::SereConcat) && arena.left(cur) == Some(unit) {
                copies += 1;
                cur = arena.right(cur);
            }
            if cur == Some(unit) {
                copies += 1;
            }
            prop_assert_eq!(copies, n);
        }

        #[test]
        fn counted_prefix_sets_the_next_depth(n in 0i64..8) {
            let mut arena = TermArena::new();
            let (a, b) = (arena.atom("a"), arena.atom("b"));
            let (sa, sb) = (arena.sere(a), arena.sere(b));
            let count = arena.number(n);
            let rep = arena.repeated(Op::Star, Some(sa), Some(count));
            let chain = arena.concat(rep, sb);

            let result = remove_sere(&mut arena, &NumberLiterals, chain).unwrap();
            prop_assert_eq!(next_depth(&arena, result) as i64, n);
        }

        #[test]
        fn supported_seres_reduce_to_ltl(s in shape()) {
            let mut arena = TermArena::new();
            let body = build(&mut arena, &s);
            let property = arena.sere(body);
            let handled = Classifier::new(&arena, &NumberLiterals)
                .is_handled(Some(property))
                .unwrap();
            prop_assume!(handled);

            let result = remove_sere(&mut arena, &NumberLiterals, property).unwrap();
            prop_assert!(
                is_ltl(&arena, Some(result)),
                "not LTL: {}",
                arena.display(Some(result))
            );
        }
    }
}
