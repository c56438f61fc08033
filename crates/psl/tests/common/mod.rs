//! A core LTL evaluator over lasso-shaped traces.

#![allow(dead_code)]

use proptest::prelude::*;
use psl::core::{Op, TermArena, TermHandle, TermNode};

/// An infinite trace `prefix (loop)^ω`, stored as its distinct states.
///
/// Each state is a bit set over the propositions of an [`Evaluator`].
#[derive(Clone, Debug)]
pub struct Lasso {
    pub states: Vec<u8>,
    pub loop_start: usize,
}

impl Lasso {
    fn succ(&self, i: usize) -> usize {
        if i + 1 < self.states.len() {
            i + 1
        } else {
            self.loop_start
        }
    }

    /// Positions visited from 0 onwards, unrolled `laps` times around the loop.
    pub fn walk(&self, laps: usize) -> impl Iterator<Item = usize> + '_ {
        let steps = self.states.len() * (laps + 1);
        std::iter::successors(Some(0), move |&i| Some(self.succ(i))).take(steps)
    }
}

/// Lassos of one to six states over `props` propositions.
pub fn lasso(props: usize) -> impl Strategy<Value = Lasso> {
    let max = 1u8 << props;
    prop::collection::vec(0..max, 1..=6).prop_flat_map(|states| {
        let len = states.len();
        (Just(states), 0..len).prop_map(|(states, loop_start)| Lasso { states, loop_start })
    })
}

/// Evaluates core LTL; propositions are identifiers looked up by their rendering.
pub struct Evaluator<'a> {
    pub arena: &'a TermArena,
    pub props: &'a [&'a str],
}

impl Evaluator<'_> {
    pub fn holds(&self, term: TermHandle, lasso: &Lasso) -> bool {
        self.sat(term, lasso)[0]
    }

    pub fn bit(&self, name: &str) -> u8 {
        let index = self
            .props
            .iter()
            .position(|p| *p == name)
            .unwrap_or_else(|| panic!("unknown proposition {name}"));
        1 << index
    }

    fn sat(&self, term: TermHandle, lasso: &Lasso) -> Vec<bool> {
        let n = lasso.states.len();
        let proposition = |name: &str| {
            let bit = self.bit(name);
            lasso.states.iter().map(|s| s & bit != 0).collect()
        };
        let (op, left, right) = match self.arena.get(term) {
            TermNode::True => return vec![true; n],
            TermNode::False => return vec![false; n],
            TermNode::Atom(_) => return proposition(&self.arena.display(Some(term)).to_string()),
            TermNode::Node {
                op: Op::Array | Op::Dot,
                ..
            } => return proposition(&self.arena.display(Some(term)).to_string()),
            TermNode::Node { op, left, right } => (op, left, right),
            other => panic!("cannot evaluate {other:?}"),
        };
        let l = self.sat(left.expect("left operand"), lasso);
        let r = || self.sat(right.expect("right operand"), lasso);
        let pointwise = |r: Vec<bool>, f: fn(bool, bool) -> bool| {
            l.iter().zip(&r).map(|(&a, &b)| f(a, b)).collect::<Vec<_>>()
        };

        match op {
            Op::Not => l.iter().map(|v| !v).collect(),
            Op::And => pointwise(r(), |a, b| a && b),
            Op::Or => pointwise(r(), |a, b| a || b),
            Op::Implies => pointwise(r(), |a, b| !a || b),
            Op::Iff => pointwise(r(), |a, b| a == b),
            Op::CoreNext => (0..n).map(|i| l[lasso.succ(i)]).collect(),
            Op::Future => fixpoint(lasso, false, |i, next| l[i] || next),
            Op::Globally => fixpoint(lasso, true, |i, next| l[i] && next),
            Op::Until => {
                let r = r();
                fixpoint(lasso, false, |i, next| r[i] || (l[i] && next))
            }
            other => panic!("not a core LTL operator: {other}"),
        }
    }
}

/// Iterates `step(i, value at succ(i))` from `init` until it stabilizes.
fn fixpoint(lasso: &Lasso, init: bool, step: impl Fn(usize, bool) -> bool) -> Vec<bool> {
    let n = lasso.states.len();
    let mut values = vec![init; n];
    loop {
        let next: Vec<bool> = (0..n).map(|i| step(i, values[lasso.succ(i)])).collect();
        if next == values {
            return values;
        }
        values = next;
    }
}
