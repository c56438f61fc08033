//! Human-readable rendering of terms.
//!
//! Used for diagnostics and trace output only; it is not a model-file printer.

use std::fmt::{self, Write};

use crate::arena::TermArena;
use crate::handle::TermHandle;
use crate::op::Op;
use crate::term::TermNode;

/// A term paired with its arena, implementing [`fmt::Display`].
pub struct TermDisplay<'a> {
    arena: &'a TermArena,
    term: Option<TermHandle>,
}

impl<'a> TermDisplay<'a> {
    pub(crate) fn new(arena: &'a TermArena, term: Option<TermHandle>) -> Self {
        Self { arena, term }
    }

    fn sub(&self, term: Option<TermHandle>) -> Self {
        Self::new(self.arena, term)
    }

    fn write_repeated(
        &self,
        f: &mut fmt::Formatter<'_>,
        op: Op,
        left: Option<TermHandle>,
        right: Option<TermHandle>,
    ) -> fmt::Result {
        debug_assert_eq!(op, Op::SereRepeated);
        let kind = self.arena.op(left);
        if let Some(expr) = self.arena.left(left) {
            write!(f, "{}", self.sub(Some(expr)))?;
        }
        let mark = match kind {
            Some(Op::PlusRepeat) => "+",
            Some(Op::StarEq) => "=",
            Some(Op::StarMinusGt) => "->",
            _ => "*",
        };
        f.write_char('[')?;
        f.write_str(mark)?;
        if right.is_some() {
            write!(f, "{}", self.sub(right))?;
        }
        f.write_char(']')
    }
}

fn is_infix(op: Op) -> bool {
    matches!(
        op,
        Op::Plus
            | Op::Minus
            | Op::Times
            | Op::Divide
            | Op::Mod
            | Op::Equal
            | Op::EqEq
            | Op::NotEqual
            | Op::Lt
            | Op::Le
            | Op::Gt
            | Op::Ge
            | Op::Union
            | Op::SetIn
            | Op::Xnor
            | Op::LShift
            | Op::RShift
            | Op::WordConcat
            | Op::And
            | Op::Or
            | Op::PslOr
            | Op::Xor
            | Op::Caret
            | Op::Iff
            | Op::Implies
            | Op::Until
            | Op::W
            | Op::WeakUntil
            | Op::UntilBang
            | Op::UntilInclusive
            | Op::UntilBangInclusive
            | Op::Before
            | Op::BeforeBang
            | Op::BeforeInclusive
            | Op::BeforeBangInclusive
            | Op::Within
            | Op::WithinBang
            | Op::WithinInclusive
            | Op::WithinBangInclusive
            | Op::WhileNot
            | Op::WhileNotBang
            | Op::WhileNotInclusive
            | Op::WhileNotBangInclusive
            | Op::Abort
            | Op::AmpAmp
            | Op::PipePipe
    )
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(term) = self.term else {
            return f.write_str("_");
        };
        let name = |id| self.arena.atom_name(id).unwrap_or("?");
        let (op, left, right) = match self.arena.get(term) {
            TermNode::Atom(id) => return f.write_str(name(id)),
            TermNode::Number(value) => return write!(f, "{value}"),
            TermNode::True => return f.write_str("TRUE"),
            TermNode::False => return f.write_str("FALSE"),
            TermNode::Failure(id) => return write!(f, "FAILURE(\"{}\")", name(id)),
            TermNode::Node { op, left, right } => (op, left, right),
        };
        let (l, r) = (self.sub(left), self.sub(right));

        match op {
            Op::Sere => write!(f, "{{{l}}}"),
            Op::SereConcat => write!(f, "{l} ; {r}"),
            Op::SereFusion => write!(f, "{l} : {r}"),
            Op::SereCompound => {
                let inner = self.arena.op(left).unwrap_or(Op::And);
                let (cl, cr) = (self.sub(self.arena.left(left)), self.sub(self.arena.right(left)));
                write!(f, "{{{cl} {inner} {cr}}}")
            }
            Op::SereRepeated => self.write_repeated(f, op, left, right),
            Op::Dot if left.is_none() => write!(f, "{r}"),
            Op::Dot => write!(f, "{l}.{r}"),
            Op::Array => write!(f, "{l}[{r}]"),
            Op::Range | Op::TwoDots => write!(f, "{l}..{r}"),
            Op::Cons if right.is_none() => write!(f, "{l}"),
            Op::Cons => write!(f, "{l}, {r}"),
            Op::Colon => write!(f, "{l} : {r}"),
            Op::Case => write!(f, "case {l}; {r} esac"),
            Op::Ite => {
                let (c, t) = (self.sub(self.arena.left(left)), self.sub(self.arena.right(left)));
                write!(f, "ite({c}, {t}, {r})")
            }
            Op::Boolean | Op::Inf => f.write_str(op.symbol()),
            Op::PipeMinusGt | Op::PipeEqGt => {
                let (seq, con) = (
                    self.sub(self.arena.left(left)),
                    self.sub(self.arena.right(left)),
                );
                let strong = if right.is_some() { "!" } else { "" };
                write!(f, "{seq} {op} {con}{strong}")
            }
            Op::ReplProp => write!(f, "{l} : {r}"),
            Op::ForAll | Op::ForAny => {
                let values = self.sub(self.arena.right(right));
                match self.arena.left(right) {
                    Some(range) => {
                        write!(f, "{op} {l} in {} in {{{values}}}", self.sub(Some(range)))
                    }
                    None if self.arena.is_op(self.arena.right(right), Op::Boolean) => {
                        write!(f, "{op} {l} in {values}")
                    }
                    None => write!(f, "{op} {l} in {{{values}}}"),
                }
            }
            Op::Eu => write!(f, "E[{l} U {r}]"),
            Op::Au => write!(f, "A[{l} U {r}]"),
            Op::Not | Op::Tilde | Op::UMinus => write!(f, "{op}{l}"),
            Op::Minus if right.is_none() => write!(f, "-{l}"),
            Op::EventuallyBang if left.is_none() => f.write_str(op.symbol()),
            _ if op.is_extended_next() && right.is_some() => {
                let when = self.arena.left(right);
                let condition = self.arena.right(right);
                write!(f, "{op}")?;
                if condition.is_some() {
                    write!(f, "({})", self.sub(condition))?;
                }
                if when.is_some() {
                    write!(f, "[{}]", self.sub(when))?;
                }
                write!(f, "({l})")
            }
            _ if is_infix(op) && right.is_some() => write!(f, "({l} {op} {r})"),
            _ if right.is_some() => write!(f, "{op}({l}, {r})"),
            _ => write!(f, "{op}({l})"),
        }
    }
}

impl fmt::Debug for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::TermArena;
    use crate::op::Op;

    #[test]
    fn test_render_boolean_structure() {
        let mut arena = TermArena::new();
        let a = arena.atom("a");
        let b = arena.atom("b");
        let not_b = arena.unary(Op::Not, b);
        let and = arena.binary(Op::And, a, not_b);
        let g = arena.unary(Op::Always, and);

        assert_eq!(arena.display(Some(g)).to_string(), "always((a & !b))");
        assert_eq!(arena.display(None).to_string(), "_");
    }

    #[test]
    fn test_render_sere() {
        let mut arena = TermArena::new();
        let a = arena.atom("a");
        let b = arena.atom("b");
        let sa = arena.unary(Op::Sere, a);
        let sb = arena.unary(Op::Sere, b);
        let cat = arena.binary(Op::SereConcat, sa, sb);
        let braced = arena.unary(Op::Sere, cat);

        assert_eq!(arena.display(Some(braced)).to_string(), "{{a} ; {b}}");
    }

    #[test]
    fn test_render_extended_next() {
        let mut arena = TermArena::new();
        let p = arena.atom("p");
        let three = arena.number(3);
        let bound = arena.make(Op::Colon, Some(three), None);
        let next = arena.binary(Op::X, p, bound);

        assert_eq!(arena.display(Some(next)).to_string(), "X[3](p)");
    }
}
