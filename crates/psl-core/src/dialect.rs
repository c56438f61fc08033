//! Operator dialect conversion.
//!
//! Three vocabularies name the same operator families: raw lexer [`Token`]s, the
//! PSL-symbolic [`Op`]s the parser builds trees with, and the core [`Op`]s the engines
//! consume. A single table lists each family once as `token => psl [, core]`:
//!
//! - `A => B;` the PSL symbol is shared with the core dialect;
//! - `A => B, C;` the PSL symbol `B` becomes `C` in core;
//! - `A => B, !;` the family has no core symbol and must be rewritten away first.
//!
//! Strong and weak next (`X`, `X!`, `next`, `next!`) all map to core
//! [`Op::CoreNext`]; the distinction is lost at this point.

use std::fmt;

use crate::error::{PslError, PslResult};
use crate::op::Op;

/// The three operator vocabularies.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Dialect {
    /// Raw lexer tokens.
    Token,
    /// PSL-symbolic operators as produced by the parser.
    Psl,
    /// Core LTL/CTL operators consumed by the engines.
    Core,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Token => "token",
            Self::Psl => "PSL",
            Self::Core => "core",
        })
    }
}

/// Either side of a conversion.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Symbol {
    /// A raw token.
    Token(Token),
    /// A PSL or core operator.
    Op(Op),
}

macro_rules! core_symbol {
    ($psl:ident) => {
        Some(Op::$psl)
    };
    ($psl:ident, !) => {
        None
    };
    ($psl:ident, $core:ident) => {
        Some(Op::$core)
    };
}

macro_rules! dialect_table {
    ($( $tok:ident => $psl:ident $(, $core:tt)? ; )*) => {
        /// Raw lexer tokens, one per operator family.
        #[allow(missing_docs)]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        pub enum Token {
            $( $tok, )*
        }

        /// Every row of the table, in declaration order.
        pub const TABLE: &[(Token, Op, Option<Op>)] = &[
            $( (Token::$tok, Op::$psl, core_symbol!($psl $(, $core)?)), )*
        ];

        /// The row of a PSL symbol: `None` if `op` is not a PSL symbol, otherwise its
        /// token and optional core symbol.
        #[allow(unreachable_patterns)]
        const fn psl_row(op: Op) -> Option<(Token, Option<Op>)> {
            match op {
                $( Op::$psl => Some((Token::$tok, core_symbol!($psl $(, $core)?))), )*
                _ => None,
            }
        }

        const fn token_row(token: Token) -> (Op, Option<Op>) {
            match token {
                $( Token::$tok => (Op::$psl, core_symbol!($psl $(, $core)?)), )*
            }
        }
    };
}

dialect_table! {
    Boolean => Boolean;
    Context => Context;
    Identifier => Dot;
    DotDot => Range, TwoDots;
    Array => Array;
    Bool => CastBool;
    Word1 => CastWord1;
    WResize => Resize;
    WToInt => CastToInt;
    Signed => CastSigned;
    Unsigned => CastUnsigned;
    Extend => Extend;
    BitSelection => BitSelection;
    WSelect => WSelect, BitSelection;
    Xnor => Xnor;
    Concatenation => WordConcat;
    LtLt => LShift;
    GtGt => RShift;
    UMinus => UMinus;
    Minus => Minus;
    Plus => Plus;
    Union => Union;
    In => SetIn;
    Splat => Times;
    Slash => Divide;
    Percent => Mod;
    Eq => Equal;
    EqEq => EqEq, Equal;
    BangEq => NotEqual;
    Lt => Lt;
    Le => Le;
    Gt => Gt;
    Ge => Ge;
    Cons => Cons;
    Case => Case;
    Colon => Colon;
    Bang => Not;
    Tilde => Tilde, Not;
    Ampersand => And;
    Pipe => Or;
    Caret => Caret, Xor;
    Xor => Xor;
    LtMinusGt => Iff;
    MinusGt => Implies;
    NextState => NextState;
    X => X, CoreNext;
    XBang => XBang, CoreNext;
    Next => Next, CoreNext;
    NextBang => NextBang, CoreNext;
    EventuallyBang => EventuallyBang, Future;
    F => Future;
    G => Globally;
    Always => Always, Globally;
    U => Until;
    Until => WeakUntil, Until;
    UntilBang => UntilBang, Until;
    Ax => Ax;
    Ex => Ex;
    Ag => Ag;
    Eg => Eg;
    Af => Af;
    Ef => Ef;
    E => Eu;
    A => Au;
    Or => PslOr, Or;
    Sere => Sere, !;
    SereConcat => SereConcat, !;
    SereFusion => SereFusion, !;
    SereCompound => SereCompound, !;
    SereRepeated => SereRepeated, !;
    ReplProp => ReplProp, !;
    Inf => Inf, !;
    ForAll => ForAll, !;
    ForAny => ForAny, !;
    PipeMinusGt => PipeMinusGt, !;
    PipeEqGt => PipeEqGt, !;
    Never => Never, !;
    WithinBang => WithinBang, !;
    Within => Within, !;
    WithinBangInclusive => WithinBangInclusive, !;
    WithinInclusive => WithinInclusive, !;
    WhileNotBang => WhileNotBang, !;
    WhileNot => WhileNot, !;
    WhileNotBangInclusive => WhileNotBangInclusive, !;
    WhileNotInclusive => WhileNotInclusive, !;
    NextEventABang => NextEventABang, !;
    NextEventA => NextEventA, !;
    NextEventEBang => NextEventEBang, !;
    NextEventE => NextEventE, !;
    NextEventBang => NextEventBang, !;
    NextEvent => NextEvent, !;
    NextABang => NextABang, !;
    NextEBang => NextEBang, !;
    NextA => NextA, !;
    NextE => NextE, !;
    BeforeBang => BeforeBang, !;
    Before => Before, !;
    BeforeBangInclusive => BeforeBangInclusive, !;
    BeforeInclusive => BeforeInclusive, !;
    UntilBangInclusive => UntilBangInclusive, !;
    UntilInclusive => UntilInclusive, !;
    Abort => Abort, !;
    W => W, !;
    PipePipe => PipePipe, !;
    AmpAmp => AmpAmp, !;
    LbSplat => Star, !;
    LbEq => StarEq, !;
    LbMinusGt => StarMinusGt, !;
    LbPlusRb => PlusRepeat, !;
    Ite => Ite, !;
}

/// Returns true if `op` appears in the core column of the table.
#[must_use]
pub fn is_core_symbol(op: Op) -> bool {
    TABLE.iter().any(|&(_, _, core)| core == Some(op))
}

/// Maps a token to its PSL symbol. Every token has one.
#[must_use]
pub const fn token_to_psl(token: Token) -> Op {
    token_row(token).0
}

/// Maps a token to its core symbol.
///
/// # Errors
///
/// Returns [`PslError::UnsupportedConversion`] for PSL-only families.
pub fn token_to_core(token: Token) -> PslResult<Op> {
    let (psl, core) = token_row(token);
    core.ok_or(PslError::UnsupportedConversion {
        op: psl,
        dialect: Dialect::Core,
    })
}

/// Maps a PSL symbol to its core symbol. Symbols that already belong to the core
/// vocabulary map to themselves.
///
/// # Errors
///
/// Returns [`PslError::UnsupportedConversion`] for PSL-only families.
pub fn psl_to_core(op: Op) -> PslResult<Op> {
    match psl_row(op) {
        Some((_, Some(core))) => Ok(core),
        None if is_core_symbol(op) => Ok(op),
        _ => Err(PslError::UnsupportedConversion {
            op,
            dialect: Dialect::Core,
        }),
    }
}

/// Maps a PSL symbol back to its token.
#[must_use]
pub const fn psl_to_token(op: Op) -> Option<Token> {
    match psl_row(op) {
        Some((token, _)) => Some(token),
        None => None,
    }
}

/// Converts a symbol into the requested dialect.
///
/// Converting into [`Dialect::Psl`] accepts tokens and PSL symbols; converting into
/// [`Dialect::Token`] accepts PSL symbols.
///
/// # Errors
///
/// Returns [`PslError::UnsupportedConversion`] when the target dialect has no symbol
/// for the family.
pub fn convert(to: Dialect, symbol: Symbol) -> PslResult<Symbol> {
    let unsupported = |op| PslError::UnsupportedConversion { op, dialect: to };
    match (symbol, to) {
        (Symbol::Token(token), Dialect::Token) => Ok(Symbol::Token(token)),
        (Symbol::Token(token), Dialect::Psl) => Ok(Symbol::Op(token_to_psl(token))),
        (Symbol::Token(token), Dialect::Core) => token_to_core(token).map(Symbol::Op),
        (Symbol::Op(op), Dialect::Token) => psl_to_token(op)
            .map(Symbol::Token)
            .ok_or_else(|| unsupported(op)),
        (Symbol::Op(op), Dialect::Psl) => match psl_row(op) {
            Some(_) => Ok(Symbol::Op(op)),
            None => Err(unsupported(op)),
        },
        (Symbol::Op(op), Dialect::Core) => psl_to_core(op).map(Symbol::Op),
    }
}

/// Output vocabulary of a lowering pass.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Target {
    /// Keep PSL symbols; only the rewritten families change.
    Psl,
    /// Emit core symbols.
    #[default]
    Core,
}

impl Target {
    /// Converts a PSL operator into this target's vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`PslError::UnsupportedConversion`] if the target is core and the
    /// operator has no core symbol.
    pub fn op(self, op: Op) -> PslResult<Op> {
        match self {
            Self::Psl => Ok(op),
            Self::Core => psl_to_core(op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_symbols() {
        assert_eq!(psl_to_core(Op::And), Ok(Op::And));
        assert_eq!(token_to_psl(Token::Ampersand), Op::And);
        assert_eq!(token_to_core(Token::Ampersand), Ok(Op::And));
    }

    #[test]
    fn test_three_way_symbols() {
        assert_eq!(token_to_psl(Token::Tilde), Op::Tilde);
        assert_eq!(psl_to_core(Op::Tilde), Ok(Op::Not));
        assert_eq!(psl_to_core(Op::Always), Ok(Op::Globally));
        assert_eq!(psl_to_core(Op::PslOr), Ok(Op::Or));
        assert_eq!(psl_to_token(Op::Range), Some(Token::DotDot));
    }

    #[test]
    fn test_next_variants_collapse() {
        for op in [Op::X, Op::XBang, Op::Next, Op::NextBang] {
            assert_eq!(psl_to_core(op), Ok(Op::CoreNext));
        }
    }

    #[test]
    fn test_psl_only_families_fail() {
        for op in [Op::SereConcat, Op::ReplProp, Op::Never, Op::W, Op::Star] {
            assert_eq!(
                psl_to_core(op),
                Err(PslError::UnsupportedConversion {
                    op,
                    dialect: Dialect::Core
                })
            );
        }
        assert!(token_to_core(Token::LbPlusRb).is_err());
    }

    #[test]
    fn test_core_symbols_are_fixed_points() {
        for op in [Op::CoreNext, Op::TwoDots, Op::Future, Op::Until, Op::Globally] {
            assert_eq!(psl_to_core(op), Ok(op));
        }
    }

    #[test]
    fn test_generic_convert() {
        assert_eq!(
            convert(Dialect::Core, Symbol::Token(Token::Always)),
            Ok(Symbol::Op(Op::Globally))
        );
        assert_eq!(
            convert(Dialect::Token, Symbol::Op(Op::UntilBang)),
            Ok(Symbol::Token(Token::UntilBang))
        );
        assert!(convert(Dialect::Psl, Symbol::Op(Op::CoreNext)).is_err());
        assert!(convert(Dialect::Token, Symbol::Op(Op::CoreNext)).is_err());
    }

    #[test]
    fn test_table_has_unique_psl_column() {
        for (i, &(_, psl, _)) in TABLE.iter().enumerate() {
            assert!(
                TABLE[i + 1..].iter().all(|&(_, other, _)| other != psl),
                "{psl:?} listed twice"
            );
        }
    }

    #[test]
    fn test_target() {
        assert_eq!(Target::Psl.op(Op::XBang), Ok(Op::XBang));
        assert_eq!(Target::Core.op(Op::XBang), Ok(Op::CoreNext));
        assert_eq!(Target::default(), Target::Core);
    }
}
