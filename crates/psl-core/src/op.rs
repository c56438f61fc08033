//! Operator tags.
//!
//! One enum covers both the PSL-symbolic vocabulary produced by the parser and the
//! core vocabulary consumed by the model-checking engines; the
//! [`dialect`](crate::dialect) table records which symbols belong to which dialect.
//! Leaves (atoms, numbers, boolean constants, failures) are not operators and live in
//! [`TermNode`](crate::TermNode) directly.

use std::fmt;

/// An operator tag of an interior term node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Op {
    // === Structure ===
    /// `context`: right child evaluated in the module instance named by the left child.
    Context,
    /// Dotted identifier `a.b`.
    Dot,
    /// Array access `a[i]`.
    Array,
    /// List cell of an enumerated value set.
    Cons,
    /// `a : b`, used by case arms, extended-next bounds and suffix implications.
    Colon,
    /// `case c : t; rest esac`, shaped `Case(Colon(c, t), rest)`.
    Case,
    /// `ite(c, t, e)`, shaped `Ite(Colon(c, t), e)`.
    Ite,
    /// PSL range `lo..hi`.
    Range,
    /// Core range `lo..hi`.
    TwoDots,
    /// The `boolean` type used as a replicator value set.
    Boolean,
    /// `inf`, an unbounded range end.
    Inf,
    /// Set membership `x in S`; also holds a replicator's range and value set.
    SetIn,
    /// Set union.
    Union,

    // === Arithmetic and relations ===
    /// Binary `+`.
    Plus,
    /// Binary `-`, or unary minus when the right child is absent.
    Minus,
    /// Unary minus.
    UMinus,
    /// `*`.
    Times,
    /// `/`.
    Divide,
    /// `mod`.
    Mod,
    /// `=`.
    Equal,
    /// PSL `==`.
    EqEq,
    /// `!=`.
    NotEqual,
    /// `<`.
    Lt,
    /// `<=`.
    Le,
    /// `>`.
    Gt,
    /// `>=`.
    Ge,

    // === Words ===
    /// `xnor`.
    Xnor,
    /// `<<`.
    LShift,
    /// `>>`.
    RShift,
    /// Word concatenation `::`.
    WordConcat,
    /// Core bit selection `w[i:j]`.
    BitSelection,
    /// PSL word selection `w[i:j]`.
    WSelect,
    /// `extend(w, n)`.
    Extend,
    /// `resize(w, n)`.
    Resize,
    /// `bool(w)`.
    CastBool,
    /// `word1(b)`.
    CastWord1,
    /// `toint(w)`.
    CastToInt,
    /// `signed(w)`.
    CastSigned,
    /// `unsigned(w)`.
    CastUnsigned,

    // === Boolean connectives ===
    /// `!`.
    Not,
    /// PSL `~`.
    Tilde,
    /// `&`.
    And,
    /// `|`.
    Or,
    /// PSL `or`.
    PslOr,
    /// `xor`.
    Xor,
    /// PSL `^`.
    Caret,
    /// `<->`.
    Iff,
    /// `->`.
    Implies,

    /// Transition-relation `next(x)`; not a temporal operator.
    NextState,

    // === Core LTL ===
    /// Core next-time `X`.
    CoreNext,
    /// Core eventually `F`.
    Future,
    /// Core globally `G`.
    Globally,
    /// Core strong until `U`.
    Until,

    // === PSL foundation language ===
    /// `X`.
    X,
    /// `X!`.
    XBang,
    /// `next`.
    Next,
    /// `next!`.
    NextBang,
    /// `next_a[lo..hi]`.
    NextA,
    /// `next_a!`.
    NextABang,
    /// `next_e[lo..hi]`.
    NextE,
    /// `next_e!`.
    NextEBang,
    /// `next_event(b)`.
    NextEvent,
    /// `next_event!(b)`.
    NextEventBang,
    /// `next_event_a(b)[lo..hi]`.
    NextEventA,
    /// `next_event_a!(b)`.
    NextEventABang,
    /// `next_event_e(b)[lo..hi]`.
    NextEventE,
    /// `next_event_e!(b)`.
    NextEventEBang,
    /// `eventually!`; with an absent operand it is an empty SERE hole.
    EventuallyBang,
    /// `always`.
    Always,
    /// `never`.
    Never,
    /// Weak until `W`.
    W,
    /// Weak `until`.
    WeakUntil,
    /// `until!`.
    UntilBang,
    /// `until_`.
    UntilInclusive,
    /// `until!_`.
    UntilBangInclusive,
    /// `before`.
    Before,
    /// `before!`.
    BeforeBang,
    /// `before_`.
    BeforeInclusive,
    /// `before!_`.
    BeforeBangInclusive,
    /// `within`.
    Within,
    /// `within!`.
    WithinBang,
    /// `within_`.
    WithinInclusive,
    /// `within!_`.
    WithinBangInclusive,
    /// `whilenot`.
    WhileNot,
    /// `whilenot!`.
    WhileNotBang,
    /// `whilenot_`.
    WhileNotInclusive,
    /// `whilenot!_`.
    WhileNotBangInclusive,
    /// `abort`.
    Abort,

    // === Optional branching extension (CTL) ===
    /// `AX`.
    Ax,
    /// `EX`.
    Ex,
    /// `AG`.
    Ag,
    /// `EG`.
    Eg,
    /// `AF`.
    Af,
    /// `EF`.
    Ef,
    /// `E[p U q]`.
    Eu,
    /// `A[p U q]`.
    Au,

    // === SEREs ===
    /// Braces `{r}`.
    Sere,
    /// Concatenation `r1 ; r2`.
    SereConcat,
    /// Fusion `r1 : r2`.
    SereFusion,
    /// Wrapper marking `&`, `&&` or `|` as a sequence operator.
    SereCompound,
    /// Repetition `r[*n]`, shaped `SereRepeated(kind(r), count)`.
    SereRepeated,
    /// `[*]` repetition kind.
    Star,
    /// `[+]` repetition kind.
    PlusRepeat,
    /// `[=]` repetition kind.
    StarEq,
    /// `[->]` repetition kind.
    StarMinusGt,
    /// Length-matching sequence conjunction `&&`.
    AmpAmp,
    /// `||`.
    PipePipe,

    // === Suffix implication and replicators ===
    /// Overlapping suffix implication `|->`.
    PipeMinusGt,
    /// Non-overlapping suffix implication `|=>`.
    PipeEqGt,
    /// Replicated property `replicator : property`.
    ReplProp,
    /// `forall`.
    ForAll,
    /// `forany`.
    ForAny,
}

impl Op {
    /// Surface syntax of the operator, used when rendering terms.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Dot => ".",
            Self::Array => "[]",
            Self::Cons => ",",
            Self::Colon | Self::SereFusion => ":",
            Self::Case => "case",
            Self::Ite => "ite",
            Self::Range | Self::TwoDots => "..",
            Self::Boolean => "boolean",
            Self::Inf => "inf",
            Self::SetIn => "in",
            Self::Union => "union",
            Self::Plus => "+",
            Self::Minus | Self::UMinus => "-",
            Self::Times => "*",
            Self::Divide => "/",
            Self::Mod => "mod",
            Self::Equal => "=",
            Self::EqEq => "==",
            Self::NotEqual => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Xnor => "xnor",
            Self::LShift => "<<",
            Self::RShift => ">>",
            Self::WordConcat => "::",
            Self::BitSelection | Self::WSelect => "[:]",
            Self::Extend => "extend",
            Self::Resize => "resize",
            Self::CastBool => "bool",
            Self::CastWord1 => "word1",
            Self::CastToInt => "toint",
            Self::CastSigned => "signed",
            Self::CastUnsigned => "unsigned",
            Self::Not => "!",
            Self::Tilde => "~",
            Self::And => "&",
            Self::Or => "|",
            Self::PslOr => "or",
            Self::Xor => "xor",
            Self::Caret => "^",
            Self::Iff => "<->",
            Self::Implies => "->",
            Self::NextState => "next",
            Self::CoreNext | Self::X => "X",
            Self::Future => "F",
            Self::Globally => "G",
            Self::Until => "U",
            Self::XBang => "X!",
            Self::Next => "next",
            Self::NextBang => "next!",
            Self::NextA => "next_a",
            Self::NextABang => "next_a!",
            Self::NextE => "next_e",
            Self::NextEBang => "next_e!",
            Self::NextEvent => "next_event",
            Self::NextEventBang => "next_event!",
            Self::NextEventA => "next_event_a",
            Self::NextEventABang => "next_event_a!",
            Self::NextEventE => "next_event_e",
            Self::NextEventEBang => "next_event_e!",
            Self::EventuallyBang => "eventually!",
            Self::Always => "always",
            Self::Never => "never",
            Self::W => "W",
            Self::WeakUntil => "until",
            Self::UntilBang => "until!",
            Self::UntilInclusive => "until_",
            Self::UntilBangInclusive => "until!_",
            Self::Before => "before",
            Self::BeforeBang => "before!",
            Self::BeforeInclusive => "before_",
            Self::BeforeBangInclusive => "before!_",
            Self::Within => "within",
            Self::WithinBang => "within!",
            Self::WithinInclusive => "within_",
            Self::WithinBangInclusive => "within!_",
            Self::WhileNot => "whilenot",
            Self::WhileNotBang => "whilenot!",
            Self::WhileNotInclusive => "whilenot_",
            Self::WhileNotBangInclusive => "whilenot!_",
            Self::Abort => "abort",
            Self::Ax => "AX",
            Self::Ex => "EX",
            Self::Ag => "AG",
            Self::Eg => "EG",
            Self::Af => "AF",
            Self::Ef => "EF",
            Self::Eu => "EU",
            Self::Au => "AU",
            Self::Sere => "{}",
            Self::SereConcat => ";",
            Self::SereCompound => "compound",
            Self::SereRepeated => "repeated",
            Self::Star => "[*]",
            Self::PlusRepeat => "[+]",
            Self::StarEq => "[=]",
            Self::StarMinusGt => "[->]",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::PipeMinusGt => "|->",
            Self::PipeEqGt => "|=>",
            Self::ReplProp => "replicated",
            Self::ForAll => "forall",
            Self::ForAny => "forany",
        }
    }

    /// Branching-time (OBE) operators.
    #[must_use]
    pub const fn is_obe(self) -> bool {
        matches!(
            self,
            Self::Ax | Self::Ex | Self::Ag | Self::Eg | Self::Af | Self::Ef | Self::Eu | Self::Au
        )
    }

    /// Linear-time (foundation language) operators, PSL or core.
    #[must_use]
    pub const fn is_fl(self) -> bool {
        matches!(
            self,
            Self::CoreNext
                | Self::Future
                | Self::Globally
                | Self::Until
                | Self::X
                | Self::XBang
                | Self::Next
                | Self::NextBang
                | Self::NextA
                | Self::NextABang
                | Self::NextE
                | Self::NextEBang
                | Self::NextEvent
                | Self::NextEventBang
                | Self::NextEventA
                | Self::NextEventABang
                | Self::NextEventE
                | Self::NextEventEBang
                | Self::EventuallyBang
                | Self::Always
                | Self::Never
                | Self::W
                | Self::WeakUntil
                | Self::UntilBang
                | Self::UntilInclusive
                | Self::UntilBangInclusive
                | Self::Before
                | Self::BeforeBang
                | Self::BeforeInclusive
                | Self::BeforeBangInclusive
                | Self::WhileNot
                | Self::WhileNotBang
                | Self::WhileNotInclusive
                | Self::WhileNotBangInclusive
                | Self::Abort
        )
    }

    /// Operators that are recognized but deliberately not reduced.
    #[must_use]
    pub const fn is_unhandled_fl(self) -> bool {
        matches!(
            self,
            Self::Within
                | Self::WithinBang
                | Self::WithinInclusive
                | Self::WithinBangInclusive
                | Self::WhileNot
                | Self::WhileNotBang
                | Self::WhileNotInclusive
                | Self::WhileNotBangInclusive
                | Self::Abort
        )
    }

    /// The next-time family that may carry a `Colon(when, condition)` right child.
    #[must_use]
    pub const fn is_extended_next(self) -> bool {
        matches!(
            self,
            Self::X
                | Self::XBang
                | Self::Next
                | Self::NextBang
                | Self::NextA
                | Self::NextABang
                | Self::NextE
                | Self::NextEBang
                | Self::NextEvent
                | Self::NextEventBang
                | Self::NextEventA
                | Self::NextEventABang
                | Self::NextEventE
                | Self::NextEventEBang
        )
    }

    /// Strong next-event forms (`next_event!` and friends).
    #[must_use]
    pub const fn is_strong_next_event(self) -> bool {
        matches!(
            self,
            Self::NextEventBang | Self::NextEventABang | Self::NextEventEBang
        )
    }

    /// Operators that build SERE structure.
    #[must_use]
    pub const fn is_sere(self) -> bool {
        matches!(
            self,
            Self::Sere
                | Self::SereConcat
                | Self::SereFusion
                | Self::SereRepeated
                | Self::SereCompound
        )
    }

    /// Repetition kinds found under [`Op::SereRepeated`].
    #[must_use]
    pub const fn is_repetition(self) -> bool {
        matches!(
            self,
            Self::Star | Self::PlusRepeat | Self::StarEq | Self::StarMinusGt
        )
    }

    /// Suffix implications `|->` and `|=>`.
    #[must_use]
    pub const fn is_suffix_implication(self) -> bool {
        matches!(self, Self::PipeMinusGt | Self::PipeEqGt)
    }

    /// Operators that never take children.
    #[must_use]
    pub const fn is_nullary(self) -> bool {
        matches!(self, Self::Boolean | Self::Inf)
    }

    /// Operators whose both children must be present.
    #[must_use]
    pub const fn is_strictly_binary(self) -> bool {
        matches!(
            self,
            Self::And
                | Self::Or
                | Self::PslOr
                | Self::Xor
                | Self::Caret
                | Self::Iff
                | Self::Implies
                | Self::Until
                | Self::SereConcat
                | Self::SereFusion
                | Self::Eu
                | Self::Au
                | Self::ReplProp
        )
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
