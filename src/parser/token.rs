//! Token kinds, tokens and the token store
//!
//! [`Kind`] is the closed set of lexical categories. The grammar's operator
//! levels and first-sets are fixed slices of it ([`REL_OPS`], [`FACTOR_FIRST`],
//! ...) so the parser can test membership without rebuilding tables.
//!
//! [`TokenStream`] owns the source characters and the tokens the
//! [`Lexer`](super::lexer::Lexer) appends to it, and hands them out one at a
//! time to the parser.

use std::fmt;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    // Literals
    Ident,
    IntLit,
    StringLit,
    BoolTrue,
    BoolFalse,
    Null,

    // Keywords
    KwInt,
    KwString,
    KwBoolean,
    KwImport,
    KwClass,
    KwDef,
    KwWhile,
    KwIf,
    KwElse,
    KwReturn,
    KwPrint,
    KwSize,
    KwKey,
    KwValue,

    // Separators
    Dot,       // .
    Range,     // ..
    Semicolon, // ;
    Comma,     // ,
    LParen,    // (
    RParen,    // )
    LSquare,   // [
    RSquare,   // ]
    LCurly,    // {
    RCurly,    // }
    Colon,     // :
    Question,  // ?

    // Operators
    Assign,   // =
    Bar,      // |
    And,      // &
    Equal,    // ==
    NotEqual, // !=
    Lt,       // <
    Gt,       // >
    Le,       // <=
    Ge,       // >=
    Plus,     // +
    Minus,    // -
    Times,    // *
    Div,      // /
    Mod,      // %
    Not,      // !
    LShift,   // <<
    RShift,   // >>
    Arrow,    // ->
    At,       // @

    // Lexical errors
    IllegalChar,
    UnterminatedString,
    UnterminatedComment,

    Eof,
}

/// Binding strength of a binary operator, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Relational,
    Weak,
    Strong,
    VeryStrong,
}

pub const REL_OPS: &[Kind] = &[
    Kind::Bar,
    Kind::And,
    Kind::Equal,
    Kind::NotEqual,
    Kind::Lt,
    Kind::Gt,
    Kind::Le,
    Kind::Ge,
];
pub const WEAK_OPS: &[Kind] = &[Kind::Plus, Kind::Minus];
pub const STRONG_OPS: &[Kind] = &[Kind::Times, Kind::Div];
pub const VERY_STRONG_OPS: &[Kind] = &[Kind::LShift, Kind::RShift];

pub const SIMPLE_TYPES: &[Kind] = &[Kind::KwInt, Kind::KwBoolean, Kind::KwString];

/// Kinds that can begin a `Factor`, and therefore any expression.
pub const FACTOR_FIRST: &[Kind] = &[
    Kind::Ident,
    Kind::IntLit,
    Kind::BoolTrue,
    Kind::BoolFalse,
    Kind::StringLit,
    Kind::LParen,
    Kind::Not,
    Kind::Minus,
    Kind::KwSize,
    Kind::KwKey,
    Kind::KwValue,
    Kind::LCurly,
    Kind::At,
];

/// Kinds that begin a non-empty statement.
pub const STATEMENT_FIRST: &[Kind] = &[
    Kind::Ident,
    Kind::KwPrint,
    Kind::KwWhile,
    Kind::KwIf,
    Kind::Mod,
    Kind::KwReturn,
];

/// Reserved words. `true`, `false` and `null` are handled separately.
pub const KEYWORDS: &[(&str, Kind)] = &[
    ("int", Kind::KwInt),
    ("string", Kind::KwString),
    ("boolean", Kind::KwBoolean),
    ("import", Kind::KwImport),
    ("class", Kind::KwClass),
    ("def", Kind::KwDef),
    ("while", Kind::KwWhile),
    ("if", Kind::KwIf),
    ("else", Kind::KwElse),
    ("return", Kind::KwReturn),
    ("print", Kind::KwPrint),
    ("size", Kind::KwSize),
    ("key", Kind::KwKey),
    ("value", Kind::KwValue),
];

impl Kind {
    pub fn is_in(self, set: &[Kind]) -> bool {
        set.contains(&self)
    }

    /// Returns the precedence level for binary operator kinds.
    pub fn precedence(self) -> Option<Precedence> {
        match self {
            Kind::Bar
            | Kind::And
            | Kind::Equal
            | Kind::NotEqual
            | Kind::Lt
            | Kind::Gt
            | Kind::Le
            | Kind::Ge => Some(Precedence::Relational),
            Kind::Plus | Kind::Minus => Some(Precedence::Weak),
            Kind::Times | Kind::Div => Some(Precedence::Strong),
            Kind::LShift | Kind::RShift => Some(Precedence::VeryStrong),
            _ => None,
        }
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            Kind::IllegalChar | Kind::UnterminatedString | Kind::UnterminatedComment
        )
    }
}

impl Precedence {
    /// The operator kinds that share this level.
    pub fn operators(self) -> &'static [Kind] {
        match self {
            Precedence::Relational => REL_OPS,
            Precedence::Weak => WEAK_OPS,
            Precedence::Strong => STRONG_OPS,
            Precedence::VeryStrong => VERY_STRONG_OPS,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Ident => "identifier",
            Kind::IntLit => "integer literal",
            Kind::StringLit => "string literal",
            Kind::BoolTrue => "'true'",
            Kind::BoolFalse => "'false'",
            Kind::Null => "'null'",
            Kind::KwInt => "'int'",
            Kind::KwString => "'string'",
            Kind::KwBoolean => "'boolean'",
            Kind::KwImport => "'import'",
            Kind::KwClass => "'class'",
            Kind::KwDef => "'def'",
            Kind::KwWhile => "'while'",
            Kind::KwIf => "'if'",
            Kind::KwElse => "'else'",
            Kind::KwReturn => "'return'",
            Kind::KwPrint => "'print'",
            Kind::KwSize => "'size'",
            Kind::KwKey => "'key'",
            Kind::KwValue => "'value'",
            Kind::Dot => "'.'",
            Kind::Range => "'..'",
            Kind::Semicolon => "';'",
            Kind::Comma => "','",
            Kind::LParen => "'('",
            Kind::RParen => "')'",
            Kind::LSquare => "'['",
            Kind::RSquare => "']'",
            Kind::LCurly => "'{'",
            Kind::RCurly => "'}'",
            Kind::Colon => "':'",
            Kind::Question => "'?'",
            Kind::Assign => "'='",
            Kind::Bar => "'|'",
            Kind::And => "'&'",
            Kind::Equal => "'=='",
            Kind::NotEqual => "'!='",
            Kind::Lt => "'<'",
            Kind::Gt => "'>'",
            Kind::Le => "'<='",
            Kind::Ge => "'>='",
            Kind::Plus => "'+'",
            Kind::Minus => "'-'",
            Kind::Times => "'*'",
            Kind::Div => "'/'",
            Kind::Mod => "'%'",
            Kind::Not => "'!'",
            Kind::LShift => "'<<'",
            Kind::RShift => "'>>'",
            Kind::Arrow => "'->'",
            Kind::At => "'@'",
            Kind::IllegalChar => "illegal character",
            Kind::UnterminatedString => "unterminated string",
            Kind::UnterminatedComment => "unterminated comment",
            Kind::Eof => "end of file",
        };
        f.write_str(s)
    }
}

/// A lexed unit. `start` and `end` are character offsets into the source,
/// `end` exclusive; `line` is 1-based and names the line the token starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: Kind,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    text: String,
}

impl Token {
    pub fn new(kind: Kind, start: usize, end: usize, line: usize, text: String) -> Self {
        Self {
            kind,
            start,
            end,
            line,
            text,
        }
    }

    /// The raw lexeme as it appeared in the source.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Value of an `IntLit` token, `None` for other kinds or on overflow.
    pub fn int_value(&self) -> Option<i32> {
        match self.kind {
            Kind::IntLit => self.text.parse().ok(),
            _ => None,
        }
    }

    pub fn bool_value(&self) -> Option<bool> {
        match self.kind {
            Kind::BoolTrue => Some(true),
            Kind::BoolFalse => Some(false),
            _ => None,
        }
    }

    /// Contents of a `StringLit` token with the quotes removed and escape
    /// sequences resolved.
    pub fn string_value(&self) -> Option<String> {
        if self.kind != Kind::StringLit {
            return None;
        }
        let inner = self
            .text
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(&self.text);

        let mut value = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                value.push(ch);
                continue;
            }
            match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some(other) => value.push(other),
                None => value.push('\\'),
            }
        }
        Some(value)
    }

    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Kind::Eof => write!(f, "end of file"),
            Kind::Ident | Kind::IntLit | Kind::StringLit => {
                write!(f, "{} `{}`", self.kind, self.text)
            }
            Kind::IllegalChar | Kind::UnterminatedString | Kind::UnterminatedComment => {
                write!(f, "{} `{}`", self.kind, self.text.escape_debug())
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}

/// Ordered token store shared between the lexer and the parser.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    pub(crate) chars: Vec<char>,
    pub(crate) tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            tokens: Vec::new(),
            cursor: 0,
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Text covered by `start..end`, clamped to the input.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// Hands out the next stored token. After the last one, keeps returning
    /// an `Eof` token positioned at the end of input.
    pub fn next_token(&mut self) -> Token {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                token.clone()
            }
            None => match self.tokens.last() {
                Some(last) if last.kind == Kind::Eof => last.clone(),
                _ => {
                    let end = self.chars.len();
                    let line = self.tokens.last().map_or(1, |t| t.line);
                    Token::new(Kind::Eof, end, end, line, String::new())
                }
            },
        }
    }
}
