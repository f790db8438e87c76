//! Lexer (tokenizer) for Quill source code
//!
//! A character-at-a-time scanner with one character of lookahead. Tokens are
//! produced lazily by [`Lexer::next_token`] (or through the [`Iterator`]
//! impl), and [`Lexer::scan_into`] drains them into a [`TokenStream`].
//!
//! Lexical faults (illegal characters, unterminated strings and comments) are
//! returned as tokens of an error [`Kind`] rather than as errors, so scanning
//! always runs to `Eof`. The parser reports them when it fails to match them.

use super::token::{Kind, Token, TokenStream, KEYWORDS};
use rustc_hash::FxHashMap;
use tracing::trace;

/// Lexer for Quill source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    keywords: FxHashMap<&'static str, Kind>,
    finished: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            keywords: KEYWORDS.iter().copied().collect(),
            finished: false,
        }
    }

    /// Pull tokens until exhaustion, appending each one (error kinds and the
    /// final `Eof` included) to `stream`.
    pub fn scan_into(&mut self, stream: &mut TokenStream) {
        while let Some(token) = self.next_token() {
            stream.push(token);
        }
    }

    /// Next token, or `None` once the `Eof` token has been handed out.
    pub fn next_token(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        loop {
            let start = self.position;
            let line = self.line;

            let Some(ch) = self.advance() else {
                self.finished = true;
                return Some(self.emit(Kind::Eof, start, line));
            };

            let kind = match ch {
                c if c.is_whitespace() => continue,

                '/' => {
                    if self.peek() == Some('*') {
                        self.advance();
                        if self.skip_block_comment() {
                            continue;
                        }
                        Kind::UnterminatedComment
                    } else {
                        Kind::Div
                    }
                }

                '"' => self.string_literal(),

                '0' => Kind::IntLit,
                '1'..='9' => {
                    while matches!(self.peek(), Some('0'..='9')) {
                        self.advance();
                    }
                    Kind::IntLit
                }

                c if is_ident_start(c) => {
                    while self.peek().is_some_and(is_ident_part) {
                        self.advance();
                    }
                    self.classify_word(start)
                }

                '=' => self.either('=', Kind::Equal, Kind::Assign),
                '!' => self.either('=', Kind::NotEqual, Kind::Not),
                '-' => self.either('>', Kind::Arrow, Kind::Minus),
                '.' => self.either('.', Kind::Range, Kind::Dot),
                '<' => {
                    if self.peek() == Some('=') {
                        self.advance();
                        Kind::Le
                    } else if self.peek() == Some('<') {
                        self.advance();
                        Kind::LShift
                    } else {
                        Kind::Lt
                    }
                }
                '>' => {
                    if self.peek() == Some('=') {
                        self.advance();
                        Kind::Ge
                    } else if self.peek() == Some('>') {
                        self.advance();
                        Kind::RShift
                    } else {
                        Kind::Gt
                    }
                }

                ';' => Kind::Semicolon,
                ',' => Kind::Comma,
                '(' => Kind::LParen,
                ')' => Kind::RParen,
                '[' => Kind::LSquare,
                ']' => Kind::RSquare,
                '{' => Kind::LCurly,
                '}' => Kind::RCurly,
                ':' => Kind::Colon,
                '?' => Kind::Question,
                '|' => Kind::Bar,
                '&' => Kind::And,
                '+' => Kind::Plus,
                '*' => Kind::Times,
                '%' => Kind::Mod,
                '@' => Kind::At,

                _ => Kind::IllegalChar,
            };

            return Some(self.emit(kind, start, line));
        }
    }

    /// Consume `next` if it follows, choosing between the two-character and
    /// one-character kinds.
    fn either(&mut self, next: char, double: Kind, single: Kind) -> Kind {
        if self.peek() == Some(next) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Scan the rest of a string literal after its opening quote. A backslash
    /// always consumes the following character, so `\"` does not terminate.
    fn string_literal(&mut self) -> Kind {
        while let Some(ch) = self.advance() {
            match ch {
                '"' => return Kind::StringLit,
                '\\' => {
                    if self.advance().is_none() {
                        break;
                    }
                }
                _ => {}
            }
        }
        Kind::UnterminatedString
    }

    /// Skip a block comment body after `/*`. Returns false if input ran out
    /// before the closing `*/`.
    fn skip_block_comment(&mut self) -> bool {
        while let Some(ch) = self.advance() {
            if ch == '*' && self.peek() == Some('/') {
                self.advance();
                return true;
            }
        }
        false
    }

    fn classify_word(&self, start: usize) -> Kind {
        let word: String = self.input[start..self.position].iter().collect();
        match word.as_str() {
            "null" => Kind::Null,
            "true" => Kind::BoolTrue,
            "false" => Kind::BoolFalse,
            other => self.keywords.get(other).copied().unwrap_or(Kind::Ident),
        }
    }

    fn emit(&self, kind: Kind, start: usize, line: usize) -> Token {
        let text: String = self.input[start..self.position].iter().collect();
        trace!(?kind, start, end = self.position, line, "token");
        Token::new(kind, start, self.position, line, text)
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character. `\n`, a lone `\r`, and `\r\n` each count as
    /// one line break.
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' || (ch == '\r' && self.peek() != Some('\n')) {
            self.line += 1;
        }

        Some(ch)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '$' || c == '_'
}

fn is_ident_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '$' || c == '_'
}

/// Lex the whole of `source` into a fresh token store.
pub fn tokenize(source: &str) -> TokenStream {
    let mut stream = TokenStream::new(source);
    Lexer::new(source).scan_into(&mut stream);
    stream
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Kind> {
        Lexer::new(source).map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("class A { def x : int; }"),
            vec![
                Kind::KwClass,
                Kind::Ident,
                Kind::LCurly,
                Kind::KwDef,
                Kind::Ident,
                Kind::Colon,
                Kind::KwInt,
                Kind::Semicolon,
                Kind::RCurly,
                Kind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("= == ! != < <= << > >= >> - -> . .. /"),
            vec![
                Kind::Assign,
                Kind::Equal,
                Kind::Not,
                Kind::NotEqual,
                Kind::Lt,
                Kind::Le,
                Kind::LShift,
                Kind::Gt,
                Kind::Ge,
                Kind::RShift,
                Kind::Minus,
                Kind::Arrow,
                Kind::Dot,
                Kind::Range,
                Kind::Div,
                Kind::Eof,
            ]
        );
    }

    #[test]
    fn test_single_char_punctuation() {
        assert_eq!(
            kinds(";,()[]{}:?|&+*%@"),
            vec![
                Kind::Semicolon,
                Kind::Comma,
                Kind::LParen,
                Kind::RParen,
                Kind::LSquare,
                Kind::RSquare,
                Kind::LCurly,
                Kind::RCurly,
                Kind::Colon,
                Kind::Question,
                Kind::Bar,
                Kind::And,
                Kind::Plus,
                Kind::Times,
                Kind::Mod,
                Kind::At,
                Kind::Eof,
            ]
        );
    }

    #[test]
    fn test_zero_is_a_complete_literal() {
        let tokens: Vec<Token> = Lexer::new("012 340").collect();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["0", "12", "340", ""]);
        assert!(tokens[..3].iter().all(|t| t.kind == Kind::IntLit));
    }

    #[test]
    fn test_keywords_and_literals() {
        assert_eq!(
            kinds("print printable null true false $x _y9"),
            vec![
                Kind::KwPrint,
                Kind::Ident,
                Kind::Null,
                Kind::BoolTrue,
                Kind::BoolFalse,
                Kind::Ident,
                Kind::Ident,
                Kind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_emit_nothing() {
        let tokens: Vec<Token> = Lexer::new("a /* one\ntwo */ b").collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].text(), "b");
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_line_terminators() {
        let tokens: Vec<Token> = Lexer::new("a\nb\r\nc\rd").collect();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4, 4]);
    }

    #[test]
    fn test_string_with_escaped_quote() {
        let source = r#""a\"b""#;
        let tokens: Vec<Token> = Lexer::new(source).collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, Kind::StringLit);
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, source.chars().count());
    }

    #[test]
    fn test_unterminated_comment() {
        let tokens: Vec<Token> = Lexer::new("x /* never closed").collect();
        assert_eq!(tokens[1].kind, Kind::UnterminatedComment);
        assert_eq!(tokens[1].start, 2);
        assert_eq!(tokens[2].kind, Kind::Eof);
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_unterminated_string() {
        let tokens: Vec<Token> = Lexer::new("\"abc\\\"").collect();
        assert_eq!(tokens[0].kind, Kind::UnterminatedString);
        assert_eq!(tokens[0].end, 6);
        assert_eq!(tokens[1].kind, Kind::Eof);
    }

    #[test]
    fn test_illegal_char() {
        let tokens: Vec<Token> = Lexer::new("a # b").collect();
        assert_eq!(tokens[1].kind, Kind::IllegalChar);
        assert_eq!(tokens[1].text(), "#");
        assert_eq!(tokens[2].kind, Kind::Ident);
    }

    #[test]
    fn test_nothing_after_eof() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().map(|t| t.kind), Some(Kind::Eof));
        assert!(lexer.next_token().is_none());
        assert!(lexer.next_token().is_none());
    }

    #[test]
    fn test_scan_fills_stream() {
        let stream = tokenize("x = 1;");
        let kinds: Vec<Kind> = stream.tokens().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![Kind::Ident, Kind::Assign, Kind::IntLit, Kind::Semicolon, Kind::Eof]
        );
    }

    #[test]
    fn test_scan_into_appends_through_eof() {
        let source = "a # \"b";
        let mut stream = TokenStream::new(source);
        let mut lexer = Lexer::new(source);
        lexer.scan_into(&mut stream);

        let kinds: Vec<Kind> = stream.tokens().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![Kind::Ident, Kind::IllegalChar, Kind::UnterminatedString, Kind::Eof]
        );
        assert_eq!(stream.tokens()[2].text(), "\"b");

        // A drained lexer adds nothing more
        lexer.scan_into(&mut stream);
        assert_eq!(stream.tokens().len(), 4);
    }
}
