//! Inline expression tokens.

use std::ops::Range;

use logos::Logos;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum TokenKind {
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Binding
    #[token(":=")]
    ColonEq,
    #[token("=")]
    Eq,

    // Comparison
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,

    // Logic
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,

    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("$")]
    Dollar,

    // Literals are decoded by the parser so range errors get a position
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Real,
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    /// End of input. Never produced by logos.
    Eof,
}

/// A token and its byte range in the lexed text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Lex `body` into tokens terminated by [`TokenKind::Eof`].
///
/// On an unrecognized character, returns the byte range of the offending
/// slice instead.
pub(crate) fn lex(body: &str) -> Result<Vec<Token>, Range<usize>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(body);

    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                span: lexer.span(),
            }),
            Err(()) => return Err(lexer.span()),
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: body.len()..body.len(),
    });
    Ok(tokens)
}
