//! Inline expression parsing.
//!
//! Recursive descent over the token list, one method per precedence level:
//!
//! ```text
//! assignment  IDENT := e | IDENT = e      (right associative)
//! or          ||
//! and         &&
//! equality    == !=
//! comparison  < <= > >=
//! additive    + -
//! term        * / %
//! power       ^                           (right associative)
//! unary       ! -
//! primary     literals, identifiers, $identifiers, parentheses
//! ```
//!
//! Error columns are 1-based character positions in the full string,
//! including the `~>` marker and any leading whitespace.

mod token;

use yamlate_ir::errors::invalid_expression;
use yamlate_ir::{syntax, BinaryOp, Error, Expr, UnaryOp, Value, YamlResult};
use yamlate_stack::ensure_sufficient_stack;

use token::{lex, Token, TokenKind};

/// Parse an inline expression.
///
/// `text` may include the `~>` marker; if it does, the marker and anything
/// before it is skipped. Identifiers are not resolved.
pub fn parse_inline(text: &str) -> YamlResult<Expr> {
    let body = syntax::inline_body(text).unwrap_or(text);
    let base = text.len() - body.len();

    let tokens = lex(body).map_err(|span| {
        let found = body.get(span.clone()).unwrap_or_default();
        invalid_expression(
            text,
            format!("unexpected character `{found}`"),
            column(text, base + span.start),
        )
    })?;

    let mut parser = Parser {
        text,
        body,
        base,
        tokens,
        pos: 0,
    };
    let expr = parser.parse_expr()?;
    parser.expect_end()?;

    tracing::trace!(text, ?expr, "parsed inline expression");
    Ok(expr)
}

/// 1-based character column of a byte offset.
fn column(text: &str, offset: usize) -> usize {
    text.get(..offset).map_or(offset, |prefix| prefix.chars().count()) + 1
}

struct Parser<'a> {
    /// Full string, used for error reporting.
    text: &'a str,
    /// Expression body; token spans index into this.
    body: &'a str,
    /// Byte offset of `body` within `text`.
    base: usize,
    /// Always ends with `Eof`.
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    // Cursor

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Consume the current token. Stays put on `Eof`.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn slice(&self, token: &Token) -> &'a str {
        self.body.get(token.span.clone()).unwrap_or_default()
    }

    fn describe(&self, token: &Token) -> String {
        match token.kind {
            TokenKind::Eof => "end of input".to_owned(),
            _ => format!("`{}`", self.slice(token)),
        }
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> Error {
        invalid_expression(self.text, message, column(self.text, self.base + offset))
    }

    fn error(&self, token: &Token, message: impl Into<String>) -> Error {
        self.error_at(token.span.start, message)
    }

    fn expect_end(&self) -> YamlResult<()> {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            Ok(())
        } else {
            Err(self.error(
                token,
                format!("unexpected {} after expression", self.describe(token)),
            ))
        }
    }

    // Grammar

    fn parse_expr(&mut self) -> YamlResult<Expr> {
        ensure_sufficient_stack(|| self.parse_assignment())
    }

    fn parse_assignment(&mut self) -> YamlResult<Expr> {
        if self.check(TokenKind::Ident)
            && matches!(self.peek_kind(), TokenKind::ColonEq | TokenKind::Eq)
        {
            let target = self.advance();
            let name = self.slice(&target).to_owned();
            let declare = self.advance().kind == TokenKind::ColonEq;
            let value = Box::new(self.parse_expr()?);
            return Ok(if declare {
                Expr::Declare { name, value }
            } else {
                Expr::Assign { name, value }
            });
        }

        self.parse_or()
    }

    fn parse_or(&mut self) -> YamlResult<Expr> {
        let mut left = self.parse_and()?;

        while self.check(TokenKind::PipePipe) {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::binary(BinaryOp::Or, left, right);
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> YamlResult<Expr> {
        let mut left = self.parse_equality()?;

        while self.check(TokenKind::AmpAmp) {
            self.advance();
            let right = self.parse_equality()?;
            left = Expr::binary(BinaryOp::And, left, right);
        }

        Ok(left)
    }

    fn parse_equality(&mut self) -> YamlResult<Expr> {
        let mut left = self.parse_comparison()?;

        while let Some(op) = self.match_equality_op() {
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_comparison(&mut self) -> YamlResult<Expr> {
        let mut left = self.parse_additive()?;

        while let Some(op) = self.match_comparison_op() {
            self.advance();
            let right = self.parse_additive()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> YamlResult<Expr> {
        let mut left = self.parse_term()?;

        while let Some(op) = self.match_additive_op() {
            self.advance();
            let right = self.parse_term()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> YamlResult<Expr> {
        let mut left = self.parse_power()?;

        while let Some(op) = self.match_multiplicative_op() {
            self.advance();
            let right = self.parse_power()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_power(&mut self) -> YamlResult<Expr> {
        let base = self.parse_unary()?;

        if self.check(TokenKind::Caret) {
            self.advance();
            let exponent = ensure_sufficient_stack(|| self.parse_power())?;
            return Ok(Expr::binary(BinaryOp::Pow, base, exponent));
        }

        Ok(base)
    }

    fn parse_unary(&mut self) -> YamlResult<Expr> {
        let op = match self.current().kind {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_primary(),
        };
        self.advance();
        let operand = ensure_sufficient_stack(|| self.parse_unary())?;
        Ok(Expr::unary(op, operand))
    }

    fn parse_primary(&mut self) -> YamlResult<Expr> {
        let token = self.advance();
        let slice = self.slice(&token);

        match token.kind {
            TokenKind::Int => slice
                .parse::<i64>()
                .map(Expr::literal)
                .map_err(|_| self.error(&token, "integer literal out of range")),
            TokenKind::Real => slice
                .parse::<f64>()
                .map(Expr::literal)
                .map_err(|_| self.error(&token, "malformed real literal")),
            TokenKind::String => unescape(slice)
                .map(Expr::literal)
                .map_err(|at| self.error_at(token.span.start + at, "unknown escape sequence")),
            TokenKind::True => Ok(Expr::literal(true)),
            TokenKind::False => Ok(Expr::literal(false)),
            TokenKind::Null => Ok(Expr::Literal(Value::Null)),
            TokenKind::Ident => Ok(Expr::variable(slice)),
            TokenKind::Dollar => {
                let name = self.current().clone();
                if name.kind != TokenKind::Ident || name.span.start != token.span.end {
                    return Err(self.error(&name, "expected a variable name directly after `$`"));
                }
                self.advance();
                Ok(Expr::variable(self.slice(&name)))
            }
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                if !self.check(TokenKind::RParen) {
                    let found = self.current();
                    return Err(self.error(
                        found,
                        format!("expected `)`, found {}", self.describe(found)),
                    ));
                }
                self.advance();
                Ok(inner)
            }
            _ => Err(self.error(
                &token,
                format!("expected expression, found {}", self.describe(&token)),
            )),
        }
    }

    // Operator matching

    fn match_equality_op(&self) -> Option<BinaryOp> {
        match self.current().kind {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            _ => None,
        }
    }

    fn match_comparison_op(&self) -> Option<BinaryOp> {
        match self.current().kind {
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.current().kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.current().kind {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }
}

/// Decode a double-quoted literal. On a bad escape, returns its byte offset
/// within `quoted`.
fn unescape(quoted: &str) -> Result<String, usize> {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(quoted);
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.char_indices();

    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, '"')) => out.push('"'),
            Some((_, '\\')) => out.push('\\'),
            Some((_, 'n')) => out.push('\n'),
            Some((_, 't')) => out.push('\t'),
            // +1 for the opening quote
            _ => return Err(i + 1),
        }
    }

    Ok(out)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
