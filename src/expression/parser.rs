use crate::expression::ast::{Ast, BinaryOp, UnaryOp};
use crate::expression::error::ExprError;
use crate::expression::lexer::{Span, Token, TokenKind, lex};

/// Deepest accepted nesting of parentheses, signs, exponents and call arguments.
pub(crate) const MAX_NESTING: usize = 256;

/// Parse one expression argument. Empty or whitespace-only text is an error.
pub(crate) fn parse_ast(src: &str) -> Result<Ast, ExprError> {
    let tokens = lex(src)?;
    let mut p = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    if p.peek().kind == TokenKind::Eof {
        return Err(ExprError::new(0, "empty expression"));
    }
    let expr = p.parse_sum()?;
    p.expect(TokenKind::Eof)?;
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn bump(&mut self) -> Token {
        let t = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ExprError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ExprError::new(
                self.span().start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_sum(&mut self) -> Result<Ast, ExprError> {
        let first = self.parse_product()?;
        let mut rest = Vec::new();
        loop {
            let op = if self.consume(TokenKind::Plus) {
                BinaryOp::Add
            } else if self.consume(TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            rest.push((op, self.parse_product()?));
        }
        Ok(chain(first, rest))
    }

    fn parse_product(&mut self) -> Result<Ast, ExprError> {
        let first = self.parse_unary()?;
        let mut rest = Vec::new();
        loop {
            let op = if self.consume(TokenKind::Star) {
                BinaryOp::Mul
            } else if self.consume(TokenKind::Slash) {
                BinaryOp::Div
            } else {
                break;
            };
            rest.push((op, self.parse_unary()?));
        }
        Ok(chain(first, rest))
    }

    // Every nested construct re-enters here, so this is the one depth gate.
    fn parse_unary(&mut self) -> Result<Ast, ExprError> {
        if self.depth >= MAX_NESTING {
            return Err(ExprError::new(
                self.span().start,
                "expression nested too deeply",
            ));
        }
        self.depth += 1;
        let out = self.parse_signed();
        self.depth -= 1;
        out
    }

    fn parse_signed(&mut self) -> Result<Ast, ExprError> {
        if self.consume(TokenKind::Minus) {
            let e = self.parse_unary()?;
            return Ok(Ast::Unary {
                op: UnaryOp::Neg,
                expr: Box::new(e),
            });
        }
        if self.consume(TokenKind::Plus) {
            let e = self.parse_unary()?;
            return Ok(Ast::Unary {
                op: UnaryOp::Pos,
                expr: Box::new(e),
            });
        }
        self.parse_power()
    }

    // Right-associative; the exponent may carry its own sign (`x**-2`).
    fn parse_power(&mut self) -> Result<Ast, ExprError> {
        let base = self.parse_postfix()?;
        if self.consume(TokenKind::Pow) {
            let exp = self.parse_unary()?;
            return Ok(Ast::Binary {
                op: BinaryOp::Pow,
                left: Box::new(base),
                right: Box::new(exp),
            });
        }
        Ok(base)
    }

    fn parse_postfix(&mut self) -> Result<Ast, ExprError> {
        let bare_ident = matches!(self.peek().kind, TokenKind::Ident(_));
        let e = self.parse_primary()?;
        if self.peek().kind != TokenKind::LParen {
            return Ok(e);
        }
        let call_start = self.span().start;
        match e {
            Ast::Ident { name, span } if bare_ident => {
                self.bump();
                let args = self.parse_args()?;
                Ok(Ast::Call {
                    func: name,
                    span,
                    args,
                })
            }
            _ => Err(ExprError::new(
                call_start,
                "call target must be an identifier",
            )),
        }
    }

    fn parse_args(&mut self) -> Result<Vec<Ast>, ExprError> {
        let mut args = Vec::new();
        if self.consume(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_sum()?);
            if self.consume(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RParen)?;
            return Ok(args);
        }
    }

    fn parse_primary(&mut self) -> Result<Ast, ExprError> {
        let t = self.bump();
        match t.kind {
            TokenKind::Int(v) => Ok(Ast::Int(v)),
            TokenKind::Float(v) => Ok(Ast::Float(v)),
            TokenKind::Ident(name) => Ok(Ast::Ident { name, span: t.span }),
            TokenKind::LParen => {
                let e = self.parse_sum()?;
                self.expect(TokenKind::RParen)?;
                Ok(e)
            }
            other => Err(ExprError::new(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }
}

fn chain(first: Ast, rest: Vec<(BinaryOp, Ast)>) -> Ast {
    if rest.is_empty() {
        first
    } else {
        Ast::Chain {
            first: Box::new(first),
            rest,
        }
    }
}
