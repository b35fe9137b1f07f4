//! Expression parsing by precedence climbing.
//!
//! Expressions appear in field initializers, enum constant arguments,
//! annotation arguments and annotation element defaults.

use super::error::{ParseError, ParseResult};
use super::lexer::{LexicalToken, Token};
use super::literal::{self, NumberValue};
use super::parser::Parser;
use super::span::{HasSpan, Location};
use crate::ast::*;

/// Lowest precedence: assignment, right-associative
pub const ASSIGNMENT_PRECEDENCE: u8 = 0;
/// The conditional operator, the loosest level below assignment
pub const CONDITIONAL_PRECEDENCE: u8 = 1;
const RELATIONAL_PRECEDENCE: u8 = 8;

/// Binary operator and precedence for a token; higher binds tighter
fn binary_op(token: Token) -> Option<(BinaryOp, u8)> {
    let entry = match token {
        Token::PipePipe => (BinaryOp::Or, 2),
        Token::AndAnd => (BinaryOp::And, 3),
        Token::Pipe => (BinaryOp::BitOr, 4),
        Token::Caret => (BinaryOp::Xor, 5),
        Token::Amp => (BinaryOp::BitAnd, 6),
        Token::Eq => (BinaryOp::Eq, 7),
        Token::Ne => (BinaryOp::Ne, 7),
        Token::Lt => (BinaryOp::Lt, RELATIONAL_PRECEDENCE),
        Token::Gt => (BinaryOp::Gt, RELATIONAL_PRECEDENCE),
        Token::Le => (BinaryOp::Le, RELATIONAL_PRECEDENCE),
        Token::Ge => (BinaryOp::Ge, RELATIONAL_PRECEDENCE),
        Token::LShift => (BinaryOp::LShift, 9),
        Token::RShift => (BinaryOp::RShift, 9),
        Token::URShift => (BinaryOp::URShift, 9),
        Token::Plus => (BinaryOp::Add, 10),
        Token::Minus => (BinaryOp::Sub, 10),
        Token::Star => (BinaryOp::Mul, 11),
        Token::Slash => (BinaryOp::Div, 11),
        Token::Percent => (BinaryOp::Mod, 11),
        _ => return None,
    };
    Some(entry)
}

fn assign_op(token: Token) -> Option<AssignOp> {
    let op = match token {
        Token::Assign => AssignOp::Assign,
        Token::AddAssign => AssignOp::Add,
        Token::SubAssign => AssignOp::Sub,
        Token::MulAssign => AssignOp::Mul,
        Token::DivAssign => AssignOp::Div,
        Token::ModAssign => AssignOp::Mod,
        Token::AndAssign => AssignOp::BitAnd,
        Token::OrAssign => AssignOp::BitOr,
        Token::XorAssign => AssignOp::Xor,
        Token::LShiftAssign => AssignOp::LShift,
        Token::RShiftAssign => AssignOp::RShift,
        Token::URShiftAssign => AssignOp::URShift,
        _ => return None,
    };
    Some(op)
}

/// Variables, fields and array elements, possibly parenthesized
fn is_assignable(expr: &Expr) -> bool {
    match expr {
        Expr::Identifier(id) => id.name != "this" && id.name != "super",
        Expr::FieldAccess(_) | Expr::ArrayAccess(_) => true,
        Expr::Parenthesized(p) => is_assignable(&p.inner),
        _ => false,
    }
}

/// Tokens that may follow `(Type)` when it is a reference-type cast
fn starts_cast_operand(token: Token) -> bool {
    matches!(
        token,
        Token::Identifier
            | Token::StringLiteral
            | Token::CharLiteral
            | Token::NumberLiteral
            | Token::True
            | Token::False
            | Token::Null
            | Token::LParen
            | Token::Bang
            | Token::Tilde
            | Token::This
            | Token::Super
            | Token::New
            | Token::Switch
    ) || token.is_primitive_type()
}

impl<'src> Parser<'src> {
    /// Full expression, assignment included
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_expression_prec(ASSIGNMENT_PRECEDENCE)
    }

    /// Expression whose operators all bind at least as tightly as
    /// `min_precedence`
    pub fn parse_expression_prec(&mut self, min_precedence: u8) -> ParseResult<Expr> {
        self.nested(|p| {
            let left = p.parse_unary()?;
            let mut expr = p.parse_binary_rest(left, min_precedence.max(CONDITIONAL_PRECEDENCE + 1))?;
            if min_precedence <= CONDITIONAL_PRECEDENCE && p.check(Token::Question) {
                expr = p.parse_conditional_rest(expr)?;
            }
            if min_precedence <= ASSIGNMENT_PRECEDENCE {
                if let Some(operator) = p.peek_token().and_then(assign_op) {
                    return p.parse_assignment_rest(expr, operator);
                }
            }
            Ok(expr)
        })
    }

    /// `target op= value`; the value may itself be an assignment
    fn parse_assignment_rest(&mut self, target: Expr, operator: AssignOp) -> ParseResult<Expr> {
        if !is_assignable(&target) {
            return Err(ParseError::invalid_syntax("invalid assignment target", target.span()));
        }
        self.advance();
        let value = self.parse_expression()?;
        let span = target.span().merge(value.span());
        Ok(Expr::Assign(AssignExpr {
            target: Box::new(target),
            operator,
            value: Box::new(value),
            span,
        }))
    }

    fn parse_binary_rest(&mut self, mut left: Expr, min_precedence: u8) -> ParseResult<Expr> {
        loop {
            let Some(token) = self.peek_token() else { break };

            if token == Token::InstanceOf {
                if RELATIONAL_PRECEDENCE < min_precedence {
                    break;
                }
                self.advance();
                self.match_token(Token::Final);
                let target_type = self.parse_type_ref()?;
                let span = left.span().merge(target_type.span);
                left = Expr::InstanceOf(InstanceOfExpr {
                    expr: Box::new(left),
                    target_type,
                    span,
                });
                continue;
            }

            let Some((operator, precedence)) = binary_op(token) else { break };
            if precedence < min_precedence {
                break;
            }
            self.advance();
            let mut right = self.parse_unary()?;
            // bind tighter operators on the right first; all are left-associative
            while let Some(next) = self.peek_token() {
                let next_precedence = match next {
                    Token::InstanceOf => RELATIONAL_PRECEDENCE,
                    other => match binary_op(other) {
                        Some((_, p)) => p,
                        None => break,
                    },
                };
                if next_precedence <= precedence {
                    break;
                }
                right = self.parse_binary_rest(right, precedence + 1)?;
            }
            let span = left.span().merge(right.span());
            left = Expr::Binary(BinaryExpr {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                span,
            });
        }
        Ok(left)
    }

    /// `cond ? a : b`, right-associative
    fn parse_conditional_rest(&mut self, condition: Expr) -> ParseResult<Expr> {
        self.consume(Token::Question, "'?'")?;
        let then_expr = self.parse_expression()?;
        self.consume(Token::Colon, "':' in conditional expression")?;
        let else_expr = self.parse_expression_prec(CONDITIONAL_PRECEDENCE)?;
        let span = condition.span().merge(else_expr.span());
        Ok(Expr::Conditional(ConditionalExpr {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
            span,
        }))
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let operator = match self.peek_token() {
            Some(Token::Plus) => Some(UnaryOp::Plus),
            Some(Token::Minus) => Some(UnaryOp::Minus),
            Some(Token::Bang) => Some(UnaryOp::Not),
            Some(Token::Tilde) => Some(UnaryOp::BitNot),
            Some(Token::Inc) => Some(UnaryOp::PreInc),
            Some(Token::Dec) => Some(UnaryOp::PreDec),
            _ => None,
        };
        if let Some(operator) = operator {
            let start = self.current_span().start;
            self.advance();
            let operand = self.nested(|p| p.parse_unary())?;
            return Ok(Expr::Unary(UnaryExpr {
                operator,
                operand: Box::new(operand),
                span: self.span_from(start),
            }));
        }

        if self.check(Token::LParen) && self.cast_ahead() {
            let start = self.current_span().start;
            self.advance();
            let target_type = self.parse_type_ref()?;
            self.consume(Token::RParen, "')' after cast type")?;
            let expr = self.nested(|p| p.parse_unary())?;
            return Ok(Expr::Cast(CastExpr {
                target_type,
                expr: Box::new(expr),
                span: self.span_from(start),
            }));
        }

        self.parse_postfix()
    }

    /// Decide whether `(` opens a cast, looking ahead without consuming
    fn cast_ahead(&mut self) -> bool {
        let mut k = 1;
        match self.peek_nth(k) {
            Some(token) if token.is_primitive_type() => {
                k += 1;
                while self.peek_nth(k) == Some(Token::LBracket) && self.peek_nth(k + 1) == Some(Token::RBracket) {
                    k += 2;
                }
                return self.peek_nth(k) == Some(Token::RParen);
            }
            Some(Token::Identifier) => {}
            _ => return false,
        }

        // Name {. Name} [<...>] {[]} )
        k += 1;
        let mut angle = 0i32;
        loop {
            let Some(token) = self.peek_nth(k) else { return false };
            match token {
                Token::Dot | Token::Identifier | Token::Comma | Token::Question | Token::Extends | Token::Super | Token::Amp
                    if angle > 0 || matches!(token, Token::Dot | Token::Identifier) => {}
                Token::Lt => angle += 1,
                Token::Gt => angle -= 1,
                Token::RShift => angle -= 2,
                Token::URShift => angle -= 3,
                Token::LBracket if self.peek_nth(k + 1) == Some(Token::RBracket) => k += 1,
                Token::RParen if angle == 0 => break,
                t if t.is_primitive_type() && angle > 0 => {}
                _ => return false,
            }
            if angle < 0 {
                return false;
            }
            k += 1;
        }
        self.peek_nth(k + 1).is_some_and(starts_cast_operand)
    }

    /// `( [params] ) ->` or `Ident ->` ahead
    fn lambda_ahead(&mut self) -> bool {
        match self.peek_token() {
            Some(Token::Identifier) => self.peek_nth(1) == Some(Token::Arrow),
            Some(Token::LParen) => {
                let mut depth = 0usize;
                let mut k = 0;
                while let Some(token) = self.peek_nth(k) {
                    match token {
                        Token::LParen => depth += 1,
                        Token::RParen => {
                            depth -= 1;
                            if depth == 0 {
                                return self.peek_nth(k + 1) == Some(Token::Arrow);
                            }
                        }
                        Token::LBrace | Token::RBrace | Token::Semicolon => return false,
                        _ => {}
                    }
                    k += 1;
                }
                false
            }
            _ => false,
        }
    }

    fn parse_lambda(&mut self) -> ParseResult<Expr> {
        let start = self.current_span().start;
        let mut params = Vec::new();
        if self.check(Token::Identifier) {
            let tok = self.consume(Token::Identifier, "identifier")?;
            params.push(LambdaParam {
                type_ref: None,
                name: tok.lexeme,
                span: tok.span,
            });
        } else {
            self.consume(Token::LParen, "'('")?;
            if !self.check(Token::RParen) {
                loop {
                    params.push(self.parse_lambda_param()?);
                    if !self.match_token(Token::Comma) {
                        break;
                    }
                }
            }
            self.consume(Token::RParen, "')' after lambda parameters")?;
        }
        self.consume(Token::Arrow, "'->'")?;
        let body = if self.check(Token::LBrace) {
            LambdaBody::Block(self.parse_block()?)
        } else {
            LambdaBody::Expr(Box::new(self.parse_expression()?))
        };
        Ok(Expr::Lambda(LambdaExpr {
            params,
            body,
            span: self.span_from(start),
        }))
    }

    fn parse_lambda_param(&mut self) -> ParseResult<LambdaParam> {
        let start = self.current_span().start;
        if self.check(Token::Identifier) && matches!(self.peek_nth(1), Some(Token::Comma | Token::RParen)) {
            let name = self.parse_identifier()?;
            return Ok(LambdaParam { type_ref: None, name, span: self.span_from(start) });
        }
        self.parse_modifiers()?;
        let mut type_ref = self.parse_type_ref()?;
        if self.match_token(Token::Ellipsis) {
            type_ref.array_dims += 1;
        }
        let name = self.parse_identifier()?;
        Ok(LambdaParam {
            type_ref: Some(type_ref),
            name,
            span: self.span_from(start),
        })
    }

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;
        let start = expr.span().start;
        loop {
            match self.peek_token() {
                Some(Token::Dot) => match self.peek_nth(1) {
                    Some(Token::Identifier) => {
                        self.advance();
                        let name = self.parse_identifier()?;
                        expr = if self.check(Token::LParen) {
                            let arguments = self.parse_arguments()?;
                            Expr::MethodCall(MethodCallExpr {
                                target: Some(Box::new(expr)),
                                name,
                                arguments,
                                span: self.span_from(start),
                            })
                        } else {
                            Expr::FieldAccess(FieldAccessExpr {
                                target: Box::new(expr),
                                name,
                                span: self.span_from(start),
                            })
                        };
                    }
                    Some(Token::Lt) => {
                        // explicit type arguments: `Collections.<T>emptyList()`
                        self.advance();
                        self.parse_type_args()?;
                        let name = self.parse_identifier()?;
                        let arguments = self.parse_arguments()?;
                        expr = Expr::MethodCall(MethodCallExpr {
                            target: Some(Box::new(expr)),
                            name,
                            arguments,
                            span: self.span_from(start),
                        });
                    }
                    Some(Token::Class) => {
                        let target_type = self.expr_as_type(&expr, 0)?;
                        self.advance();
                        self.advance();
                        expr = Expr::ClassLiteral(ClassLiteralExpr {
                            target_type,
                            span: self.span_from(start),
                        });
                    }
                    Some(Token::This | Token::Super) => {
                        self.advance();
                        let name = self.advance().map(|t| t.lexeme).unwrap_or_default();
                        expr = Expr::FieldAccess(FieldAccessExpr {
                            target: Box::new(expr),
                            name,
                            span: self.span_from(start),
                        });
                    }
                    _ => {
                        self.advance();
                        return Err(self.error_here("member name after '.'"));
                    }
                },
                Some(Token::LBracket) if self.peek_nth(1) == Some(Token::RBracket) => {
                    // `String[].class` or `int[]::new`
                    let mut dims = 0;
                    while self.check(Token::LBracket) && self.peek_nth(1) == Some(Token::RBracket) {
                        self.advance();
                        self.advance();
                        dims += 1;
                    }
                    let target_type = self.expr_as_type(&expr, dims)?;
                    if self.match_token(Token::DoubleColon) {
                        self.consume(Token::New, "'new'")?;
                        expr = Expr::MethodRef(MethodRefExpr {
                            target: Box::new(Expr::ClassLiteral(ClassLiteralExpr {
                                span: target_type.span,
                                target_type,
                            })),
                            name: "new".to_string(),
                            span: self.span_from(start),
                        });
                    } else {
                        self.consume(Token::Dot, "'.class' after array type")?;
                        self.consume(Token::Class, "'class'")?;
                        expr = Expr::ClassLiteral(ClassLiteralExpr {
                            target_type,
                            span: self.span_from(start),
                        });
                    }
                }
                Some(Token::LBracket) => {
                    self.advance();
                    let index = self.parse_expression()?;
                    self.consume(Token::RBracket, "']'")?;
                    expr = Expr::ArrayAccess(ArrayAccessExpr {
                        array: Box::new(expr),
                        index: Box::new(index),
                        span: self.span_from(start),
                    });
                }
                Some(Token::DoubleColon) => {
                    self.advance();
                    let name = if self.match_token(Token::New) {
                        "new".to_string()
                    } else {
                        self.parse_identifier()?
                    };
                    expr = Expr::MethodRef(MethodRefExpr {
                        target: Box::new(expr),
                        name,
                        span: self.span_from(start),
                    });
                }
                Some(Token::Inc | Token::Dec) => {
                    let operator = if self.check(Token::Inc) { UnaryOp::PostInc } else { UnaryOp::PostDec };
                    self.advance();
                    expr = Expr::Unary(UnaryExpr {
                        operator,
                        operand: Box::new(expr),
                        span: self.span_from(start),
                    });
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// Reinterpret a name chain as a type for class literals
    fn expr_as_type(&mut self, expr: &Expr, array_dims: usize) -> ParseResult<TypeRef> {
        match expr.qualified_name() {
            Some(name) => Ok(TypeRef {
                name,
                type_args: Vec::new(),
                array_dims,
                span: expr.span(),
            }),
            None => Err(ParseError::invalid_syntax("expected a type name", expr.span())),
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        if self.lambda_ahead() {
            return self.parse_lambda();
        }

        let Some(token) = self.peek_token() else {
            return Err(self.error_here("expression"));
        };
        match token {
            t if t.is_literal() => {
                let tok = self.consume(t, "literal")?;
                let value = decode_literal(&tok)?;
                Ok(Expr::Literal(LiteralExpr { value, span: tok.span }))
            }
            Token::Identifier => {
                let tok = self.consume(Token::Identifier, "identifier")?;
                if self.check(Token::LParen) {
                    let arguments = self.parse_arguments()?;
                    return Ok(Expr::MethodCall(MethodCallExpr {
                        target: None,
                        name: tok.lexeme,
                        arguments,
                        span: self.span_from(tok.span.start),
                    }));
                }
                Ok(Expr::Identifier(IdentifierExpr { name: tok.lexeme, span: tok.span }))
            }
            Token::This | Token::Super => {
                let tok = self.consume(token, "'this' or 'super'")?;
                Ok(Expr::Identifier(IdentifierExpr { name: tok.lexeme, span: tok.span }))
            }
            Token::LParen => {
                let start = self.current_span().start;
                self.advance();
                let inner = self.parse_expression()?;
                self.consume(Token::RParen, "')' after expression")?;
                Ok(Expr::Parenthesized(ParenthesizedExpr {
                    inner: Box::new(inner),
                    span: self.span_from(start),
                }))
            }
            Token::New => self.parse_new(),
            Token::Switch => {
                let start = self.consume(Token::Switch, "'switch'")?.span.start;
                self.consume(Token::LParen, "'(' after 'switch'")?;
                let selector = self.parse_expression()?;
                self.consume(Token::RParen, "')' after switch selector")?;
                let body = self.parse_block()?;
                Ok(Expr::Switch(SwitchExpr {
                    selector: Box::new(selector),
                    body,
                    span: self.span_from(start),
                }))
            }
            Token::LBrace => self.parse_array_literal().map(Expr::ArrayLiteral),
            Token::At => self.parse_annotation().map(Expr::Annotation),
            Token::Void => {
                let start = self.current_span().start;
                self.advance();
                let target_type = TypeRef {
                    name: "void".to_string(),
                    type_args: Vec::new(),
                    array_dims: 0,
                    span: self.span_from(start),
                };
                self.parse_class_literal_rest(start, target_type)
            }
            t if t.is_primitive_type() => {
                let start = self.current_span().start;
                let target_type = self.parse_type_ref()?;
                if target_type.is_array() && self.match_token(Token::DoubleColon) {
                    self.consume(Token::New, "'new'")?;
                    return Ok(Expr::MethodRef(MethodRefExpr {
                        target: Box::new(Expr::ClassLiteral(ClassLiteralExpr {
                            span: target_type.span,
                            target_type,
                        })),
                        name: "new".to_string(),
                        span: self.span_from(start),
                    }));
                }
                self.parse_class_literal_rest(start, target_type)
            }
            _ => Err(self.error_here("expression")),
        }
    }

    fn parse_class_literal_rest(&mut self, start: Location, target_type: TypeRef) -> ParseResult<Expr> {
        self.consume(Token::Dot, "'.class'")?;
        self.consume(Token::Class, "'class'")?;
        Ok(Expr::ClassLiteral(ClassLiteralExpr {
            target_type,
            span: self.span_from(start),
        }))
    }

    /// `new T(args) [body]`, `new T[n][]` or `new T[] { ... }`
    fn parse_new(&mut self) -> ParseResult<Expr> {
        let start = self.consume(Token::New, "'new'")?.span.start;
        if self.check(Token::Lt) {
            self.parse_type_args()?;
        }
        let mut target_type = self.parse_type_ref()?;

        if target_type.is_array() {
            let extra_dims = std::mem::take(&mut target_type.array_dims);
            let initializer = self.parse_array_literal()?;
            return Ok(Expr::NewArray(NewArrayExpr {
                element_type: target_type,
                dimensions: Vec::new(),
                extra_dims,
                initializer: Some(initializer),
                span: self.span_from(start),
            }));
        }

        if self.check(Token::LBracket) {
            let mut dimensions = Vec::new();
            while self.check(Token::LBracket) && self.peek_nth(1) != Some(Token::RBracket) {
                self.advance();
                dimensions.push(self.parse_expression()?);
                self.consume(Token::RBracket, "']'")?;
            }
            let mut extra_dims = 0;
            while self.check(Token::LBracket) && self.peek_nth(1) == Some(Token::RBracket) {
                self.advance();
                self.advance();
                extra_dims += 1;
            }
            return Ok(Expr::NewArray(NewArrayExpr {
                element_type: target_type,
                dimensions,
                extra_dims,
                initializer: None,
                span: self.span_from(start),
            }));
        }

        let arguments = self.parse_arguments()?;
        let anonymous_body = if self.check(Token::LBrace) {
            Some(self.parse_anonymous_body()?)
        } else {
            None
        };
        Ok(Expr::New(NewExpr {
            target_type,
            arguments,
            anonymous_body,
            span: self.span_from(start),
        }))
    }

    /// `{a, b, {c}}` with an optional trailing comma
    fn parse_array_literal(&mut self) -> ParseResult<ArrayLiteral> {
        let start = self.consume(Token::LBrace, "'{'")?.span.start;
        let mut elements = Vec::new();
        while !self.check(Token::RBrace) {
            elements.push(self.parse_expression()?);
            if !self.match_token(Token::Comma) {
                break;
            }
        }
        self.consume(Token::RBrace, "'}' to close array initializer")?;
        Ok(ArrayLiteral {
            elements,
            span: self.span_from(start),
        })
    }

    /// `( [expr {, expr}] )`
    pub(super) fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        self.consume(Token::LParen, "'('")?;
        let mut arguments = Vec::new();
        if !self.check(Token::RParen) {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.match_token(Token::Comma) {
                    break;
                }
            }
        }
        self.consume(Token::RParen, "')' after arguments")?;
        Ok(arguments)
    }
}

/// Literal value of a token. Tokens the lexer already flagged get a
/// placeholder value instead of a second diagnostic.
fn decode_literal(tok: &LexicalToken) -> ParseResult<Literal> {
    let value = match tok.token {
        Token::True => Literal::Boolean(true),
        Token::False => Literal::Boolean(false),
        Token::Null => Literal::Null,
        Token::StringLiteral if tok.lexeme.starts_with("\"\"\"") => {
            Literal::String(literal::decode_text_block(&tok.lexeme).unwrap_or_default())
        }
        Token::StringLiteral => {
            Literal::String(literal::unescape(literal::literal_body(&tok.lexeme, '"')).unwrap_or_default())
        }
        Token::CharLiteral => {
            Literal::Char(literal::decode_char(literal::literal_body(&tok.lexeme, '\'')).unwrap_or('\u{FFFD}'))
        }
        Token::NumberLiteral => match literal::parse_number(&tok.lexeme) {
            Ok(NumberValue::Int(v)) => Literal::Integer(v),
            Ok(NumberValue::Long(v)) => Literal::Long(v),
            Ok(NumberValue::Float(v)) => Literal::Float(v),
            Ok(NumberValue::Double(v)) => Literal::Double(v),
            Err(_) if tok.flagged => Literal::Integer(0),
            Err(err) => return Err(ParseError::invalid_syntax(err.to_string(), tok.span)),
        },
        other => return Err(ParseError::unexpected_token("literal", other.describe(), tok.span)),
    };
    Ok(value)
}
