// ABOUTME: Pratt-style expression parser - tokens to Program, accumulating errors instead of panicking

use crate::ast::{BlockStatement, Expression, Program, Statement};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < > <= >=
    Sum,         // + -
    Product,     // * / %
    Raise,       // **
    Prefix,      // -x !x
    Call,        // f(x)
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => {
            Precedence::LessGreater
        }
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash | TokenKind::Percent => Precedence::Product,
        TokenKind::Power => Precedence::Raise,
        TokenKind::LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

fn has_infix(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::Power
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::LtEq
            | TokenKind::GtEq
            | TokenKind::LParen
    )
}

/// Tokens-to-`Program` parser. Single-pass, one token of lookahead
/// (`current`/`peek`), never rewinds. Malformed input yields a partial tree
/// plus messages in `errors()` rather than panicking.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    peek: Token,
    errors: Vec<String>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Parser {
            lexer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn advance(&mut self) {
        std::mem::swap(&mut self.current, &mut self.peek);
        self.peek = self.lexer.next_token();
    }

    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek.kind == kind {
            self.advance();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenKind) {
        self.errors.push(format!(
            "Se esperaba un \"{:?}\" Pero se obtuvo un \"{}\"",
            expected, self.peek.literal
        ));
    }

    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();
        while self.current.kind != TokenKind::Eof {
            if let Some(statement) = self.parse_statement() {
                program.statements.push(statement);
            }
            self.advance();
        }
        program
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::Identifier) {
            return None;
        }
        let name = self.current.literal.clone();

        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
            return Some(Statement::Let {
                token,
                name,
                value: None,
            });
        }

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(Statement::Let {
            token,
            name,
            value: Some(value),
        })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();

        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
            return Some(Statement::Return { token, value: None });
        }

        self.advance();
        let value = self.parse_expression(Precedence::Lowest);

        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(Statement::Return { token, value })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(Statement::ExpressionStmt { token, expression })
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let mut block = BlockStatement::default();
        self.advance(); // consume '{'

        while self.current.kind != TokenKind::RBrace && self.current.kind != TokenKind::Eof {
            if let Some(stmt) = self.parse_statement() {
                block.statements.push(stmt);
            }
            self.advance();
        }

        block
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while self.peek.kind != TokenKind::Semicolon && precedence < precedence_of(self.peek.kind)
        {
            if !has_infix(self.peek.kind) {
                return Some(left);
            }
            self.advance();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current.kind {
            TokenKind::Identifier => Some(Expression::Identifier {
                token: self.current.clone(),
                name: self.current.literal.clone(),
            }),
            TokenKind::Integer => self.parse_integer_literal(),
            TokenKind::Float => self.parse_float_literal(),
            TokenKind::StringLiteral => Some(Expression::StringLiteral {
                token: self.current.clone(),
                value: self.current.literal.clone(),
            }),
            TokenKind::True | TokenKind::False => Some(Expression::Boolean {
                token: self.current.clone(),
                value: self.current.kind == TokenKind::True,
            }),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Lambda => self.parse_lambda(),
            TokenKind::Function => self.parse_function(),
            _ => {
                self.errors.push(format!(
                    "No se encontro ninguna funcion para parsear \"{}\"",
                    self.current.literal
                ));
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        if self.current.kind == TokenKind::LParen {
            return self.parse_call_expression(left);
        }

        let token = self.current.clone();
        let operator = self.current.literal.clone();
        let precedence = precedence_of(self.current.kind);
        self.advance();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer { token, value }),
            Err(_) => {
                self.errors.push(format!(
                    "No se ha podido parsear {} como entero",
                    token.literal
                ));
                None
            }
        }
    }

    fn parse_float_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        match token.literal.parse::<f64>() {
            Ok(value) => Some(Expression::Float { token, value }),
            Err(_) => {
                self.errors.push(format!(
                    "No se ha podido parsear {} como entero",
                    token.literal
                ));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let operator = self.current.literal.clone();
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix {
            token,
            operator,
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.advance(); // consume '('
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    /// `si (cond) { ... } [si_no ({ ... } | si (...) ...)]`
    ///
    /// A `si_no si` chain is represented by wrapping the nested if-expression
    /// in a single-statement alternative block, so `alternative` is always a
    /// plain `BlockStatement` regardless of which form produced it.
    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek.kind == TokenKind::Else {
            self.advance(); // on 'si_no'

            if self.peek.kind == TokenKind::If {
                self.advance(); // on 'si'
                let nested_token = self.current.clone();
                let nested = self.parse_if_expression()?;
                Some(BlockStatement {
                    statements: vec![Statement::ExpressionStmt {
                        token: nested_token,
                        expression: nested,
                    }],
                })
            } else {
                if !self.expect_peek(TokenKind::LBrace) {
                    return None;
                }
                Some(self.parse_block_statement())
            }
        } else {
            None
        };

        Some(Expression::If {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_identifier_list(&mut self) -> Option<Vec<String>> {
        let mut params = Vec::new();

        if self.peek.kind == TokenKind::RParen {
            self.advance();
            return Some(params);
        }

        self.advance();
        params.push(self.current.literal.clone());

        while self.peek.kind == TokenKind::Comma {
            self.advance();
            self.advance();
            params.push(self.current.literal.clone());
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(params)
    }

    fn parse_lambda(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let params = self.parse_identifier_list()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expression::Lambda {
            token,
            params,
            body,
        })
    }

    fn parse_function(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        if !self.expect_peek(TokenKind::Identifier) {
            return None;
        }
        let name = self.current.literal.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let params = self.parse_identifier_list()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expression::Function {
            token,
            name: Some(name),
            params,
            body,
        })
    }

    fn parse_call_expression(&mut self, callee: Expression) -> Option<Expression> {
        let token = self.current.clone();
        let args = self.parse_call_arguments()?;
        Some(Expression::Call {
            token,
            callee: Box::new(callee),
            args,
        })
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut args = Vec::new();

        if self.peek.kind == TokenKind::RParen {
            self.advance();
            return Some(args);
        }

        self.advance();
        args.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek.kind == TokenKind::Comma {
            self.advance();
            self.advance();
            args.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(args)
    }
}

/// Convenience entry point: lex+parse a full source string.
pub fn parse(source: &str) -> (Program, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.errors().to_vec())
}
