// ABOUTME: AST node definitions - closed sum of expressions and statements produced by the parser

use crate::token::Token;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Expression {
    Identifier {
        token: Token,
        name: String,
    },
    Integer {
        token: Token,
        value: i64,
    },
    Float {
        token: Token,
        value: f64,
    },
    Boolean {
        token: Token,
        value: bool,
    },
    StringLiteral {
        token: Token,
        value: String,
    },
    Prefix {
        token: Token,
        operator: String,
        right: Box<Expression>,
    },
    Infix {
        token: Token,
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },
    If {
        token: Token,
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    Function {
        token: Token,
        name: Option<String>,
        params: Vec<String>,
        body: BlockStatement,
    },
    Lambda {
        token: Token,
        params: Vec<String>,
        body: BlockStatement,
    },
    Call {
        token: Token,
        callee: Box<Expression>,
        args: Vec<Expression>,
    },
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier { name, .. } => write!(f, "{name}"),
            Expression::Integer { value, .. } => write!(f, "{value}"),
            Expression::Float { value, .. } => write!(f, "{value}"),
            Expression::Boolean { value, .. } => {
                write!(f, "{}", if *value { "verdadero" } else { "falso" })
            }
            Expression::StringLiteral { value, .. } => write!(f, "{value}"),
            Expression::Prefix {
                operator, right, ..
            } => write!(f, "({operator}{right})"),
            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => write!(f, "({left} {operator} {right})"),
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "si {condition} {consequence}")?;
                if let Some(alt) = alternative {
                    write!(f, " si_no {alt}")?;
                }
                Ok(())
            }
            Expression::Function {
                name, params, body, ..
            } => {
                write!(
                    f,
                    "metodo {}({}) {}",
                    name.as_deref().unwrap_or(""),
                    params.join(", "),
                    body
                )
            }
            Expression::Lambda { params, body, .. } => {
                write!(f, "procedimiento({}) {}", params.join(", "), body)
            }
            Expression::Call { callee, args, .. } => {
                let args_str: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{callee}({})", args_str.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum Statement {
    Let {
        token: Token,
        name: String,
        value: Option<Expression>,
    },
    Return {
        token: Token,
        value: Option<Expression>,
    },
    ExpressionStmt {
        token: Token,
        expression: Expression,
    },
    Block(BlockStatement),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value, .. } => match value {
                Some(v) => write!(f, "variable {name} = {v};"),
                None => write!(f, "variable {name};"),
            },
            Statement::Return { value, .. } => match value {
                Some(v) => write!(f, "regresa {v};"),
                None => write!(f, "regresa;"),
            },
            Statement::ExpressionStmt { expression, .. } => write!(f, "{expression}"),
            Statement::Block(block) => write!(f, "{block}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_let_statement_display() {
        let stmt = Statement::Let {
            token: Token::new(TokenKind::Let, "variable"),
            name: "miVar".to_string(),
            value: Some(Expression::Identifier {
                token: Token::new(TokenKind::Identifier, "otraVar"),
                name: "otraVar".to_string(),
            }),
        };
        assert_eq!(stmt.to_string(), "variable miVar = otraVar;");
    }

    #[test]
    fn test_infix_display() {
        let expr = Expression::Infix {
            token: Token::new(TokenKind::Plus, "+"),
            left: Box::new(Expression::Integer {
                token: Token::new(TokenKind::Integer, "1"),
                value: 1,
            }),
            operator: "+".to_string(),
            right: Box::new(Expression::Integer {
                token: Token::new(TokenKind::Integer, "2"),
                value: 2,
            }),
        };
        assert_eq!(expr.to_string(), "(1 + 2)");
    }
}
