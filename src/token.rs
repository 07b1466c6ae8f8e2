// ABOUTME: Token model for the Kinp lexer - closed enumeration of token kinds plus keyword lookup

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Identifiers and literals
    Identifier,
    Integer,
    Float,
    StringLiteral,

    // Operators
    Assign,    // =
    Plus,      // +
    Minus,     // -
    Asterisk,  // *
    Slash,     // /
    Percent,   // %
    Power,     // **
    Bang,      // !
    Lt,        // <
    Gt,        // >
    LtEq,      // <=
    GtEq,      // >=
    Eq,        // ==
    NotEq,     // !=

    // Delimiters
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Keywords
    Let,      // variable
    Return,   // regresa
    If,       // si
    Else,     // si_no
    Function, // metodo
    Lambda,   // procedimiento
    True,     // verdadero
    False,    // falso

    Eof,
    Illegal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Token {
            kind,
            literal: literal.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.literal)
    }
}

/// Resolves an identifier literal to a keyword token kind, or `Identifier` if
/// it doesn't match any keyword.
pub fn lookup_identifier(literal: &str) -> TokenKind {
    match literal {
        "variable" => TokenKind::Let,
        "regresa" => TokenKind::Return,
        "si" => TokenKind::If,
        "si_no" => TokenKind::Else,
        "procedimiento" => TokenKind::Lambda,
        "metodo" => TokenKind::Function,
        "verdadero" => TokenKind::True,
        "falso" => TokenKind::False,
        _ => TokenKind::Identifier,
    }
}
