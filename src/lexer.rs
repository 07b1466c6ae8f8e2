// ABOUTME: Lexer module - turns Kinp source text into a stream of tokens

use crate::token::{lookup_identifier, Token, TokenKind};

/// Character-cursor lexer. Advances over the source one Unicode scalar value
/// at a time; `next_token` always terminates the stream with `Eof` and keeps
/// returning it on further calls.
pub struct Lexer {
    input: Vec<char>,
    position: usize,      // index of `character`
    read_position: usize, // index of the next character to read
    character: Option<char>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer {
            input: source.chars().collect(),
            position: 0,
            read_position: 0,
            character: None,
        };
        lexer.read_character();
        lexer
    }

    fn read_character(&mut self) {
        self.character = self.input.get(self.read_position).copied();
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_character(&self) -> Option<char> {
        self.input.get(self.read_position).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.character {
            if c.is_ascii_whitespace() {
                self.read_character();
            } else {
                break;
            }
        }
    }

    /// Skips a `/* ... */` block comment. Called with `character` on the
    /// opening `/` and `peek_character` confirmed to be `*`.
    fn skip_block_comment(&mut self) {
        self.read_character(); // consume '/'
        self.read_character(); // consume '*'
        loop {
            match self.character {
                None => break,
                Some('*') if self.peek_character() == Some('/') => {
                    self.read_character(); // consume '*'
                    self.read_character(); // consume '/'
                    break;
                }
                _ => self.read_character(),
            }
        }
    }

    fn is_letter(c: char) -> bool {
        c.is_ascii_alphabetic()
            || c == '_'
            || matches!(
                c,
                'á' | 'é' | 'í' | 'ó' | 'ú' | 'Á' | 'É' | 'Í' | 'Ó' | 'Ú' | 'ñ' | 'Ñ'
            )
    }

    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while let Some(c) = self.character {
            if Self::is_letter(c) || Self::is_digit(c) {
                self.read_character();
            } else {
                break;
            }
        }
        self.input[start..self.position].iter().collect()
    }

    /// Reads an integer literal, or a float literal if a `.` followed by at
    /// least one digit immediately follows the digit run.
    fn read_number(&mut self) -> (TokenKind, String) {
        let start = self.position;
        while let Some(c) = self.character {
            if Self::is_digit(c) {
                self.read_character();
            } else {
                break;
            }
        }

        let is_float = self.character == Some('.')
            && self
                .peek_character()
                .is_some_and(Self::is_digit);

        if is_float {
            self.read_character(); // consume '.'
            while let Some(c) = self.character {
                if Self::is_digit(c) {
                    self.read_character();
                } else {
                    break;
                }
            }
            (
                TokenKind::Float,
                self.input[start..self.position].iter().collect(),
            )
        } else {
            (
                TokenKind::Integer,
                self.input[start..self.position].iter().collect(),
            )
        }
    }

    fn read_string(&mut self) -> String {
        self.read_character(); // consume opening quote
        let start = self.position;
        while let Some(c) = self.character {
            if c == '"' {
                break;
            }
            self.read_character();
        }
        let content: String = self.input[start..self.position].iter().collect();
        self.read_character(); // consume closing quote (or reach EOF)
        content
    }

    fn make_two_char_token(&mut self, kind: TokenKind, first: char, second: char) -> Token {
        self.read_character();
        self.read_character();
        let mut literal = String::new();
        literal.push(first);
        literal.push(second);
        Token::new(kind, literal)
    }

    /// Produces the next token, advancing the cursor past it.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        // Block comments may be followed by more whitespace/comments.
        while self.character == Some('/') && self.peek_character() == Some('*') {
            self.skip_block_comment();
            self.skip_whitespace();
        }

        let Some(c) = self.character else {
            return Token::new(TokenKind::Eof, "");
        };

        let token = match c {
            '=' => {
                if self.peek_character() == Some('=') {
                    self.make_two_char_token(TokenKind::Eq, '=', '=')
                } else {
                    let t = Token::new(TokenKind::Assign, "=");
                    self.read_character();
                    t
                }
            }
            '+' => {
                let t = Token::new(TokenKind::Plus, "+");
                self.read_character();
                t
            }
            '-' => {
                let t = Token::new(TokenKind::Minus, "-");
                self.read_character();
                t
            }
            '*' => {
                if self.peek_character() == Some('*') {
                    self.make_two_char_token(TokenKind::Power, '*', '*')
                } else {
                    let t = Token::new(TokenKind::Asterisk, "*");
                    self.read_character();
                    t
                }
            }
            '/' => {
                let t = Token::new(TokenKind::Slash, "/");
                self.read_character();
                t
            }
            '%' => {
                let t = Token::new(TokenKind::Percent, "%");
                self.read_character();
                t
            }
            '<' => {
                if self.peek_character() == Some('=') {
                    self.make_two_char_token(TokenKind::LtEq, '<', '=')
                } else {
                    let t = Token::new(TokenKind::Lt, "<");
                    self.read_character();
                    t
                }
            }
            '>' => {
                if self.peek_character() == Some('=') {
                    self.make_two_char_token(TokenKind::GtEq, '>', '=')
                } else {
                    let t = Token::new(TokenKind::Gt, ">");
                    self.read_character();
                    t
                }
            }
            '!' => {
                if self.peek_character() == Some('=') {
                    self.make_two_char_token(TokenKind::NotEq, '!', '=')
                } else {
                    let t = Token::new(TokenKind::Bang, "!");
                    self.read_character();
                    t
                }
            }
            '(' => {
                let t = Token::new(TokenKind::LParen, "(");
                self.read_character();
                t
            }
            ')' => {
                let t = Token::new(TokenKind::RParen, ")");
                self.read_character();
                t
            }
            '{' => {
                let t = Token::new(TokenKind::LBrace, "{");
                self.read_character();
                t
            }
            '}' => {
                let t = Token::new(TokenKind::RBrace, "}");
                self.read_character();
                t
            }
            ',' => {
                let t = Token::new(TokenKind::Comma, ",");
                self.read_character();
                t
            }
            ';' => {
                let t = Token::new(TokenKind::Semicolon, ";");
                self.read_character();
                t
            }
            '"' => {
                let content = self.read_string();
                Token::new(TokenKind::StringLiteral, content)
            }
            c if Self::is_letter(c) => {
                let literal = self.read_identifier();
                let kind = lookup_identifier(&literal);
                return Token::new(kind, literal);
            }
            c if Self::is_digit(c) => {
                let (kind, literal) = self.read_number();
                return Token::new(kind, literal);
            }
            other => {
                let t = Token::new(TokenKind::Illegal, other.to_string());
                self.read_character();
                t
            }
        };

        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            let kind = tok.kind;
            out.push(kind);
            if kind == TokenKind::Eof {
                break;
            }
        }
        out
    }

    #[test]
    fn test_single_char_operators() {
        let expected = vec![
            TokenKind::Assign,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Asterisk,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Bang,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ];
        assert_eq!(kinds("=+-*/%<>!(){},;"), expected);
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("== != <= >= **"),
            vec![
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::Power,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_keeps_yielding_eof() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_integer_and_float() {
        let mut lexer = Lexer::new("5 5.5 5.");
        let t1 = lexer.next_token();
        assert_eq!(t1.kind, TokenKind::Integer);
        assert_eq!(t1.literal, "5");

        let t2 = lexer.next_token();
        assert_eq!(t2.kind, TokenKind::Float);
        assert_eq!(t2.literal, "5.5");

        // "5." with no trailing digit: integer token, then a separate dot
        let t3 = lexer.next_token();
        assert_eq!(t3.kind, TokenKind::Integer);
        assert_eq!(t3.literal, "5");
        let t4 = lexer.next_token();
        assert_eq!(t4.kind, TokenKind::Illegal);
        assert_eq!(t4.literal, ".");
    }

    #[test]
    fn test_string_literal() {
        let mut lexer = Lexer::new(r#""hola mundo""#);
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::StringLiteral);
        assert_eq!(tok.literal, "hola mundo");
    }

    #[test]
    fn test_identifiers_with_accents() {
        let mut lexer = Lexer::new("variación");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.literal, "variación");
    }

    #[test]
    fn test_block_comment_skipped() {
        let mut lexer = Lexer::new("5 /* this is\na comment */ + 5");
        assert_eq!(lexer.next_token().kind, TokenKind::Integer);
        assert_eq!(lexer.next_token().kind, TokenKind::Plus);
        assert_eq!(lexer.next_token().kind, TokenKind::Integer);
    }

    #[test]
    fn test_keywords_and_program_fragment() {
        let source = "variable cinco = 5;\nvariable diez = 10;\n\
                       variable suma = procedimiento(x, y) {\n  x + y;\n};\n\
                       variable resultado = suma(cinco, diez);";
        let expected = vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Integer,
            TokenKind::Semicolon,
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Lambda,
            TokenKind::LParen,
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::Identifier,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::RBrace,
            TokenKind::Semicolon,
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Identifier,
            TokenKind::LParen,
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::Identifier,
            TokenKind::RParen,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ];
        assert_eq!(kinds(source), expected);
    }

    #[test]
    fn test_illegal_character() {
        let mut lexer = Lexer::new("@");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Illegal);
        assert_eq!(tok.literal, "@");
    }
}
