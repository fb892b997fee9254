use std::fmt::Display;
use std::rc::Rc;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,
    Ident,
    Int,
    String,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Power,
    Slash,

    Equal,
    NotEqual,

    GreaterThan,
    LessThan,

    Comma,
    Colon,
    SemiColon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Illegal => "ILLEGAL",
            Eof => "EOF",
            Ident => "IDENT",
            Int => "INT",
            String => "STRING",
            Assign => "=",
            Plus => "+",
            Minus => "-",
            Bang => "!",
            Asterisk => "*",
            Power => "**",
            Slash => "/",
            Equal => "==",
            NotEqual => "!=",
            GreaterThan => ">",
            LessThan => "<",
            Comma => ",",
            Colon => ":",
            SemiColon => ";",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Function => "FUNC",
            Let => "LET",
            True => "TRUE",
            False => "FALSE",
            If => "IF",
            Else => "ELSE",
            Return => "RETURN",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lexeme. `literal` is the exact matched text, except for strings
/// where it is the text between the quotes.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: Rc<str>,
    pub start: usize,
    pub end: usize,
}

fn keywords(ident: &str) -> Option<TokenKind> {
    match ident {
        "fn" => Some(TokenKind::Function),
        "let" => Some(TokenKind::Let),
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "return" => Some(TokenKind::Return),
        _ => None,
    }
}

/// Pull-based scanner over a source string.
///
/// [`Tokenizer::next_token`] keeps returning [`TokenKind::Eof`] once the input
/// is exhausted. As an [`Iterator`] the tokenizer yields exactly one `Eof`
/// token and then stops.
#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
    finished: bool,
}

pub fn tokenize(input: &str) -> Tokenizer<'_> {
    Tokenizer::new(input)
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self {
            input,
            iter,
            finished: false,
        }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_whitespace(ch: char) -> bool {
        matches!(ch, ' ' | '\t' | '\n' | '\r')
    }

    fn token(&self, kind: TokenKind, start: usize, end: usize) -> Token {
        Token {
            kind,
            literal: self.input[start..end].into(),
            start,
            end,
        }
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| Self::is_letter(*ch)).is_some() {}

        let end = self.next_idx();
        let ident = &self.input[start..end];
        self.token(keywords(ident).unwrap_or(TokenKind::Ident), start, end)
    }

    fn read_number(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| ch.is_ascii_digit()).is_some() {}

        let end = self.next_idx();
        self.token(TokenKind::Int, start, end)
    }

    // An unterminated string runs to the end of the input.
    fn read_string(&mut self, start: usize) -> Token {
        let content_start = start + 1;
        let content_end = loop {
            match self.iter.next() {
                Some((idx, '"')) => break idx,
                Some(_) => {}
                None => break self.input.len(),
            }
        };

        Token {
            kind: TokenKind::String,
            literal: self.input[content_start..content_end].into(),
            start,
            end: self.next_idx(),
        }
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }

    fn followed_by(&mut self, expected: char) -> bool {
        self.iter.next_if(|(_, ch)| *ch == expected).is_some()
    }

    pub fn next_token(&mut self) -> Token {
        while self.iter.next_if(|(_, ch)| Self::is_whitespace(*ch)).is_some() {}

        let Some((start, ch)) = self.iter.next() else {
            let end = self.input.len();
            return self.token(TokenKind::Eof, end, end);
        };

        let kind = match ch {
            '=' if self.followed_by('=') => TokenKind::Equal,
            '=' => TokenKind::Assign,
            '!' if self.followed_by('=') => TokenKind::NotEqual,
            '!' => TokenKind::Bang,
            '*' if self.followed_by('*') => TokenKind::Power,
            '*' => TokenKind::Asterisk,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '/' => TokenKind::Slash,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::SemiColon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '"' => return self.read_string(start),
            c if Self::is_letter(c) => return self.read_identifier(start),
            c if c.is_ascii_digit() => return self.read_number(start),
            _ => TokenKind::Illegal,
        };

        let end = self.next_idx();
        self.token(kind, start, end)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = token.kind == TokenKind::Eof;
        Some(token)
    }
}
