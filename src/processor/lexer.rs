//! Small hand-written lexer for PL/0 source text.
//!
//! Breaks the raw source into `Token`s; reserved words come out as their
//! keyword tokens, everything else alphabetic as `Ident`.
//
//  Lexical items:
//
//      Ident    ::= [A-Za-z][A-Za-z0-9]*
//      Number   ::= [0-9]+        (fits in i32)
//      Symbols  ::= + - * / ( ) = , . ; <> < <= > >= :=
//      Whitespace and comments (/* … */) are discarded.

use std::iter::Peekable;
use std::str::Chars;

use super::token::Token;

#[derive(Clone)]
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
            finished: false,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn consume_while<F: Fn(char) -> bool>(&mut self, pred: F, buf: &mut String) {
        while let Some(c) = self.peek_char() {
            if pred(c) {
                buf.push(c);
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self, first: char) -> Token {
        let mut word = String::new();
        word.push(first);
        self.consume_while(|c| c.is_ascii_alphanumeric(), &mut word);
        Token::keyword(&word).unwrap_or(Token::Ident(word))
    }

    fn read_number(&mut self, first: char) -> Result<i32, String> {
        let mut num = String::new();
        num.push(first);
        self.consume_while(|c| c.is_ascii_digit(), &mut num);
        if self.peek_char().is_some_and(|c| c.is_ascii_alphabetic()) {
            return Err(format!("identifier cannot start with a digit: {num}…"));
        }
        num.parse::<i32>()
            .map_err(|_| format!("number too large: {num}"))
    }

    /// Skips a `/* … */` comment; the opening `/*` is already consumed.
    fn skip_comment(&mut self) -> Result<(), String> {
        while let Some(c) = self.next_char() {
            if c == '*' && self.peek_char() == Some('/') {
                self.next_char();
                return Ok(());
            }
        }
        Err("unterminated comment".into())
    }

    /// Picks `long` when the next char is `second`, consuming it.
    fn either(&mut self, second: char, long: Token, short: Token) -> Token {
        if self.peek_char() == Some(second) {
            self.next_char();
            long
        } else {
            short
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            while let Some(c) = self.peek_char() {
                if c.is_whitespace() {
                    self.next_char();
                } else {
                    break;
                }
            }

            let ch = match self.next_char() {
                Some(c) => c,
                None => {
                    self.finished = true;
                    return None;
                }
            };

            let tok_res = match ch {
                '+' => Ok(Token::Plus),
                '-' => Ok(Token::Minus),
                '*' => Ok(Token::Mult),
                '/' if self.peek_char() == Some('*') => {
                    self.next_char();
                    if let Err(e) = self.skip_comment() {
                        self.finished = true;
                        return Some(Err(e));
                    }
                    continue;
                }
                '/' => Ok(Token::Slash),
                '(' => Ok(Token::LParen),
                ')' => Ok(Token::RParen),
                '=' => Ok(Token::Eq),
                ',' => Ok(Token::Comma),
                '.' => Ok(Token::Period),
                ';' => Ok(Token::Semicolon),
                '<' => {
                    if self.peek_char() == Some('>') {
                        self.next_char();
                        Ok(Token::Neq)
                    } else {
                        Ok(self.either('=', Token::Leq, Token::Less))
                    }
                }
                '>' => Ok(self.either('=', Token::Geq, Token::Gtr)),
                ':' => match self.next_char() {
                    Some('=') => Ok(Token::Becomes),
                    _ => Err("expected '=' after ':'".to_string()),
                },
                c if c.is_ascii_digit() => self.read_number(c).map(Token::Number),
                c if c.is_ascii_alphabetic() => Ok(self.read_word(c)),
                e => Err(format!("unexpected character {e}")),
            };

            if tok_res.is_err() {
                self.finished = true;
            }
            return Some(tok_res);
        }
    }
}

/// Lexes a whole source text, stopping at the first error.
pub fn tokenize(src: &str) -> Result<Vec<Token>, String> {
    Lexer::new(src).collect()
}
