//! Tokens consumed by the code generator.
//
//  Each kind has a fixed numeric code; the lexeme-list file format and the
//  lexer's reserved-word table both use it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// End of stream. Returned by the cursor past the last token.
    Nul,
    Ident(String),
    Number(i32),
    Plus,
    Minus,
    Mult,
    Slash,
    Odd,
    Eq,
    Neq,
    Less,
    Leq,
    Gtr,
    Geq,
    LParen,
    RParen,
    Comma,
    Semicolon,
    Period,
    Becomes,
    Begin,
    End,
    If,
    Then,
    While,
    Do,
    Call,
    Const,
    Var,
    Procedure,
    Write,
    Read,
    Else,
}

impl Token {
    pub fn code(&self) -> u8 {
        match self {
            Token::Nul => 1,
            Token::Ident(_) => 2,
            Token::Number(_) => 3,
            Token::Plus => 4,
            Token::Minus => 5,
            Token::Mult => 6,
            Token::Slash => 7,
            Token::Odd => 8,
            Token::Eq => 9,
            Token::Neq => 10,
            Token::Less => 11,
            Token::Leq => 12,
            Token::Gtr => 13,
            Token::Geq => 14,
            Token::LParen => 15,
            Token::RParen => 16,
            Token::Comma => 17,
            Token::Semicolon => 18,
            Token::Period => 19,
            Token::Becomes => 20,
            Token::Begin => 21,
            Token::End => 22,
            Token::If => 23,
            Token::Then => 24,
            Token::While => 25,
            Token::Do => 26,
            Token::Call => 27,
            Token::Const => 28,
            Token::Var => 29,
            Token::Procedure => 30,
            Token::Write => 31,
            Token::Read => 32,
            Token::Else => 33,
        }
    }

    /// Builds a token without a lexeme from its numeric code.
    ///
    /// `ident` and `number` need their text and are rejected here.
    pub fn from_code(code: u8) -> Option<Token> {
        let tok = match code {
            1 => Token::Nul,
            4 => Token::Plus,
            5 => Token::Minus,
            6 => Token::Mult,
            7 => Token::Slash,
            8 => Token::Odd,
            9 => Token::Eq,
            10 => Token::Neq,
            11 => Token::Less,
            12 => Token::Leq,
            13 => Token::Gtr,
            14 => Token::Geq,
            15 => Token::LParen,
            16 => Token::RParen,
            17 => Token::Comma,
            18 => Token::Semicolon,
            19 => Token::Period,
            20 => Token::Becomes,
            21 => Token::Begin,
            22 => Token::End,
            23 => Token::If,
            24 => Token::Then,
            25 => Token::While,
            26 => Token::Do,
            27 => Token::Call,
            28 => Token::Const,
            29 => Token::Var,
            30 => Token::Procedure,
            31 => Token::Write,
            32 => Token::Read,
            33 => Token::Else,
            _ => return None,
        };
        Some(tok)
    }

    pub fn keyword(word: &str) -> Option<Token> {
        let tok = match word {
            "odd" => Token::Odd,
            "begin" => Token::Begin,
            "end" => Token::End,
            "if" => Token::If,
            "then" => Token::Then,
            "while" => Token::While,
            "do" => Token::Do,
            "call" => Token::Call,
            "const" => Token::Const,
            "var" => Token::Var,
            "procedure" => Token::Procedure,
            "write" => Token::Write,
            "read" => Token::Read,
            "else" => Token::Else,
            _ => return None,
        };
        Some(tok)
    }
}
