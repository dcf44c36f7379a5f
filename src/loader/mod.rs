use anyhow::{Context, Result, anyhow};
use log::{debug, info};

use crate::processor::Token;
use crate::processor::lexer;

/// Lexes PL/0 source text into tokens.
pub fn load_source(src: &str) -> Result<Vec<Token>> {
    info!("source loaded, size: {} bytes", src.len());
    let tokens = lexer::tokenize(src).map_err(|e| anyhow!("lexer error: {e}"))?;
    debug!("lexed {} tokens", tokens.len());
    Ok(tokens)
}

/// Parses a lexeme list: whitespace separated token codes, where `2`
/// (identifier) and `3` (number) are followed by their lexeme.
///
/// ```text
/// 29 2 x 18 2 x 20 3 1 19
/// ```
pub fn load_lexemes(list: &str) -> Result<Vec<Token>> {
    let mut words = list.split_whitespace().enumerate();
    let mut tokens = Vec::new();

    while let Some((i, word)) = words.next() {
        let code: u8 = word
            .parse()
            .with_context(|| format!("item {i}: `{word}` is not a token code"))?;

        let tok = match code {
            2 => {
                let (_, name) = words
                    .next()
                    .ok_or_else(|| anyhow!("item {i}: identifier without a lexeme"))?;
                Token::Ident(name.to_string())
            }
            3 => {
                let (_, digits) = words
                    .next()
                    .ok_or_else(|| anyhow!("item {i}: number without a lexeme"))?;
                let value = digits
                    .parse()
                    .with_context(|| format!("item {i}: `{digits}` is not a number"))?;
                Token::Number(value)
            }
            c => Token::from_code(c).ok_or_else(|| anyhow!("item {i}: unknown token code {c}"))?,
        };
        tokens.push(tok);
    }

    info!("lexeme list parsed, {} tokens", tokens.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexeme_list() {
        let tokens = load_lexemes("29 2 x 18 2 x 20 3 1 19").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Var,
                Token::Ident("x".into()),
                Token::Semicolon,
                Token::Ident("x".into()),
                Token::Becomes,
                Token::Number(1),
                Token::Period,
            ]
        );
    }

    #[test]
    fn test_lexeme_list_matches_lexer() {
        let from_list = load_lexemes("28 2 a 9 3 5 18 31 2 a 19").unwrap();
        let from_source = load_source("const a = 5; write a.").unwrap();
        assert_eq!(from_list, from_source);
    }

    #[test]
    fn test_lexeme_list_errors() {
        let test_cases = vec![
            ("29 2", "identifier without a lexeme"),
            ("3", "number without a lexeme"),
            ("3 abc", "is not a number"),
            ("99", "unknown token code 99"),
            ("begin", "is not a token code"),
        ];

        for (input, expected) in test_cases {
            let err = load_lexemes(input).unwrap_err();
            assert!(
                format!("{err:#}").contains(expected),
                "{input}: got {err:#}"
            );
        }
    }

    #[test]
    fn test_source_lexer_error() {
        let err = load_source("var x; x := 1 ? 2.").unwrap_err();
        assert!(err.to_string().starts_with("lexer error"));
    }
}
