use super::token::Token;

static END_OF_STREAM: Token = Token::Nul;

/// Read-only forward cursor over a token sequence.
///
/// One token of lookahead is all the grammar needs.
#[derive(Debug, Clone)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Token under the cursor, or `Token::Nul` past the end.
    pub fn current(&self) -> &'t Token {
        self.tokens.get(self.pos).unwrap_or(&END_OF_STREAM)
    }

    /// Moves forward by one. A no-op once past the end.
    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}
