//! Single-pass recursive-descent code generator.
//!
//! Every grammar production recognises its tokens and emits the matching
//! code straight away; there is no syntax tree.
//
//  program     ::= block "."
//  block       ::= [const-decl] [var-decl] [proc-decl] statement
//  const-decl  ::= "const" ident "=" number {"," ident "=" number} ";"
//  var-decl    ::= "var" ident {"," ident} ";"
//  proc-decl   ::= {"procedure" ident ";" block ";"}
//  statement   ::= [ ident ":=" expression
//                  | "call" ident
//                  | "begin" statement {";" statement} "end"
//                  | "if" condition "then" statement ["else" statement]
//                  | "while" condition "do" statement
//                  | "read" ident
//                  | "write" ident ]
//  condition   ::= "odd" expression | expression rel-op expression
//  expression  ::= ["+"|"-"] term {("+"|"-") term}
//  term        ::= factor {("*"|"/") factor}
//  factor      ::= ident | number | "(" expression ")"

use log::debug;

use super::GeneratorConfig;
use super::cursor::TokenCursor;
use super::emitter::{Emitter, PatchSite};
use super::error::CodeGenError;
use super::symbol::{Symbol, SymbolId, SymbolKind, SymbolTable};
use super::token::Token;
use crate::model::{OpCode, Program};

/// Cells every activation record reserves: return value, return address,
/// static link and dynamic link.
pub const FRAME_HOUSEKEEPING: i32 = 4;

/// Modifier the halt instruction is emitted with.
const HALT_MODIFIER: i32 = 3;

type GenResult = Result<(), CodeGenError>;

/// A name resolved at a use site.
#[derive(Debug, Clone, Copy)]
struct Binding {
    kind: SymbolKind,
    /// Use-site level minus declaration level.
    level_diff: i32,
}

/// Compiler context for one compilation.
///
/// Owns the cursor position, the symbol table, the code buffer and the
/// current nesting level and scope. Build a fresh one per input.
pub struct CodeGenerator<'t> {
    cursor: TokenCursor<'t>,
    symbols: SymbolTable,
    emitter: Emitter,
    level: u32,
    scope: Option<SymbolId>,
}

impl<'t> CodeGenerator<'t> {
    pub fn new(tokens: &'t [Token], config: &GeneratorConfig) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            symbols: SymbolTable::new(),
            emitter: Emitter::new(config.max_code_length),
            level: 0,
            scope: None,
        }
    }

    /// Compiles the whole token sequence.
    pub fn generate(self) -> Result<Program, CodeGenError> {
        self.generate_with_symbols().map(|(program, _)| program)
    }

    /// Like [`generate`](Self::generate), also handing back the symbols
    /// declared along the way.
    pub fn generate_with_symbols(mut self) -> Result<(Program, SymbolTable), CodeGenError> {
        self.program()?;
        Ok((self.emitter.finish(), self.symbols))
    }

    // ───────────────────────────── helpers ─────────────────────────────

    fn peek(&self) -> &'t Token {
        self.cursor.current()
    }

    fn at(&self, tok: &Token) -> bool {
        self.peek() == tok
    }

    /// Consumes `tok` or fails with `err`.
    fn expect(&mut self, tok: &Token, err: CodeGenError) -> GenResult {
        if !self.at(tok) {
            return Err(err);
        }
        self.cursor.advance();
        Ok(())
    }

    /// Consumes an identifier and returns its text.
    fn take_ident(&mut self, err: CodeGenError) -> Result<&'t str, CodeGenError> {
        match self.peek() {
            Token::Ident(name) => {
                self.cursor.advance();
                Ok(name.as_str())
            }
            _ => Err(err),
        }
    }

    fn declare(&mut self, name: &str, kind: SymbolKind) -> SymbolId {
        debug!(
            "declare {name} {kind:?} at level {} in scope {:?}",
            self.level, self.scope
        );
        self.symbols.insert(Symbol {
            name: name.to_string(),
            kind,
            level: self.level,
            scope: self.scope,
        })
    }

    /// Looks `name` up and insists it was declared directly in the active
    /// scope.
    fn resolve(&self, name: &str) -> Result<Binding, CodeGenError> {
        let (_, sym) = self
            .symbols
            .lookup(self.scope, name)
            .ok_or(CodeGenError::Undeclared)?;
        if sym.scope != self.scope {
            return Err(CodeGenError::NotInCurrentScope);
        }
        Ok(Binding {
            kind: sym.kind,
            level_diff: self.level as i32 - sym.level as i32,
        })
    }

    fn here(&self) -> usize {
        self.emitter.emitted_count()
    }

    fn patch_here(&mut self, site: PatchSite) {
        let target = self.here();
        self.emitter.backpatch(site, target);
    }

    fn emit(&mut self, op: OpCode, l: i32, m: i32) -> usize {
        self.emitter.emit(op, 0, l, m)
    }

    // ──────────────────────────── productions ──────────────────────────

    fn program(&mut self) -> GenResult {
        self.block()?;
        self.expect(&Token::Period, CodeGenError::PeriodExpected)?;
        self.emit(OpCode::Halt, 0, HALT_MODIFIER);
        Ok(())
    }

    fn block(&mut self) -> GenResult {
        // Skips nested procedure bodies on the way in.
        let skip = self.emitter.emit_jump(OpCode::Jmp);

        if self.at(&Token::Const) {
            self.const_declaration()?;
        }
        if self.at(&Token::Var) {
            self.var_declaration()?;
        }
        if self.at(&Token::Procedure) {
            self.proc_declaration()?;
        }

        self.patch_here(skip);
        self.emit(OpCode::Inc, 0, FRAME_HOUSEKEEPING);

        self.statement()?;

        self.emit(OpCode::Rtn, 0, 0);
        Ok(())
    }

    fn const_declaration(&mut self) -> GenResult {
        loop {
            // `const` or `,`
            self.cursor.advance();

            let name = self.take_ident(CodeGenError::IdentifierExpected)?;
            self.expect(&Token::Eq, CodeGenError::EqualsExpected)?;

            let value = match self.peek() {
                Token::Number(n) => *n,
                _ => return Err(CodeGenError::NumberExpected),
            };
            self.cursor.advance();

            self.declare(name, SymbolKind::Const { value });

            if !self.at(&Token::Comma) {
                break;
            }
        }

        self.expect(&Token::Semicolon, CodeGenError::SemicolonOrEndExpected)
    }

    fn var_declaration(&mut self) -> GenResult {
        loop {
            // `var` or `,`
            self.cursor.advance();

            // Address is the code position before this variable's INC.
            let address = self.here() as i32;
            let name = self.take_ident(CodeGenError::IdentifierExpected)?;
            self.declare(name, SymbolKind::Var { address });
            self.emit(OpCode::Inc, 0, 1);

            if !self.at(&Token::Comma) {
                break;
            }
        }

        self.expect(&Token::Semicolon, CodeGenError::VarSeparatorExpected)
    }

    fn proc_declaration(&mut self) -> GenResult {
        while self.at(&Token::Procedure) {
            // Entry is the skip jump the nested block emits first.
            let address = self.here() as i32;

            self.cursor.advance();
            let name = self.take_ident(CodeGenError::IdentifierExpected)?;
            let proc = self.declare(name, SymbolKind::Proc { address });

            self.expect(&Token::Semicolon, CodeGenError::ProcSemicolonExpected)?;

            let (outer_level, outer_scope) = (self.level, self.scope);
            self.level += 1;
            self.scope = Some(proc);
            debug!("enter {name} at level {}", self.level);

            let body = self.block();

            self.level = outer_level;
            self.scope = outer_scope;
            debug!("leave {name}");
            body?;

            self.expect(&Token::Semicolon, CodeGenError::ProcSemicolonExpected)?;
        }

        Ok(())
    }

    fn statement(&mut self) -> GenResult {
        match self.peek() {
            Token::Ident(name) => self.assignment(name),
            Token::Call => self.call(),
            Token::Begin => self.compound(),
            Token::If => self.if_statement(),
            Token::While => self.while_statement(),
            Token::Write => self.write(),
            Token::Read => self.read(),
            // empty statement
            _ => Ok(()),
        }
    }

    fn assignment(&mut self, name: &str) -> GenResult {
        let binding = self.resolve(name)?;
        let SymbolKind::Var { address } = binding.kind else {
            return Err(CodeGenError::AssignToNonVariable);
        };
        self.cursor.advance();

        self.expect(&Token::Becomes, CodeGenError::BecomesExpected)?;
        self.expression()?;

        self.emit(OpCode::Sto, binding.level_diff, address);
        Ok(())
    }

    fn call(&mut self) -> GenResult {
        self.cursor.advance();

        let Token::Ident(name) = self.peek() else {
            return Err(CodeGenError::CallTargetExpected);
        };
        let binding = self.resolve(name)?;
        let SymbolKind::Proc { address } = binding.kind else {
            return Err(CodeGenError::CallOfNonProcedure);
        };

        self.emit(OpCode::Cal, binding.level_diff, address);
        self.cursor.advance();
        Ok(())
    }

    fn compound(&mut self) -> GenResult {
        self.cursor.advance();
        self.statement()?;

        while self.at(&Token::Semicolon) {
            self.cursor.advance();
            self.statement()?;
        }

        self.expect(&Token::End, CodeGenError::SemicolonOrEndExpected)
    }

    fn if_statement(&mut self) -> GenResult {
        self.cursor.advance();
        self.condition()?;
        self.expect(&Token::Then, CodeGenError::ThenExpected)?;

        let to_else = self.emitter.emit_jump(OpCode::Jpc);
        self.statement()?;

        if self.at(&Token::Else) {
            let to_end = self.emitter.emit_jump(OpCode::Jmp);
            self.patch_here(to_else);

            self.cursor.advance();
            self.statement()?;

            self.patch_here(to_end);
        } else {
            self.patch_here(to_else);
        }

        Ok(())
    }

    fn while_statement(&mut self) -> GenResult {
        let top = self.here() as i32;

        self.cursor.advance();
        self.condition()?;

        let exit = self.emitter.emit_jump(OpCode::Jpc);
        self.expect(&Token::Do, CodeGenError::DoExpected)?;
        self.statement()?;

        self.emit(OpCode::Jmp, 0, top);
        self.patch_here(exit);
        Ok(())
    }

    fn write(&mut self) -> GenResult {
        self.cursor.advance();

        let Token::Ident(name) = self.peek() else {
            return Err(CodeGenError::IdentifierExpected);
        };
        let binding = self.resolve(name)?;
        match binding.kind {
            SymbolKind::Proc { .. } => return Err(CodeGenError::WriteProcedure),
            SymbolKind::Const { value } => self.emit(OpCode::Lit, 0, value),
            SymbolKind::Var { address } => self.emit(OpCode::Lod, binding.level_diff, address),
        };
        self.emit(OpCode::Write, 0, 0);

        self.cursor.advance();
        Ok(())
    }

    fn read(&mut self) -> GenResult {
        self.cursor.advance();

        let Token::Ident(name) = self.peek() else {
            return Err(CodeGenError::IdentifierExpected);
        };
        let binding = self.resolve(name)?;
        let SymbolKind::Var { address } = binding.kind else {
            return Err(CodeGenError::ReadIntoNonVariable);
        };
        self.cursor.advance();

        self.emit(OpCode::Read, 0, 0);
        self.emit(OpCode::Sto, binding.level_diff, address);
        Ok(())
    }

    fn condition(&mut self) -> GenResult {
        if self.at(&Token::Odd) {
            self.cursor.advance();
            self.expression()?;
            self.emit(OpCode::Odd, 0, 0);
            return Ok(());
        }

        self.expression()?;

        let op = match self.peek() {
            Token::Eq => OpCode::Eql,
            Token::Neq => OpCode::Neq,
            Token::Less => OpCode::Lss,
            Token::Leq => OpCode::Leq,
            Token::Gtr => OpCode::Gtr,
            Token::Geq => OpCode::Geq,
            _ => return Err(CodeGenError::RelationalOperatorExpected),
        };
        self.cursor.advance();

        self.expression()?;
        self.emit(op, 0, 0);
        Ok(())
    }

    fn expression(&mut self) -> GenResult {
        match self.peek() {
            Token::Plus => {
                self.cursor.advance();
                self.term()?;
            }
            Token::Minus => {
                self.cursor.advance();
                self.term()?;
                self.emit(OpCode::Neg, 0, 0);
            }
            _ => self.term()?,
        }

        loop {
            let op = match self.peek() {
                Token::Plus => OpCode::Add,
                Token::Minus => OpCode::Sub,
                _ => break,
            };
            self.cursor.advance();
            self.term()?;
            self.emit(op, 0, 0);
        }

        Ok(())
    }

    fn term(&mut self) -> GenResult {
        self.factor()?;

        loop {
            let op = match self.peek() {
                Token::Mult => OpCode::Mul,
                Token::Slash => OpCode::Div,
                _ => break,
            };
            self.cursor.advance();
            self.factor()?;
            self.emit(op, 0, 0);
        }

        Ok(())
    }

    fn factor(&mut self) -> GenResult {
        match self.peek() {
            Token::Ident(name) => {
                let binding = self.resolve(name)?;
                match binding.kind {
                    SymbolKind::Proc { .. } => return Err(CodeGenError::ProcedureInExpression),
                    SymbolKind::Const { value } => self.emit(OpCode::Lit, 0, value),
                    SymbolKind::Var { address } => {
                        self.emit(OpCode::Lod, binding.level_diff, address)
                    }
                };
                self.cursor.advance();
            }
            Token::Number(n) => {
                self.emit(OpCode::Lit, 0, *n);
                self.cursor.advance();
            }
            Token::LParen => {
                self.cursor.advance();
                self.expression()?;
                self.expect(&Token::RParen, CodeGenError::RightParenMissing)?;
            }
            _ => return Err(CodeGenError::IllegalFactor),
        }

        Ok(())
    }
}
