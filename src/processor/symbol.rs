//! Append-only symbol table.
//!
//! Symbols live in an arena and refer to their enclosing procedure by index,
//! so "same scope" is a plain `SymbolId` comparison.

/// Index of a symbol in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Const { value: i32 },
    Var { address: i32 },
    /// `address` is the procedure's entry: its leading skip jump.
    Proc { address: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Number of procedure bodies enclosing the declaration.
    pub level: u32,
    /// Nearest enclosing procedure, `None` at top level.
    pub scope: Option<SymbolId>,
}

impl Symbol {
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            SymbolKind::Const { .. } => "const",
            SymbolKind::Var { .. } => "var",
            SymbolKind::Proc { .. } => "procedure",
        }
    }
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a symbol. Re-declaring a name is allowed; the newest one wins.
    pub fn insert(&mut self, symbol: Symbol) -> SymbolId {
        self.symbols.push(symbol);
        SymbolId(self.symbols.len() - 1)
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    /// Finds the symbol `name` visible from `scope`.
    ///
    /// Searches `scope` itself first, then each enclosing procedure out to
    /// the global scope. Within one scope the latest declaration wins.
    pub fn lookup(&self, scope: Option<SymbolId>, name: &str) -> Option<(SymbolId, &Symbol)> {
        let mut scope = scope;
        loop {
            let found = self
                .symbols
                .iter()
                .enumerate()
                .rev()
                .find(|(_, s)| s.scope == scope && s.name == name);
            if let Some((idx, sym)) = found {
                return Some((SymbolId(idx), sym));
            }
            match scope {
                Some(id) => scope = self.get(id).scope,
                None => return None,
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}
