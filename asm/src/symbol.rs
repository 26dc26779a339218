use indexmap::IndexMap;

// ----------------------------------------------------------------------------
// Symbol

/// One symbol. Owned exclusively by the table; the value may still be
/// unknown after Pass 1 (an equate over a forward reference).
#[derive(Debug, Clone)]
pub struct Symbol {
    name: String,
    value: Option<u16>,
    duplicate: bool,
}

impl Symbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<u16> {
        self.value
    }

    pub fn is_duplicate(&self) -> bool {
        self.duplicate
    }
}

// ----------------------------------------------------------------------------
// Symbol table

/// Name -> Symbol mapping for one assembly run. All mutation goes through
/// `define` / `mark_duplicate` / `update_value`; insertion order is kept for
/// the summary print.
#[derive(Debug, Default)]
pub struct SymbolTable {
    table: IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            table: IndexMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.table.get(name)
    }

    /// Create a symbol on first definition. Returns false if the name is
    /// already taken (the caller then marks it duplicate).
    pub fn define(&mut self, name: &str, value: Option<u16>) -> bool {
        if self.table.contains_key(name) {
            return false;
        }
        self.table.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                value,
                duplicate: false,
            },
        );
        true
    }

    /// Once marked, a symbol stays duplicate and keeps its first value.
    pub fn mark_duplicate(&mut self, name: &str) {
        if let Some(sym) = self.table.get_mut(name) {
            sym.duplicate = true;
        }
    }

    /// Re-resolve a symbol's value (Pass 2 equate update).
    pub fn update_value(&mut self, name: &str, value: u16) {
        if let Some(sym) = self.table.get_mut(name) {
            sym.value = Some(value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.table.values()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
