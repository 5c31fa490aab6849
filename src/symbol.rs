use indexmap::IndexMap;

use crate::error::SemanticError;

/// Built-in or class-identifier type of a declared variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
  Int,
  Char,
  Boolean,
  Class(Box<str>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
  Static,
  Field,
  Arg,
  Var,
}

impl Kind {
  /// `segOf`: the VM memory segment a symbol of this kind lives in.
  pub fn segment(&self) -> &'static str {
    match self {
      Kind::Static => "static",
      Kind::Field => "this",
      Kind::Arg => "argument",
      Kind::Var => "local",
    }
  }
}

#[derive(Clone, Debug)]
pub struct Entry {
  pub name: Box<str>,
  pub ty: Type,
  pub kind: Kind,
  pub index: u16,
}

/// Name -> (kind, type, index) map plus one monotone counter per kind. Two
/// instances exist per class: a class-scope table (Static/Field, lifetime =
/// one class) and a subroutine-scope table (Arg/Var, lifetime = one
/// subroutine), with subroutine scope winning on lookup.
#[derive(Default)]
pub struct SymbolTable {
  entries: IndexMap<Box<str>, Entry>,
  counters: [u16; 4],
}

impl SymbolTable {
  pub fn new() -> Self {
    Self::default()
  }

  fn counter(&mut self, kind: Kind) -> &mut u16 {
    &mut self.counters[kind as usize]
  }

  /// Inserts an entry with `index = counter[kind]` and bumps the counter.
  /// Fails if `name` is already declared in this table.
  pub fn define(&mut self, name: &str, ty: Type, kind: Kind, span: span::Span) -> Result<u16, SemanticError> {
    if self.entries.contains_key(name) {
      return Err(SemanticError::DuplicateSymbol {
        name: name.to_owned(),
        span,
      });
    }
    let index = *self.counter(kind);
    *self.counter(kind) += 1;
    self.entries.insert(
      name.into(),
      Entry {
        name: name.into(),
        ty,
        kind,
        index,
      },
    );
    Ok(index)
  }

  pub fn count(&self, kind: Kind) -> u16 {
    self.counters[kind as usize]
  }

  pub fn lookup(&self, name: &str) -> Option<&Entry> {
    self.entries.get(name)
  }

  /// Clears entries and all four counters. Used at every
  /// `constructor|function|method` boundary.
  pub fn reset(&mut self) {
    self.entries.clear();
    self.counters = [0; 4];
  }
}

// `Kind` values are used as array indices above; keep the discriminants
// dense and in sync with `counters`'s length.
impl Kind {
  const COUNT: usize = 4;
}
const _: () = assert!(Kind::COUNT == 4);

#[cfg(test)]
mod tests {
  use super::*;

  fn span() -> span::Span {
    span::Span { start: 0, end: 1 }
  }

  #[test]
  fn dense_zero_based_indices_per_kind() {
    let mut t = SymbolTable::new();
    assert_eq!(t.define("a", Type::Int, Kind::Field, span()).unwrap(), 0);
    assert_eq!(t.define("b", Type::Int, Kind::Field, span()).unwrap(), 1);
    assert_eq!(t.define("c", Type::Int, Kind::Static, span()).unwrap(), 0);
    assert_eq!(t.count(Kind::Field), 2);
    assert_eq!(t.count(Kind::Static), 1);
  }

  #[test]
  fn duplicate_name_fails() {
    let mut t = SymbolTable::new();
    t.define("a", Type::Int, Kind::Var, span()).unwrap();
    let err = t.define("a", Type::Int, Kind::Var, span()).unwrap_err();
    assert!(matches!(err, SemanticError::DuplicateSymbol { .. }));
  }

  #[test]
  fn reset_clears_entries_and_counters() {
    let mut t = SymbolTable::new();
    t.define("a", Type::Int, Kind::Arg, span()).unwrap();
    t.reset();
    assert_eq!(t.count(Kind::Arg), 0);
    assert!(t.lookup("a").is_none());
  }

  #[test]
  fn field_maps_to_this_segment() {
    // The source corrects a real bug here: Field must map to `this`, not
    // `static`.
    assert_eq!(Kind::Field.segment(), "this");
    assert_eq!(Kind::Static.segment(), "static");
    assert_eq!(Kind::Arg.segment(), "argument");
    assert_eq!(Kind::Var.segment(), "local");
  }
}
