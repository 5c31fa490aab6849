//! Recursive-descent parser + code generator, fused into one pass: each
//! `compile_*` method consumes its expected grammar prefix, recurses on its
//! children, and emits VM (and, if enabled, XML) output as the semantics
//! become known, there is no intermediate AST.

mod class;
mod common;
mod expr;
mod stmt;

use std::io::Write;

use span::Span;

use crate::error::Error;
use crate::lexer::{Token, Tokenizer};
use crate::symbol::SymbolTable;
use crate::vmwriter::VmWriter;
use crate::xmlwriter::XmlWriter;

pub struct Engine<'src, W: Write, X: Write> {
  src: &'src str,
  tok: Tokenizer<'src>,
  current: Option<Token>,
  last_span: Span,

  class_name: Box<str>,
  class_scope: SymbolTable,
  sub_scope: SymbolTable,
  if_count: u32,
  while_count: u32,

  vm: VmWriter<W>,
  xml: Option<XmlWriter<X>>,
}

impl<'src, W: Write, X: Write> Engine<'src, W, X> {
  pub fn new(src: &'src str, vm: VmWriter<W>, xml: Option<XmlWriter<X>>) -> Result<Self, Error> {
    let mut tok = Tokenizer::new(src);
    let current = if tok.advance()? {
      tok.current().cloned()
    } else {
      None
    };
    Ok(Self {
      src,
      tok,
      current,
      last_span: Span::default(),
      class_name: "".into(),
      class_scope: SymbolTable::new(),
      sub_scope: SymbolTable::new(),
      if_count: 0,
      while_count: 0,
      vm,
      xml,
    })
  }

  /// Compiles one `class ... { ... }` unit; the sole entry point into the
  /// engine (one instance compiles exactly one class, per §5's resource
  /// model).
  pub fn compile(mut self) -> Result<(), Error> {
    self.compile_class()?;
    Ok(())
  }

  /// Like [`compile`](Self::compile), but hands the writers back instead of
  /// dropping them, so the caller can read out what was written.
  pub fn compile_and_take(mut self) -> Result<(VmWriter<W>, Option<XmlWriter<X>>), Error> {
    self.compile_class()?;
    Ok((self.vm, self.xml))
  }
}

fn identifier_text(token: &Token) -> String {
  match &token.kind {
    crate::lexer::TokenKind::Identifier(s) => s.to_string(),
    _ => unreachable!("identifier_text called on a non-identifier token"),
  }
}
