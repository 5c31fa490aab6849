use std::io::Write;

use super::{identifier_text, Engine};
use crate::error::{Error, SemanticError};
use crate::lexer::{Keyword, Token, TokenKind};
use crate::symbol::Type;

impl<'src, W: Write, X: Write> Engine<'src, W, X> {
  /// term (op term)*, binary operators are left-associative; each is
  /// emitted right after its right-hand term, so the stack holds the
  /// partial result at every step.
  pub(super) fn compile_expression(&mut self) -> Result<(), Error> {
    self.xml_open("expression")?;
    self.compile_term()?;
    while let Some(op) = self.current_binop() {
      self.bump_term()?;
      self.compile_term()?;
      self.emit_binop(op)?;
    }
    self.xml_close("expression")?;
    Ok(())
  }

  fn current_binop(&self) -> Option<char> {
    match self.current_kind() {
      Some(TokenKind::Symbol(c @ ('+' | '-' | '*' | '/' | '&' | '|' | '<' | '>' | '='))) => Some(*c),
      _ => None,
    }
  }

  fn emit_binop(&mut self, op: char) -> Result<(), Error> {
    match op {
      '+' => self.vm.write_arithmetic("add")?,
      '-' => self.vm.write_arithmetic("sub")?,
      '*' => self.vm.write_call("Math.multiply", 2)?,
      '/' => self.vm.write_call("Math.divide", 2)?,
      '&' => self.vm.write_arithmetic("and")?,
      '|' => self.vm.write_arithmetic("or")?,
      '<' => self.vm.write_arithmetic("lt")?,
      '>' => self.vm.write_arithmetic("gt")?,
      '=' => self.vm.write_arithmetic("eq")?,
      _ => unreachable!("current_binop only returns one of the above"),
    }
    Ok(())
  }

  /// integerConstant | stringConstant | keywordConstant | varName |
  /// varName `[` expression `]` | `(` expression `)` | (unaryOp term) |
  /// subroutineCall
  fn compile_term(&mut self) -> Result<(), Error> {
    self.xml_open("term")?;

    match self.current_kind() {
      Some(TokenKind::IntConst(n)) => {
        let n = *n;
        self.bump_term()?;
        self.vm.write_push("constant", n)?;
      }
      Some(TokenKind::StringConst(_)) => {
        let tok = self.bump_term()?;
        let s = match tok.kind {
          TokenKind::StringConst(s) => s,
          _ => unreachable!(),
        };
        self.emit_string_constant(&s)?;
      }
      Some(TokenKind::Keyword(Keyword::True)) => {
        self.bump_term()?;
        self.vm.write_push("constant", 0)?;
        self.vm.write_arithmetic("not")?;
      }
      Some(TokenKind::Keyword(Keyword::False)) | Some(TokenKind::Keyword(Keyword::Null)) => {
        self.bump_term()?;
        self.vm.write_push("constant", 0)?;
      }
      Some(TokenKind::Keyword(Keyword::This)) => {
        self.bump_term()?;
        self.vm.write_push("pointer", 0)?;
      }
      Some(TokenKind::Symbol('(')) => {
        self.bump_term()?;
        self.compile_expression()?;
        self.expect_symbol_term(')')?;
      }
      Some(TokenKind::Symbol(c @ ('-' | '~'))) => {
        let c = *c;
        self.bump_term()?;
        self.compile_term()?;
        self.vm.write_arithmetic(if c == '-' { "neg" } else { "not" })?;
      }
      Some(TokenKind::Identifier(_)) => {
        let tok = self.bump_term()?;
        self.compile_identifier_term(tok)?;
      }
      _ => return Err(self.expected("a term")),
    }

    self.xml_close("term")?;
    Ok(())
  }

  /// Pushes a fresh `String` object and appends each character, per the
  /// OS-library contract (`String.new`/`String.appendChar`).
  fn emit_string_constant(&mut self, s: &str) -> Result<(), Error> {
    self.vm.write_push("constant", s.chars().count() as u16)?;
    self.vm.write_call("String.new", 1)?;
    for ch in s.chars() {
      self.vm.write_push("constant", ch as u16)?;
      self.vm.write_call("String.appendChar", 2)?;
    }
    Ok(())
  }

  /// Disambiguates the four things an identifier can start once it's
  /// already been consumed: a bare variable, an array access, a local
  /// method call, or a `class.sub`/`var.sub` call.
  fn compile_identifier_term(&mut self, name_tok: Token) -> Result<(), Error> {
    if self.is_symbol('[') {
      let name = identifier_text(&name_tok);
      let entry = self.lookup_symbol(&name, name_tok.span)?;
      self.bump_term()?;
      self.vm.write_push(entry.kind.segment(), entry.index)?;
      self.compile_expression()?;
      self.expect_symbol_term(']')?;
      self.vm.write_arithmetic("add")?;
      self.vm.write_pop("pointer", 1, self.last_span)?;
      self.vm.write_push("that", 0)?;
    } else if self.is_symbol('(') || self.is_symbol('.') {
      self.compile_subroutine_call_from(name_tok)?;
    } else {
      let name = identifier_text(&name_tok);
      let entry = self.lookup_symbol(&name, name_tok.span)?;
      self.vm.write_push(entry.kind.segment(), entry.index)?;
    }
    Ok(())
  }

  /// Entry point used by `do` statements, where the call isn't nested
  /// inside a `term`.
  pub(super) fn compile_subroutine_call(&mut self) -> Result<(), Error> {
    let name_tok = self.expect_identifier_term()?;
    self.compile_subroutine_call_from(name_tok)
  }

  /// subroutineName `(` expressionList `)` |
  /// (className | varName) `.` subroutineName `(` expressionList `)`
  ///
  /// `name_tok` has already been consumed (and emitted to XML); only the
  /// `.`/`(` suffix remains.
  fn compile_subroutine_call_from(&mut self, name_tok: Token) -> Result<(), Error> {
    let first_name = identifier_text(&name_tok);

    if self.bump_if_symbol_term('.')? {
      let sub_tok = self.expect_identifier_term()?;
      let sub_name = identifier_text(&sub_tok);

      if let Some(entry) = self.resolve_variable(&first_name) {
        let class_name = match &entry.ty {
          Type::Class(c) => c.clone(),
          _ => {
            return Err(
              SemanticError::NotAnObject {
                name: first_name,
                span: name_tok.span,
              }
              .into(),
            )
          }
        };
        self.vm.write_push(entry.kind.segment(), entry.index)?;
        self.expect_symbol_term('(')?;
        let n_args = self.compile_expression_list()?;
        self.expect_symbol_term(')')?;
        self.vm.write_call(&format!("{class_name}.{sub_name}"), n_args + 1)?;
      } else {
        self.expect_symbol_term('(')?;
        let n_args = self.compile_expression_list()?;
        self.expect_symbol_term(')')?;
        self.vm.write_call(&format!("{first_name}.{sub_name}"), n_args)?;
      }
    } else {
      // Unqualified call: always a method of the enclosing class, invoked
      // on `this`.
      self.vm.write_push("pointer", 0)?;
      self.expect_symbol_term('(')?;
      let n_args = self.compile_expression_list()?;
      self.expect_symbol_term(')')?;
      self
        .vm
        .write_call(&format!("{}.{}", self.class_name, first_name), n_args + 1)?;
    }
    Ok(())
  }

  /// (expression (`,` expression)*)?. Returns the argument count, since
  /// the caller needs it for `call`.
  pub(super) fn compile_expression_list(&mut self) -> Result<u16, Error> {
    self.xml_open("expressionList")?;
    let mut n = 0u16;
    if !self.is_symbol(')') {
      self.compile_expression()?;
      n += 1;
      while self.bump_if_symbol_term(',')? {
        self.compile_expression()?;
        n += 1;
      }
    }
    self.xml_close("expressionList")?;
    Ok(n)
  }
}
