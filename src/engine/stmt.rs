use std::io::Write;

use super::{identifier_text, Engine};
use crate::error::Error;
use crate::lexer::Keyword;

impl<'src, W: Write, X: Write> Engine<'src, W, X> {
  /// statement*
  pub(super) fn compile_statements(&mut self) -> Result<(), Error> {
    loop {
      if self.is_keyword(Keyword::Let) {
        self.compile_let()?;
      } else if self.is_keyword(Keyword::If) {
        self.compile_if()?;
      } else if self.is_keyword(Keyword::While) {
        self.compile_while()?;
      } else if self.is_keyword(Keyword::Do) {
        self.compile_do()?;
      } else if self.is_keyword(Keyword::Return) {
        self.compile_return()?;
      } else {
        break;
      }
    }
    Ok(())
  }

  /// `let` varName (`[` expression `]`)? `=` expression `;`
  fn compile_let(&mut self) -> Result<(), Error> {
    self.xml_open("letStatement")?;
    self.expect_keyword_term(Keyword::Let)?;

    let name_tok = self.expect_identifier_term()?;
    let name = identifier_text(&name_tok);
    let entry = self.lookup_symbol(&name, name_tok.span)?;

    if self.bump_if_symbol_term('[')? {
      // Indexed assignment: compute the target address first, stash it in
      // `temp 0` while the RHS is evaluated (the RHS may itself index an
      // array and clobber `pointer 1`), then write through `that`.
      self.vm.write_push(entry.kind.segment(), entry.index)?;
      self.compile_expression()?;
      self.expect_symbol_term(']')?;
      self.vm.write_arithmetic("add")?;

      self.expect_symbol_term('=')?;
      self.compile_expression()?;
      self.expect_symbol_term(';')?;

      self.vm.write_pop("temp", 0, self.last_span)?;
      self.vm.write_pop("pointer", 1, self.last_span)?;
      self.vm.write_push("temp", 0)?;
      self.vm.write_pop("that", 0, self.last_span)?;
    } else {
      self.expect_symbol_term('=')?;
      self.compile_expression()?;
      self.expect_symbol_term(';')?;

      self.vm.write_pop(entry.kind.segment(), entry.index, name_tok.span)?;
    }

    self.xml_close("letStatement")?;
    Ok(())
  }

  /// `if` `(` expression `)` `{` statements `}` (`else` `{` statements `}`)?
  ///
  /// Emits the three-label form: `IF_TRUE`/`IF_FALSE`/`IF_END`, matching the
  /// canonical translator's layout rather than negating the condition to
  /// save a label.
  fn compile_if(&mut self) -> Result<(), Error> {
    self.xml_open("ifStatement")?;
    self.expect_keyword_term(Keyword::If)?;

    let (label_true, label_false, label_end) = self.next_if_labels();

    self.expect_symbol_term('(')?;
    self.compile_expression()?;
    self.expect_symbol_term(')')?;

    self.vm.write_if_goto(&label_true)?;
    self.vm.write_goto(&label_false)?;
    self.vm.write_label(&label_true)?;

    self.expect_symbol_term('{')?;
    self.xml_open("statements")?;
    self.compile_statements()?;
    self.xml_close("statements")?;
    self.expect_symbol_term('}')?;

    if self.is_keyword(Keyword::Else) {
      self.vm.write_goto(&label_end)?;
      self.vm.write_label(&label_false)?;

      self.bump_term()?;
      self.expect_symbol_term('{')?;
      self.xml_open("statements")?;
      self.compile_statements()?;
      self.xml_close("statements")?;
      self.expect_symbol_term('}')?;

      self.vm.write_label(&label_end)?;
    } else {
      self.vm.write_label(&label_false)?;
    }

    self.xml_close("ifStatement")?;
    Ok(())
  }

  /// `while` `(` expression `)` `{` statements `}`
  fn compile_while(&mut self) -> Result<(), Error> {
    self.xml_open("whileStatement")?;
    self.expect_keyword_term(Keyword::While)?;

    let (label_exp, label_end) = self.next_while_labels();
    self.vm.write_label(&label_exp)?;

    self.expect_symbol_term('(')?;
    self.compile_expression()?;
    self.expect_symbol_term(')')?;

    self.vm.write_arithmetic("not")?;
    self.vm.write_if_goto(&label_end)?;

    self.expect_symbol_term('{')?;
    self.xml_open("statements")?;
    self.compile_statements()?;
    self.xml_close("statements")?;
    self.expect_symbol_term('}')?;

    self.vm.write_goto(&label_exp)?;
    self.vm.write_label(&label_end)?;

    self.xml_close("whileStatement")?;
    Ok(())
  }

  /// `do` subroutineCall `;`. The call's return value is required by every
  /// Jack subroutine but unused here, so it's discarded into `temp 0`.
  fn compile_do(&mut self) -> Result<(), Error> {
    self.xml_open("doStatement")?;
    self.expect_keyword_term(Keyword::Do)?;

    self.compile_subroutine_call()?;
    self.expect_symbol_term(';')?;

    self.vm.write_pop("temp", 0, self.last_span)?;

    self.xml_close("doStatement")?;
    Ok(())
  }

  /// `return` expression? `;`. A `void` subroutine still needs something
  /// on the stack for its caller to pop, so it pushes `constant 0`.
  fn compile_return(&mut self) -> Result<(), Error> {
    self.xml_open("returnStatement")?;
    self.expect_keyword_term(Keyword::Return)?;

    if self.is_symbol(';') {
      self.vm.write_push("constant", 0)?;
    } else {
      self.compile_expression()?;
    }
    self.expect_symbol_term(';')?;

    self.vm.write_return()?;
    self.xml_close("returnStatement")?;
    Ok(())
  }
}
