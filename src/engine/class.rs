use std::io::Write;

use super::{identifier_text, Engine};
use crate::error::Error;
use crate::lexer::Keyword;
use crate::symbol::{Kind, Type};

#[derive(Clone, Copy, PartialEq, Eq)]
enum SubroutineKind {
  Constructor,
  Function,
  Method,
}

impl<'src, W: Write, X: Write> Engine<'src, W, X> {
  /// `class` className `{` classVarDec* subroutineDec* `}`
  pub(super) fn compile_class(&mut self) -> Result<(), Error> {
    self.xml_open("class")?;

    self.expect_keyword_term(Keyword::Class)?;
    let name_tok = self.expect_identifier_term()?;
    self.class_name = identifier_text(&name_tok).into();
    self.expect_symbol_term('{')?;

    while self.is_keyword(Keyword::Static) || self.is_keyword(Keyword::Field) {
      self.compile_class_var_dec()?;
    }
    while self.is_keyword(Keyword::Constructor)
      || self.is_keyword(Keyword::Function)
      || self.is_keyword(Keyword::Method)
    {
      self.compile_subroutine_dec()?;
    }

    self.expect_symbol_term('}')?;
    self.xml_close("class")?;
    Ok(())
  }

  /// (`static` | `field`) type varName (`,` varName)* `;`
  fn compile_class_var_dec(&mut self) -> Result<(), Error> {
    self.xml_open("classVarDec")?;

    let kind = if self.is_keyword(Keyword::Static) {
      self.bump_term()?;
      Kind::Static
    } else {
      self.expect_keyword_term(Keyword::Field)?;
      Kind::Field
    };
    let ty = self.compile_type()?;

    loop {
      let tok = self.expect_identifier_term()?;
      let name = identifier_text(&tok);
      self.class_scope.define(&name, ty.clone(), kind, tok.span)?;
      if !self.bump_if_symbol_term(',')? {
        break;
      }
    }
    self.expect_symbol_term(';')?;

    self.xml_close("classVarDec")?;
    Ok(())
  }

  /// `int` | `char` | `boolean` | className. Consumes and returns the type,
  /// without opening its own XML tag (it's always inline inside a
  /// `classVarDec`/`varDec`/`parameterList`/subroutine-return-type slot).
  pub(super) fn compile_type(&mut self) -> Result<Type, Error> {
    let ty = if self.is_keyword(Keyword::Int) {
      Type::Int
    } else if self.is_keyword(Keyword::Char) {
      Type::Char
    } else if self.is_keyword(Keyword::Boolean) {
      Type::Boolean
    } else if matches!(self.current_kind(), Some(crate::lexer::TokenKind::Identifier(_))) {
      let tok = self.current.clone().expect("checked above");
      Type::Class(identifier_text(&tok).into())
    } else {
      return Err(self.expected("a type"));
    };
    self.bump_term()?;
    Ok(ty)
  }

  /// (`constructor` | `function` | `method`) (`void` | type) subroutineName
  /// `(` parameterList `)` subroutineBody
  fn compile_subroutine_dec(&mut self) -> Result<(), Error> {
    self.xml_open("subroutineDec")?;
    self.sub_scope.reset();
    self.if_count = 0;
    self.while_count = 0;

    let kind = if self.is_keyword(Keyword::Constructor) {
      self.bump_term()?;
      SubroutineKind::Constructor
    } else if self.is_keyword(Keyword::Function) {
      self.bump_term()?;
      SubroutineKind::Function
    } else {
      self.expect_keyword_term(Keyword::Method)?;
      SubroutineKind::Method
    };

    if kind == SubroutineKind::Method {
      // `this` is implicitly argument 0 of every method.
      self.sub_scope.define(
        "this",
        Type::Class(self.class_name.clone()),
        Kind::Arg,
        self.span(),
      )?;
    }

    if self.is_keyword(Keyword::Void) {
      self.bump_term()?;
    } else {
      self.compile_type()?;
    }

    let name_tok = self.expect_identifier_term()?;
    let sub_name = identifier_text(&name_tok);

    self.expect_symbol_term('(')?;
    self.xml_open("parameterList")?;
    if !self.is_symbol(')') {
      self.compile_parameter_list()?;
    }
    self.xml_close("parameterList")?;
    self.expect_symbol_term(')')?;

    self.xml_open("subroutineBody")?;
    self.expect_symbol_term('{')?;

    while self.is_keyword(Keyword::Var) {
      self.compile_var_dec()?;
    }
    let n_locals = self.sub_scope.count(Kind::Var);
    self
      .vm
      .write_function(&format!("{}.{}", self.class_name, sub_name), n_locals)?;

    match kind {
      SubroutineKind::Constructor => {
        let n_fields = self.class_scope.count(Kind::Field);
        self.vm.write_push("constant", n_fields)?;
        self.vm.write_call("Memory.alloc", 1)?;
        self.vm.write_pop("pointer", 0, self.last_span)?;
      }
      SubroutineKind::Method => {
        self.vm.write_push("argument", 0)?;
        self.vm.write_pop("pointer", 0, self.last_span)?;
      }
      SubroutineKind::Function => {}
    }

    self.xml_open("statements")?;
    self.compile_statements()?;
    self.xml_close("statements")?;

    self.expect_symbol_term('}')?;
    self.xml_close("subroutineBody")?;

    self.xml_close("subroutineDec")?;
    Ok(())
  }

  /// ((type varName) (`,` type varName)*)?
  fn compile_parameter_list(&mut self) -> Result<(), Error> {
    loop {
      let ty = self.compile_type()?;
      let tok = self.expect_identifier_term()?;
      let name = identifier_text(&tok);
      self.sub_scope.define(&name, ty, Kind::Arg, tok.span)?;
      if !self.bump_if_symbol_term(',')? {
        break;
      }
    }
    Ok(())
  }

  /// `var` type varName (`,` varName)* `;`
  fn compile_var_dec(&mut self) -> Result<(), Error> {
    self.xml_open("varDec")?;
    self.expect_keyword_term(Keyword::Var)?;
    let ty = self.compile_type()?;

    loop {
      let tok = self.expect_identifier_term()?;
      let name = identifier_text(&tok);
      self.sub_scope.define(&name, ty.clone(), Kind::Var, tok.span)?;
      if !self.bump_if_symbol_term(',')? {
        break;
      }
    }
    self.expect_symbol_term(';')?;
    self.xml_close("varDec")?;
    Ok(())
  }
}
