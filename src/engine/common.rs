use std::io::Write;

use span::Span;

use super::Engine;
use crate::error::{Error, ParseError};
use crate::lexer::{Keyword, Token, TokenKind};
use crate::symbol::{Entry, SymbolTable};

impl<'src, W: Write, X: Write> Engine<'src, W, X> {
  pub(super) fn current_kind(&self) -> Option<&TokenKind> {
    self.current.as_ref().map(|t| &t.kind)
  }

  pub(super) fn span(&self) -> Span {
    self.current.as_ref().map(|t| t.span).unwrap_or(Span {
      start: self.src.len(),
      end: self.src.len(),
    })
  }

  pub(super) fn is_symbol(&self, c: char) -> bool {
    matches!(self.current_kind(), Some(TokenKind::Symbol(s)) if *s == c)
  }

  pub(super) fn is_keyword(&self, k: Keyword) -> bool {
    matches!(self.current_kind(), Some(TokenKind::Keyword(kw)) if *kw == k)
  }

  /// Advances the tokenizer by one token, returning the token just
  /// consumed. Fails if there is no current token (unexpected end of
  /// input) or the tokenizer hits a lexical error.
  pub(super) fn bump(&mut self) -> Result<Token, Error> {
    let consumed = self.current.take().ok_or_else(|| {
      Error::from(ParseError::Expected {
        expected: "more input".to_owned(),
        found: "end of file".to_owned(),
        span: self.span(),
      })
    })?;
    self.last_span = consumed.span;
    self.current = if self.tok.advance()? {
      self.tok.current().cloned()
    } else {
      None
    };
    Ok(consumed)
  }

  /// `bump`, plus writing the consumed token as an XML terminal. Every
  /// token consumption site in the grammar goes through this, so the XML
  /// tree stays in lockstep with parsing without a second pass over it.
  pub(super) fn bump_term(&mut self) -> Result<Token, Error> {
    let tok = self.bump()?;
    if let Some(xml) = self.xml.as_mut() {
      xml.terminal(&tok.kind)?;
    }
    Ok(tok)
  }

  pub(super) fn xml_open(&mut self, tag: &str) -> Result<(), Error> {
    if let Some(xml) = self.xml.as_mut() {
      xml.open(tag)?;
    }
    Ok(())
  }

  pub(super) fn xml_close(&mut self, tag: &str) -> Result<(), Error> {
    if let Some(xml) = self.xml.as_mut() {
      xml.close(tag)?;
    }
    Ok(())
  }

  pub(super) fn expect_keyword_term(&mut self, k: Keyword) -> Result<Token, Error> {
    if self.is_keyword(k) {
      self.bump_term()
    } else {
      Err(self.expected(format!("'{}'", k.name())))
    }
  }

  pub(super) fn expect_symbol_term(&mut self, c: char) -> Result<Token, Error> {
    if self.is_symbol(c) {
      self.bump_term()
    } else {
      Err(self.expected(format!("'{c}'")))
    }
  }

  pub(super) fn expect_identifier_term(&mut self) -> Result<Token, Error> {
    if matches!(self.current_kind(), Some(TokenKind::Identifier(_))) {
      self.bump_term()
    } else {
      Err(self.expected("an identifier"))
    }
  }

  /// Consumes and emits the symbol if present, reporting whether it was
  /// there. Used for the optional `,` in declaration/argument lists and the
  /// optional `else` branch.
  pub(super) fn bump_if_symbol_term(&mut self, c: char) -> Result<bool, Error> {
    if self.is_symbol(c) {
      self.bump_term()?;
      Ok(true)
    } else {
      Ok(false)
    }
  }

  pub(super) fn expected(&self, expected: impl Into<String>) -> Error {
    let found = match self.current_kind() {
      Some(kind) => kind.describe(),
      None => "end of file".to_owned(),
    };
    ParseError::Expected {
      expected: expected.into(),
      found,
      span: self.span(),
    }
    .into()
  }

  /// Resolves a name against subroutine scope first, then class scope;
  /// subroutine scope wins on shadowing, per the symbol table invariant.
  pub(super) fn lookup_symbol(&self, name: &str, span: Span) -> Result<Entry, Error> {
    resolve(&self.sub_scope, &self.class_scope, name)
      .cloned()
      .ok_or_else(|| {
        ParseError::UndefinedSymbol {
          name: name.to_owned(),
          span,
        }
        .into()
      })
  }

  pub(super) fn resolve_variable(&self, name: &str) -> Option<Entry> {
    resolve(&self.sub_scope, &self.class_scope, name).cloned()
  }

  /// Unique label generators, reset at every subroutine boundary (see
  /// `compile_subroutine_dec`).
  pub(super) fn next_if_labels(&mut self) -> (String, String, String) {
    let n = self.if_count;
    self.if_count += 1;
    (
      format!("IF_TRUE_{n}"),
      format!("IF_FALSE_{n}"),
      format!("IF_END_{n}"),
    )
  }

  pub(super) fn next_while_labels(&mut self) -> (String, String) {
    let n = self.while_count;
    self.while_count += 1;
    (format!("WHILE_EXP_{n}"), format!("WHILE_END_{n}"))
  }
}

fn resolve<'a>(sub: &'a SymbolTable, class: &'a SymbolTable, name: &str) -> Option<&'a Entry> {
  sub.lookup(name).or_else(|| class.lookup(name))
}
