use std::io::{self, Write};

use crate::lexer::{Keyword, TokenKind};

/// Emits the debug parse tree: a nonterminal tag per grammar production,
/// wrapping terminal tags written as each token is consumed. Driven by the
/// same `compile_*` call tree as VM emission (see `engine`), not a separate
/// pass over a retained tree.
pub struct XmlWriter<W: Write> {
  out: Option<W>,
  depth: usize,
}

impl<W: Write> XmlWriter<W> {
  pub fn new(out: W) -> Self {
    Self {
      out: Some(out),
      depth: 0,
    }
  }

  pub fn into_inner(mut self) -> W {
    self.out.take().expect("sink already taken")
  }

  fn indent(&mut self) -> io::Result<()> {
    write!(self.out.as_mut().expect("sink already taken"), "{}", "  ".repeat(self.depth))
  }

  pub fn open(&mut self, tag: &str) -> io::Result<()> {
    self.indent()?;
    writeln!(self.out.as_mut().expect("sink already taken"), "<{tag}>")?;
    self.depth += 1;
    Ok(())
  }

  pub fn close(&mut self, tag: &str) -> io::Result<()> {
    self.depth -= 1;
    self.indent()?;
    writeln!(self.out.as_mut().expect("sink already taken"), "</{tag}>")
  }

  /// Writes a terminal token as `<tag> content </tag>`, escaping `&`, `<`,
  /// `>` in the content per the XML output contract.
  pub fn terminal(&mut self, kind: &TokenKind) -> io::Result<()> {
    let (tag, content) = match kind {
      TokenKind::Keyword(k) => ("keyword", k.name().to_owned()),
      TokenKind::Symbol(c) => ("symbol", c.to_string()),
      TokenKind::Identifier(s) => ("identifier", s.to_string()),
      TokenKind::IntConst(n) => ("integerConstant", n.to_string()),
      TokenKind::StringConst(s) => ("stringConstant", s.to_string()),
    };
    self.indent()?;
    writeln!(
      self.out.as_mut().expect("sink already taken"),
      "<{tag}> {} </{tag}>",
      escape(&content)
    )
  }
}

impl<W: Write> Drop for XmlWriter<W> {
  fn drop(&mut self) {
    if let Some(out) = self.out.as_mut() {
      let _ = out.flush();
    }
  }
}

fn escape(s: &str) -> String {
  s.replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
}
