#![allow(non_camel_case_types)]

use logos::Logos;
use span::Span;

use crate::error::LexError;

/// One of the 21 Jack reserved words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
  Class,
  Constructor,
  Function,
  Method,
  Field,
  Static,
  Var,
  Int,
  Char,
  Boolean,
  Void,
  True,
  False,
  Null,
  This,
  Let,
  Do,
  If,
  Else,
  While,
  Return,
}

impl Keyword {
  pub fn name(&self) -> &'static str {
    match self {
      Keyword::Class => "class",
      Keyword::Constructor => "constructor",
      Keyword::Function => "function",
      Keyword::Method => "method",
      Keyword::Field => "field",
      Keyword::Static => "static",
      Keyword::Var => "var",
      Keyword::Int => "int",
      Keyword::Char => "char",
      Keyword::Boolean => "boolean",
      Keyword::Void => "void",
      Keyword::True => "true",
      Keyword::False => "false",
      Keyword::Null => "null",
      Keyword::This => "this",
      Keyword::Let => "let",
      Keyword::Do => "do",
      Keyword::If => "if",
      Keyword::Else => "else",
      Keyword::While => "while",
      Keyword::Return => "return",
    }
  }
}

/// A tagged token, per the five-kind model: keyword, symbol, identifier,
/// integer constant, string constant.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
  Keyword(Keyword),
  Symbol(char),
  Identifier(Box<str>),
  IntConst(u16),
  StringConst(Box<str>),
}

impl TokenKind {
  /// Human-readable label used in `expected X, found Y` diagnostics.
  pub fn describe(&self) -> String {
    match self {
      TokenKind::Keyword(k) => format!("'{}'", k.name()),
      TokenKind::Symbol(c) => format!("'{c}'"),
      TokenKind::Identifier(s) => format!("identifier '{s}'"),
      TokenKind::IntConst(n) => format!("integer constant {n}"),
      TokenKind::StringConst(s) => format!("string constant \"{s}\""),
    }
  }
}

#[derive(Clone, Debug)]
pub struct Token {
  pub kind: TokenKind,
  pub span: Span,
}

// Every keyword and symbol gets its own variant, mirroring how the reference
// lexer enumerates brackets/operators individually rather than as one
// generic punctuation class; literal-valued lexemes (ints, strings,
// identifiers) are classified once here and then unpacked into `TokenKind`
// by the wrapping `Tokenizer`.
#[derive(Clone, Copy, Debug, Logos, PartialEq, Eq)]
enum Raw {
  #[token("class")]
  Kw_Class,
  #[token("constructor")]
  Kw_Constructor,
  #[token("function")]
  Kw_Function,
  #[token("method")]
  Kw_Method,
  #[token("field")]
  Kw_Field,
  #[token("static")]
  Kw_Static,
  #[token("var")]
  Kw_Var,
  #[token("int")]
  Kw_Int,
  #[token("char")]
  Kw_Char,
  #[token("boolean")]
  Kw_Boolean,
  #[token("void")]
  Kw_Void,
  #[token("true")]
  Kw_True,
  #[token("false")]
  Kw_False,
  #[token("null")]
  Kw_Null,
  #[token("this")]
  Kw_This,
  #[token("let")]
  Kw_Let,
  #[token("do")]
  Kw_Do,
  #[token("if")]
  Kw_If,
  #[token("else")]
  Kw_Else,
  #[token("while")]
  Kw_While,
  #[token("return")]
  Kw_Return,

  #[token("{")]
  Sym_LBrace,
  #[token("}")]
  Sym_RBrace,
  #[token("(")]
  Sym_LParen,
  #[token(")")]
  Sym_RParen,
  #[token("[")]
  Sym_LBracket,
  #[token("]")]
  Sym_RBracket,
  #[token(".")]
  Sym_Dot,
  #[token(",")]
  Sym_Comma,
  #[token(";")]
  Sym_Semi,
  #[token("+")]
  Sym_Plus,
  #[token("-")]
  Sym_Minus,
  #[token("*")]
  Sym_Star,
  #[token("/")]
  Sym_Slash,
  #[token("&")]
  Sym_Amp,
  #[token("|")]
  Sym_Pipe,
  #[token("<")]
  Sym_Lt,
  #[token(">")]
  Sym_Gt,
  #[token("=")]
  Sym_Eq,
  #[token("~")]
  Sym_Tilde,

  #[regex("[0-9]+", priority = 10)]
  IntConst,
  #[regex(r#""[^"\n]*""#)]
  StringConst,
  #[regex("[A-Za-z_][A-Za-z0-9_]*")]
  Identifier,

  #[doc(hidden)]
  #[regex(r"[ \t\r\n]+")]
  _Whitespace,
  #[doc(hidden)]
  #[regex(r"//[^\n]*")]
  _LineComment,
  // A plain regex backtracks to a one-character `/` token on a half-open
  // `/*`, which would silently swallow the error; scan for the closing `*/`
  // by hand instead so an unterminated comment fails the token itself.
  #[doc(hidden)]
  #[token("/*", block_comment)]
  _BlockComment,
}

fn block_comment(lex: &mut logos::Lexer<Raw>) -> bool {
  let rest = lex.remainder();
  match rest.find("*/") {
    Some(end) => {
      lex.bump(end + 2);
      true
    }
    None => {
      lex.bump(rest.len());
      false
    }
  }
}

fn keyword_of(raw: Raw) -> Option<Keyword> {
  Some(match raw {
    Raw::Kw_Class => Keyword::Class,
    Raw::Kw_Constructor => Keyword::Constructor,
    Raw::Kw_Function => Keyword::Function,
    Raw::Kw_Method => Keyword::Method,
    Raw::Kw_Field => Keyword::Field,
    Raw::Kw_Static => Keyword::Static,
    Raw::Kw_Var => Keyword::Var,
    Raw::Kw_Int => Keyword::Int,
    Raw::Kw_Char => Keyword::Char,
    Raw::Kw_Boolean => Keyword::Boolean,
    Raw::Kw_Void => Keyword::Void,
    Raw::Kw_True => Keyword::True,
    Raw::Kw_False => Keyword::False,
    Raw::Kw_Null => Keyword::Null,
    Raw::Kw_This => Keyword::This,
    Raw::Kw_Let => Keyword::Let,
    Raw::Kw_Do => Keyword::Do,
    Raw::Kw_If => Keyword::If,
    Raw::Kw_Else => Keyword::Else,
    Raw::Kw_While => Keyword::While,
    Raw::Kw_Return => Keyword::Return,
    _ => return None,
  })
}

/// Stream-of-tokens front end. Provides `advance`/accessor lookahead
/// semantics: after a successful `advance`, `current` describes the token
/// just produced.
pub struct Tokenizer<'src> {
  inner: logos::Lexer<'src, Raw>,
  current: Option<Token>,
}

impl<'src> Tokenizer<'src> {
  pub fn new(src: &'src str) -> Self {
    Self {
      inner: Raw::lexer(src),
      current: None,
    }
  }

  pub fn current(&self) -> Option<&Token> {
    self.current.as_ref()
  }

  /// Produces the next token, or `Ok(false)` at end of input. Comments and
  /// whitespace are skipped transparently; they never reach `current`.
  pub fn advance(&mut self) -> Result<bool, LexError> {
    loop {
      let Some(result) = self.inner.next() else {
        self.current = None;
        return Ok(false);
      };
      let span: Span = self.inner.span().into();
      let lexeme = self.inner.slice();

      let raw = match result {
        Ok(raw) => raw,
        Err(()) => {
          if lexeme.starts_with("/*") {
            return Err(LexError::UnterminatedComment { span });
          }
          if lexeme.starts_with('"') {
            return Err(LexError::UnterminatedString { span });
          }
          let ch = lexeme.chars().next().unwrap_or('\0');
          return Err(LexError::UnexpectedChar { ch, span });
        }
      };

      let kind = match raw {
        Raw::_Whitespace | Raw::_LineComment | Raw::_BlockComment => continue,
        Raw::IntConst => {
          // Maximal munch has no length cap, so the digit run may not fit
          // even a u64; saturate rather than parse-and-panic, since any
          // value this large is already well past the 32767 ceiling.
          let value: u32 = lexeme
            .parse::<u64>()
            .unwrap_or(u64::MAX)
            .min(u32::MAX as u64) as u32;
          if value > 32767 {
            return Err(LexError::IntOverflow { value, span });
          }
          TokenKind::IntConst(value as u16)
        }
        Raw::StringConst => TokenKind::StringConst(lexeme[1..lexeme.len() - 1].into()),
        Raw::Identifier => TokenKind::Identifier(lexeme.into()),
        Raw::Sym_LBrace
        | Raw::Sym_RBrace
        | Raw::Sym_LParen
        | Raw::Sym_RParen
        | Raw::Sym_LBracket
        | Raw::Sym_RBracket
        | Raw::Sym_Dot
        | Raw::Sym_Comma
        | Raw::Sym_Semi
        | Raw::Sym_Plus
        | Raw::Sym_Minus
        | Raw::Sym_Star
        | Raw::Sym_Slash
        | Raw::Sym_Amp
        | Raw::Sym_Pipe
        | Raw::Sym_Lt
        | Raw::Sym_Gt
        | Raw::Sym_Eq
        | Raw::Sym_Tilde => TokenKind::Symbol(lexeme.chars().next().unwrap()),
        other => TokenKind::Keyword(keyword_of(other).expect("all non-literal variants covered")),
      };

      self.current = Some(Token { kind, span });
      return Ok(true);
    }
  }
}

#[cfg(test)]
mod tests;
