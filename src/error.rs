use span::Span;
use thiserror::Error;

pub type Result<T, E = crate::error::Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum LexError {
  #[error("unterminated block comment")]
  UnterminatedComment { span: Span },
  #[error("unterminated string constant")]
  UnterminatedString { span: Span },
  #[error("integer constant {value} out of range (max 32767)")]
  IntOverflow { value: u32, span: Span },
  #[error("unexpected character '{ch}'")]
  UnexpectedChar { ch: char, span: Span },
}

impl LexError {
  pub fn span(&self) -> Span {
    match self {
      LexError::UnterminatedComment { span }
      | LexError::UnterminatedString { span }
      | LexError::IntOverflow { span, .. }
      | LexError::UnexpectedChar { span, .. } => *span,
    }
  }
}

#[derive(Debug, Error)]
pub enum ParseError {
  #[error("expected {expected}, found {found}")]
  Expected {
    expected: String,
    found: String,
    span: Span,
  },
  #[error("undefined symbol '{name}'")]
  UndefinedSymbol { name: String, span: Span },
}

impl ParseError {
  pub fn span(&self) -> Span {
    match self {
      ParseError::Expected { span, .. } => *span,
      ParseError::UndefinedSymbol { span, .. } => *span,
    }
  }
}

#[derive(Debug, Error)]
pub enum SemanticError {
  #[error("symbol '{name}' already declared in this scope")]
  DuplicateSymbol { name: String, span: Span },
  #[error("cannot pop into the constant segment")]
  PopConstant { span: Span },
  #[error("'{name}' is not an object, it has no methods")]
  NotAnObject { name: String, span: Span },
}

impl SemanticError {
  pub fn span(&self) -> Span {
    match self {
      SemanticError::DuplicateSymbol { span, .. } => *span,
      SemanticError::PopConstant { span } => *span,
      SemanticError::NotAnObject { span, .. } => *span,
    }
  }
}

/// Top-level error type threading every failure mode (lexical, syntactic,
/// semantic, I/O) back to the driver, which renders it with either
/// `terse` or `report` depending on `--pretty-errors`.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Lex(#[from] LexError),
  #[error(transparent)]
  Parse(#[from] ParseError),
  #[error(transparent)]
  Semantic(#[from] SemanticError),
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

impl Error {
  pub fn span(&self) -> Option<Span> {
    match self {
      Error::Lex(e) => Some(e.span()),
      Error::Parse(e) => Some(e.span()),
      Error::Semantic(e) => Some(e.span()),
      Error::Io(_) => None,
    }
  }

  /// `<file>:<line>: <error>`, the default rendering.
  pub fn terse(&self, file: &str, src: &str) -> String {
    match self.span() {
      Some(span) => format!("{file}:{}: {self}", span.line_in(src)),
      None => format!("{file}: {self}"),
    }
  }

  /// Rich, source-snippet diagnostic via `jackc_diag`. Falls back to
  /// `terse` for errors with no span (e.g. I/O failures opening the file).
  /// `color` controls ANSI styling; the CLI decides it via terminal
  /// detection, never this library.
  pub fn report(&self, file: &str, src: &str, color: bool) -> String {
    let Some(span) = self.span() else {
      return self.terse(file, src);
    };
    let report = diag::Report::error()
      .source(diag::Source::file(file, src))
      .message(self.to_string())
      .span(span)
      .color(color)
      .build();
    report
      .emit_to_string()
      .unwrap_or_else(|_| self.terse(file, src))
  }
}
