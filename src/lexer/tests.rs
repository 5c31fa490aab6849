use super::*;

fn lex_all(src: &str) -> Vec<TokenKind> {
  let mut tok = Tokenizer::new(src);
  let mut out = Vec::new();
  while tok.advance().unwrap() {
    out.push(tok.current().unwrap().kind.clone());
  }
  out
}

#[test]
fn keywords_vs_identifiers() {
  let kinds = lex_all("class Foo field int x");
  assert_eq!(
    kinds,
    vec![
      TokenKind::Keyword(Keyword::Class),
      TokenKind::Identifier("Foo".into()),
      TokenKind::Keyword(Keyword::Field),
      TokenKind::Keyword(Keyword::Int),
      TokenKind::Identifier("x".into()),
    ]
  );
}

#[test]
fn symbols() {
  let kinds = lex_all("{}()[].,;+-*/&|<>=~");
  let expected: Vec<TokenKind> = "{}()[].,;+-*/&|<>=~"
    .chars()
    .map(TokenKind::Symbol)
    .collect();
  assert_eq!(kinds, expected);
}

#[test]
fn line_comment_is_skipped() {
  let kinds = lex_all("let x = 1; // trailing comment\nlet y = 2;");
  assert_eq!(kinds.len(), 10);
}

#[test]
fn block_comment_is_skipped() {
  let kinds = lex_all("/* a block\n   comment */ let x = 1;");
  assert_eq!(
    kinds,
    vec![
      TokenKind::Keyword(Keyword::Let),
      TokenKind::Identifier("x".into()),
      TokenKind::Symbol('='),
      TokenKind::IntConst(1),
      TokenKind::Symbol(';'),
    ]
  );
}

#[test]
fn slash_is_not_always_a_comment() {
  let kinds = lex_all("a / b");
  assert_eq!(
    kinds,
    vec![
      TokenKind::Identifier("a".into()),
      TokenKind::Symbol('/'),
      TokenKind::Identifier("b".into()),
    ]
  );
}

#[test]
fn int_const_boundaries() {
  assert_eq!(lex_all("0"), vec![TokenKind::IntConst(0)]);
  assert_eq!(lex_all("32767"), vec![TokenKind::IntConst(32767)]);

  let mut tok = Tokenizer::new("32768");
  let err = tok.advance().unwrap_err();
  assert!(matches!(err, LexError::IntOverflow { value: 32768, .. }));
}

#[test]
fn int_const_wider_than_u32_is_overflow_not_a_panic() {
  // Maximal munch has no length cap, so a digit run can exceed even u32's
  // range; this must still come back as an error, not a parse panic.
  let mut tok = Tokenizer::new("99999999999");
  let err = tok.advance().unwrap_err();
  assert!(matches!(err, LexError::IntOverflow { .. }));
}

#[test]
fn string_const() {
  assert_eq!(
    lex_all(r#""hello, world""#),
    vec![TokenKind::StringConst("hello, world".into())]
  );
  assert_eq!(lex_all(r#""""#), vec![TokenKind::StringConst("".into())]);
}

#[test]
fn unterminated_string_is_an_error() {
  let mut tok = Tokenizer::new("\"unterminated");
  let err = tok.advance().unwrap_err();
  assert!(matches!(err, LexError::UnterminatedString { .. }));
}

#[test]
fn unterminated_block_comment_is_an_error() {
  let mut tok = Tokenizer::new("/* never closed");
  let err = tok.advance().unwrap_err();
  assert!(matches!(err, LexError::UnterminatedComment { .. }));
}

#[test]
fn unexpected_char_is_an_error() {
  let mut tok = Tokenizer::new("@");
  let err = tok.advance().unwrap_err();
  assert!(matches!(err, LexError::UnexpectedChar { ch: '@', .. }));
}
