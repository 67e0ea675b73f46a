use super::*;
use crate::fragments::{identifier, number};
use pretty_assertions::assert_eq;

#[test]
fn test_eat_does_not_skip_whitespace() {
    let mut s = Scanner::new("  foo");
    assert_eq!(s.eat(identifier), None);
    assert_eq!(s.pos(), 0);
    assert_eq!(s.lex(identifier), Some("foo"));
    assert_eq!(s.pos(), 5);
    assert!(s.is_eof());
}

#[test]
fn test_lex_failure_restores_whitespace() {
    let mut s = Scanner::new("  /* c */ 12");
    assert_eq!(s.lex(identifier), None);
    assert_eq!(s.pos(), 0);
    assert_eq!(s.lex(number), Some("12"));
    assert_eq!(s.token(), (10, 12));
}

#[test]
fn test_line_and_column_tracking() {
    let mut s = Scanner::new("a\n  bc\nd");
    assert_eq!((s.line(), s.column()), (1, 1));
    s.lex(identifier);
    assert_eq!((s.line(), s.column()), (1, 2));
    s.lex(identifier);
    assert_eq!((s.line(), s.column()), (2, 5));
    s.lex(identifier);
    assert_eq!((s.line(), s.column()), (3, 2));
}

#[test]
fn test_column_counts_characters() {
    let mut s = Scanner::new("é é");
    s.lex(identifier);
    s.lex(identifier);
    assert_eq!(s.column(), 4);
}

#[test]
fn test_checkpoint_restore() {
    let mut s = Scanner::new("foo\nbar");
    let cp = s.checkpoint();
    s.lex(identifier);
    s.lex(identifier);
    assert_eq!(s.line(), 2);
    s.restore(cp);
    assert_eq!((s.pos(), s.line(), s.column()), (0, 1, 1));
}

#[test]
fn test_peek_consumes_nothing() {
    let s = Scanner::new("   foo");
    assert_eq!(s.peek(identifier), Some(6));
    assert_eq!(s.peek_raw(identifier), None);
    assert_eq!(s.peek_byte_after_ws(), Some(b'f'));
    assert_eq!(s.pos(), 0);
    assert!(s.at_whitespace());
}

#[test]
fn test_lex_char() {
    let mut s = Scanner::new(" ( x");
    assert!(!s.lex_char(b')'));
    assert_eq!(s.pos(), 0);
    assert!(s.lex_char(b'('));
    assert_eq!(s.pos(), 2);
    assert!(!s.eat_char(b'x'));
}

#[test]
fn test_advance_never_goes_back() {
    let mut s = Scanner::new("abcdef");
    s.advance_to(4);
    s.advance_to(2);
    assert_eq!(s.pos(), 4);
    s.advance_to(100);
    assert_eq!(s.pos(), 6);
    assert_eq!(s.rest(), "");
}
