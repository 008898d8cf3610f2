/*!

A hand-rolled recursive-descent parser for the token grammar: `Z`, `I`, `S`,
`<`, `>`, `o`, `R` as listed in the glossary, with every other character
treated as whitespace and skipped.

The grammar is LL(1) on the single lookahead token, so the parser is a
straightforward `Peekable<Chars>` walk; no parser-generator crate (the
teacher pulls in `lalrpop`) is warranted for a six-token alphabet.

*/

use std::iter::Peekable;
use std::str::Chars;

use crate::error::ParseError;
use crate::term::Term;

/// Parses `text` into a single well-formed term, erroring if the text is
/// truncated mid-subtree or if tokens remain after a complete term is read.
pub fn parse(text: &str) -> Result<Term, ParseError> {
  let mut chars = text.chars().peekable();
  let term = parse_term(&mut chars)?;
  skip_whitespace(&mut chars);
  let residue: String = chars.collect();
  if residue.is_empty() {
    Ok(term)
  } else {
    Err(ParseError::Trailing(residue))
  }
}

fn skip_whitespace(chars: &mut Peekable<Chars>) {
  while let Some(&c) = chars.peek() {
    if is_token_char(c) {
      break;
    }
    chars.next();
  }
}

fn is_token_char(c: char) -> bool {
  matches!(c, 'Z' | 'I' | 'S' | '<' | '>' | 'o' | 'R')
}

fn next_token(chars: &mut Peekable<Chars>) -> Option<char> {
  skip_whitespace(chars);
  chars.next()
}

fn parse_term(chars: &mut Peekable<Chars>) -> Result<Term, ParseError> {
  match next_token(chars) {
    None => Err(ParseError::Truncated),
    Some('Z') => Ok(Term::zero()),
    Some('I') => Ok(Term::identity()),
    Some('S') => Ok(Term::successor()),
    Some('<') => Ok(Term::left(parse_term(chars)?)),
    Some('>') => Ok(Term::right(parse_term(chars)?)),
    Some('R') => {
      let base = parse_term(chars)?;
      let step = parse_term(chars)?;
      Ok(Term::rec(base, step)?)
    }
    Some('o') => {
      let head = parse_term(chars)?;
      let arity = head.arity();
      let mut peers = Vec::with_capacity(arity as usize);
      for _ in 0..arity {
        peers.push(parse_term(chars)?);
      }
      Ok(Term::comp(head, peers)?)
    }
    Some(_) => unreachable!("next_token only returns token characters"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::enumerate::create;
  use crate::printer::to_tokens;
  use proptest::prelude::*;

  #[test]
  fn parses_atoms() {
    assert_eq!(parse("Z").unwrap().arity(), 0);
    assert_eq!(parse("I").unwrap().arity(), 1);
    assert_eq!(parse("S").unwrap().arity(), 1);
  }

  #[test]
  fn parses_projections_and_recursion() {
    let addition = parse("R I <>S").unwrap();
    assert_eq!(addition.arity(), 2);
  }

  #[test]
  fn truncated_input_is_an_error() {
    assert_eq!(parse("<").unwrap_err(), ParseError::Truncated);
    assert_eq!(parse("R I").unwrap_err(), ParseError::Truncated);
  }

  #[test]
  fn trailing_tokens_are_reported() {
    match parse("Z Z") {
      Err(ParseError::Trailing(residue)) => assert_eq!(residue, "Z"),
      other => panic!("expected Trailing error, got {other:?}"),
    }
  }

  #[test]
  fn whitespace_between_tokens_is_ignored() {
    let a = parse("R I <>S").unwrap();
    let b = parse("RI<>S").unwrap();
    assert_eq!(to_tokens(&a), to_tokens(&b));
  }

  #[test]
  fn parse_and_print_round_trip() {
    for text in ["Z", "I", "S", "<I", ">S", "R I <>S", "oS<I"] {
      let term = parse(text).unwrap();
      let printed = to_tokens(&term);
      let reparsed = parse(&printed).unwrap();
      assert_eq!(term, reparsed);
    }
  }

  proptest! {
    #[test]
    fn parse_print_round_trips_over_enumerated_terms(n in 0u64..2000) {
      let term = create(1, n);
      let printed = to_tokens(&term);
      let reparsed = parse(&printed).expect("printed output must reparse");
      prop_assert_eq!(term, reparsed);
    }
  }
}
