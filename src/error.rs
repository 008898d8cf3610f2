/*!

Structured error types for the term model, parser, interpreter, and enumerator.

The teacher crate declares `simple-error` but never reaches for typed,
multi-field error data in the modules this crate is grounded on. The error
domain here needs exactly that — `ParseError::Trailing` carries the leftover
text, `ArityError` carries three fields — so `thiserror` is used instead,
matching the convention the rest of the retrieval pack (`plotnik-vm`,
`plotnik-compiler`) reaches for.

*/

use thiserror::Error;

/// A mismatch between the number of children a combinator requires and the
/// number it was given, or between the arities children are required to share.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{at}: expected arity {expected}, got {got}")]
pub struct ArityError {
  pub expected: u32,
  pub got     : u32,
  pub at      : &'static str,
}

/// Failure to build a well-formed [`Term`](crate::term::Term) from program text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
  /// The input ended while a child was still expected.
  #[error("program text ended while a subtree was still expected")]
  Truncated,

  /// Tokens remained in the stream after the root term was fully built.
  #[error("trailing tokens after a complete program: {0:?}")]
  Trailing(String),

  /// A Comp or Rec node's children violated an arity invariant.
  #[error(transparent)]
  Arity(#[from] ArityError),
}

/// Failure while evaluating a term.
///
/// Per the evaluation contract, this is the only error the interpreter ever
/// surfaces; a step-budget exhaustion is not an error, it is the distinct
/// `Overflow` outcome (see [`crate::interpreter::Outcome`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpreterError {
  /// The root term's arity did not match the number of supplied inputs.
  #[error(transparent)]
  Arity(#[from] ArityError),
}

/// Failure surfaced by the bijective enumerator.
///
/// [`crate::enumerate::create`] is total over every `(arity, n)` pair it is
/// ever called with here, so this variant is never actually constructed by
/// this crate; it exists for defensive callers building their own index into
/// `create` (e.g. from deserialized or externally-supplied data) who need a
/// named error to report rather than a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumeratorError {
  /// `n` does not correspond to any term of the given arity.
  #[error("no term of arity {arity} at index {n}")]
  InvalidIndex { arity: u32, n: u64 },
}
