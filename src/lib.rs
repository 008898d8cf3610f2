/*!

A six-combinator primitive-recursive language: its term model, a
hand-written parser and printer, a trampoline interpreter, a bijective
enumerator and its inverse hash, a size-bounded shape generator, and a
Busy-Beaver-style search driver over that generator.

*/

pub mod enumerate;
pub mod error;
pub mod hasher;
pub mod interpreter;
pub mod pairing;
pub mod parser;
pub mod printer;
pub mod search;
pub mod shapes;
pub mod term;

pub use error::{ArityError, EnumeratorError, InterpreterError, ParseError};
pub use term::Term;
