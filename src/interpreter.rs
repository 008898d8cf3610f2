/*!

The explicit trampoline interpreter.

Evaluation never recurses on the Rust call stack: a term application is
seeded as an "open" thunk in an arena, and a work stack of arena indices
drives a loop that, each iteration, either forces a child (pushing its
index), rewrites the top thunk in place, or pops a thunk that has already
closed to a value. This mirrors the teacher's preference for owned,
boxed trees over shared mutable state — here extended with an arena so the
interpreter can rewrite a thunk in place without fighting the borrow
checker over a self-referential stack of terms.

A thunk is represented as either `Closed(n)` — fully evaluated to a natural
number — or `Open { term, args }` — a term still waiting on its arguments,
each of which is itself an arena index. Arity and index checking is not
needed mid-evaluation: it is established once at construction (by
`Term::comp`/`Term::rec`) and at `Interpreter::new` (the root's arity must
match the supplied inputs), so a well-formed interpreter run can never
produce an ill-typed thunk.

*/

use crate::error::ArityError;
use crate::term::{NaturalNumber, Term, TermNode};

/// A single slot in the evaluation arena.
enum Thunk<'t> {
  Closed(NaturalNumber),
  Open { term: &'t Term, args: Vec<usize> },
}

/// The outcome of running a term to completion or to its step budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// The root thunk closed to this value within budget.
  Value(NaturalNumber),
  /// Binary-shortcut mode only: whether the root was ever proven non-zero.
  NonZero(bool),
  /// The step budget was exhausted before the root thunk closed.
  Overflow,
}

/// An explicit-stack evaluator for a single term applied to a fixed input tuple.
pub struct Interpreter<'t> {
  arena: Vec<Thunk<'t>>,
  stack: Vec<usize>,
  /// Arena index of the root thunk. The inputs are allocated into the arena
  /// before the root, so this is `inputs.len()`, not `0`.
  root: usize,
}

impl<'t> Interpreter<'t> {
  /// Seeds the evaluator with `term` applied to `inputs`. The length of
  /// `inputs` must equal `term`'s arity.
  pub fn new(term: &'t Term, inputs: &[NaturalNumber]) -> Result<Interpreter<'t>, ArityError> {
    if inputs.len() as u32 != term.arity() {
      return Err(ArityError { expected: term.arity(), got: inputs.len() as u32, at: "Interpreter::new" });
    }
    let mut arena = Vec::new();
    let arg_indices: Vec<usize> = inputs
      .iter()
      .map(|&n| {
        arena.push(Thunk::Closed(n));
        arena.len() - 1
      })
      .collect();
    arena.push(Thunk::Open { term, args: arg_indices });
    let root = arena.len() - 1;
    Ok(Interpreter { arena, stack: vec![root], root })
  }

  fn alloc(&mut self, thunk: Thunk<'t>) -> usize {
    self.arena.push(thunk);
    self.arena.len() - 1
  }

  fn closed_value(&self, idx: usize) -> Option<NaturalNumber> {
    match self.arena[idx] {
      Thunk::Closed(n) => Some(n),
      Thunk::Open { .. } => None,
    }
  }

  /// Runs up to `budget` steps. In binary-shortcut mode (`binary == true`),
  /// returns `NonZero(true)` the instant the root thunk's term becomes a
  /// `Successor` node, without waiting for that successor's argument to
  /// close; otherwise a full evaluation to `Value` (or `Overflow`) is
  /// performed.
  pub fn run(&mut self, budget: u64, binary: bool) -> (u64, Outcome) {
    let mut steps = 0u64;
    while let Some(&idx) = self.stack.last() {
      if binary {
        if let Thunk::Open { term, .. } = &self.arena[self.root] {
          if matches!(term.node(), TermNode::Successor) {
            return (steps, Outcome::NonZero(true));
          }
        }
      }
      if steps >= budget {
        return (steps, Outcome::Overflow);
      }
      steps += 1;
      match &self.arena[idx] {
        Thunk::Closed(_) => {
          self.stack.pop();
        }
        Thunk::Open { .. } => self.step(idx),
      }
    }
    let result = self.closed_value(self.root).expect("stack emptied with an unclosed root thunk");
    if binary {
      (steps, Outcome::NonZero(result != 0))
    } else {
      (steps, Outcome::Value(result))
    }
  }

  /// Applies the one evaluation rule for the tag at `idx`, either rewriting
  /// the thunk at `idx` in place or pushing a dependency to force first.
  fn step(&mut self, idx: usize) {
    let (term, args) = match &self.arena[idx] {
      Thunk::Open { term, args } => (*term, args.clone()),
      Thunk::Closed(_) => unreachable!("step is only called on open thunks"),
    };
    match term.node() {
      TermNode::Zero => self.arena[idx] = Thunk::Closed(0),

      TermNode::Identity => match self.closed_value(args[0]) {
        Some(n) => self.arena[idx] = Thunk::Closed(n),
        None => self.stack.push(args[0]),
      },

      TermNode::Successor => match self.closed_value(args[0]) {
        Some(n) => self.arena[idx] = Thunk::Closed(n + 1),
        None => self.stack.push(args[0]),
      },

      TermNode::Left(g) => {
        let new_args = args[1..].to_vec();
        self.arena[idx] = Thunk::Open { term: g, args: new_args };
      }

      TermNode::Right(g) => {
        let new_args = args[..args.len() - 1].to_vec();
        self.arena[idx] = Thunk::Open { term: g, args: new_args };
      }

      TermNode::Comp { head, peers } => {
        let new_args: Vec<usize> =
          peers.iter().map(|h| self.alloc(Thunk::Open { term: h, args: args.clone() })).collect();
        self.arena[idx] = Thunk::Open { term: head, args: new_args };
      }

      TermNode::Rec { base, step } => match self.closed_value(args[0]) {
        None => self.stack.push(args[0]),
        Some(0) => {
          let new_args = args[1..].to_vec();
          self.arena[idx] = Thunk::Open { term: base, args: new_args };
        }
        Some(n) => {
          let predecessor = n - 1;
          let rest = &args[1..];
          let pred_for_self = self.alloc(Thunk::Closed(predecessor));
          let mut self_args = vec![pred_for_self];
          self_args.extend_from_slice(rest);
          let recursive_call = self.alloc(Thunk::Open { term, args: self_args });
          let pred_for_step = self.alloc(Thunk::Closed(predecessor));
          let mut step_args = vec![pred_for_step, recursive_call];
          step_args.extend_from_slice(rest);
          self.arena[idx] = Thunk::Open { term: step, args: step_args };
        }
      },
    }
  }
}

/// Convenience entry point: evaluate `term` on `inputs` to completion,
/// returning the closed value (or an overflow indicator).
pub fn evaluate(term: &Term, inputs: &[NaturalNumber], budget: u64) -> Result<(u64, Outcome), ArityError> {
  let mut interpreter = Interpreter::new(term, inputs)?;
  Ok(interpreter.run(budget, false))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::enumerate::create;
  use crate::parser::parse;
  use proptest::prelude::*;

  #[test]
  fn zero_evaluates_to_zero() {
    let z = Term::zero();
    let (_, outcome) = evaluate(&z, &[], 1_000).unwrap();
    assert_eq!(outcome, Outcome::Value(0));
  }

  #[test]
  fn successor_of_successor() {
    let oss = parse("oSS").unwrap();
    let (_, outcome) = evaluate(&oss, &[3], 1_000).unwrap();
    assert_eq!(outcome, Outcome::Value(5));
  }

  #[test]
  fn addition_via_recursion() {
    let addition = parse("R I <>S").unwrap();
    let (_, outcome) = evaluate(&addition, &[10, 5], 10_000).unwrap();
    assert_eq!(outcome, Outcome::Value(15));
    let (_, outcome) = evaluate(&addition, &[0, 7], 10_000).unwrap();
    assert_eq!(outcome, Outcome::Value(7));
  }

  #[test]
  fn multiplication_via_nested_recursion() {
    // mult(x, y) = R Z (add-shifted): recursion on y, base 0, step adds x each time.
    // step(p, prev, x) = add(x, prev); expressed as R Z o<>S><<I with addition
    // substituted in, built directly rather than hand-threading tokens:
    let addition = parse("R I <>S").unwrap();
    let zero_base = Term::left(Term::zero()); // arity 1: ignores x, returns 0
    // step(p, prev, x) = addition(x, prev), peers share arity 3 over (p, prev, x)
    let select_x = Term::left(Term::left(Term::identity())); // arity 3, picks last (x)
    let select_prev = Term::left(Term::right(Term::identity())); // arity 3, picks middle (prev)
    let step = Term::comp(addition, vec![select_x, select_prev]).unwrap();
    let mult = Term::rec(zero_base, step).unwrap();
    let (_, outcome) = evaluate(&mult, &[7, 8], 100_000).unwrap();
    assert_eq!(outcome, Outcome::Value(56));
  }

  #[test]
  fn arity_mismatch_is_reported() {
    let z = Term::zero();
    assert!(Interpreter::new(&z, &[1]).is_err());
  }

  #[test]
  fn step_budget_exhaustion_is_overflow() {
    let addition = parse("R I <>S").unwrap();
    let (_, outcome) = evaluate(&addition, &[1000, 1000], 5).unwrap();
    assert_eq!(outcome, Outcome::Overflow);
  }

  #[test]
  fn binary_shortcut_detects_nonzero_without_full_evaluation() {
    let addition = parse("R I <>S").unwrap();
    let mut interp = Interpreter::new(&addition, &[10, 5]).unwrap();
    let (_, outcome) = interp.run(1_000_000, true);
    assert_eq!(outcome, Outcome::NonZero(true));
  }

  #[test]
  fn binary_shortcut_reports_false_for_zero() {
    let z = Term::zero();
    let mut interp = Interpreter::new(&z, &[]).unwrap();
    let (_, outcome) = interp.run(1_000, true);
    assert_eq!(outcome, Outcome::NonZero(false));
  }

  proptest! {
    #[test]
    fn evaluation_is_deterministic(n in 0u64..500, input in 0u64..200) {
      let term = create(1, n);
      let first = evaluate(&term, &[input], 5_000);
      let second = evaluate(&term, &[input], 5_000);
      prop_assert_eq!(first, second);
    }
  }
}
