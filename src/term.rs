/*!

The term model: the tagged tree that every other module builds, parses,
prints, evaluates, enumerates, or hashes.

A [`Term`] is, structurally, a `TermNode` plus the two derived attributes
(arity and depth) cached alongside it, mirroring the split between
`term_node` and `attributes` that the teacher crate uses for its own
`Term`/`TermNode` pair. Children are owned through `Box`, never shared,
which keeps the structural-equality and `Clone` derivations exact and is
the same ownership shape the teacher uses for `BxTerm = Box<Term>`.

*/

use crate::error::ArityError;

/// A nonnegative integer the language's terms operate on.
pub type NaturalNumber = u64;

/// An owned node in a term tree, boxed so recursive variants have a known size.
pub type BxTerm = Box<Term>;

/// A well-formed term in the six-combinator language.
///
/// `arity` and `depth` are derived attributes, computed once at construction
/// time and cached here so that callers (the interpreter's budget, the
/// enumerator, the search driver) never have to re-walk the tree to ask for
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
  node : TermNode,
  arity: u32,
  depth: u32,
}

/// The six combinators, plus their children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermNode {
  /// The constant zero function. Arity 0.
  Zero,
  /// The one-argument identity function. Arity 1.
  Identity,
  /// The one-argument successor function. Arity 1.
  Successor,
  /// Discard the first argument and apply `g` to the rest. Arity is `g`'s arity + 1.
  Left(BxTerm),
  /// Discard the last argument and apply `g` to the rest. Arity is `g`'s arity + 1.
  Right(BxTerm),
  /// Functional composition: apply `head` to the results of each of `peers`
  /// applied to the shared argument list.
  Comp { head: BxTerm, peers: Vec<Term> },
  /// Primitive recursion on the first argument: `base` handles the zero case,
  /// `step` handles the successor case.
  Rec { base: BxTerm, step: BxTerm },
}

impl Term {
  pub fn node(&self) -> &TermNode {
    &self.node
  }

  /// Number of arguments this term expects.
  pub fn arity(&self) -> u32 {
    self.arity
  }

  /// Depth of nesting of combinators, used as a search-space size bound elsewhere.
  pub fn depth(&self) -> u32 {
    self.depth
  }

  pub fn zero() -> Term {
    Term { node: TermNode::Zero, arity: 0, depth: 0 }
  }

  pub fn identity() -> Term {
    Term { node: TermNode::Identity, arity: 1, depth: 0 }
  }

  pub fn successor() -> Term {
    Term { node: TermNode::Successor, arity: 1, depth: 0 }
  }

  /// `Left(g)` has no arity invariant to check: it is well-formed for any `g`.
  /// A projection does not add depth: `depth(Left(g)) = depth(g)`.
  pub fn left(g: Term) -> Term {
    let arity = g.arity + 1;
    let depth = g.depth;
    Term { node: TermNode::Left(Box::new(g)), arity, depth }
  }

  /// `Right(g)` has no arity invariant to check: it is well-formed for any `g`.
  /// A projection does not add depth: `depth(Right(g)) = depth(g)`.
  pub fn right(g: Term) -> Term {
    let arity = g.arity + 1;
    let depth = g.depth;
    Term { node: TermNode::Right(Box::new(g)), arity, depth }
  }

  /// Builds a composition node, checking that `peers.len()` matches `head`'s
  /// arity and that every peer shares a common arity (the arity of the
  /// resulting Comp node).
  pub fn comp(head: Term, peers: Vec<Term>) -> Result<Term, ArityError> {
    if peers.is_empty() {
      return Err(ArityError { expected: head.arity, got: 0, at: "Comp.peer_count" });
    }
    if peers.len() as u32 != head.arity {
      return Err(ArityError { expected: head.arity, got: peers.len() as u32, at: "Comp.peer_count" });
    }
    let comp_arity = peers[0].arity;
    for peer in &peers[1..] {
      if peer.arity != comp_arity {
        return Err(ArityError { expected: comp_arity, got: peer.arity, at: "Comp.peer_arity" });
      }
    }
    // Comp does not add depth: depth(Comp) = max(depth(head), depth(peers)).
    let depth = peers.iter().map(Term::depth).max().unwrap_or(0).max(head.depth);
    Ok(Term { node: TermNode::Comp { head: Box::new(head), peers }, arity: comp_arity, depth })
  }

  /// Builds a recursion node, checking that `step`'s arity is `base`'s arity + 2.
  pub fn rec(base: Term, step: Term) -> Result<Term, ArityError> {
    let expected = base.arity + 2;
    if step.arity != expected {
      return Err(ArityError { expected, got: step.arity, at: "Rec.step_arity" });
    }
    let arity = base.arity + 1;
    let depth = 1 + base.depth.max(step.depth);
    Ok(Term { node: TermNode::Rec { base: Box::new(base), step: Box::new(step) }, arity, depth })
  }

  /// Total node count, used by the shape generator and search driver as the
  /// notion of program "size".
  pub fn size(&self) -> u64 {
    match &self.node {
      TermNode::Zero | TermNode::Identity | TermNode::Successor => 1,
      TermNode::Left(g) | TermNode::Right(g) => 1 + g.size(),
      TermNode::Comp { head, peers } => 1 + head.size() + peers.iter().map(Term::size).sum::<u64>(),
      TermNode::Rec { base, step } => 1 + base.size() + step.size(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn atoms_have_expected_arity_and_size() {
    assert_eq!(Term::zero().arity(), 0);
    assert_eq!(Term::identity().arity(), 1);
    assert_eq!(Term::successor().arity(), 1);
    assert_eq!(Term::zero().size(), 1);
  }

  #[test]
  fn left_and_right_raise_arity_by_one() {
    let g = Term::identity();
    assert_eq!(Term::left(g.clone()).arity(), 2);
    assert_eq!(Term::right(g).arity(), 2);
  }

  #[test]
  fn comp_rejects_peer_count_mismatch() {
    let head = Term::successor(); // arity 1
    let err = Term::comp(head, vec![]).unwrap_err();
    assert_eq!(err.at, "Comp.peer_count");
  }

  #[test]
  fn comp_rejects_mismatched_peer_arities() {
    let head = Term::left(Term::identity()); // arity 2
    let peers = vec![Term::identity(), Term::zero()];
    let err = Term::comp(head, peers).unwrap_err();
    assert_eq!(err.at, "Comp.peer_arity");
  }

  #[test]
  fn rec_rejects_step_arity_mismatch() {
    let err = Term::rec(Term::zero(), Term::identity()).unwrap_err();
    assert_eq!(err.expected, 2);
    assert_eq!(err.got, 1);
  }

  #[test]
  fn rec_accepts_well_formed_step() {
    // base: Z (arity 0); step must have arity 2.
    let step = Term::left(Term::identity()); // arity 2
    let t = Term::rec(Term::zero(), step).unwrap();
    assert_eq!(t.arity(), 1);
  }

  #[test]
  fn projections_and_comp_do_not_add_depth() {
    assert_eq!(Term::left(Term::identity()).depth(), 0);
    assert_eq!(Term::right(Term::right(Term::identity())).depth(), 0);
    let head = Term::successor(); // arity 1, depth 0
    let comp = Term::comp(head, vec![Term::identity()]).unwrap();
    assert_eq!(comp.depth(), 0);
  }

  #[test]
  fn rec_is_the_only_combinator_that_adds_depth() {
    let base = Term::rec(Term::zero(), Term::left(Term::identity())).unwrap(); // arity 1, depth 1
    assert_eq!(base.arity(), 1);
    assert_eq!(base.depth(), 1);

    // A second arity-1, depth-1 Rec term to serve as the outer Rec's step
    // (arity must be base.arity() + 2 = 3, depth also 1).
    let step_base = Term::left(Term::identity()); // arity 2, depth 0
    let step_step = Term::left(Term::left(Term::left(Term::identity()))); // arity 4, depth 0
    let step = Term::rec(step_base, step_step).unwrap(); // arity 3, depth 1
    assert_eq!(step.arity(), 3);
    assert_eq!(step.depth(), 1);

    let nested = Term::rec(base, step).unwrap();
    assert_eq!(nested.depth(), 2);
  }
}
