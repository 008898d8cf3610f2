/*!

The size-bounded shape generator: `gen(arity, size)` yields every
well-formed term of the given arity and node count, after a set of
canonicalizing filters prune syntactically-redundant shapes before they
are ever built. `gen_main` layers on the additional top-level restriction
used by the search driver.

Generation is memoized per `(arity, size)` pair within a single call to
`gen`, since composition and recursion both recurse into smaller `(arity,
size)` sub-generators many times over; an unmemoized tree-recursive
generator here would redo the same sub-enumeration repeatedly.

*/

use std::collections::HashMap;
use std::rc::Rc;

use crate::term::{Term, TermNode};

type Cache = HashMap<(u32, u64), Rc<Vec<Term>>>;

/// All well-formed terms of the given arity and node count.
pub fn gen(arity: u32, size: u64) -> Vec<Term> {
  let mut cache = Cache::new();
  gen_cached(arity, size, &mut cache).as_ref().clone()
}

/// The stream the search driver sweeps: `gen`, with top-level projections
/// (`Left`/`Right`) excluded, since a program whose outermost combinator
/// discards an argument can never be the unique best performer at that
/// argument.
pub fn gen_main(arity: u32, size: u64) -> Vec<Term> {
  gen(arity, size)
    .into_iter()
    .filter(|t| !matches!(t.node(), TermNode::Left(_) | TermNode::Right(_)))
    .collect()
}

fn gen_cached(arity: u32, size: u64, cache: &mut Cache) -> Rc<Vec<Term>> {
  if let Some(hit) = cache.get(&(arity, size)) {
    return hit.clone();
  }
  let result = Rc::new(compute(arity, size, cache));
  cache.insert((arity, size), result.clone());
  result
}

fn compute(arity: u32, size: u64, cache: &mut Cache) -> Vec<Term> {
  if size == 0 {
    return vec![];
  }
  if size == 1 {
    return match arity {
      0 => vec![Term::zero()],
      1 => vec![Term::identity(), Term::successor()],
      _ => vec![],
    };
  }
  let mut out = add_composition(arity, size, cache);
  if arity >= 1 {
    out.extend(add_left(arity, size, cache));
    out.extend(add_right(arity, size, cache));
    out.extend(add_recursion(arity, size, cache));
  }
  out
}

fn add_left(arity: u32, size: u64, cache: &mut Cache) -> Vec<Term> {
  gen_cached(arity - 1, size - 1, cache).iter().cloned().map(Term::left).collect()
}

fn add_right(arity: u32, size: u64, cache: &mut Cache) -> Vec<Term> {
  gen_cached(arity - 1, size - 1, cache)
    .iter()
    .filter(|g| !matches!(g.node(), TermNode::Left(_)))
    .cloned()
    .map(Term::right)
    .collect()
}

fn add_recursion(arity: u32, size: u64, cache: &mut Cache) -> Vec<Term> {
  let mut out = Vec::new();
  if size < 3 {
    return out;
  }
  for k in 1..=(size - 2) {
    let bases = gen_cached(arity - 1, k, cache);
    let steps = gen_cached(arity + 1, size - 1 - k, cache);
    for base in bases.iter() {
      for step in steps.iter() {
        if is_suppressed_recursion(base, step) {
          continue;
        }
        out.push(Term::rec(base.clone(), step.clone()).expect("generator built a mismatched Rec node"));
      }
    }
  }
  out
}

/// The canonicalizing filters on `Rec(base, step)` shapes: each rules out a
/// step that provably computes the same function as a smaller or already-
/// enumerated shape.
fn is_suppressed_recursion(base: &Term, step: &Term) -> bool {
  // Rec step == Left(I): the recursive call result is discarded outright,
  // so the recursion degenerates to evaluating `base` regardless of the
  // counter; a smaller non-recursive shape already covers this.
  if matches!(step.node(), TermNode::Left(g) if matches!(g.node(), TermNode::Identity)) {
    return true;
  }
  if matches!(base.node(), TermNode::Zero) {
    // Rec(Z, Left(Left(Z))): step ignores both the predecessor and the
    // recursive result and always returns 0, same as the base case.
    if is_left_left_of(step, |n| matches!(n, TermNode::Zero)) {
      return true;
    }
    // Rec(Z, Left(Rec(Z, _))): step discards the predecessor and recurses
    // again from the same zero base, which the outer Rec already expresses.
    if let TermNode::Left(inner) = step.node() {
      if matches!(inner.node(), TermNode::Rec { base: b, .. } if matches!(b.node(), TermNode::Zero)) {
        return true;
      }
    }
  }
  if matches!(base.node(), TermNode::Identity) {
    // Rec(I, Left(Left(I))): step ignores both the predecessor and the
    // recursive result and always returns the carried argument.
    if is_left_left_of(step, |n| matches!(n, TermNode::Identity)) {
      return true;
    }
  }
  // A Right-headed step whose body is itself Right: the two projections
  // collapse into a single larger discard a non-recursive shape already covers.
  if let TermNode::Right(inner) = step.node() {
    if matches!(inner.node(), TermNode::Right(_)) {
      return true;
    }
  }
  false
}

fn is_left_left_of(term: &Term, matches_inner: impl Fn(&TermNode) -> bool) -> bool {
  if let TermNode::Left(outer) = term.node() {
    if let TermNode::Left(inner) = outer.node() {
      return matches_inner(inner.node());
    }
  }
  false
}

fn is_bad_comp_head(head: &Term) -> bool {
  matches!(head.node(), TermNode::Identity | TermNode::Left(_) | TermNode::Right(_))
}

fn add_composition(arity: u32, size: u64, cache: &mut Cache) -> Vec<Term> {
  let mut out = Vec::new();
  for k in 1..size {
    for head_arity in 1..=k {
      let heads = gen_cached(head_arity as u32, k, cache);
      for head in heads.iter() {
        if is_bad_comp_head(head) {
          continue;
        }
        let peers_total = size - 1 - k;
        for sizes in partitions(head_arity as usize, peers_total) {
          for peers in cartesian_peers(arity, &sizes, cache) {
            out.push(Term::comp(head.clone(), peers).expect("generator built a mismatched Comp node"));
          }
        }
      }
    }
  }
  out
}

/// Every ordered way to split `total` into `count` strictly positive parts.
fn partitions(count: usize, total: u64) -> Vec<Vec<u64>> {
  if count == 0 {
    return if total == 0 { vec![vec![]] } else { vec![] };
  }
  if count == 1 {
    return if total >= 1 { vec![vec![total]] } else { vec![] };
  }
  let mut out = Vec::new();
  let max_first = total.saturating_sub(count as u64 - 1);
  for first in 1..=max_first {
    for mut rest in partitions(count - 1, total - first) {
      let mut row = vec![first];
      row.append(&mut rest);
      out.push(row);
    }
  }
  out
}

/// The cartesian product of `gen(arity, sizes[0]) x gen(arity, sizes[1]) x ...`,
/// preserving slot order.
fn cartesian_peers(arity: u32, sizes: &[u64], cache: &mut Cache) -> Vec<Vec<Term>> {
  let mut rows: Vec<Vec<Term>> = vec![vec![]];
  for &size in sizes {
    let choices = gen_cached(arity, size, cache);
    let mut next_rows = Vec::with_capacity(rows.len() * choices.len());
    for row in &rows {
      for choice in choices.iter() {
        let mut extended = row.clone();
        extended.push(choice.clone());
        next_rows.push(extended);
      }
    }
    rows = next_rows;
  }
  rows
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn base_cases() {
    assert_eq!(gen(0, 1).len(), 1);
    assert_eq!(gen(1, 1).len(), 2);
    assert_eq!(gen(2, 1).len(), 0);
  }

  #[test]
  fn every_generated_term_has_the_requested_arity_and_size() {
    for size in 1..=6u64 {
      for term in gen(1, size) {
        assert_eq!(term.arity(), 1);
        assert_eq!(term.size(), size);
      }
    }
  }

  #[test]
  fn main_stream_excludes_top_level_projections() {
    for size in 1..=6u64 {
      for term in gen_main(1, size) {
        assert!(!matches!(term.node(), TermNode::Left(_) | TermNode::Right(_)));
      }
    }
  }

  #[test]
  fn main_stream_counts_are_stable_across_runs() {
    let first: Vec<u64> = (1..=6).map(|s| gen_main(1, s).len() as u64).collect();
    let second: Vec<u64> = (1..=6).map(|s| gen_main(1, s).len() as u64).collect();
    assert_eq!(first, second);
  }

  #[test]
  fn comp_head_never_identity_or_projection() {
    for size in 2..=8u64 {
      for term in gen(1, size) {
        if let TermNode::Comp { head, .. } = term.node() {
          assert!(!matches!(head.node(), TermNode::Identity | TermNode::Left(_) | TermNode::Right(_)));
        }
      }
    }
  }
}
