/*!

`hash(term)` is the exact inverse of [`crate::enumerate::create`]: given a
term, it recovers the `(arity, index)` pair that `create` would have had to
be called with to produce that exact term.

Each branch below undoes the corresponding branch of `create` in reverse:
where `create` splits an index with `n / 4` and `n % 4`, `hash` rebuilds the
index with `4 * q + r`; where `create` unpacks a pairing function, `hash`
packs one.

*/

use crate::pairing::{cantor_pair, cantor_pair_n, two_power_pair};
use crate::term::{Term, TermNode};

/// Recovers the `(arity, index)` pair for which `create(arity, index) == *term`.
pub fn hash(term: &Term) -> (u32, u64) {
  match term.node() {
    TermNode::Zero => (0, 0),
    TermNode::Identity => (1, 0),
    TermNode::Successor => (1, 1),
    TermNode::Right(g) => {
      let (a, q) = hash(g);
      (a + 1, 4 * q)
    }
    TermNode::Left(g) => {
      let (a, q) = hash(g);
      (a + 1, 4 * q + 1)
    }
    TermNode::Rec { base, step } => {
      let (a, i) = hash(base);
      let (_, j) = hash(step);
      (a + 1, 4 * cantor_pair(i, j) + 2)
    }
    TermNode::Comp { head, peers } => {
      let m = hash_comp(head, peers);
      if term.arity() == 0 {
        (0, m + 1)
      } else {
        (term.arity(), 4 * m + 3)
      }
    }
  }
}

/// Shared inverse of `create_comp`: folds the head's index and each peer's
/// index into the single natural number `create_comp` would unpack from.
fn hash_comp(head: &Term, peers: &[Term]) -> u64 {
  let (head_arity, head_index) = hash(head);
  let mut indices = vec![head_index];
  indices.extend(peers.iter().map(|p| hash(p).1));
  let x = cantor_pair_n(&indices);
  two_power_pair(head_arity - 1, x)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::enumerate::create;

  #[test]
  fn hash_inverts_create_for_a_range_of_indices() {
    for arity in 0..4u32 {
      for n in 0..500u64 {
        let t = create(arity, n);
        assert_eq!(hash(&t), (arity, n), "hash(create({arity}, {n})) round-trip failed");
      }
    }
  }
}
