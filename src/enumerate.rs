/*!

The bijective enumerator: `create(arity, n)` maps a natural number `n` to the
`n`-th term of the given arity, in an order fixed by the pairing functions
in [`crate::pairing`]. [`crate::hasher::hash`] is its exact inverse.

The mapping is total over all `(arity, n)` with `arity >= 0`: every branch
below terminates in a well-formed term, so the `Term::comp`/`Term::rec`
results are unwrapped rather than propagated — a `Result` here would only
ever hold `Ok`, and an `Err` signals a bug in this module, not bad input.

*/

use crate::pairing::{cantor_unpair, cantor_unpair_n, two_power_unpair};
use crate::term::Term;

/// Builds the `n`-th term of arity `arity`.
pub fn create(arity: u32, n: u64) -> Term {
  match (arity, n) {
    (0, 0) => Term::zero(),
    (1, 0) => Term::identity(),
    (1, 1) => Term::successor(),
    (0, n) => {
      // The only arity-0 non-atom shape is a composition; `n - 1` re-indexes
      // into the composition sub-enumeration.
      create_comp(0, n - 1)
    }
    (a, n) => {
      let (q, r) = (n / 4, n % 4);
      match r {
        0 => Term::right(create(a - 1, q)),
        1 => Term::left(create(a - 1, q)),
        2 => {
          let (i, j) = cantor_unpair(q);
          Term::rec(create(a - 1, i), create(a + 1, j))
            .expect("enumerator produced a Rec node with mismatched step arity")
        }
        3 => create_comp(a, q),
        _ => unreachable!("n % 4 is always in 0..4"),
      }
    }
  }
}

/// Shared composition sub-enumeration for both the arity-0 and arity>0 cases:
/// `m` is unpacked via two-power pairing into `(head arity - 1, x)`, and `x`
/// is further unpacked via n-ary Cantor pairing into the head's index and
/// each peer's index.
fn create_comp(arity: u32, m: u64) -> Term {
  let (head_arity_minus_one, x) = two_power_unpair(m);
  let head_arity = head_arity_minus_one + 1;
  let parts = cantor_unpair_n(x, head_arity as usize + 1);
  let head = create(head_arity, parts[0]);
  let peers: Vec<Term> = parts[1..].iter().map(|&peer_index| create(arity, peer_index)).collect();
  Term::comp(head, peers).expect("enumerator produced a Comp node with mismatched peer arity")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::term::TermNode;

  #[test]
  fn base_atoms() {
    assert!(matches!(create(0, 0).node(), TermNode::Zero));
    assert!(matches!(create(1, 0).node(), TermNode::Identity));
    assert!(matches!(create(1, 1).node(), TermNode::Successor));
  }

  #[test]
  fn create_is_total_over_a_range_of_indices() {
    for arity in 0..4u32 {
      for n in 0..200u64 {
        let t = create(arity, n);
        assert_eq!(t.arity(), arity, "arity mismatch at create({arity}, {n})");
      }
    }
  }

  #[test]
  fn distinct_indices_yield_distinct_terms() {
    use std::collections::HashSet;
    let mut seen = HashSet::new();
    for n in 0..500u64 {
      let t = create(1, n);
      assert!(seen.insert(t), "create(1, {n}) collided with an earlier term");
    }
  }
}
