/*!

Two ways of rendering a term: [`to_tokens`] emits the compact preorder token
string the parser reads back (its exact inverse), and [`to_tree`] emits an
indented, box-drawing display for human inspection — the same box-drawing
convention the original tooling used for inspecting a program's shape.

*/

use crate::term::{Term, TermNode};

/// Renders `term` as the compact preorder token string `parse` can read back.
pub fn to_tokens(term: &Term) -> String {
  let mut out = String::new();
  write_tokens(term, &mut out);
  out
}

fn write_tokens(term: &Term, out: &mut String) {
  match term.node() {
    TermNode::Zero => out.push('Z'),
    TermNode::Identity => out.push('I'),
    TermNode::Successor => out.push('S'),
    TermNode::Left(g) => {
      out.push('<');
      write_tokens(g, out);
    }
    TermNode::Right(g) => {
      out.push('>');
      write_tokens(g, out);
    }
    TermNode::Comp { head, peers } => {
      out.push('o');
      write_tokens(head, out);
      for peer in peers {
        write_tokens(peer, out);
      }
    }
    TermNode::Rec { base, step } => {
      out.push('R');
      write_tokens(base, out);
      write_tokens(step, out);
    }
  }
}

/// Renders `term` as an indented tree, one combinator per line, using
/// box-drawing connectors for each child.
pub fn to_tree(term: &Term) -> String {
  let mut out = String::new();
  write_tree(term, "", true, &mut out, true);
  out
}

fn label(term: &Term) -> &'static str {
  match term.node() {
    TermNode::Zero => "Z",
    TermNode::Identity => "I",
    TermNode::Successor => "S",
    TermNode::Left(_) => "<",
    TermNode::Right(_) => ">",
    TermNode::Comp { .. } => "o",
    TermNode::Rec { .. } => "R",
  }
}

fn children(term: &Term) -> Vec<&Term> {
  match term.node() {
    TermNode::Zero | TermNode::Identity | TermNode::Successor => vec![],
    TermNode::Left(g) | TermNode::Right(g) => vec![g],
    TermNode::Comp { head, peers } => {
      let mut out = vec![head.as_ref()];
      out.extend(peers.iter());
      out
    }
    TermNode::Rec { base, step } => vec![base, step],
  }
}

fn write_tree(term: &Term, prefix: &str, is_last: bool, out: &mut String, is_root: bool) {
  if is_root {
    out.push_str(label(term));
    out.push('\n');
  } else {
    out.push_str(prefix);
    out.push_str(if is_last { "└── " } else { "├── " });
    out.push_str(label(term));
    out.push('\n');
  }
  let child_prefix = if is_root {
    String::new()
  } else {
    format!("{prefix}{}", if is_last { "    " } else { "│   " })
  };
  let kids = children(term);
  for (i, child) in kids.iter().enumerate() {
    write_tree(child, &child_prefix, i == kids.len() - 1, out, false);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser::parse;

  #[test]
  fn tokens_roundtrip_through_the_parser() {
    let t = parse("R I <>S").unwrap();
    assert_eq!(to_tokens(&t), "RI<>S");
  }

  #[test]
  fn tree_display_shows_one_line_per_node() {
    let t = parse("R I <>S").unwrap();
    let tree = to_tree(&t);
    assert_eq!(tree.lines().count(), t.size() as usize);
  }
}
