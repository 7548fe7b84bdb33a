//! An agenda-driven active chart parser for context-free grammars with
//! atomic feature constraints, after Steve Isard's LIB CHART. The chart
//! keeps complete edges indexed by their left end and partial edges by
//! their right end, so the fundamental rule is a lookup in two buckets
//! that share an index; bottom-up and Earley-style top-down prediction
//! are interchangeable strategies over the same store. Every application
//! of the fundamental rule is traced, so the finished chart is a packed
//! forest from which all parse trees can be counted, indexed, and
//! enumerated without unpacking. A seeded random generator over the same
//! grammars rounds things out.
//!
//! ```
//! use chartwell::english::english;
//!
//! let g = english();
//! let chart = g.parse(&["the", "pigeons", "suffer"], &["S"]);
//! let roots = chart.solutions(&["S"]);
//! assert_eq!(roots.len(), 1);
//! println!("{}", chart.forest().first_tree(roots[0]));
//! ```

#[macro_use]
extern crate lazy_static;

pub mod agenda;
pub mod category;
pub mod chart;
pub mod edge;
pub mod english;
pub mod error;
pub mod forest;
pub mod generator;
pub mod grammar;
pub mod monitor;
pub mod parse_grammar;
pub mod rules;
pub mod strategy;
pub mod syntree;

pub use crate::category::Category;
pub use crate::chart::{parse_chart, Chart};
pub use crate::edge::{Edge, EdgeIdx, TraceEntry};
pub use crate::error::{Error, Result};
pub use crate::forest::Forest;
pub use crate::generator::Generator;
pub use crate::grammar::Grammar;
pub use crate::monitor::{EdgeMonitor, LoggingMonitor};
pub use crate::rules::{ConstraintMask, Rule};
pub use crate::strategy::Strategy;
pub use crate::syntree::SynTree;

#[cfg(test)]
mod tests {
  use std::collections::BTreeSet;

  use crate::english::english;
  use crate::grammar::Grammar;
  use crate::strategy::Strategy;
  use crate::Chart;

  fn tree_strings(chart: &Chart, top: &[&str]) -> BTreeSet<String> {
    let forest = chart.forest();
    chart
      .solutions(top)
      .into_iter()
      .flat_map(|root| forest.all_trees(root).collect::<Vec<_>>())
      .map(|t| t.bracketed())
      .collect()
  }

  fn root_summaries(chart: &Chart, top: &[&str]) -> BTreeSet<String> {
    chart
      .solutions(top)
      .into_iter()
      .map(|idx| chart.edge(idx).to_string())
      .collect()
  }

  /// The same rule skeletons with every binding and constraint key erased.
  fn strip_features(g: &Grammar) -> Grammar {
    let rules = g
      .rules()
      .map(|r| {
        crate::Rule::new(
          crate::Category::new(r.lhs.atom()),
          Vec::new(),
          r.rhs
            .iter()
            .map(|c| (crate::Category::new(c.atom()), Vec::new()))
            .collect(),
        )
      })
      .collect();
    Grammar::new(rules).unwrap()
  }

  #[test]
  fn the_pigeons_suffer() {
    let g = english();
    let chart = g.parse(&["the", "pigeons", "suffer"], &["S"]);
    let roots = chart.solutions(&["S"]);
    assert_eq!(roots.len(), 1);

    let forest = chart.forest();
    assert_eq!(forest.count_trees(roots[0]), 1);
    assert_eq!(
      forest.first_tree(roots[0]).bracketed(),
      "(S\n (Np\n  (det the)\n  (Nn\n   (n pigeons)))\n (Vp\n  (v suffer)))"
    );
    // the subject's plural percolated all the way up
    assert_eq!(chart.edge(roots[0]).label.feature("num"), Some("pl"));
  }

  #[test]
  fn coordinated_subjects() {
    let g = english();
    let words = ["the", "boys", "and", "the", "girls", "punish", "the", "pigeons"];
    let chart = g.parse(&words, &["S"]);
    let roots = chart.solutions(&["S"]);
    assert_eq!(roots.len(), 1);

    let forest = chart.forest();
    assert_eq!(forest.count_trees(roots[0]), 1);
    let tree = forest.first_tree(roots[0]);
    // subject is the coordination Np -> Np conj Np
    let subject = &tree.children[0];
    assert_eq!(subject.label.atom(), "Np");
    assert_eq!(subject.children.len(), 3);
    assert_eq!(subject.children[1].label.atom(), "conj");
  }

  #[test]
  fn passive_with_agent() {
    let g = english();
    let words = ["the", "pigeons", "are", "punished", "by", "the", "professors"];
    let chart = g.parse(&words, &["S"]);
    let roots = chart.solutions(&["S"]);
    assert_eq!(roots.len(), 1);

    let forest = chart.forest();
    assert_eq!(forest.count_trees(roots[0]), 1);
    let tree = forest.first_tree(roots[0]);
    // S -> Np cop ppart passmarker Np
    let kinds: Vec<&str> = tree.children.iter().map(|c| c.label.atom()).collect();
    assert_eq!(kinds, vec!["Np", "cop", "ppart", "passmarker", "Np"]);
  }

  #[test]
  fn passive_with_locative_has_no_parse() {
    let g = english();
    let words = ["the", "pigeons", "are", "punished", "in", "the", "green", "room"];
    let chart = g.parse(&words, &["S"]);
    assert!(chart.solutions(&["S"]).is_empty());
  }

  #[test]
  fn agreement_blocks_and_underspecification_permits() {
    let g = english();
    assert!(g.parse(&["the", "pigeons", "suffers"], &["S"]).solutions(&["S"]).is_empty());
    assert!(g.parse(&["the", "pigeon", "suffer"], &["S"]).solutions(&["S"]).is_empty());
    // "sheep" carries no number, so either verb form goes through
    for verb in ["suffer", "suffers", "suffered"] {
      let chart = g.parse(&["the", "sheep", verb], &["S"]);
      assert_eq!(chart.solutions(&["S"]).len(), 1, "the sheep {}", verb);
    }
  }

  #[test]
  fn feature_stripped_grammar_accepts_a_superset() {
    // feature monotonicity: whatever the constrained grammar licenses,
    // its feature-stripped counterpart licenses too, and the stripped
    // grammar accepts the agreement violations the constrained one blocks
    let full = english();
    let stripped = strip_features(&full);

    for words in [
      ["the", "pigeons", "suffer"],
      ["the", "pigeon", "suffers"],
      ["the", "pigeons", "suffers"],
      ["the", "pigeon", "suffer"],
    ] {
      let constrained = !full.parse(&words, &["S"]).solutions(&["S"]).is_empty();
      let relaxed = !stripped.parse(&words, &["S"]).solutions(&["S"]).is_empty();
      assert!(relaxed || !constrained, "{:?}", words);
      assert!(relaxed, "{:?} should parse without features", words);
    }
  }

  #[test]
  fn strategies_agree_on_all_scenarios() {
    let g = english();
    let scenarios: Vec<Vec<&str>> = vec![
      vec!["the", "pigeons", "suffer"],
      vec!["the", "boys", "and", "the", "girls", "punish", "the", "pigeons"],
      vec!["the", "pigeons", "are", "punished", "by", "the", "professors"],
      vec!["the", "pigeons", "are", "punished", "in", "the", "green", "room"],
    ];

    for words in scenarios {
      let bu = g.parse_with(&words, &["S"], Strategy::BottomUp, None);
      let td = g.parse_with(&words, &["S"], Strategy::TopDown, None);

      assert_eq!(
        root_summaries(&bu, &["S"]),
        root_summaries(&td, &["S"]),
        "root edges diverge on {:?}",
        words
      );
      assert_eq!(
        tree_strings(&bu, &["S"]),
        tree_strings(&td, &["S"]),
        "trees diverge on {:?}",
        words
      );
    }
  }

  #[test]
  fn top_down_is_no_busier_on_completes() {
    let g = english();
    let words = ["the", "pigeons", "suffer"];
    let bu = g.parse_with(&words, &["S"], Strategy::BottomUp, None);
    let td = g.parse_with(&words, &["S"], Strategy::TopDown, None);
    assert!(td.num_complete_edges <= bu.num_complete_edges);
    // the unguided predictor pays for it in partial edges
    assert!(td.num_partial_edges >= bu.num_partial_edges);
  }

  #[test]
  fn ambiguity_is_packed_not_duplicated() {
    let g = english();
    // Pp can attach to the object Np or to the Vp
    let words = ["the", "professors", "punish", "the", "boys", "in", "the", "room"];
    let chart = g.parse(&words, &["S"]);
    let roots = chart.solutions(&["S"]);
    assert_eq!(roots.len(), 1, "both attachments pack into one root edge");

    let forest = chart.forest();
    assert_eq!(forest.count_trees(roots[0]), 2);
    let trees: BTreeSet<String> = forest
      .all_trees(roots[0])
      .map(|t| t.bracketed())
      .collect();
    assert_eq!(trees.len(), 2);
  }

  #[test]
  fn every_complete_edge_yields_its_span() {
    let g = english();
    let words = ["the", "boys", "and", "the", "girls", "punish", "the", "pigeons"];
    let chart = g.parse(&words, &["S"]);
    let forest = chart.forest();

    for i in 0..=chart.input_len() {
      for &idx in chart.completes_at(i) {
        let e = chart.edge(idx);
        let tree = forest.first_tree(idx);
        assert_eq!(
          tree.leaves(),
          words[e.left..e.right].to_vec(),
          "yield mismatch for {}",
          e
        );
      }
    }
  }

  #[test]
  fn generated_sentences_parse_back_to_their_trees() {
    // the generator works on rule skeletons, so the round trip holds
    // modulo feature decoration: parse with the stripped grammar
    let g = strip_features(&english());
    let mut round_trips = 0;

    for seed in 0..40 {
      let tree = match crate::Generator::from_seed(&g, seed)
        .with_max_depth(14)
        .next_tree("S")
      {
        Ok(t) => t,
        Err(_) => continue, // this seed ran away; the cap said so
      };
      let words: Vec<&str> = tree.leaves();
      if words.len() > 10 {
        continue;
      }

      let chart = g.parse(&words, &["S"]);
      let roots = chart.solutions(&["S"]);
      assert!(!roots.is_empty(), "no parse for generated {:?}", words);

      let want = tree.bracketed();
      let forest = chart.forest();
      let found = roots
        .iter()
        .any(|&r| forest.all_trees(r).any(|t| t.bracketed() == want));
      assert!(found, "generated tree not among parses of {:?}", words);
      round_trips += 1;
    }

    assert!(round_trips > 0, "no generated sentence was small enough");
  }
}
