use crate::agenda::Agenda;
use crate::category::Category;
use crate::chart::Chart;
use crate::edge::{Edge, EdgeIdx};
use crate::grammar::Grammar;

/// The two prediction regimes. Both drive the same store, incorporation
/// protocol, and fundamental rule; they differ only in which edges they
/// choose to hypothesize. Swapping strategies changes the intermediate
/// edge counts, never the set of root edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
  /// Seed one lexical edge per word; spawn a rule whenever a complete
  /// edge could be its first daughter.
  BottomUp,
  /// Earley-style: seed the admissible root rules at position 0, predict
  /// from the first need of each partial, and scan words at the dot.
  TopDown,
}

impl Strategy {
  pub(crate) fn initialize(
    self,
    grammar: &Grammar,
    words: &[&str],
    top_cats: &[&str],
    agenda: &mut Agenda,
  ) {
    match self {
      Self::BottomUp => {
        for (i, word) in words.iter().enumerate() {
          agenda.enqueue(Edge::lexical(word, i));
        }
      }
      Self::TopDown => {
        for rule in grammar.rules() {
          if top_cats.contains(&rule.lhs.atom()) {
            agenda.enqueue(Edge::empty(rule, 0));
          }
        }
      }
    }
  }

  /// Called when a complete edge lands in the chart.
  pub(crate) fn predict_from_complete(
    self,
    grammar: &Grammar,
    label: &Category,
    position: usize,
    agenda: &mut Agenda,
  ) {
    match self {
      Self::BottomUp => {
        for rule in grammar.rules_with_first_corner(label.atom()) {
          if rule.first().accepts(label) {
            agenda.enqueue(Edge::empty(rule, position));
          }
        }
      }
      // top-down prediction all happens from partials
      Self::TopDown => {}
    }
  }

  /// Called when a partial edge lands in the chart. The chart has already
  /// paired it against the completes that abut it; all that's left is
  /// strategy-specific hypothesizing.
  pub(crate) fn predict_from_partial(
    self,
    grammar: &Grammar,
    chart: &Chart,
    edge_idx: EdgeIdx,
    agenda: &mut Agenda,
  ) {
    match self {
      // builds edges only from observed material; nothing to hypothesize
      Self::BottomUp => {}
      Self::TopDown => {
        let edge = chart.edge(edge_idx);
        self.predict(grammar, edge, agenda);
        self.scan(chart, edge, agenda);
      }
    }
  }

  /// Hypothesize every rule that could build this edge's first need,
  /// starting where the edge ends. Unguided: it never looks at the input.
  fn predict(self, grammar: &Grammar, edge: &Edge, agenda: &mut Agenda) {
    for rule in grammar.rules_for(edge.first_needed().atom()) {
      agenda.enqueue(Edge::empty(rule, edge.right));
    }
  }

  /// If the first need is the next input word, make the lexical edge for
  /// it. The cursor is the edge's right end, the dot position. (Scanning
  /// at the *left* end survives on grammars that route every terminal
  /// through a unary lexicon rule, where needy edges are empty and the
  /// ends coincide, but loses parses as soon as a terminal appears inside
  /// a longer right-hand side.)
  fn scan(self, chart: &Chart, edge: &Edge, agenda: &mut Agenda) {
    let position = edge.right;
    if position < chart.input_len() && edge.first_needed().atom() == chart.word(position) {
      agenda.enqueue(Edge::lexical(chart.word(position), position));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::chart::parse_chart;

  fn solution_summaries(chart: &Chart, top: &[&str]) -> Vec<String> {
    chart
      .solutions(top)
      .into_iter()
      .map(|idx| chart.edge(idx).to_string())
      .collect()
  }

  #[test]
  fn strategies_find_the_same_roots() {
    let g: Grammar = "grammar\nN -> N N\nthatsall\nlexicon\na N\nthatsall"
      .parse()
      .unwrap();
    let input = ["a", "a", "a", "a"];

    let bu = parse_chart(&g, &input, &["N"], Strategy::BottomUp, None);
    let td = parse_chart(&g, &input, &["N"], Strategy::TopDown, None);

    assert_eq!(
      solution_summaries(&bu, &["N"]),
      solution_summaries(&td, &["N"])
    );
    assert_eq!(
      bu.forest().count_trees(bu.solutions(&["N"])[0]),
      td.forest().count_trees(td.solutions(&["N"])[0]),
    );
  }

  #[test]
  fn top_down_scans_at_the_dot() {
    // An inline terminal in a binary rule: "and" never goes through a
    // lexicon rule, so the needy edge spans [0, 1) and the two cursor
    // choices disagree. Scanning at the left end finds nothing here.
    let g: Grammar = "grammar\nS -> Np and Np\nthatsall\nlexicon\nmary Np\nsue Np\nthatsall"
      .parse()
      .unwrap();
    let input = ["mary", "and", "sue"];

    let td = parse_chart(&g, &input, &["S"], Strategy::TopDown, None);
    assert_eq!(td.solutions(&["S"]).len(), 1);

    let bu = parse_chart(&g, &input, &["S"], Strategy::BottomUp, None);
    assert_eq!(
      solution_summaries(&bu, &["S"]),
      solution_summaries(&td, &["S"])
    );
  }

  #[test]
  fn top_down_ignores_words_the_grammar_never_predicted() {
    let g: Grammar = "grammar\nS -> Np\nthatsall\nlexicon\nmary Np\nthatsall"
      .parse()
      .unwrap();
    let td = parse_chart(&g, &["sue"], &["S"], Strategy::TopDown, None);
    assert!(td.solutions(&["S"]).is_empty());
    // the unpredicted word never even got a lexical edge
    assert_eq!(td.completes_at(0).len(), 0);
  }
}
