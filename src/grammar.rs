use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

use crate::chart::{parse_chart, Chart};
use crate::error::{Error, Result};
use crate::monitor::EdgeMonitor;
use crate::parse_grammar::parse;
use crate::rules::Rule;
use crate::strategy::Strategy;

/// An immutable rule set with the two lookups the strategies need: rules
/// by left-hand-side atom (top-down prediction, generation) and rules by
/// first right-hand-side atom (bottom-up spawning). Rules are shared, not
/// deduplicated; a duplicated rule only causes duplicate predictions,
/// which the chart absorbs.
#[derive(Debug)]
pub struct Grammar {
  rules: Vec<Rc<Rule>>,
  by_lhs: HashMap<String, Vec<Rc<Rule>>>,
  by_first: HashMap<String, Vec<Rc<Rule>>>,
}

impl Grammar {
  pub fn new(rules: Vec<Rule>) -> Result<Self> {
    if rules.is_empty() {
      return Err(Error::EmptyGrammar);
    }
    if let Some(r) = rules.iter().find(|r| r.is_empty()) {
      return Err(Error::EpsilonRule {
        lhs: r.lhs.atom().to_string(),
      });
    }

    let rules: Vec<Rc<Rule>> = rules.into_iter().map(Rc::new).collect();
    let mut by_lhs: HashMap<String, Vec<Rc<Rule>>> = HashMap::new();
    let mut by_first: HashMap<String, Vec<Rc<Rule>>> = HashMap::new();
    for rule in &rules {
      by_lhs
        .entry(rule.lhs.atom().to_string())
        .or_default()
        .push(rule.clone());
      by_first
        .entry(rule.first().atom().to_string())
        .or_default()
        .push(rule.clone());
    }

    Ok(Self {
      rules,
      by_lhs,
      by_first,
    })
  }

  pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
    fs::read_to_string(path)?.parse()
  }

  pub fn rules(&self) -> impl Iterator<Item = &Rc<Rule>> {
    self.rules.iter()
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  /// The rules whose left-hand side has this atom.
  pub fn rules_for(&self, atom: &str) -> &[Rc<Rule>] {
    self.by_lhs.get(atom).map(Vec::as_slice).unwrap_or(&[])
  }

  /// The rules whose first right-hand-side category has this atom.
  pub fn rules_with_first_corner(&self, atom: &str) -> &[Rc<Rule>] {
    self.by_first.get(atom).map(Vec::as_slice).unwrap_or(&[])
  }

  /// Bottom-up parse without a monitor; the common case.
  pub fn parse(&self, words: &[&str], top_cats: &[&str]) -> Chart {
    parse_chart(self, words, top_cats, Strategy::BottomUp, None)
  }

  pub fn parse_with(
    &self,
    words: &[&str],
    top_cats: &[&str],
    strategy: Strategy,
    monitor: Option<&mut dyn EdgeMonitor>,
  ) -> Chart {
    parse_chart(self, words, top_cats, strategy, monitor)
  }
}

impl FromStr for Grammar {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::new(parse(s)?)
  }
}

impl fmt::Display for Grammar {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for rule in &self.rules {
      writeln!(f, "{}", rule)?;
    }
    Ok(())
  }
}
