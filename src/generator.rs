use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::category::Category;
use crate::error::{Error, Result};
use crate::grammar::Grammar;
use crate::syntree::SynTree;

/// Randomized derivation over a grammar: pick a rule for the current atom
/// uniformly at random, recurse on its daughters, bottom out at atoms no
/// rule rewrites. Shares the category and rule layers with the parser but
/// never touches the chart machinery.
///
/// The RNG is injected so runs are reproducible; `from_seed` is the usual
/// entry point. On grammars with recursive rules a derivation terminates
/// with probability 1 but can get arbitrarily large, so a depth cap is
/// available for callers that need a bound.
pub struct Generator<'g, R: Rng> {
  grammar: &'g Grammar,
  rng: R,
  max_depth: Option<usize>,
}

impl<'g> Generator<'g, StdRng> {
  pub fn from_seed(grammar: &'g Grammar, seed: u64) -> Self {
    Self::new(grammar, StdRng::seed_from_u64(seed))
  }
}

impl<'g, R: Rng> Generator<'g, R> {
  pub fn new(grammar: &'g Grammar, rng: R) -> Self {
    Self {
      grammar,
      rng,
      max_depth: None,
    }
  }

  pub fn with_max_depth(mut self, depth: usize) -> Self {
    self.max_depth = Some(depth);
    self
  }

  /// Randomly generate the next tree rooted in `atom`.
  pub fn next_tree(&mut self, atom: &str) -> Result<SynTree> {
    self.subtree(atom, 0)
  }

  fn subtree(&mut self, atom: &str, depth: usize) -> Result<SynTree> {
    let relevant = self.grammar.rules_for(atom);
    if relevant.is_empty() {
      // no rule rewrites this atom: a surface word
      return Ok(SynTree::leaf(Category::new(atom)));
    }
    if let Some(limit) = self.max_depth {
      if depth >= limit {
        return Err(Error::DepthLimit(limit));
      }
    }

    let rule = relevant[self.rng.gen_range(0..relevant.len())].clone();
    let mut children = Vec::with_capacity(rule.len());
    for daughter in &rule.rhs {
      children.push(self.subtree(daughter.atom(), depth + 1)?);
    }
    Ok(SynTree::branch(rule.lhs.clone(), children))
  }
}
