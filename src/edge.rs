use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::category::Category;
use crate::rules::{ConstraintMask, Rule};

/// Index of an edge in its chart's arena. Trace entries and store buckets
/// refer to edges by index so the predecessor graph can share nodes freely
/// while the chart keeps sole ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeIdx(pub u32);

impl EdgeIdx {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// One application of the fundamental rule: the partial and complete edge
/// that together licensed the owning edge. An edge with k trace entries
/// stands for k distinct ways of being derived; that sharing is what makes
/// the chart a packed forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
  pub partial: EdgeIdx,
  pub complete: EdgeIdx,
}

/// An assertion about a contiguous span of the input. `needed` empty means
/// the edge is complete (a recognized constituent over `[left, right)`);
/// nonempty means partial (a hypothesis in progress).
///
/// Identity deliberately ignores `constraints` and `predecessors`: when the
/// chart already holds an equal edge, the newcomer's trace entries are
/// merged into it instead of creating a duplicate node.
#[derive(Debug, Clone)]
pub struct Edge {
  pub label: Category,
  pub left: usize,
  pub right: usize,
  pub needed: Vec<Category>,
  pub constraints: ConstraintMask,
  pub predecessors: Vec<TraceEntry>,
}

impl Edge {
  /// A width-1 edge for a surface word, labeled by the word itself.
  pub fn lexical(word: &str, start: usize) -> Self {
    Self {
      label: Category::new(word),
      left: start,
      right: start + 1,
      needed: Vec::new(),
      constraints: ConstraintMask::empty(),
      predecessors: Vec::new(),
    }
  }

  /// A predictive empty edge: a rule hypothesized at `position`, needing
  /// its whole right-hand side.
  pub fn empty(rule: &Rule, position: usize) -> Self {
    Self {
      label: rule.lhs.clone(),
      left: position,
      right: position,
      needed: rule.rhs.clone(),
      constraints: rule.mask(),
      predecessors: Vec::new(),
    }
  }

  /// The fundamental rule: a partial ending where `complete` starts
  /// consumes it. The realized daughter's bindings percolate upward onto
  /// the label (mother keys) and rightward onto the remaining needs
  /// (each need's own constraint keys).
  pub fn fundamental(
    partial: &Edge,
    partial_idx: EdgeIdx,
    complete: &Edge,
    complete_idx: EdgeIdx,
  ) -> Self {
    debug_assert!(partial.is_partial(), "fundamental needs a partial edge");
    debug_assert!(complete.is_complete(), "fundamental needs a complete edge");
    debug_assert_eq!(partial.right, complete.left, "edges must abut");
    debug_assert!(
      partial.first_needed().accepts(&complete.label),
      "first need {} does not accept {}",
      partial.first_needed(),
      complete.label
    );

    let label = partial
      .label
      .extend_with(&partial.constraints.mother, &complete.label);
    let needed = partial.needed[1..]
      .iter()
      .enumerate()
      .map(|(i, need)| match partial.constraints.children.get(i + 1) {
        Some(keys) => need.extend_with(keys, &complete.label),
        None => need.clone(),
      })
      .collect();

    Self {
      label,
      left: partial.left,
      right: complete.right,
      needed,
      constraints: partial.constraints.advance(),
      predecessors: vec![TraceEntry {
        partial: partial_idx,
        complete: complete_idx,
      }],
    }
  }

  pub fn is_complete(&self) -> bool {
    self.needed.is_empty()
  }

  pub fn is_partial(&self) -> bool {
    !self.is_complete()
  }

  /// The next category this edge is looking for. Meaningless (and panics)
  /// on a complete edge.
  pub fn first_needed(&self) -> &Category {
    &self.needed[0]
  }

  pub fn span(&self) -> usize {
    self.right - self.left
  }
}

/// Edge identity: label, endpoints, and remaining needs. Predecessors and
/// the constraint mask are bookkeeping, not identity.
impl PartialEq for Edge {
  fn eq(&self, other: &Self) -> bool {
    self.left == other.left
      && self.right == other.right
      && self.label == other.label
      && self.needed == other.needed
  }
}

impl Eq for Edge {}

impl Hash for Edge {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.label.hash(state);
    self.left.hash(state);
    self.right.hash(state);
    self.needed.hash(state);
  }
}

/// Total order used by the store buckets: span ascending, then label, then
/// needs, with endpoints as the final tiebreak. Consistent with `PartialEq`
/// since span is derived from the endpoints.
impl Ord for Edge {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .span()
      .cmp(&other.span())
      .then_with(|| self.label.cmp(&other.label))
      .then_with(|| self.needed.cmp(&other.needed))
      .then_with(|| self.left.cmp(&other.left))
      .then_with(|| self.right.cmp(&other.right))
  }
}

impl PartialOrd for Edge {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl fmt::Display for Edge {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}-{}", self.label, self.left, self.right)?;
    if self.is_partial() {
      write!(f, "/[")?;
      for (i, need) in self.needed.iter().enumerate() {
        if i > 0 {
          write!(f, ", ")?;
        }
        write!(f, "{}", need)?;
      }
      write!(f, "]")?;
    }
    Ok(())
  }
}
