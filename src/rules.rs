use std::fmt;

use crate::category::Category;

/// The feature keys a rule inherits at each fundamental-rule firing:
/// `mother` keys flow from the realized daughter up to the rule's
/// left-hand side, `children[i]` keys flow rightward onto the i-th
/// remaining need. `children` stays aligned with an edge's `needed`
/// sequence, so consuming a daughter drops the head of both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintMask {
  pub mother: Vec<String>,
  pub children: Vec<Vec<String>>,
}

impl ConstraintMask {
  pub fn empty() -> Self {
    Self::default()
  }

  /// The mask carried by an edge after it consumes its first need.
  pub fn advance(&self) -> Self {
    Self {
      mother: self.mother.clone(),
      children: self.children.get(1..).unwrap_or_default().to_vec(),
    }
  }
}

/// One production of the grammar. `rhs` holds the ordered daughter
/// categories with their feature *bindings*; the bare constraint keys
/// written in the surface form live in `mother_keys`/`child_keys`.
/// Lexicon entries are unary rules whose single daughter is the word
/// itself as a featureless category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
  pub lhs: Category,
  pub rhs: Vec<Category>,
  pub mother_keys: Vec<String>,
  pub child_keys: Vec<Vec<String>>,
}

impl Rule {
  pub fn new(
    lhs: Category,
    mother_keys: Vec<String>,
    rhs: Vec<(Category, Vec<String>)>,
  ) -> Self {
    let (rhs, child_keys) = rhs.into_iter().unzip();
    Self {
      lhs,
      rhs,
      mother_keys,
      child_keys,
    }
  }

  pub fn len(&self) -> usize {
    self.rhs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rhs.is_empty()
  }

  pub fn first(&self) -> &Category {
    &self.rhs[0]
  }

  /// The constraint mask an empty predictive edge starts out with.
  pub fn mask(&self) -> ConstraintMask {
    ConstraintMask {
      mother: self.mother_keys.clone(),
      children: self.child_keys.clone(),
    }
  }
}

/// Writes a category in the surface form of a rule position: bare
/// constraint keys first, then `key:value` bindings, space separated.
fn fmt_with_keys(f: &mut fmt::Formatter<'_>, cat: &Category, keys: &[String]) -> fmt::Result {
  write!(f, "{}", cat.atom())?;
  if !keys.is_empty() || cat.has_features() {
    write!(f, "(")?;
    let mut first = true;
    for key in keys {
      if !first {
        write!(f, " ")?;
      }
      write!(f, "{}", key)?;
      first = false;
    }
    for (k, v) in cat.features() {
      if !first {
        write!(f, " ")?;
      }
      write!(f, "{}:{}", k, v)?;
      first = false;
    }
    write!(f, ")")?;
  }
  Ok(())
}

impl fmt::Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt_with_keys(f, &self.lhs, &self.mother_keys)?;
    write!(f, " ->")?;
    for (cat, keys) in self.rhs.iter().zip(self.child_keys.iter()) {
      write!(f, " ")?;
      fmt_with_keys(f, cat, keys)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn s_rule() -> Rule {
    // S (num) -> Np(num case:subj) Vp(num)
    Rule::new(
      Category::new("S"),
      vec!["num".into()],
      vec![
        (
          Category::with_features("Np", [("case", "subj")]),
          vec!["num".into()],
        ),
        (Category::new("Vp"), vec!["num".into()]),
      ],
    )
  }

  #[test]
  fn mask_tracks_positions() {
    let mask = s_rule().mask();
    assert_eq!(mask.children.len(), 2);
    let advanced = mask.advance();
    assert_eq!(advanced.mother, vec!["num".to_string()]);
    assert_eq!(advanced.children, vec![vec!["num".to_string()]]);
    assert!(advanced.advance().children.is_empty());
  }

  #[test]
  fn display_round_trips_surface_form() {
    assert_eq!(s_rule().to_string(), "S(num) -> Np(num case:subj) Vp(num)");
  }
}
