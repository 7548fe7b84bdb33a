use std::collections::BTreeMap;
use std::fmt;

/// An atomic category: a head symbol plus zero or more feature bindings,
/// e.g. `Np(case:subj,num:pl)`. Lexical items are categories whose atom is
/// the surface word and whose feature map is empty.
///
/// Categories are immutable; `extend`/`extend_with` return fresh values.
/// The derived ordering (atom first, then the `BTreeMap`'s canonical
/// feature order) is what keys the chart's sorted stores.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Category {
  atom: String,
  features: BTreeMap<String, String>,
}

impl Category {
  pub fn new(atom: impl Into<String>) -> Self {
    Self {
      atom: atom.into(),
      features: BTreeMap::new(),
    }
  }

  pub fn with_features<I, K, V>(atom: impl Into<String>, features: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    Self {
      atom: atom.into(),
      features: features
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    }
  }

  pub fn atom(&self) -> &str {
    &self.atom
  }

  pub fn features(&self) -> &BTreeMap<String, String> {
    &self.features
  }

  pub fn feature(&self, key: &str) -> Option<&str> {
    self.features.get(key).map(String::as_str)
  }

  pub fn has_features(&self) -> bool {
    !self.features.is_empty()
  }

  /// A copy with `key` bound to `value`, overwriting any previous binding.
  pub fn extend(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
    let mut features = self.features.clone();
    features.insert(key.into(), value.into());
    Self {
      atom: self.atom.clone(),
      features,
    }
  }

  /// A copy with each key in `keys` bound to the donor's value for it.
  /// Keys the donor lacks are skipped silently; this is the upward and
  /// rightward constraint-inheritance step of the fundamental rule.
  pub fn extend_with(&self, keys: &[String], donor: &Category) -> Self {
    let mut result = self.clone();
    for key in keys {
      if let Some(value) = donor.feature(key) {
        result.features.insert(key.clone(), value.to_string());
      }
    }
    result
  }

  /// True iff `self` is at least as general as `other`: same atom, and
  /// every binding of `self` also holds on `other`.
  pub fn subsumes(&self, other: &Category) -> bool {
    self.atom == other.atom
      && self
        .features
        .iter()
        .all(|(k, v)| other.feature(k) == Some(v.as_str()))
  }

  /// True iff the categories share an atom but disagree on the value of at
  /// least one shared feature key. A category without a given key does not
  /// clash with any value on that key.
  pub fn clashes(&self, other: &Category) -> bool {
    self.atom == other.atom
      && self.features.iter().any(|(k, v)| {
        other
          .feature(k)
          .map(|other_v| other_v != v.as_str())
          .unwrap_or(false)
      })
  }

  /// The fundamental-rule filter: a need accepts a candidate constituent
  /// when the atoms match and no shared feature disagrees. Deliberately
  /// weaker than `subsumes`: a need `Np(case:subj)` accepts a subject
  /// `Np(num:pl)` that never acquired a `case` binding.
  pub fn accepts(&self, other: &Category) -> bool {
    self.atom == other.atom && !self.clashes(other)
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.atom)?;
    if !self.features.is_empty() {
      write!(f, "(")?;
      for (i, (k, v)) in self.features.iter().enumerate() {
        if i > 0 {
          write!(f, ",")?;
        }
        write!(f, "{}:{}", k, v)?;
      }
      write!(f, ")")?;
    }
    Ok(())
  }
}
