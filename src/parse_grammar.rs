//! Loader for the keyword-delimited grammar surface syntax:
//!
//! ```text
//! grammar
//! S (num) -> Np(num case:subj) Vp(num) | S conj S
//! thatsall
//! lexicon
//! pigeons n(num:pl)
//! by passmarker | prep
//! thatsall
//! ```
//!
//! Inside a feature block, `key:value` binds a value and a bare `key`
//! declares an inheritance constraint for that position. Items may be
//! separated by commas or whitespace, and `:` tolerates surrounding
//! spaces (the historical grammars use both spellings). Lines outside the
//! two regions are ignored, which doubles as a comment convention.

use regex::Regex;

use crate::category::Category;
use crate::error::{Error, Result};
use crate::rules::Rule;

/// helper macro for initializing a regex with lazy_static!
macro_rules! regex_static {
  ($name:ident, $pattern:expr) => {
    lazy_static! {
      static ref $name: Regex = Regex::new($pattern).unwrap();
    }
  };
}

#[derive(Debug, PartialEq)]
enum Region {
  Outside,
  Grammar,
  Lexicon,
}

/// Parses a grammar source into its rule list. Grammar-region lines become
/// one rule per `|` alternative; lexicon-region lines become unary rules
/// rewriting each listed category to the word.
pub fn parse(src: &str) -> Result<Vec<Rule>> {
  let mut rules = Vec::new();
  let mut region = Region::Outside;

  for (i, raw) in src.lines().enumerate() {
    let line_no = i + 1;
    let line = raw.trim();
    if line.is_empty() {
      continue;
    }
    match line {
      "grammar" => region = Region::Grammar,
      "lexicon" => region = Region::Lexicon,
      "thatsall" => region = Region::Outside,
      _ => match region {
        Region::Grammar => parse_rule_line(line, line_no, &mut rules)?,
        Region::Lexicon => parse_lexicon_line(line, line_no, &mut rules)?,
        Region::Outside => {}
      },
    }
  }

  Ok(rules)
}

/// `LHS(keys) -> RHS1(keys1) RHS2(keys2) ... | ALT1 | ALT2`
fn parse_rule_line(line: &str, line_no: usize, rules: &mut Vec<Rule>) -> Result<()> {
  let (lhs_src, rhs_src) = line
    .split_once("->")
    .ok_or_else(|| Error::grammar(line_no, "expected `->` in grammar rule"))?;
  let (lhs, mother_keys) = parse_single_spec(lhs_src, line_no)?;

  for alt in rhs_src.split('|') {
    let seq = parse_spec_seq(alt, line_no)?;
    if seq.is_empty() {
      return Err(Error::EpsilonRule {
        lhs: lhs.atom().to_string(),
      });
    }
    rules.push(Rule::new(lhs.clone(), mother_keys.clone(), seq));
  }
  Ok(())
}

/// `word CATEGORY(keys) | CATEGORY(keys)`
fn parse_lexicon_line(line: &str, line_no: usize, rules: &mut Vec<Rule>) -> Result<()> {
  let (word, rest) = line
    .split_once(char::is_whitespace)
    .ok_or_else(|| Error::grammar(line_no, "expected `word CATEGORY` in lexicon entry"))?;

  for alt in rest.split('|') {
    let (cat, keys) = parse_single_spec(alt, line_no)?;
    rules.push(Rule::new(
      cat,
      keys,
      vec![(Category::new(word), Vec::new())],
    ));
  }
  Ok(())
}

/// Exactly one category spec, nothing trailing.
fn parse_single_spec(s: &str, line_no: usize) -> Result<(Category, Vec<String>)> {
  let (spec, rest) = next_spec(s, line_no)?
    .ok_or_else(|| Error::grammar(line_no, format!("expected a category at `{}`", s.trim())))?;
  if !rest.trim().is_empty() {
    return Err(Error::grammar(
      line_no,
      format!("unexpected trailing `{}`", rest.trim()),
    ));
  }
  Ok(spec)
}

/// A whitespace-separated sequence of category specs.
fn parse_spec_seq(s: &str, line_no: usize) -> Result<Vec<(Category, Vec<String>)>> {
  let mut seq = Vec::new();
  let mut rem = s;
  while let Some((spec, rest)) = next_spec(rem, line_no)? {
    seq.push(spec);
    rem = rest;
  }
  Ok(seq)
}

/// Tries to consume one `Name` or `Name(features)` from the front of `s`.
/// Returns the category (atom plus bindings), its bare constraint keys,
/// and the remaining input; `None` at end of input.
fn next_spec<'a>(
  s: &'a str,
  line_no: usize,
) -> Result<Option<((Category, Vec<String>), &'a str)>> {
  regex_static!(NAME, r"^[a-zA-Z0-9\-_']+");

  let s = s.trim_start();
  if s.is_empty() {
    return Ok(None);
  }

  let name = NAME
    .find(s)
    .ok_or_else(|| Error::grammar(line_no, format!("expected category name at `{}`", s)))?;
  let atom = name.as_str();
  let mut rest = &s[name.end()..];

  let mut bindings: Vec<(String, String)> = Vec::new();
  let mut keys: Vec<String> = Vec::new();

  let after = rest.trim_start();
  if let Some(block) = after.strip_prefix('(') {
    let close = block
      .find(')')
      .ok_or_else(|| Error::grammar(line_no, format!("unclosed feature block on `{}`", atom)))?;
    parse_feature_block(&block[..close], line_no, &mut bindings, &mut keys)?;
    rest = &block[close + 1..];
  }

  Ok(Some((
    (Category::with_features(atom, bindings), keys),
    rest,
  )))
}

/// The inside of a `(...)` block: `key:value` items become bindings, bare
/// `key` items become constraint keys.
fn parse_feature_block(
  block: &str,
  line_no: usize,
  bindings: &mut Vec<(String, String)>,
  keys: &mut Vec<String>,
) -> Result<()> {
  regex_static!(
    FEATURE_ITEM,
    r"([a-zA-Z0-9\-_]+)(?:\s*:\s*([a-zA-Z0-9\-_]+))?"
  );

  let leftover = FEATURE_ITEM.replace_all(block, "");
  if leftover.chars().any(|c| !c.is_whitespace() && c != ',') {
    return Err(Error::grammar(
      line_no,
      format!("malformed feature block `({})`", block.trim()),
    ));
  }

  for caps in FEATURE_ITEM.captures_iter(block) {
    let key = caps.get(1).map(|m| m.as_str().to_string());
    match (key, caps.get(2)) {
      (Some(k), Some(v)) => bindings.push((k, v.as_str().to_string())),
      (Some(k), None) => keys.push(k),
      _ => unreachable!("feature regex always captures a key"),
    }
  }
  Ok(())
}
