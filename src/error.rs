use std::io;

use thiserror::Error;

/// Everything that can go wrong while loading a grammar, parsing, or
/// generating. A sentence with no parse is *not* an error: `solutions`
/// just comes back empty.
#[derive(Debug, Error)]
pub enum Error {
  /// A malformed line in a grammar source.
  #[error("grammar error at line {line}: {msg}")]
  Grammar { line: usize, msg: String },

  /// A grammar source that yielded no rules at all.
  #[error("empty grammar")]
  EmptyGrammar,

  /// Epsilon productions are not supported by the chart engine.
  #[error("rule for {lhs} has an empty right-hand side")]
  EpsilonRule { lhs: String },

  /// The generator hit its configured recursion limit.
  #[error("generation exceeded depth limit {0}")]
  DepthLimit(usize),

  #[error(transparent)]
  Io(#[from] io::Error),
}

impl Error {
  pub(crate) fn grammar(line: usize, msg: impl Into<String>) -> Self {
    Self::Grammar {
      line,
      msg: msg.into(),
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
