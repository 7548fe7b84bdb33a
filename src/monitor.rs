use std::io::{self, Write};

use crate::edge::Edge;

/// Observer hook for watching a parse happen. `note` fires exactly once
/// per edge that actually entered the chart, in incorporation order;
/// predecessor merges are silent.
pub trait EdgeMonitor {
  fn note(&mut self, edge: &Edge);
}

/// Prints each incorporated edge with a 1-based counter, one per line:
///
/// ```text
/// 1:the:0-1
/// 2:det:0-1
/// 3:Np:0-1/[Nn]
/// ```
pub struct LoggingMonitor<W: Write> {
  out: W,
  edgeno: usize,
}

impl LoggingMonitor<io::Stdout> {
  pub fn stdout() -> Self {
    Self::new(io::stdout())
  }
}

impl<W: Write> LoggingMonitor<W> {
  pub fn new(out: W) -> Self {
    Self { out, edgeno: 1 }
  }
}

impl<W: Write> EdgeMonitor for LoggingMonitor<W> {
  fn note(&mut self, edge: &Edge) {
    if writeln!(self.out, "{}:{}", self.edgeno, edge).is_err() {
      log::warn!("edge monitor sink went away");
    }
    self.edgeno += 1;
  }
}
