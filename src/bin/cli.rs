use std::env;
use std::io;
use std::io::Write;
use std::process;

use chartwell::english::ENGLISH;
use chartwell::{Generator, Grammar, LoggingMonitor, Result, Strategy};

fn usage(prog_name: &str) -> String {
  format!(
    r"
Usage: {} [FILE] [options]

Reads sentences from stdin and prints their parses. With no FILE, the
built-in English grammar is used.

Options:
  -h, --help         Print this message
  -t, --top-down     Use the top-down (Earley) strategy instead of bottom-up
  -c, --chart        Print the full chart after each parse
  -m, --monitor      Print every edge as it is incorporated
  -s, --start CAT    Root category to accept (defaults to S)
  -g, --generate N   Generate N random sentences from the start category
                     instead of parsing",
    prog_name
  )
}

fn parse(
  g: &Grammar,
  sentence: &str,
  start: &str,
  strategy: Strategy,
  print_chart: bool,
  monitor_edges: bool,
) {
  let words: Vec<&str> = sentence.split_whitespace().collect();
  if words.is_empty() {
    return;
  }

  let chart = if monitor_edges {
    let mut monitor = LoggingMonitor::stdout();
    g.parse_with(&words, &[start], strategy, Some(&mut monitor))
  } else {
    g.parse_with(&words, &[start], strategy, None)
  };

  if print_chart {
    println!("chart:\n{}", chart);
  }

  let forest = chart.forest();
  let mut tree_num = 0;
  for root in chart.solutions(&[start]) {
    for tree in forest.all_trees(root) {
      println!("Tree {}:", tree_num);
      println!("{}", tree);
      tree_num += 1;
    }
  }
  println!(
    "{} parse{} ({} complete, {} partial edges)",
    tree_num,
    if tree_num == 1 { "" } else { "s" },
    chart.num_complete_edges,
    chart.num_partial_edges
  );
}

fn generate(g: &Grammar, start: &str, count: usize) -> Result<()> {
  let seed = env::var("CHARTWELL_SEED")
    .ok()
    .and_then(|s| s.parse().ok())
    .unwrap_or(0x123456);
  let mut gen = Generator::from_seed(g, seed).with_max_depth(64);

  for _ in 0..count {
    match gen.next_tree(start) {
      Ok(tree) => println!("{}\n", tree),
      Err(e) => eprintln!("generation stopped: {}", e),
    }
  }
  Ok(())
}

fn main() -> Result<()> {
  env_logger::init();

  let opts: Vec<String> = env::args().collect();
  let prog_name = opts[0].clone();

  let mut filename = None;
  let mut strategy = Strategy::BottomUp;
  let mut print_chart = false;
  let mut monitor_edges = false;
  let mut start = "S".to_string();
  let mut gen_count = None;

  let mut opts = opts.into_iter().skip(1);
  while let Some(o) = opts.next() {
    if o == "-h" || o == "--help" {
      println!("{}", usage(&prog_name));
      process::exit(0);
    } else if o == "-t" || o == "--top-down" {
      strategy = Strategy::TopDown;
    } else if o == "-c" || o == "--chart" {
      print_chart = true;
    } else if o == "-m" || o == "--monitor" {
      monitor_edges = true;
    } else if o == "-s" || o == "--start" {
      match opts.next() {
        Some(cat) => start = cat,
        None => {
          eprintln!("{} needs a category", o);
          process::exit(1);
        }
      }
    } else if o == "-g" || o == "--generate" {
      match opts.next().and_then(|n| n.parse().ok()) {
        Some(n) => gen_count = Some(n),
        None => {
          eprintln!("{} needs a count", o);
          process::exit(1);
        }
      }
    } else if filename.is_none() {
      filename = Some(o);
    } else {
      println!("{}", usage(&prog_name));
      process::exit(1);
    }
  }

  let g = match filename {
    Some(f) => Grammar::read_from_file(&f)?,
    None => ENGLISH.parse()?,
  };

  if let Some(n) = gen_count {
    return generate(&g, &start, n);
  }

  let mut input = String::new();
  loop {
    print!("> ");
    io::stdout().flush()?;

    match io::stdin().read_line(&mut input) {
      Ok(0) => return Ok(()), // ctrl+d
      Ok(_) => {
        input.make_ascii_lowercase();
        parse(
          &g,
          input.trim(),
          &start,
          strategy,
          print_chart,
          monitor_edges,
        );
        input.clear();
      }
      Err(error) => return Err(error.into()),
    }
  }
}
