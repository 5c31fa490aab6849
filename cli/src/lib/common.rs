use std::path::PathBuf;

use clap::Args;

/// The single positional argument every invocation takes: a `.jack` file or
/// a directory of them.
#[derive(Clone, Debug, Args)]
pub struct InputArgs {
  /// Path to a `.jack` file, or a directory containing `.jack` files.
  #[arg(value_name = "PATH")]
  pub path: PathBuf,

  /// Also emit the debug XML parse tree alongside the `.vm` output.
  #[arg(long)]
  pub emit_xml: bool,

  /// Render diagnostics as rich, source-snippet reports instead of the
  /// terse `<file>:<line>: <error>` default.
  #[arg(long)]
  pub pretty_errors: bool,

  /// Write outputs here instead of alongside each input file.
  #[arg(short, long, value_name = "DIR")]
  pub out_dir: Option<PathBuf>,
}
