use clap::Subcommand;

use crate::common::InputArgs;

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
  /// Compile a Jack file or directory to VM text [default]
  Compile(InputArgs),
}

impl Command {
  pub fn compile(input: InputArgs) -> Self {
    Self::Compile(input)
  }

  pub fn execute(self) -> anyhow::Result<()> {
    match self {
      Self::Compile(args) => handle_compile(args),
    }
  }
}

fn handle_compile(args: InputArgs) -> anyhow::Result<()> {
  let results = jackc::driver::run(&args.path, args.emit_xml, args.out_dir.as_deref())?;

  let mut failed = false;
  for result in results {
    if let Err(err) = result.outcome {
      failed = true;
      let file = result.path.display().to_string();
      // The source is re-read here purely for diagnostic rendering; the
      // driver already consumed it once to compile.
      let src = std::fs::read_to_string(&result.path).unwrap_or_default();
      if args.pretty_errors {
        let color = supports_color::on(supports_color::Stream::Stderr)
          .map(|c| c.has_basic)
          .unwrap_or(false);
        eprintln!("{}", err.report(&file, &src, color));
      } else {
        eprintln!("{}", err.terse(&file, &src));
      }
    }
  }

  if failed {
    anyhow::bail!("compilation failed");
  }
  Ok(())
}
