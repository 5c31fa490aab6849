use clap::Parser;
use jackc_cli::commands::Command;
use jackc_cli::common::InputArgs;

#[derive(Debug, Parser)]
#[clap(name = "jackc", version)]
pub struct App {
  #[clap(subcommand)]
  command: Option<Command>,

  // Args for the default compile command
  #[clap(flatten)]
  input: InputArgs,
}

fn main() -> anyhow::Result<()> {
  let app = App::parse();

  let command = app
    .command
    .unwrap_or_else(|| Command::compile(app.input));

  command.execute()?;

  Ok(())
}
