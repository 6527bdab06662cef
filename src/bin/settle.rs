//! Settlement Binary
//!
//! Opens an interactive session table, or settles a JSON roster once
//! with `--input` and prints the result.

use clap::Parser;
use settleup::cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    settleup::log(args.level())?;
    args.run()
}
