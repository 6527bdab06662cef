use super::*;
use crate::*;
use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "settle",
    author,
    version,
    about = "Settle a home poker session: net results and table fee split",
    long_about = None
)]
pub struct Args {
    #[arg(long, env = "SETTLE_BUYIN", help = "Price of one buy-in [default: 200]")]
    pub buyin: Option<Money>,
    #[arg(long, env = "SETTLE_CHIP", help = "Value of one chip [default: 1]")]
    pub chip: Option<Money>,
    #[arg(long, env = "SETTLE_FEE", help = "Table fee split among winners [default: 1000]")]
    pub fee: Option<Money>,
    #[arg(short, long, help = "Settle a JSON roster once and exit ('-' reads stdin)")]
    pub input: Option<PathBuf>,
    #[arg(long, requires = "input", help = "Print the settled roster as JSON")]
    pub json: bool,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Log more (-v info, -vv debug)")]
    pub verbose: u8,
}

impl Args {
    pub fn level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.input {
            Some(ref path) => self.once(path),
            None => self.interactive(),
        }
    }

    /// Stakes from flags and environment, falling back to `base`.
    pub fn stakes(&self, base: Stakes) -> Stakes {
        base.with_buyin(self.buyin.unwrap_or(base.buyin()))
            .with_chip(self.chip.unwrap_or(base.chip()))
            .with_fee(self.fee.unwrap_or(base.fee()))
    }

    fn interactive(&self) -> anyhow::Result<()> {
        let mut roster = Roster::default();
        roster.set_stakes(self.stakes(roster.stakes()))?;
        Shell::from(roster).run()
    }

    fn once(&self, path: &Path) -> anyhow::Result<()> {
        let text = match path.to_str() {
            Some("-") => std::io::read_to_string(std::io::stdin()).context("read roster from stdin")?,
            _ => std::fs::read_to_string(path)
                .with_context(|| format!("read roster {}", path.display()))?,
        };
        let snapshot = serde_json::from_str::<Snapshot>(&text)
            .with_context(|| format!("parse roster {}", path.display()))?;
        let mut roster = Roster::try_from(snapshot)?;
        roster.set_stakes(self.stakes(roster.stakes()))?;
        roster.settle();
        match self.json {
            true => println!("{}", serde_json::to_string_pretty(&roster)?),
            false => println!("{}", Table::from(&roster)),
        }
        Ok(())
    }
}
