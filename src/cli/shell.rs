use super::*;
use crate::*;
use anyhow::Context;
use colored::Colorize;
use std::io::Write;

/// Interactive session editor.
///
/// Reads one [`Command`] per line, edits the roster, and reprints the
/// table. Results only change on `calc`, same as the stakes.
pub struct Shell(Roster);

impl From<Roster> for Shell {
    fn from(roster: Roster) -> Self {
        Self(roster)
    }
}

impl Shell {
    pub fn roster(&self) -> &Roster {
        &self.0
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        log::info!("opening table at {}", self.0.stakes());
        println!("{}", "type `help` for commands, `quit` to leave".dimmed());
        loop {
            print!("> ");
            std::io::stdout().flush()?;
            let ref mut input = String::new();
            if std::io::stdin().read_line(input)? == 0 {
                break;
            }
            match input.trim() {
                "" => continue,
                "quit" => break,
                "exit" => break,
                line => match self.handle(line) {
                    Err(e) => eprintln!("{}", format!("error: {:#}", e).red()),
                    Ok(_) => continue,
                },
            }
        }
        Ok(())
    }

    /// Runs one shell line. Usage errors are printed by clap, not returned.
    pub fn handle(&mut self, line: &str) -> anyhow::Result<()> {
        match Command::parse_line(line) {
            Err(e) => Ok(e.print()?),
            Ok(command) => self.apply(command),
        }
    }

    pub fn apply(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Add { name } => {
                let name = name.join(" ");
                self.0.add(Some(name.as_str()).filter(|n| !n.is_empty()))?;
            }
            Command::Remove { row, yes } => {
                let id = self.id(row)?;
                if !yes && !self.confirm(id)? {
                    return Ok(());
                }
                self.0.remove(id)?;
            }
            Command::Name { row, name } => {
                let id = self.id(row)?;
                self.0.rename(id, &name.join(" "))?;
            }
            Command::Buyins { row, count } => {
                let id = self.id(row)?;
                self.0.buyins(id, count)?;
            }
            Command::Chips { row, count } => {
                let id = self.id(row)?;
                self.0.chips(id, count)?;
            }
            Command::Stakes { buyin, chip, fee } => {
                let stakes = self.0.stakes();
                let stakes = stakes
                    .with_buyin(buyin.unwrap_or(stakes.buyin()))
                    .with_chip(chip.unwrap_or(stakes.chip()))
                    .with_fee(fee.unwrap_or(stakes.fee()));
                self.0.set_stakes(stakes)?;
                return Ok(println!("{}", self.0.stakes()));
            }
            Command::Calc => {
                self.0.settle();
            }
            Command::Show => {}
        }
        Ok(println!("{}", Table::from(&self.0)))
    }

    /// Resolves a printed row number to the player seated there.
    fn id(&self, row: usize) -> anyhow::Result<ID<Player>> {
        row.checked_sub(1)
            .and_then(|i| self.0.nth(i))
            .map(|p| p.id())
            .ok_or_else(|| anyhow::anyhow!("no row {} at a table of {}", row, self.0.len()))
    }

    fn confirm(&self, id: ID<Player>) -> anyhow::Result<bool> {
        let name = self.0.get(id).map(|p| p.name()).unwrap_or_default();
        dialoguer::Confirm::new()
            .with_prompt(format!("Remove {}?", name))
            .default(false)
            .interact()
            .context("confirm removal (pass --yes to skip)")
    }
}
