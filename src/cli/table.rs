use crate::*;
use colored::Colorize;

/// Renders a roster the way the table is read at the end of the night:
/// one row per seat, winners in green, losers in red, totals underneath.
pub struct Table<'a>(&'a Roster);

impl<'a> From<&'a Roster> for Table<'a> {
    fn from(roster: &'a Roster) -> Self {
        Self(roster)
    }
}

impl Table<'_> {
    fn header() -> String {
        format!(
            "{:>4}  {:<18}{:>8}{:>10}{:>16}{:>14}",
            "No.", "Player", "Buy-ins", "Chips", "Net", "Fee"
        )
    }
    fn row(index: usize, player: &Player) -> String {
        let net = format!("{:>+16}", player.net());
        let net = match player.net().is_negative() {
            true => net.red(),
            false => net.green(),
        };
        format!(
            "{:>4}  {:<18}{:>8}{:>10}{}{:>14}",
            index + 1,
            player.name(),
            player.buyins(),
            player.chips(),
            net,
            player.fee()
        )
    }
}

impl std::fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let roster = self.0;
        let totals = roster.totals();
        writeln!(f, "{}", roster.stakes().to_string().dimmed())?;
        writeln!(f, "{}", Self::header().bold())?;
        if roster.is_empty() {
            writeln!(f, "{}", "      no players seated, `add` to seat one".dimmed())?;
        }
        for (i, player) in roster.players().iter().enumerate() {
            writeln!(f, "{}", Self::row(i, player))?;
        }
        let pnl = format!("total P/L:       {:+}", totals.net());
        let pnl = match totals.net().is_positive() {
            true => pnl.green(),
            false => pnl.red(),
        };
        writeln!(f, "{}", pnl)?;
        writeln!(f, "{}", format!("gross winnings:  {}", totals.gross()).green())?;
        write!(f, "fees collected:  {} of {}", roster.fees(), roster.stakes().fee())?;
        match roster.drift() {
            drift if drift == Money::ZERO => Ok(()),
            drift => write!(f, " ({} left by rounding)", drift),
        }
    }
}
