use crate::*;
use clap::Parser;

/// One line typed into the [`super::Shell`]. Rows are the 1-based numbers
/// printed in the table.
#[derive(Parser, Debug, PartialEq)]
#[command(author, version, about, long_about = None)]
pub enum Command {
    #[command(about = "Seat a new player", alias = "a")]
    Add { name: Vec<String> },
    #[command(about = "Remove the player at a table row", alias = "rm")]
    Remove {
        #[arg(required = true)]
        row: usize,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    #[command(about = "Rename the player at a table row", alias = "mv")]
    Name {
        #[arg(required = true)]
        row: usize,
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    #[command(about = "Set how many buy-ins a player bought", alias = "b")]
    Buyins {
        #[arg(required = true)]
        row: usize,
        #[arg(required = true, allow_negative_numbers = true)]
        count: Count,
    },
    #[command(about = "Set a player's final chip count", alias = "c")]
    Chips {
        #[arg(required = true)]
        row: usize,
        #[arg(required = true, allow_negative_numbers = true)]
        count: Chips,
    },
    #[command(about = "Show or change buy-in price, chip price, and table fee")]
    Stakes {
        #[arg(long)]
        buyin: Option<Money>,
        #[arg(long)]
        chip: Option<Money>,
        #[arg(long)]
        fee: Option<Money>,
    },
    #[command(about = "Settle the table", alias = "settle")]
    Calc,
    #[command(about = "Print the table", alias = "ls")]
    Show,
}

impl Command {
    /// Parses a shell line the way the shell does.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(std::iter::once(String::from("> ")).chain(Self::words(line)))
    }

    /// Splits on whitespace, but keeps an amount pasted from the table
    /// (`¥ 1,500`) as one word.
    fn words(line: &str) -> Vec<String> {
        let mut words = Vec::<String>::new();
        for word in line.split_whitespace() {
            match words.last_mut() {
                Some(last) if last.ends_with(CURRENCY) => last.push_str(word),
                _ => words.push(word.to_string()),
            }
        }
        words
    }
}
