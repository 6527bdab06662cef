use crate::*;

/// Session-wide aggregates from one settlement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Totals {
    net: Money,
    gross: Money,
}

impl Totals {
    /// Sum of every player's net result. Zero when the cashier balances,
    /// but nothing here enforces that.
    pub fn net(&self) -> Money {
        self.net
    }
    /// Sum of the strictly positive net results, saturating at the `Money`
    /// bounds. The fee split does not read it.
    pub fn gross(&self) -> Money {
        self.gross
    }
}

impl From<&[Money]> for Totals {
    fn from(nets: &[Money]) -> Self {
        Self {
            net: nets.iter().sum(),
            gross: nets.iter().filter(|n| n.is_positive()).sum(),
        }
    }
}

impl std::fmt::Display for Totals {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "net {:+} gross {}", self.net, self.gross)
    }
}
