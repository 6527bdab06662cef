use crate::*;

/// One seat in the session.
///
/// `buyins` and `chips` are what the table reports; `net` and `fee` are
/// derived by the last settlement and go stale when the inputs change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Player {
    id: ID<Player>,
    name: String,
    buyins: Count,
    chips: Chips,
    net: Money,
    fee: Money,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ID::default(),
            name: name.into(),
            buyins: 0,
            chips: 0,
            net: Money::ZERO,
            fee: Money::ZERO,
        }
    }
    pub fn with_buyins(self, buyins: Count) -> Self {
        Self { buyins, ..self }
    }
    pub fn with_chips(self, chips: Chips) -> Self {
        Self { chips, ..self }
    }
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn buyins(&self) -> Count {
        self.buyins
    }
    pub fn chips(&self) -> Chips {
        self.chips
    }
    /// Profit or loss from the last settlement.
    pub fn net(&self) -> Money {
        self.net
    }
    /// Share of the table fee from the last settlement.
    pub fn fee(&self) -> Money {
        self.fee
    }
    pub fn is_winner(&self) -> bool {
        self.net.is_positive()
    }

    /// Same seat with freshly derived results.
    pub(crate) fn settled(self, net: Money, fee: Money) -> Self {
        Self { net, fee, ..self }
    }
}

impl Unique for Player {
    fn id(&self) -> ID<Player> {
        self.id
    }
}

impl Arbitrary for Player {
    fn random() -> Self {
        Self::new(format!("Player {}", rand::random_range(1..100)))
            .with_buyins(rand::random_range(0..=6))
            .with_chips(rand::random_range(0..=2_000))
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} ({}x in, {} chips) {:+} fee {}",
            self.name, self.buyins, self.chips, self.net, self.fee
        )
    }
}
