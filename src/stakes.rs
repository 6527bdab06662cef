use crate::*;

/// Session parameters shared by every seat at the table.
///
/// Passed explicitly into each settlement; edits take effect on the next run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Stakes {
    buyin: Money,
    chip: Money,
    fee: Money,
}

impl Stakes {
    pub fn new(buyin: Money, chip: Money, fee: Money) -> Self {
        Self { buyin, chip, fee }
    }
    /// Price of one buy-in unit.
    pub fn buyin(&self) -> Money {
        self.buyin
    }
    /// Value of one chip.
    pub fn chip(&self) -> Money {
        self.chip
    }
    /// Total fee recovered from the winners.
    pub fn fee(&self) -> Money {
        self.fee
    }
    pub fn with_buyin(self, buyin: Money) -> Self {
        Self { buyin, ..self }
    }
    pub fn with_chip(self, chip: Money) -> Self {
        Self { chip, ..self }
    }
    pub fn with_fee(self, fee: Money) -> Self {
        Self { fee, ..self }
    }

    /// Cash-out value minus buy-in cost.
    pub fn net(&self, buyins: Count, chips: Chips) -> Money {
        self.chip * chips - self.buyin * buyins
    }

    /// Rejects values a real table can't have. The engine itself accepts
    /// anything; this is for user-entered stakes.
    pub fn validated(self) -> anyhow::Result<Self> {
        if !self.buyin.is_positive() {
            anyhow::bail!("buy-in price must be positive, got {}", self.buyin);
        }
        if !self.chip.is_positive() {
            anyhow::bail!("chip price must be positive, got {}", self.chip);
        }
        if self.fee.is_negative() {
            anyhow::bail!("table fee must not be negative, got {}", self.fee);
        }
        Ok(self)
    }
}

impl Default for Stakes {
    fn default() -> Self {
        Self {
            buyin: Money::from(DEFAULT_BUYIN),
            chip: Money::from(DEFAULT_CHIP),
            fee: Money::from(DEFAULT_FEE),
        }
    }
}

impl Arbitrary for Stakes {
    fn random() -> Self {
        Self {
            buyin: Money::from(rand::random_range(1..=20) * 50),
            chip: Money::raw(rand::random_range(1..=40) * MONEY_SCALE / 4),
            fee: Money::raw(rand::random_range(0..=5_000 * MONEY_SCALE)),
        }
    }
}

impl std::fmt::Display for Stakes {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "buy-in {} · chip {} · fee {}",
            self.buyin, self.chip, self.fee
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fresh_table() {
        let stakes = Stakes::default();
        assert_eq!(stakes.buyin(), Money::from(200));
        assert_eq!(stakes.chip(), Money::from(1));
        assert_eq!(stakes.fee(), Money::from(1000));
    }

    #[test]
    fn net_is_cashout_minus_cost() {
        let stakes = Stakes::default().with_chip(Money::raw(5_000));
        assert_eq!(stakes.net(2, 1000), Money::from(100));
        assert_eq!(stakes.net(3, 0), Money::from(-600));
        assert_eq!(stakes.net(0, 0), Money::ZERO);
    }

    #[test]
    fn validation_rejects_nonsense() {
        assert!(Stakes::default().validated().is_ok());
        assert!(Stakes::default().with_fee(Money::ZERO).validated().is_ok());
        assert!(Stakes::default().with_buyin(Money::ZERO).validated().is_err());
        assert!(Stakes::default().with_chip(Money::from(-1)).validated().is_err());
        assert!(Stakes::default().with_fee(Money::from(-1)).validated().is_err());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let stakes = serde_json::from_str::<Stakes>(r#"{"fee": "¥ 600"}"#).unwrap();
        assert_eq!(stakes, Stakes::default().with_fee(Money::from(600)));
    }
}
