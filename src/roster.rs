use crate::*;

/// The session table: who is seated, what they reported, and the stakes.
///
/// Owns identity and validation so the engine never has to. Edits only
/// touch inputs; `net` and `fee` change only when [`Roster::settle`] runs.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Roster {
    stakes: Stakes,
    players: Vec<Player>,
    totals: Totals,
    #[serde(skip)]
    added: usize,
}

impl Roster {
    pub fn new(stakes: Stakes) -> Self {
        Self {
            stakes,
            ..Self::default()
        }
    }

    pub fn stakes(&self) -> Stakes {
        self.stakes
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    /// Totals from the last settlement.
    pub fn totals(&self) -> Totals {
        self.totals
    }
    /// Fees assigned by the last settlement.
    pub fn fees(&self) -> Money {
        self.players.iter().map(Player::fee).sum()
    }
    /// Part of the pool left unassigned by rounding in the last settlement.
    pub fn drift(&self) -> Money {
        match self.totals.gross().is_positive() {
            true => self.stakes.fee() - self.fees(),
            false => Money::ZERO,
        }
    }
    pub fn len(&self) -> usize {
        self.players.len()
    }
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
    pub fn get(&self, id: ID<Player>) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }
    /// Player at a display position, zero-based.
    pub fn nth(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Seats a new player with nothing bought in. Unnamed players are
    /// called `Player N`, counting everyone ever seated at this table.
    pub fn add(&mut self, name: Option<&str>) -> anyhow::Result<ID<Player>> {
        let name = match name {
            Some(name) => Self::checked(name)?,
            None => format!("Player {}", self.added + 1),
        };
        self.added += 1;
        let player = Player::new(name);
        let id = player.id();
        log::debug!("seating {} as {}", player.name(), id);
        self.players.push(player);
        Ok(id)
    }

    pub fn remove(&mut self, id: ID<Player>) -> anyhow::Result<Player> {
        let index = self.index(id)?;
        let player = self.players.remove(index);
        log::debug!("removed {}", player.name());
        Ok(player)
    }

    pub fn rename(&mut self, id: ID<Player>, name: &str) -> anyhow::Result<()> {
        let name = Self::checked(name)?;
        self.edit(id, |p| p.with_name(name))
    }

    pub fn buyins(&mut self, id: ID<Player>, buyins: Count) -> anyhow::Result<()> {
        if buyins < 0 {
            anyhow::bail!("buy-ins must not be negative, got {}", buyins);
        }
        self.edit(id, |p| p.with_buyins(buyins))
    }

    pub fn chips(&mut self, id: ID<Player>, chips: Chips) -> anyhow::Result<()> {
        if chips < 0 {
            anyhow::bail!("chip count must not be negative, got {}", chips);
        }
        self.edit(id, |p| p.with_chips(chips))
    }

    /// Replaces the stakes for the next settlement.
    pub fn set_stakes(&mut self, stakes: Stakes) -> anyhow::Result<()> {
        self.stakes = stakes.validated()?;
        log::debug!("stakes now {}", self.stakes);
        Ok(())
    }

    /// Runs the engine over the current table and keeps its output.
    pub fn settle(&mut self) -> Totals {
        let snapshot = std::mem::take(&mut self.players);
        let (players, totals) = crate::settle(snapshot, self.stakes);
        self.players = players;
        self.totals = totals;
        log::info!(
            "settled {} players: {}, fees {} of {}",
            self.players.len(),
            self.totals,
            self.fees(),
            self.stakes.fee()
        );
        totals
    }

    fn index(&self, id: ID<Player>) -> anyhow::Result<usize> {
        self.players
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| anyhow::anyhow!("no player with id {}", id))
    }

    fn edit<F>(&mut self, id: ID<Player>, f: F) -> anyhow::Result<()>
    where
        F: FnOnce(Player) -> Player,
    {
        let index = self.index(id)?;
        let player = self.players.remove(index);
        self.players.insert(index, f(player));
        Ok(())
    }

    fn checked(name: &str) -> anyhow::Result<String> {
        match name.trim() {
            "" => Err(anyhow::anyhow!("player name must not be empty")),
            name => Ok(name.to_string()),
        }
    }
}

/// Roster input as read from a file: stakes plus one entry per seat.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub stakes: Stakes,
    #[serde(default)]
    pub players: Vec<Entry>,
}

/// One seat of a [`Snapshot`]. Missing counts read as zero.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub buyins: Count,
    #[serde(default)]
    pub chips: Chips,
}

impl TryFrom<Snapshot> for Roster {
    type Error = anyhow::Error;
    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        let mut roster = Self::default();
        roster.set_stakes(snapshot.stakes)?;
        for (i, entry) in snapshot.players.into_iter().enumerate() {
            let id = roster.add(entry.name.as_deref())?;
            roster
                .buyins(id, entry.buyins)
                .and_then(|_| roster.chips(id, entry.chips))
                .map_err(|e| e.context(format!("seat {}", i + 1)))?;
        }
        Ok(roster)
    }
}
