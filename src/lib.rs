//! Settlement calculator for home poker sessions.
//!
//! Players buy in for fixed-price units, play, and cash out a chip count.
//! Settling the table converts those raw inputs into a profit or loss per
//! player and splits a table fee among the winners, in proportion to what
//! each of them won.
//!
//! ## Settlement
//!
//! - [`settle`] — The pure settlement pass over a roster snapshot
//! - [`Ledger`] — The same computation as a value, built from a snapshot
//! - [`Totals`] — Session-wide net P/L and gross winnings
//!
//! ## Inputs
//!
//! - [`Player`] — One seat: buy-ins, final chips, and derived results
//! - [`Stakes`] — Buy-in price, chip price, and fee pool for a session
//! - [`Money`] — Fixed-point currency with exact arithmetic
//!
//! ## Session
//!
//! - [`Roster`] — Identity, editing, and validation around the engine
//! - [`Snapshot`] — Serialized roster input for one-shot settlement
mod ledger;
mod money;
mod player;
mod roster;
mod stakes;
mod totals;

#[cfg(feature = "cli")]
pub mod cli;

pub use ledger::*;
pub use money::*;
pub use player::*;
pub use roster::*;
pub use stakes::*;
pub use totals::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Chip counts at cash-out.
pub type Chips = i64;
/// Number of buy-in units purchased.
pub type Count = i64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and benchmarking.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
/// Fresh IDs are v7, so they sort in creation order and are never reused.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self::from(uuid::Uuid::now_v7())
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

// ============================================================================
// SESSION DEFAULTS
// Starting values of a fresh table, before anyone edits the stakes.
// ============================================================================
/// Price of one buy-in unit, in whole currency units.
pub const DEFAULT_BUYIN: i64 = 200;
/// Value of one chip, in whole currency units.
pub const DEFAULT_CHIP: i64 = 1;
/// Table fee recovered from the winners, in whole currency units.
pub const DEFAULT_FEE: i64 = 1000;

// ============================================================================
// FIXED-POINT MONEY
// ============================================================================
/// Sub-units per currency unit. Four decimal places.
pub const MONEY_SCALE: i64 = 10_000;
/// Symbol used when displaying and accepted when parsing amounts.
pub const CURRENCY: char = '¥';

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize terminal logging on stderr, keeping stdout for the table.
#[cfg(feature = "cli")]
pub fn log(level: log::LevelFilter) -> anyhow::Result<()> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}
