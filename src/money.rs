use crate::CURRENCY;
use crate::MONEY_SCALE;
use std::cmp::Ordering;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;
use std::str::FromStr;

/// Fixed-point currency amount, stored in 1/10,000 of a unit.
///
/// All arithmetic is exact integer arithmetic, so sums do not depend on the
/// order they are taken in. Operations saturate at the `i64` bounds instead
/// of wrapping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);
    pub const UNIT: Self = Self(MONEY_SCALE);

    /// Amount from raw sub-units.
    pub const fn raw(raw: i64) -> Self {
        Self(raw)
    }
    /// Raw sub-units.
    pub const fn sub_units(&self) -> i64 {
        self.0
    }
    /// Nearest representable amount. NaN maps to zero.
    pub fn from_f64(value: f64) -> Self {
        Self((value * MONEY_SCALE as f64).round() as i64)
    }
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / MONEY_SCALE as f64
    }
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Rounded to a whole unit, ties to even.
    pub fn rounded(&self) -> Self {
        Self::units(Self::halve_even(self.0 as i128, MONEY_SCALE as i128))
    }

    /// The slice of `pool` owed by `self` out of `whole`, as a whole unit.
    ///
    /// Exactly `self / whole * pool`, rounded ties to even. `whole` is in
    /// raw sub-units and wide, so a sum of many amounts never clips.
    /// `None` when `whole` is zero.
    pub fn share(&self, whole: i128, pool: Self) -> Option<Share> {
        if whole == 0 {
            return None;
        }
        let numer = self.0 as i128 * pool.0 as i128;
        let denom = whole.saturating_mul(MONEY_SCALE as i128);
        let (numer, denom) = match denom.cmp(&0) {
            Ordering::Less => (-numer, -denom),
            _ => (numer, denom),
        };
        let units = Self::halve_even(numer, denom);
        Some(Share {
            amount: Self::units(units),
            excess: units * denom - numer,
        })
    }

    /// `numer / denom` to the nearest integer, ties to even. `denom > 0`.
    fn halve_even(numer: i128, denom: i128) -> i128 {
        let quot = numer.div_euclid(denom);
        let rem = numer.rem_euclid(denom);
        match (rem * 2).cmp(&denom) {
            Ordering::Greater => quot + 1,
            Ordering::Less => quot,
            Ordering::Equal => quot + (quot & 1),
        }
    }
    /// Whole units, clamped into range.
    fn units(units: i128) -> Self {
        let max = (i64::MAX / MONEY_SCALE) as i128;
        let min = (i64::MIN / MONEY_SCALE) as i128;
        Self(units.clamp(min, max) as i64 * MONEY_SCALE)
    }
}

/// One winner's rounded slice of the fee pool.
///
/// `excess` is how far rounding moved the amount up from the exact share,
/// scaled by the common denominator of the split. It is only comparable
/// between shares of the same `whole` and `pool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Share {
    amount: Money,
    excess: i128,
}

impl Share {
    pub fn amount(&self) -> Money {
        self.amount
    }
    pub fn excess(&self) -> i128 {
        self.excess
    }
    pub fn is_rounded_up(&self) -> bool {
        self.excess > 0
    }
}

impl From<i64> for Money {
    fn from(units: i64) -> Self {
        Self(units.saturating_mul(MONEY_SCALE))
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}
impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}
impl Neg for Money {
    type Output = Self;
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}
impl Mul<i64> for Money {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        Self(self.0.saturating_mul(rhs))
    }
}
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Money {
    /// Integer digits with `,` separators dropped, if every separator sits
    /// at a thousands boundary.
    fn ungrouped(whole: &str) -> Option<String> {
        let mut groups = whole.split(',');
        let head = groups.next().unwrap_or_default();
        let tail = groups.collect::<Vec<&str>>();
        let aligned = tail.iter().all(|g| g.len() == 3);
        match tail.is_empty() || (aligned && (1..=3).contains(&head.len())) {
            true => Some(std::iter::once(head).chain(tail).collect()),
            false => None,
        }
    }
}

/// Currency-style text: `¥ 1,200.50`, `-¥200`, `¥ -200`, `1200`.
/// Separators must group thousands: `1,2,3` is rejected.
impl FromStr for Money {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        let mut rest = text.as_str();
        let mut negative = false;
        loop {
            if let Some(tail) = rest.strip_prefix('-') {
                if negative {
                    anyhow::bail!("invalid amount {:?}: repeated sign", s);
                }
                negative = true;
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix('+') {
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix(CURRENCY) {
                rest = tail;
            } else {
                break;
            }
        }
        let (whole, frac) = rest.split_once('.').unwrap_or((rest, ""));
        let whole = Self::ungrouped(whole)
            .ok_or_else(|| anyhow::anyhow!("invalid amount {:?}: misplaced separator", s))?;
        if whole.is_empty() && frac.is_empty() {
            anyhow::bail!("invalid amount {:?}: no digits", s);
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            anyhow::bail!("invalid amount {:?}: not a number", s);
        }
        let places = MONEY_SCALE.ilog10() as usize;
        if frac.len() > places {
            anyhow::bail!("invalid amount {:?}: more than {} decimals", s, places);
        }
        let units = match whole.as_str() {
            "" => 0,
            digits => digits
                .parse::<i64>()
                .map_err(|_| anyhow::anyhow!("invalid amount {:?}: too large", s))?,
        };
        let fraction = match frac {
            "" => 0,
            digits => format!("{:0<width$}", digits, width = places).parse::<i64>()?,
        };
        let raw = units
            .checked_mul(MONEY_SCALE)
            .and_then(|raw| raw.checked_add(fraction))
            .ok_or_else(|| anyhow::anyhow!("invalid amount {:?}: too large", s))?;
        Ok(Self(if negative { -raw } else { raw }))
    }
}

/// `¥ 1,200`, `-¥ 37.5`, and `+¥ 40` under `{:+}`. Honors width and fill.
impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let sign = match (self.is_negative(), f.sign_plus()) {
            (true, _) => "-",
            (false, true) => "+",
            (false, false) => "",
        };
        let magnitude = self.0.unsigned_abs();
        let scale = MONEY_SCALE as u64;
        let digits = (magnitude / scale).to_string();
        let grouped = digits
            .as_bytes()
            .rchunks(3)
            .rev()
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
            .collect::<Vec<&str>>()
            .join(",");
        let places = MONEY_SCALE.ilog10() as usize;
        let decimals = match magnitude % scale {
            0 => String::new(),
            frac => format!(".{:0>width$}", frac, width = places)
                .trim_end_matches('0')
                .to_string(),
        };
        f.pad(&format!("{}{} {}{}", sign, CURRENCY, grouped, decimals))
    }
}

/// A JSON number when `f64` holds it exactly, otherwise the currency text.
impl serde::Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let exact = self.0.unsigned_abs() <= 1 << f64::MANTISSA_DIGITS;
        match exact && Self::from_f64(self.to_f64()) == *self {
            true => serializer.serialize_f64(self.to_f64()),
            false => serializer.collect_str(self),
        }
    }
}
impl<'de> serde::Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) if n.is_finite() => Ok(Self::from_f64(n)),
            Repr::Number(n) => Err(serde::de::Error::custom(format!("invalid amount {}", n))),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}
