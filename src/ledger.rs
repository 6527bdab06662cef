use crate::*;

/// Settles a roster snapshot against the session stakes.
///
/// Returns the same seats, in the same order, with `net` and `fee`
/// recomputed, plus the session totals. Pure and total: any input settles,
/// and settling twice gives identical output.
pub fn settle(players: Vec<Player>, stakes: Stakes) -> (Vec<Player>, Totals) {
    Ledger::from((players, stakes)).settle()
}

/// One settlement computation over a roster snapshot.
///
/// # Algorithm
///
/// 1. Net pass: each seat's cash-out value minus its buy-in cost. Winners
///    are the seats with a strictly positive net; everyone else owes no fee.
/// 2. Fee pass: each winner owes `net / gross * pool`, rounded to a whole
///    unit with ties to even. With no winners, nobody owes anything.
/// 3. Trim: if rounding pushed the total over the pool, take one unit back
///    from the winners rounded up the furthest (ties by id) until it fits.
///
/// Every step is exact integer arithmetic keyed on seat values and ids, so
/// the result does not depend on the order of the snapshot.
pub struct Ledger {
    players: Vec<Player>,
    stakes: Stakes,
}

impl From<(Vec<Player>, Stakes)> for Ledger {
    fn from((players, stakes): (Vec<Player>, Stakes)) -> Self {
        Self { players, stakes }
    }
}

impl Ledger {
    /// Consumes the snapshot and returns the settled roster.
    pub fn settle(self) -> (Vec<Player>, Totals) {
        let nets = self.nets();
        let totals = Totals::from(nets.as_slice());
        let fees = self.fees(&nets);
        log::debug!(
            "settled {} players ({} winners): {}, fees {} of {}",
            self.players.len(),
            nets.iter().filter(|n| n.is_positive()).count(),
            totals,
            fees.iter().sum::<Money>(),
            self.stakes.fee(),
        );
        let players = self
            .players
            .into_iter()
            .zip(nets)
            .zip(fees)
            .map(|((player, net), fee)| player.settled(net, fee))
            .collect::<Vec<Player>>();
        (players, totals)
    }

    fn nets(&self) -> Vec<Money> {
        self.players
            .iter()
            .map(|p| self.stakes.net(p.buyins(), p.chips()))
            .collect()
    }

    /// Sum of the winning nets in sub-units. Summed wide so a few huge
    /// winners cannot clip it and inflate every share.
    fn gross(nets: &[Money]) -> i128 {
        nets.iter()
            .filter(|n| n.is_positive())
            .map(|n| n.sub_units() as i128)
            .sum()
    }

    fn fees(&self, nets: &[Money]) -> Vec<Money> {
        let pool = self.stakes.fee();
        let gross = Self::gross(nets);
        let shares = nets
            .iter()
            .map(|net| match net.is_positive() {
                true => net.share(gross, pool),
                false => None,
            })
            .collect::<Vec<Option<Share>>>();
        let mut fees = shares
            .iter()
            .map(|share| share.map_or(Money::ZERO, |s| s.amount()))
            .collect::<Vec<Money>>();
        self.trim(&mut fees, &shares);
        fees
    }

    /// Gives back the units per-seat rounding took beyond the pool.
    fn trim(&self, fees: &mut [Money], shares: &[Option<Share>]) {
        let pool = self.stakes.fee();
        let mut upward = shares
            .iter()
            .enumerate()
            .filter_map(|(i, share)| share.filter(Share::is_rounded_up).map(|s| (i, s)))
            .collect::<Vec<(usize, Share)>>();
        upward.sort_by(|(i, a), (j, b)| {
            b.excess()
                .cmp(&a.excess())
                .then_with(|| self.players[*i].id().cmp(&self.players[*j].id()))
        });
        for (i, _) in upward {
            if fees.iter().sum::<Money>() <= pool {
                break;
            }
            log::trace!("trimming one unit from {}", self.players[i].name());
            fees[i] = fees[i] - Money::UNIT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;

    fn stakes(buyin: i64, chip: i64, fee: i64) -> Stakes {
        Stakes::new(Money::from(buyin), Money::from(chip), Money::from(fee))
    }
    fn seat(buyins: Count, chips: Chips) -> Player {
        Player::new("p").with_buyins(buyins).with_chips(chips)
    }
    fn roster(n: usize) -> Vec<Player> {
        (0..n).map(|_| Player::random()).collect()
    }
    fn fees(players: &[Player]) -> Money {
        players.iter().map(Player::fee).sum()
    }
    fn by_id(mut players: Vec<Player>) -> Vec<Player> {
        players.sort_by_key(|p| p.id());
        players
    }

    #[test]
    fn break_even_pays_nothing() {
        let (players, totals) = settle(vec![seat(1, 200)], stakes(200, 1, 1000));
        assert!(players[0].net() == Money::ZERO);
        assert!(players[0].fee() == Money::ZERO);
        assert!(totals.net() == Money::ZERO);
        assert!(totals.gross() == Money::ZERO);
    }

    #[test]
    fn heads_up_winner_pays_whole_fee() {
        let (players, totals) = settle(vec![seat(1, 400), seat(1, 0)], stakes(200, 1, 1000));
        assert!(players[0].net() == Money::from(200));
        assert!(players[0].fee() == Money::from(1000));
        assert!(players[1].net() == Money::from(-200));
        assert!(players[1].fee() == Money::ZERO);
        assert!(totals.net() == Money::ZERO);
        assert!(totals.gross() == Money::from(200));
    }

    #[test]
    fn equal_winners_split_evenly() {
        let (players, _) = settle(
            vec![seat(1, 300), seat(1, 300), seat(2, 200)],
            stakes(200, 1, 1000),
        );
        assert!(players[0].net() == Money::from(100));
        assert!(players[1].net() == Money::from(100));
        assert!(players[2].net() == Money::from(-200));
        assert!(players[0].fee() == Money::from(500));
        assert!(players[1].fee() == Money::from(500));
        assert!(players[2].fee() == Money::ZERO);
    }

    #[test]
    fn empty_table_settles_to_nothing() {
        let (players, totals) = settle(vec![], stakes(200, 1, 1000));
        assert!(players.is_empty());
        assert!(totals == Totals::default());
    }

    #[test]
    fn no_winners_no_fees() {
        let (players, totals) = settle(
            vec![seat(1, 200), seat(1, 150), seat(3, 0)],
            stakes(200, 1, 1000),
        );
        assert!(totals.gross() == Money::ZERO);
        assert!(totals.net() == Money::from(-650));
        assert!(fees(&players) == Money::ZERO);
    }

    #[test]
    fn thirds_round_down_under_pool() {
        let (players, _) = settle(
            vec![seat(1, 300), seat(1, 300), seat(1, 300), seat(3, 300)],
            stakes(200, 1, 1000),
        );
        assert!(players[..3].iter().all(|p| p.fee() == Money::from(333)));
        assert!(fees(&players) == Money::from(999));
    }

    #[test]
    fn rounding_overshoot_is_trimmed() {
        let (players, _) = settle(
            vec![seat(1, 300), seat(1, 300), seat(1, 300), seat(3, 300)],
            stakes(200, 1, 2),
        );
        assert!(fees(&players) == Money::from(2));
        let first = players[..3].iter().min_by_key(|p| p.id()).unwrap();
        assert!(first.fee() == Money::ZERO);
        assert!(players[..3].iter().filter(|p| p.fee() == Money::UNIT).count() == 2);
    }

    #[test]
    fn trims_largest_roundup_first() {
        // shares 1.7, 0.7, 0.6 of a pool of 3 round to 2, 1, 1
        let (players, _) = settle(
            vec![seat(0, 170), seat(0, 70), seat(0, 60)],
            stakes(200, 1, 3),
        );
        assert!(players[0].fee() == Money::from(2));
        assert!(players[1].fee() == Money::from(1));
        assert!(players[2].fee() == Money::ZERO);
    }

    #[test]
    fn ties_round_to_even() {
        // shares 2.5 and 7.5 of a pool of 10
        let (players, _) = settle(vec![seat(0, 100), seat(0, 300)], stakes(200, 1, 10));
        assert!(players[0].fee() == Money::from(2));
        assert!(players[1].fee() == Money::from(8));
        // shares 4.5 and 1.5 of a pool of 6
        let (players, _) = settle(vec![seat(0, 300), seat(0, 100)], stakes(200, 1, 6));
        assert!(players[0].fee() == Money::from(4));
        assert!(players[1].fee() == Money::from(2));
    }

    #[test]
    fn fractional_chip_price() {
        let stakes = Stakes::new(Money::from(50), Money::raw(2_500), Money::from(90));
        let (players, totals) = settle(vec![seat(2, 700), seat(2, 100)], stakes);
        assert!(players[0].net() == Money::raw(750_000));
        assert!(players[1].net() == Money::from(-75));
        assert!(totals.net() == Money::ZERO);
        assert!(players[0].fee() == Money::from(90));
    }

    #[test]
    fn degenerate_stakes_do_not_fail() {
        let (players, _) = settle(vec![seat(-1, 5), seat(2, -3)], stakes(0, 0, 0));
        assert!(players.iter().all(|p| p.net() == Money::ZERO));
        let (players, _) = settle(vec![seat(1, 400), seat(1, 0)], stakes(-200, -1, -1000));
        assert!(players.iter().all(|p| p.fee() <= Money::ZERO));
        let (players, totals) = settle(vec![seat(Count::MAX, Chips::MAX)], stakes(1, 1, 1000));
        assert!(players[0].net() == Money::ZERO);
        assert!(totals.gross() == Money::ZERO);
    }

    #[test]
    fn huge_winners_stay_within_pool() {
        let huge = 600_000_000_000_000;
        let (players, totals) = settle(vec![seat(0, huge), seat(0, huge)], stakes(200, 1, 1000));
        assert!(totals.gross() == Money::raw(i64::MAX));
        assert!(players[0].fee() == Money::from(500));
        assert!(players[1].fee() == Money::from(500));
        let (players, _) = settle(
            vec![seat(0, Chips::MAX), seat(0, Chips::MAX), seat(0, Chips::MAX)],
            stakes(200, 1, 1000),
        );
        assert!(players.iter().all(|p| p.fee() == Money::from(333)));
        assert!(fees(&players) == Money::from(999));
    }

    #[test]
    fn identities_and_inputs_survive() {
        let before = roster(12);
        let (after, _) = settle(before.clone(), Stakes::random());
        for (b, a) in before.iter().zip(after.iter()) {
            assert!(b.id() == a.id());
            assert!(b.name() == a.name());
            assert!(b.buyins() == a.buyins());
            assert!(b.chips() == a.chips());
        }
    }

    #[test]
    fn losers_never_pay() {
        for _ in 0..256 {
            let (players, _) = settle(roster(9), Stakes::random());
            for player in players {
                assert!(player.fee() <= Money::ZERO || player.net() > Money::ZERO);
            }
        }
    }

    #[test]
    fn fees_never_exceed_pool() {
        for _ in 0..256 {
            let stakes = Stakes::random();
            let (players, totals) = settle(roster(9), stakes);
            let collected = fees(&players);
            assert!(collected <= stakes.fee());
            match totals.gross().is_positive() {
                false => assert!(collected == Money::ZERO),
                true => {
                    let winners = players.iter().filter(|p| p.is_winner()).count() as i64;
                    let drift = Money::raw(winners.max(2) * MONEY_SCALE / 2);
                    assert!(stakes.fee() - collected <= drift);
                }
            }
        }
    }

    #[test]
    fn settling_is_idempotent() {
        for _ in 0..64 {
            let stakes = Stakes::random();
            let (once, totals1) = settle(roster(7), stakes);
            let (twice, totals2) = settle(once.clone(), stakes);
            assert!(once == twice);
            assert!(totals1 == totals2);
        }
    }

    #[test]
    fn order_does_not_matter() {
        for _ in 0..64 {
            let stakes = Stakes::random();
            let players = roster(10);
            let mut shuffled = players.clone();
            shuffled.shuffle(&mut rand::rng());
            let (a, totals_a) = settle(players, stakes);
            let (b, totals_b) = settle(shuffled, stakes);
            assert!(totals_a == totals_b);
            assert!(by_id(a) == by_id(b));
        }
    }

    #[test]
    fn order_does_not_matter_when_trimming() {
        let players = vec![seat(1, 300), seat(1, 300), seat(1, 300), seat(3, 300)];
        let (a, _) = settle(players.clone(), stakes(200, 1, 2));
        let (b, _) = settle(players.into_iter().rev().collect(), stakes(200, 1, 2));
        assert!(by_id(a) == by_id(b));
    }
}
