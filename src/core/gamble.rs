//! Wagered random outcomes - coinflip and roulette.
//!
//! Both games follow the same shape: parse the stake (a positive integer or
//! `all`, meaning the whole wallet), validate it against the wallet before
//! touching anything, draw, then settle. Validation failures reject without
//! mutating balances or consuming cooldowns.
//!
//! Coinflip carries a 10-second global per-user cooldown; roulette has none.
//! That asymmetry is inherited from the original behavior and kept on
//! purpose (see DESIGN.md).

use crate::{
    core::{cooldown::Cooldowns, economy},
    errors::{Error, Result},
};
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// Coinflip win probability, out of 100.
pub const FLIP_WIN_PERCENT: u32 = 35;

/// A wager amount as supplied by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stake {
    /// Wager the entire wallet
    All,
    /// Wager an exact number of coins
    Exact(i64),
}

impl FromStr for Stake {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        match s.parse::<i64>() {
            Ok(n) if n > 0 => Ok(Self::Exact(n)),
            _ => Err(Error::InvalidAmount {
                input: s.to_string(),
            }),
        }
    }
}

impl Stake {
    /// Resolves the stake against the available balance, enforcing
    /// `0 < amount <= available`.
    pub fn resolve(self, available: i64) -> Result<i64> {
        let amount = match self {
            Self::All => available,
            Self::Exact(n) => n,
        };
        if amount <= 0 {
            return Err(Error::InvalidAmount {
                input: amount.to_string(),
            });
        }
        if amount > available {
            return Err(Error::InsufficientFunds { amount, available });
        }
        Ok(amount)
    }
}

/// Result of a completed coinflip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipOutcome {
    /// Whether the user won
    pub won: bool,
    /// Coins won or lost
    pub amount: i64,
}

/// Flips a coin for `amount` coins with a 35% win chance.
///
/// The per-user cooldown is checked first and only consumed once a flip
/// actually completes; rejected calls (cooldown, bad stake, insufficient
/// wallet) leave all state untouched.
pub async fn coinflip<R: Rng>(
    db: &sea_orm::DatabaseConnection,
    cooldowns: &Cooldowns,
    rng: &mut R,
    server_id: &str,
    user_id: &str,
    stake: Stake,
    now: Instant,
) -> Result<FlipOutcome> {
    if let Some(remaining) = cooldowns.flips.remaining(&user_id.to_string(), now) {
        return Err(Error::CooldownActive { remaining });
    }

    let balance = economy::get_balance(db, server_id, user_id).await?;
    let amount = stake.resolve(balance.wallet)?;

    let won = rng.gen_range(0..100u32) < FLIP_WIN_PERCENT;
    if won {
        economy::add_wallet(db, server_id, user_id, amount).await?;
    } else if !economy::try_debit_wallet(db, server_id, user_id, amount).await? {
        // Wallet changed underneath us between the read and the debit
        return Err(Error::InsufficientFunds {
            amount,
            available: balance.wallet,
        });
    }

    cooldowns.flips.touch(user_id.to_string(), now);
    Ok(FlipOutcome { won, amount })
}

/// Pocket colors on the roulette wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PocketColor {
    Green,
    Red,
    Black,
}

impl fmt::Display for PocketColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Green => "green",
            Self::Red => "red",
            Self::Black => "black",
        })
    }
}

/// Color of each pocket 0-36, per the official wheel layout.
pub const POCKET_COLORS: [PocketColor; 37] = {
    use PocketColor::{Black as B, Green as G, Red as R};
    [
        G, // 0
        R, B, R, B, R, B, R, B, R, B, // 1-10
        B, R, B, R, B, R, B, R, R, B, // 11-20
        R, B, R, B, R, B, R, B, B, R, // 21-30
        B, R, B, R, B, R, // 31-36
    ]
};

/// A roulette bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouletteBet {
    Even,
    Odd,
    Red,
    Black,
    /// Straight-up bet on a single pocket
    Straight(u8),
}

impl FromStr for RouletteBet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "even" => Ok(Self::Even),
            "odd" => Ok(Self::Odd),
            "red" => Ok(Self::Red),
            "black" => Ok(Self::Black),
            other => match other.parse::<u8>() {
                Ok(n) if n <= 36 => Ok(Self::Straight(n)),
                _ => Err(Error::InvalidBet {
                    input: s.to_string(),
                }),
            },
        }
    }
}

impl fmt::Display for RouletteBet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Even => f.write_str("even"),
            Self::Odd => f.write_str("odd"),
            Self::Red => f.write_str("red"),
            Self::Black => f.write_str("black"),
            Self::Straight(n) => write!(f, "{n}"),
        }
    }
}

/// Payout for `bet` with `amount` staked when the wheel lands on `pocket`,
/// or `None` on a loss. Even-money bets pay 2x, straight-up pays 35x; zero
/// counts as neither even nor odd.
#[must_use]
pub fn evaluate_bet(bet: RouletteBet, pocket: u8, amount: i64) -> Option<i64> {
    let color = POCKET_COLORS[pocket as usize];
    let won = match bet {
        RouletteBet::Even => pocket != 0 && pocket % 2 == 0,
        RouletteBet::Odd => pocket % 2 == 1,
        RouletteBet::Red => color == PocketColor::Red,
        RouletteBet::Black => color == PocketColor::Black,
        RouletteBet::Straight(n) => n == pocket,
    };
    won.then(|| match bet {
        RouletteBet::Straight(_) => amount * 35,
        _ => amount * 2,
    })
}

/// Result of a completed roulette spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinOutcome {
    /// Pocket the ball landed on (0-36)
    pub pocket: u8,
    /// Color of that pocket
    pub color: PocketColor,
    /// Payout credited on a win, or `None` on a loss
    pub payout: Option<i64>,
    /// Coins staked
    pub amount: i64,
}

/// Spins the wheel for `amount` coins on `bet`.
///
/// On a win the payout is credited (the stake is never deducted up front),
/// on a loss the stake is debited.
pub async fn roulette<R: Rng>(
    db: &sea_orm::DatabaseConnection,
    rng: &mut R,
    server_id: &str,
    user_id: &str,
    bet: RouletteBet,
    stake: Stake,
) -> Result<SpinOutcome> {
    let balance = economy::get_balance(db, server_id, user_id).await?;
    let amount = stake.resolve(balance.wallet)?;

    let pocket = rng.gen_range(0..=36u8);
    let payout = evaluate_bet(bet, pocket, amount);

    match payout {
        Some(credit) => economy::add_wallet(db, server_id, user_id, credit).await?,
        None => {
            if !economy::try_debit_wallet(db, server_id, user_id, amount).await? {
                return Err(Error::InsufficientFunds {
                    amount,
                    available: balance.wallet,
                });
            }
        }
    }

    Ok(SpinOutcome {
        pocket,
        color: POCKET_COLORS[pocket as usize],
        payout,
        amount,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;
    use rand::{SeedableRng, rngs::StdRng};
    use std::time::Duration;

    const SERVER: &str = "server-1";
    const USER: &str = "user-1";

    #[test]
    fn test_stake_parsing() {
        assert_eq!("all".parse::<Stake>().unwrap(), Stake::All);
        assert_eq!("ALL".parse::<Stake>().unwrap(), Stake::All);
        assert_eq!("250".parse::<Stake>().unwrap(), Stake::Exact(250));
        assert!("0".parse::<Stake>().is_err());
        assert!("-5".parse::<Stake>().is_err());
        assert!("lots".parse::<Stake>().is_err());
    }

    #[test]
    fn test_stake_resolution() {
        assert_eq!(Stake::All.resolve(400).unwrap(), 400);
        assert_eq!(Stake::Exact(100).resolve(400).unwrap(), 100);
        assert!(matches!(
            Stake::Exact(401).resolve(400),
            Err(Error::InsufficientFunds { .. })
        ));
        assert!(Stake::All.resolve(0).is_err());
    }

    #[test]
    fn test_bet_parsing() {
        assert_eq!("red".parse::<RouletteBet>().unwrap(), RouletteBet::Red);
        assert_eq!("Even".parse::<RouletteBet>().unwrap(), RouletteBet::Even);
        assert_eq!("17".parse::<RouletteBet>().unwrap(), RouletteBet::Straight(17));
        assert_eq!("0".parse::<RouletteBet>().unwrap(), RouletteBet::Straight(0));
        assert!("37".parse::<RouletteBet>().is_err());
        assert!("purple".parse::<RouletteBet>().is_err());
    }

    #[test]
    fn test_pocket_colors_match_wheel_layout() {
        assert_eq!(POCKET_COLORS[0], PocketColor::Green);
        assert_eq!(POCKET_COLORS[1], PocketColor::Red);
        assert_eq!(POCKET_COLORS[2], PocketColor::Black);
        assert_eq!(POCKET_COLORS[10], PocketColor::Black);
        assert_eq!(POCKET_COLORS[11], PocketColor::Black);
        assert_eq!(POCKET_COLORS[17], PocketColor::Black);
        assert_eq!(POCKET_COLORS[18], PocketColor::Red);
        assert_eq!(POCKET_COLORS[19], PocketColor::Red);
        assert_eq!(POCKET_COLORS[28], PocketColor::Black);
        assert_eq!(POCKET_COLORS[29], PocketColor::Black);
        assert_eq!(POCKET_COLORS[30], PocketColor::Red);
        assert_eq!(POCKET_COLORS[36], PocketColor::Red);
        // 18 red, 18 black, 1 green overall
        let reds = POCKET_COLORS.iter().filter(|c| **c == PocketColor::Red).count();
        let blacks = POCKET_COLORS.iter().filter(|c| **c == PocketColor::Black).count();
        assert_eq!(reds, 18);
        assert_eq!(blacks, 18);
    }

    #[test]
    fn test_forced_draws() {
        // Straight-up 17 at 100 pays 3500
        assert_eq!(evaluate_bet(RouletteBet::Straight(17), 17, 100), Some(3500));
        // Any other pocket loses the stake
        assert_eq!(evaluate_bet(RouletteBet::Straight(17), 16, 100), None);
        // Red against a forced draw of 1 (red) pays 200
        assert_eq!(evaluate_bet(RouletteBet::Red, 1, 100), Some(200));
        // Zero counts as neither even nor odd
        assert_eq!(evaluate_bet(RouletteBet::Even, 0, 100), None);
        assert_eq!(evaluate_bet(RouletteBet::Odd, 0, 100), None);
        assert_eq!(evaluate_bet(RouletteBet::Even, 4, 100), Some(200));
    }

    #[tokio::test]
    async fn test_coinflip_cooldown_blocks_second_call() -> Result<()> {
        let db = setup_test_db().await?;
        crate::core::economy::add_wallet(&db, SERVER, USER, 1000).await?;
        let cooldowns = Cooldowns::new();
        let mut rng = StdRng::seed_from_u64(7);

        let start = Instant::now();
        coinflip(&db, &cooldowns, &mut rng, SERVER, USER, Stake::Exact(10), start).await?;
        let balance_after_first =
            crate::core::economy::get_balance(&db, SERVER, USER).await?;

        // Second call inside the window is rejected with no balance change
        let second = coinflip(
            &db,
            &cooldowns,
            &mut rng,
            SERVER,
            USER,
            Stake::Exact(10),
            start + Duration::from_secs(3),
        )
        .await;
        assert!(matches!(second, Err(Error::CooldownActive { .. })));
        assert_eq!(
            crate::core::economy::get_balance(&db, SERVER, USER).await?,
            balance_after_first
        );

        // After the window it succeeds again
        coinflip(
            &db,
            &cooldowns,
            &mut rng,
            SERVER,
            USER,
            Stake::Exact(10),
            start + Duration::from_secs(10),
        )
        .await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_coinflip_rejects_bad_stakes_without_touching_cooldown() -> Result<()> {
        let db = setup_test_db().await?;
        crate::core::economy::add_wallet(&db, SERVER, USER, 50).await?;
        let cooldowns = Cooldowns::new();
        let mut rng = StdRng::seed_from_u64(7);
        let start = Instant::now();

        let result = coinflip(
            &db,
            &cooldowns,
            &mut rng,
            SERVER,
            USER,
            Stake::Exact(51),
            start,
        )
        .await;
        assert!(matches!(result, Err(Error::InsufficientFunds { .. })));

        // The rejection did not consume the cooldown
        coinflip(&db, &cooldowns, &mut rng, SERVER, USER, Stake::Exact(50), start).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_coinflip_settles_exactly_the_stake() -> Result<()> {
        let db = setup_test_db().await?;
        crate::core::economy::add_wallet(&db, SERVER, USER, 500).await?;
        let cooldowns = Cooldowns::new();
        let mut rng = StdRng::seed_from_u64(42);

        let mut now = Instant::now();
        for _ in 0..20 {
            let before = crate::core::economy::get_balance(&db, SERVER, USER).await?;
            if before.wallet == 0 {
                break;
            }
            let outcome =
                coinflip(&db, &cooldowns, &mut rng, SERVER, USER, Stake::Exact(1), now).await?;
            let after = crate::core::economy::get_balance(&db, SERVER, USER).await?;
            let delta = after.wallet - before.wallet;
            assert_eq!(delta, if outcome.won { 1 } else { -1 });
            assert!(after.wallet >= 0);
            now += Duration::from_secs(10);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_roulette_win_credits_payout() -> Result<()> {
        let db = setup_test_db().await?;
        crate::core::economy::add_wallet(&db, SERVER, USER, 100).await?;
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = roulette(&db, &mut rng, SERVER, USER, RouletteBet::Red, Stake::Exact(100))
            .await?;
        let balance = crate::core::economy::get_balance(&db, SERVER, USER).await?;
        match outcome.payout {
            Some(credit) => {
                assert_eq!(credit, 200);
                assert_eq!(balance.wallet, 300);
            }
            None => assert_eq!(balance.wallet, 0),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_roulette_rejects_overdrawn_stake() -> Result<()> {
        let db = setup_test_db().await?;
        let mut rng = StdRng::seed_from_u64(3);
        let result =
            roulette(&db, &mut rng, SERVER, USER, RouletteBet::Red, Stake::Exact(10)).await;
        assert!(matches!(result, Err(Error::InsufficientFunds { .. })));
        Ok(())
    }
}
