//! Economy business logic - wallets, banks, transfers, and the daily claim.
//!
//! Every operation takes `(server_id, user_id)` and lazily creates the user
//! row on first reference with an empty wallet and a 300-coin bank. Balance
//! mutations are expressed as single conditional UPDATE statements so a
//! concurrent mutation can never drive `wallet` or `bank` negative: the
//! sufficiency check and the write happen in one statement, and a lost race
//! surfaces as "no rows affected" rather than partial application.

use crate::{
    entities::{EconomyServer, EconomyUser, economy_server, economy_user},
    errors::Result,
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{Set, prelude::*, sea_query::Expr};

/// Bank balance a user starts with on first reference.
pub const STARTING_BANK: i64 = 300;

/// Coins credited by a successful daily claim.
pub const DAILY_REWARD: i64 = 500;

/// Hours between daily claims.
pub const DAILY_WINDOW_HOURS: i64 = 24;

/// A user's wallet and bank balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    /// Spendable balance
    pub wallet: i64,
    /// Savings balance
    pub bank: i64,
}

impl Balance {
    /// Total currency held by the user.
    #[must_use]
    pub const fn total(self) -> i64 {
        self.wallet + self.bank
    }
}

/// Retrieves or creates the economy record for a server.
///
/// New servers start with the economy enabled.
pub async fn ensure_server(db: &DatabaseConnection, server_id: &str) -> Result<economy_server::Model> {
    if let Some(server) = EconomyServer::find_by_id(server_id).one(db).await? {
        return Ok(server);
    }

    let server = economy_server::ActiveModel {
        server_id: Set(server_id.to_string()),
        enabled: Set(true),
    };
    Ok(server.insert(db).await?)
}

/// Returns whether the economy subsystem is active for a server.
pub async fn is_enabled(db: &DatabaseConnection, server_id: &str) -> Result<bool> {
    Ok(ensure_server(db, server_id).await?.enabled)
}

/// Enables or disables the economy subsystem for a server.
pub async fn set_enabled(db: &DatabaseConnection, server_id: &str, enabled: bool) -> Result<()> {
    ensure_server(db, server_id).await?;
    EconomyServer::update_many()
        .col_expr(economy_server::Column::Enabled, Expr::value(enabled))
        .filter(economy_server::Column::ServerId.eq(server_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Ensures a user row exists, creating it with `wallet=0, bank=300` if
/// absent, and returns the current model.
pub async fn ensure_user(
    db: &DatabaseConnection,
    server_id: &str,
    user_id: &str,
) -> Result<economy_user::Model> {
    ensure_server(db, server_id).await?;

    if let Some(user) = EconomyUser::find_by_id((server_id.to_string(), user_id.to_string()))
        .one(db)
        .await?
    {
        return Ok(user);
    }

    let user = economy_user::ActiveModel {
        server_id: Set(server_id.to_string()),
        user_id: Set(user_id.to_string()),
        wallet: Set(0),
        bank: Set(STARTING_BANK),
        last_daily: Set(None),
        job: Set(None),
    };
    Ok(user.insert(db).await?)
}

/// Returns the wallet and bank balance of a user in a server.
pub async fn get_balance(db: &DatabaseConnection, server_id: &str, user_id: &str) -> Result<Balance> {
    let user = ensure_user(db, server_id, user_id).await?;
    Ok(Balance {
        wallet: user.wallet,
        bank: user.bank,
    })
}

/// Adds `delta` coins to a user's wallet with an atomic database-level
/// update.
///
/// This primitive does not enforce a lower bound; debit paths must go
/// through [`try_debit_wallet`] so a concurrent spend cannot leave the
/// wallet negative.
pub async fn add_wallet(
    db: &DatabaseConnection,
    server_id: &str,
    user_id: &str,
    delta: i64,
) -> Result<()> {
    ensure_user(db, server_id, user_id).await?;
    EconomyUser::update_many()
        .col_expr(
            economy_user::Column::Wallet,
            Expr::col(economy_user::Column::Wallet).add(delta),
        )
        .filter(economy_user::Column::ServerId.eq(server_id))
        .filter(economy_user::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Removes `amount` coins from a user's wallet if and only if the wallet
/// holds at least that much. Returns whether the debit applied.
pub async fn try_debit_wallet(
    db: &DatabaseConnection,
    server_id: &str,
    user_id: &str,
    amount: i64,
) -> Result<bool> {
    if amount <= 0 {
        return Ok(false);
    }
    ensure_user(db, server_id, user_id).await?;

    let result = EconomyUser::update_many()
        .col_expr(
            economy_user::Column::Wallet,
            Expr::col(economy_user::Column::Wallet).sub(amount),
        )
        .filter(economy_user::Column::ServerId.eq(server_id))
        .filter(economy_user::Column::UserId.eq(user_id))
        .filter(economy_user::Column::Wallet.gte(amount))
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Moves coins from wallet to bank. Returns `true` on success, `false` when
/// the amount is non-positive or exceeds the wallet; state is untouched on
/// failure.
pub async fn deposit(
    db: &DatabaseConnection,
    server_id: &str,
    user_id: &str,
    amount: i64,
) -> Result<bool> {
    if amount <= 0 {
        return Ok(false);
    }
    ensure_user(db, server_id, user_id).await?;

    let result = EconomyUser::update_many()
        .col_expr(
            economy_user::Column::Wallet,
            Expr::col(economy_user::Column::Wallet).sub(amount),
        )
        .col_expr(
            economy_user::Column::Bank,
            Expr::col(economy_user::Column::Bank).add(amount),
        )
        .filter(economy_user::Column::ServerId.eq(server_id))
        .filter(economy_user::Column::UserId.eq(user_id))
        .filter(economy_user::Column::Wallet.gte(amount))
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Moves coins from bank to wallet, gated on `bank >= amount`. Symmetric to
/// [`deposit`].
pub async fn withdraw(
    db: &DatabaseConnection,
    server_id: &str,
    user_id: &str,
    amount: i64,
) -> Result<bool> {
    if amount <= 0 {
        return Ok(false);
    }
    ensure_user(db, server_id, user_id).await?;

    let result = EconomyUser::update_many()
        .col_expr(
            economy_user::Column::Bank,
            Expr::col(economy_user::Column::Bank).sub(amount),
        )
        .col_expr(
            economy_user::Column::Wallet,
            Expr::col(economy_user::Column::Wallet).add(amount),
        )
        .filter(economy_user::Column::ServerId.eq(server_id))
        .filter(economy_user::Column::UserId.eq(user_id))
        .filter(economy_user::Column::Bank.gte(amount))
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}

/// True when the daily window has elapsed since `last_daily` (or the user
/// has never claimed).
fn daily_available(last_daily: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    last_daily.is_none_or(|last| now - last >= Duration::hours(DAILY_WINDOW_HOURS))
}

/// Checks whether a user can claim daily coins (once every 24 hours, UTC
/// wall clock).
pub async fn can_claim_daily(
    db: &DatabaseConnection,
    server_id: &str,
    user_id: &str,
) -> Result<bool> {
    let user = ensure_user(db, server_id, user_id).await?;
    Ok(daily_available(user.last_daily, Utc::now()))
}

/// Claims the daily reward. Returns `true` if claimed, `false` if still on
/// cooldown.
///
/// The credit and the `last_daily` stamp are applied in one UPDATE guarded
/// on the previously observed `last_daily` value, so two racing claims can
/// only pay out once.
pub async fn claim_daily(
    db: &DatabaseConnection,
    server_id: &str,
    user_id: &str,
    amount: i64,
) -> Result<bool> {
    let user = ensure_user(db, server_id, user_id).await?;
    let now = Utc::now();
    if !daily_available(user.last_daily, now) {
        return Ok(false);
    }

    let mut update = EconomyUser::update_many()
        .col_expr(
            economy_user::Column::Wallet,
            Expr::col(economy_user::Column::Wallet).add(amount),
        )
        .col_expr(economy_user::Column::LastDaily, Expr::value(Some(now)))
        .filter(economy_user::Column::ServerId.eq(server_id))
        .filter(economy_user::Column::UserId.eq(user_id));

    // Compare-and-swap on the previous stamp
    update = match user.last_daily {
        Some(previous) => update.filter(economy_user::Column::LastDaily.eq(previous)),
        None => update.filter(economy_user::Column::LastDaily.is_null()),
    };

    let result = update.exec(db).await?;
    Ok(result.rows_affected == 1)
}

/// Sets the user's job title unconditionally.
pub async fn update_job(
    db: &DatabaseConnection,
    server_id: &str,
    user_id: &str,
    job_name: &str,
) -> Result<()> {
    ensure_user(db, server_id, user_id).await?;
    EconomyUser::update_many()
        .col_expr(
            economy_user::Column::Job,
            Expr::value(Some(job_name.to_string())),
        )
        .filter(economy_user::Column::ServerId.eq(server_id))
        .filter(economy_user::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    const SERVER: &str = "server-1";
    const USER: &str = "user-1";

    #[tokio::test]
    async fn test_user_created_lazily_with_defaults() -> Result<()> {
        let db = setup_test_db().await?;
        let balance = get_balance(&db, SERVER, USER).await?;
        assert_eq!(balance.wallet, 0);
        assert_eq!(balance.bank, STARTING_BANK);

        let user = ensure_user(&db, SERVER, USER).await?;
        assert!(user.last_daily.is_none());
        assert!(user.job.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_deposit_withdraw_conserve_total() -> Result<()> {
        let db = setup_test_db().await?;
        add_wallet(&db, SERVER, USER, 700).await?;
        let before = get_balance(&db, SERVER, USER).await?;

        assert!(deposit(&db, SERVER, USER, 200).await?);
        assert!(withdraw(&db, SERVER, USER, 450).await?);
        assert!(deposit(&db, SERVER, USER, 1).await?);

        let after = get_balance(&db, SERVER, USER).await?;
        assert_eq!(before.total(), after.total());
        assert!(after.wallet >= 0 && after.bank >= 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_deposit_rejects_insufficient_or_nonpositive() -> Result<()> {
        let db = setup_test_db().await?;
        add_wallet(&db, SERVER, USER, 100).await?;
        let before = get_balance(&db, SERVER, USER).await?;

        assert!(!deposit(&db, SERVER, USER, 101).await?);
        assert!(!deposit(&db, SERVER, USER, 0).await?);
        assert!(!deposit(&db, SERVER, USER, -5).await?);

        assert_eq!(get_balance(&db, SERVER, USER).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn test_withdraw_rejects_insufficient_or_nonpositive() -> Result<()> {
        let db = setup_test_db().await?;
        let before = get_balance(&db, SERVER, USER).await?;
        assert_eq!(before.bank, STARTING_BANK);

        assert!(!withdraw(&db, SERVER, USER, STARTING_BANK + 1).await?);
        assert!(!withdraw(&db, SERVER, USER, 0).await?);

        assert_eq!(get_balance(&db, SERVER, USER).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn test_daily_claim_once_per_window() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(can_claim_daily(&db, SERVER, USER).await?);

        assert!(claim_daily(&db, SERVER, USER, DAILY_REWARD).await?);
        let balance = get_balance(&db, SERVER, USER).await?;
        assert_eq!(balance.wallet, DAILY_REWARD);

        // Second claim in immediate succession fails and credits nothing
        assert!(!can_claim_daily(&db, SERVER, USER).await?);
        assert!(!claim_daily(&db, SERVER, USER, DAILY_REWARD).await?);
        assert_eq!(get_balance(&db, SERVER, USER).await?.wallet, DAILY_REWARD);
        Ok(())
    }

    #[test]
    fn test_daily_window_boundary() {
        let now = Utc::now();
        assert!(daily_available(None, now));
        assert!(!daily_available(Some(now - Duration::hours(23)), now));
        assert!(daily_available(Some(now - Duration::hours(24)), now));
    }

    #[tokio::test]
    async fn test_try_debit_wallet_gates_on_balance() -> Result<()> {
        let db = setup_test_db().await?;
        add_wallet(&db, SERVER, USER, 50).await?;

        assert!(try_debit_wallet(&db, SERVER, USER, 30).await?);
        assert!(!try_debit_wallet(&db, SERVER, USER, 21).await?);
        assert_eq!(get_balance(&db, SERVER, USER).await?.wallet, 20);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_job_and_enable_toggle() -> Result<()> {
        let db = setup_test_db().await?;
        update_job(&db, SERVER, USER, "Janitor").await?;
        let user = ensure_user(&db, SERVER, USER).await?;
        assert_eq!(user.job.as_deref(), Some("Janitor"));

        assert!(is_enabled(&db, SERVER).await?);
        set_enabled(&db, SERVER, false).await?;
        assert!(!is_enabled(&db, SERVER).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_balances_isolated_per_server() -> Result<()> {
        let db = setup_test_db().await?;
        add_wallet(&db, "server-a", USER, 100).await?;
        assert_eq!(get_balance(&db, "server-b", USER).await?.wallet, 0);
        Ok(())
    }
}
