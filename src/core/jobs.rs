//! Job catalog lookups and applications.
//!
//! Applying for a job is a weighted coin toss: the job's rarity maps to a
//! success chance of `weight / 10`. A successful application credits a
//! uniform random income in the job's range and records the title; a failed
//! one changes nothing. Either way the per-(server, user) 24-hour cooldown
//! is consumed once a draw happens. Asking for a job that does not exist
//! consumes nothing.

use crate::{
    config::jobs::JobConfig,
    core::{cooldown::Cooldowns, economy},
    errors::{Error, Result},
};
use rand::Rng;
use sea_orm::DatabaseConnection;
use std::time::Instant;

/// Jobs shown per page in the catalog listing.
pub const JOBS_PER_PAGE: usize = 5;

/// Flavor lines for rejected applications.
pub const FAILURE_LINES: [&str; 6] = [
    "You lied on your résumé and got caught.",
    "You showed up late to the interview and spilled coffee on your boss.",
    "You forgot your own name during the interview.",
    "They said you were 'too creative' for the janitor role.",
    "The AI doing interviews rejected you instantly.",
    "You called the boss 'mom' — yeah...",
];

/// Flavor lines for successful applications.
pub const SUCCESS_LINES: [&str; 5] = [
    "The boss felt bad and hired you anyway.",
    "You barely made it, but hey, a job's a job!",
    "You impressed them by juggling three staplers.",
    "They liked your meme portfolio.",
    "You bribed the interviewer with cookies and it worked.",
];

/// The job catalog loaded at startup.
#[derive(Debug, Clone)]
pub struct JobCatalog {
    jobs: Vec<JobConfig>,
}

impl JobCatalog {
    /// Wraps a list of configured jobs.
    #[must_use]
    pub fn new(jobs: Vec<JobConfig>) -> Self {
        Self { jobs }
    }

    /// All jobs, in config order.
    #[must_use]
    pub fn all(&self) -> &[JobConfig] {
        &self.jobs
    }

    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&JobConfig> {
        self.jobs.iter().find(|j| j.name.eq_ignore_ascii_case(name))
    }

    /// Catalog pages for the paginated listing.
    #[must_use]
    pub fn pages(&self) -> Vec<&[JobConfig]> {
        self.jobs.chunks(JOBS_PER_PAGE).collect()
    }
}

/// Result of a job application draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationOutcome {
    /// The application succeeded
    Hired {
        /// Job the user now holds
        job: String,
        /// Income credited to the wallet
        pay: i64,
        /// Flavor line to show the user
        line: &'static str,
    },
    /// The application failed; nothing changed
    Rejected {
        /// Flavor line to show the user
        line: &'static str,
    },
}

/// Applies for `job_name` on behalf of `(server_id, user_id)`.
///
/// # Errors
/// [`Error::CooldownActive`] inside the 24-hour window,
/// [`Error::UnknownJob`] for names not in the catalog (cooldown untouched).
pub async fn apply<R: Rng>(
    db: &DatabaseConnection,
    catalog: &JobCatalog,
    cooldowns: &Cooldowns,
    rng: &mut R,
    server_id: &str,
    user_id: &str,
    job_name: &str,
    now: Instant,
) -> Result<ApplicationOutcome> {
    let key = (server_id.to_string(), user_id.to_string());
    if let Some(remaining) = cooldowns.applications.remaining(&key, now) {
        return Err(Error::CooldownActive { remaining });
    }

    let Some(job) = catalog.find(job_name) else {
        return Err(Error::UnknownJob {
            name: job_name.to_string(),
        });
    };

    economy::ensure_user(db, server_id, user_id).await?;

    let hired = rng.gen_bool(job.rarity.success_chance());
    let outcome = if hired {
        let pay = rng.gen_range(job.min_income..=job.max_income);
        economy::add_wallet(db, server_id, user_id, pay).await?;
        economy::update_job(db, server_id, user_id, &job.name).await?;
        ApplicationOutcome::Hired {
            job: job.name.clone(),
            pay,
            line: SUCCESS_LINES[rng.gen_range(0..SUCCESS_LINES.len())],
        }
    } else {
        ApplicationOutcome::Rejected {
            line: FAILURE_LINES[rng.gen_range(0..FAILURE_LINES.len())],
        }
    };

    cooldowns.applications.touch(key, now);
    Ok(outcome)
}
