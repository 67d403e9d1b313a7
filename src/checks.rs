//! Executable checks against the live photo API.
//!
//! Each check yields a [`CheckOutcome`]; a check that errors is reported as
//! failed and the remaining checks still run.

use log::{error, info};
use std::fmt;

use crate::api_types::{earth_date_of, landing_date_of, PhotoRecord};
use crate::client::RoverClient;
use crate::config::CheckConfig;
use crate::distribution::{count_mismatches, low_distribution_cameras, CameraDistribution};
use crate::error::RoverResult;
use crate::images::images_equal;
use crate::query::PhotoQuery;
use crate::sol_date::sol_to_earth_date;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub verdict: Verdict,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.verdict {
            Verdict::Pass => write!(f, "{} ... ok", self.name),
            Verdict::Fail(reason) => write!(f, "{} ... FAILED: {}", self.name, reason),
        }
    }
}

/// Photos listed for the configured sol and for its Earth date.
#[derive(Debug, Clone)]
pub struct Listings {
    pub by_sol_all: Vec<PhotoRecord>,
    pub by_sol: Vec<PhotoRecord>,
    pub earth_date: String,
    pub by_earth_date: Vec<PhotoRecord>,
}

type Distribution = Result<CameraDistribution, String>;

pub struct CheckSuite<'a, T: Transport> {
    client: &'a RoverClient<T>,
    config: &'a CheckConfig,
}

impl<'a, T: Transport> CheckSuite<'a, T> {
    pub fn new(client: &'a RoverClient<T>, config: &'a CheckConfig) -> Self {
        Self { client, config }
    }

    pub fn prepare(&self) -> RoverResult<Listings> {
        let rover = &self.config.rover;
        let amount = self.config.amount;

        let by_sol_all = self
            .client
            .list_photos(rover, &PhotoQuery::by_sol(self.config.sol))?;
        let by_sol: Vec<PhotoRecord> = by_sol_all.iter().take(amount).cloned().collect();

        let earth_date = earth_date_of(&by_sol)?.to_string();
        let mut by_earth_date = self
            .client
            .list_photos(rover, &PhotoQuery::by_earth_date(earth_date.as_str()))?;
        by_earth_date.truncate(amount);

        Ok(Listings {
            by_sol_all,
            by_sol,
            earth_date,
            by_earth_date,
        })
    }

    pub fn run(&self) -> Vec<CheckOutcome> {
        info!(
            "Checking {} photos on sol {} (first {}, threshold {})",
            self.config.rover, self.config.sol, self.config.amount, self.config.threshold
        );

        let listings = match self.prepare() {
            Ok(listings) => listings,
            Err(e) => {
                error!("Failed to fetch photo listings: {}", e);
                let reason = format!("setup failed: {}", e);
                return CHECK_NAMES
                    .iter()
                    .map(|&name| CheckOutcome {
                        name,
                        verdict: Verdict::Fail(reason.clone()),
                    })
                    .collect();
            }
        };

        let catalog: Distribution = self
            .client
            .camera_distribution(&self.config.rover, self.config.sol)
            .map_err(|e| e.to_string());
        let brute_force: Distribution = self
            .client
            .camera_distribution_brute_force(&listings.by_sol_all, &self.config.rover)
            .map_err(|e| e.to_string());

        vec![
            outcome(CHECK_NAMES[0], self.photos_by_sol_amount(&listings)),
            outcome(CHECK_NAMES[1], self.photos_by_earth_date_amount(&listings)),
            outcome(CHECK_NAMES[2], self.formula_matches_api_earth_date(&listings)),
            outcome(CHECK_NAMES[3], self.sol_and_earth_date_photos_equal(&listings)),
            outcome(CHECK_NAMES[4], self.distribution_balanced(&catalog)),
            outcome(CHECK_NAMES[5], self.distribution_balanced(&brute_force)),
            outcome(
                CHECK_NAMES[6],
                self.low_distribution_strategies_agree(&catalog, &brute_force),
            ),
        ]
    }

    fn photos_by_sol_amount(&self, listings: &Listings) -> RoverResult<Verdict> {
        Ok(expect_amount(listings.by_sol.len(), self.config.amount))
    }

    fn photos_by_earth_date_amount(&self, listings: &Listings) -> RoverResult<Verdict> {
        Ok(expect_amount(listings.by_earth_date.len(), self.config.amount))
    }

    fn formula_matches_api_earth_date(&self, listings: &Listings) -> RoverResult<Verdict> {
        let landing_date = landing_date_of(&listings.by_sol)?;
        let by_formula = sol_to_earth_date(self.config.sol, landing_date)?;

        if by_formula == listings.earth_date {
            Ok(Verdict::Pass)
        } else {
            Ok(Verdict::Fail(format!(
                "value provided by API: {}, but expected earth date by formula {}",
                listings.earth_date, by_formula
            )))
        }
    }

    /// Metadata first, then the images behind each pair of photos.
    fn sol_and_earth_date_photos_equal(&self, listings: &Listings) -> RoverResult<Verdict> {
        if listings.by_sol.len() != listings.by_earth_date.len() {
            return Ok(Verdict::Fail(format!(
                "{} photos by sol but {} by earth date",
                listings.by_sol.len(),
                listings.by_earth_date.len()
            )));
        }

        for (index, (by_sol, by_date)) in listings
            .by_sol
            .iter()
            .zip(&listings.by_earth_date)
            .enumerate()
        {
            if by_sol != by_date {
                return Ok(Verdict::Fail(format!(
                    "photo metadata differs at position {}",
                    index
                )));
            }

            let first = self.client.fetch_image(by_sol.img_src()?)?;
            let second = self.client.fetch_image(by_date.img_src()?)?;
            if !images_equal(&first, &second)? {
                return Ok(Verdict::Fail(format!(
                    "images differ at position {}: {}",
                    index,
                    by_sol.img_src()?
                )));
            }
        }

        Ok(Verdict::Pass)
    }

    fn distribution_balanced(&self, distribution: &Distribution) -> RoverResult<Verdict> {
        let distribution = match distribution {
            Ok(distribution) => distribution,
            Err(e) => return Ok(Verdict::Fail(e.clone())),
        };

        let low = low_distribution_cameras(distribution, self.config.threshold)?;
        if low.is_empty() {
            return Ok(Verdict::Pass);
        }

        let max_count = distribution.values().max().copied().unwrap_or_default();
        Ok(Verdict::Fail(format!(
            "these cameras made {} times less photos than {} (max photos by one camera): {:?}",
            self.config.threshold, max_count, low
        )))
    }

    fn low_distribution_strategies_agree(
        &self,
        catalog: &Distribution,
        brute_force: &Distribution,
    ) -> RoverResult<Verdict> {
        let (catalog, brute_force) = match (catalog, brute_force) {
            (Ok(catalog), Ok(brute_force)) => (catalog, brute_force),
            (Err(e), _) | (_, Err(e)) => return Ok(Verdict::Fail(e.clone())),
        };

        let low_catalog = low_distribution_cameras(catalog, self.config.threshold)?;
        let low_brute_force = low_distribution_cameras(brute_force, self.config.threshold)?;
        if low_catalog == low_brute_force {
            return Ok(Verdict::Pass);
        }

        let mismatches: Vec<String> = count_mismatches(catalog, brute_force)
            .into_iter()
            .map(|m| format!("{}: {} by camera query, {} by tally", m.camera, m.left, m.right))
            .collect();
        Ok(Verdict::Fail(format!(
            "low distributions differ ({:?} vs {:?}); count mismatches: [{}]",
            low_catalog,
            low_brute_force,
            mismatches.join(", ")
        )))
    }
}

pub const CHECK_NAMES: [&str; 7] = [
    "photos_by_sol_amount",
    "photos_by_earth_date_amount",
    "formula_matches_api_earth_date",
    "sol_and_earth_date_photos_equal",
    "camera_distribution_balanced",
    "brute_force_distribution_balanced",
    "low_distribution_strategies_agree",
];

fn expect_amount(actual: usize, expected: usize) -> Verdict {
    if actual == expected {
        Verdict::Pass
    } else {
        Verdict::Fail(format!("expected {} photos, got {}", expected, actual))
    }
}

fn outcome(name: &'static str, result: RoverResult<Verdict>) -> CheckOutcome {
    let verdict = result.unwrap_or_else(|e| Verdict::Fail(e.to_string()));
    CheckOutcome { name, verdict }
}
