use log::{error, info};
use std::process::ExitCode;

use rover_photo_check::checks::CheckSuite;
use rover_photo_check::config::{Config, DEMO_KEY};
use rover_photo_check::RoverClient;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env()?;

    info!("API: {}", config.api.base_url);
    if config.api.api_key == DEMO_KEY {
        info!("Using {} (rate limited), set ROVER_CHECK_API_KEY to use your own key", DEMO_KEY);
    }

    let client = RoverClient::new(&config.api);
    let outcomes = CheckSuite::new(&client, &config.check).run();

    let failed = outcomes.iter().filter(|o| !o.passed()).count();
    for outcome in &outcomes {
        if outcome.passed() {
            info!("{}", outcome);
        } else {
            error!("{}", outcome);
        }
    }

    info!("Ran {} checks, {} failed", outcomes.len(), failed);

    if failed == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
