use std::env;
use std::time::Duration;

/// Rate-limited key accepted by the API without signing up
pub const DEMO_KEY: &str = "DEMO_KEY";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: DEMO_KEY.to_string(),
            base_url: "https://api.nasa.gov".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub rover: String,
    pub sol: u32,
    /// Number of leading photos compared between the sol and Earth date listings
    pub amount: usize,
    /// A camera is flagged when the busiest camera took this many times more photos
    pub threshold: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub check: CheckConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_key = var("ROVER_CHECK_API_KEY", DEMO_KEY);
        let api_key = if api_key.trim().is_empty() {
            DEMO_KEY.to_string()
        } else {
            api_key
        };

        Ok(Config {
            api: ApiConfig {
                api_key,
                base_url: var("ROVER_CHECK_BASE_URL", "https://api.nasa.gov"),
                timeout: Duration::from_secs(var("ROVER_CHECK_TIMEOUT_SECS", "30").parse()?),
            },
            check: CheckConfig {
                rover: var("ROVER_CHECK_ROVER", "curiosity"),
                sol: var("ROVER_CHECK_SOL", "1000").parse()?,
                amount: var("ROVER_CHECK_AMOUNT", "10").parse()?,
                threshold: var("ROVER_CHECK_THRESHOLD", "10").parse()?,
            },
        })
    }
}
