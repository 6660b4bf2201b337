use std::env;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Simulated CV-processing delay in milliseconds
    /// Default: 2000 (the 2-second "AI analysis" of the upload flow)
    pub upload_delay_ms: u64,

    /// Simulated job-posting delay in milliseconds
    /// Default: 3000
    pub posting_delay_ms: u64,

    /// Directory for rolling log files
    /// Default: logs
    pub log_dir: String,

    /// Whether to seed demo resumes and jobs at startup
    /// Default: true
    pub seed_demo_data: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// All variables are optional:
    /// - UPLOAD_DELAY_MS: simulated CV-processing delay (default: 2000)
    /// - POSTING_DELAY_MS: simulated job-posting delay (default: 3000)
    /// - LOG_DIR: log file directory (default: "logs")
    /// - SEED_DEMO_DATA: seed sample data at startup (default: true)
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let upload_delay_ms = parse_millis("UPLOAD_DELAY_MS", 2000)?;
        let posting_delay_ms = parse_millis("POSTING_DELAY_MS", 3000)?;

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let seed_demo_data = match env::var("SEED_DEMO_DATA") {
            Err(_) => true,
            Ok(value) => value
                .parse()
                .map_err(|_| format!("SEED_DEMO_DATA must be true or false, got '{}'", value))?,
        };

        Ok(Config {
            upload_delay_ms,
            posting_delay_ms,
            log_dir,
            seed_demo_data,
        })
    }
}

fn parse_millis(name: &str, default: u64) -> Result<u64, String> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(value) => value
            .parse()
            .map_err(|_| format!("{} must be a number of milliseconds, got '{}'", name, value)),
    }
}
