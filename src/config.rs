use anyhow::Context;

pub(crate) const DEFAULT_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) api_base_url: String,
    pub(crate) request_timeout: std::time::Duration,
    /// Courtesy pause after every accepted story. The API has no published rate limit.
    pub(crate) delay: std::time::Duration,
    pub(crate) log_dir: String,
    pub(crate) log_to_console: bool,
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub(crate) fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_base_url =
            lookup("HN_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let request_timeout = match lookup("HN_REQUEST_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .with_context(|| format!("HN_REQUEST_TIMEOUT_SECS is not a number: {v}"))?,
            None => 10,
        };

        let delay = match lookup("HN_DELAY_SECS") {
            Some(v) => parse_delay(&v).context("Invalid HN_DELAY_SECS")?,
            None => std::time::Duration::from_secs(1),
        };

        let log_to_console = match lookup("LOG_TO_CONSOLE") {
            Some(v) => v
                .parse::<bool>()
                .with_context(|| format!("LOG_TO_CONSOLE must be true or false: {v}"))?,
            None => false,
        };

        Ok(Self {
            api_base_url,
            request_timeout: std::time::Duration::from_secs(request_timeout),
            delay,
            log_dir: lookup("HN_LOG_DIR").unwrap_or_else(|| "./log".to_string()),
            log_to_console,
        })
    }
}

/// Seconds as a float, e.g. `0.5`. Negative or non-finite values are rejected.
pub(crate) fn parse_delay(s: &str) -> anyhow::Result<std::time::Duration> {
    let secs: f64 = s
        .trim()
        .parse()
        .with_context(|| format!("Delay is not a number: {s}"))?;
    if !secs.is_finite() || secs < 0.0 {
        anyhow::bail!("Delay must be a non-negative number of seconds, got {s}");
    }
    Ok(std::time::Duration::from_secs_f64(secs))
}
