use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;
use umbrella_core::{Config, ConfigError, Outcome, Providers, providers_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "umbrella",
    version,
    about = "Tells you whether to pack an umbrella or sunscreen today"
)]
pub struct Cli {
    /// What to check for: "rain" or "shine".
    pub mode: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Ignored when RUST_LOG is set.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log to stderr so stdout only carries the recommendation.
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let outcome = self.check(Config::from_env, providers_from_config).await?;

        for line in outcome.lines() {
            println!("{line}");
        }

        Ok(())
    }

    /// Load config, build the providers from it, then run the check.
    /// Nothing touches the network until config has loaded.
    async fn check<C, P>(&self, load_config: C, build_providers: P) -> anyhow::Result<Outcome>
    where
        C: FnOnce() -> Result<Config, ConfigError>,
        P: FnOnce(&Config) -> Providers,
    {
        let config = load_config()?;
        tracing::debug!(?config, "Configuration loaded");

        let providers = build_providers(&config);
        umbrella_core::check_weather(
            &self.mode,
            providers.location.as_ref(),
            providers.forecast.as_ref(),
        )
        .await
    }
}
