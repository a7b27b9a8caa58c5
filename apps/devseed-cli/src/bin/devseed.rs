use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use devseed_core::config::{expand_path, Settings};
use devseed_core::fixtures::load_user_profiles;
use devseed_embed::OpenAiProvider;
use devseed_pipeline::{SeedReport, Seeder};
use devseed_supabase::{GoTrueAdmin, PostgrestClient};

/// Seed the development database with fixture users, their profiles,
/// ventures, cofounder preferences and settings, plus venture embeddings.
#[derive(Parser, Debug)]
#[command(name = "devseed", version)]
struct Cli {
    /// Directory holding one YAML fixture per user
    #[arg(long, env = "DEVSEED_PROFILES_DIR", default_value = "dev-user-profiles")]
    profiles_dir: String,

    /// Where embedding API responses are cached between runs
    #[arg(long, env = "DEVSEED_CACHE_DIR", default_value = ".embedding_cache")]
    cache_dir: String,

    /// Env file to load instead of ./.env
    #[arg(long)]
    env_file: Option<String>,

    /// Write ventures without computing their embeddings
    #[arg(long)]
    skip_embeddings: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let env_file = cli.env_file.as_deref().map(expand_path);
    let settings = Settings::load(env_file.as_deref()).context("Error loading settings")?;

    info!("starting dev database seeding");
    info!(url = %settings.supabase_url, "supabase");
    info!(url = %settings.gotrue_url, "gotrue");

    let fixtures = load_user_profiles(&expand_path(&cli.profiles_dir))?;
    info!(count = fixtures.len(), "found user profile(s) to seed");

    let seeder = Seeder::new(
        GoTrueAdmin::new(&settings)?,
        PostgrestClient::new(&settings)?,
        OpenAiProvider::new(&settings, &expand_path(&cli.cache_dir))?,
    );
    let seeder = if cli.skip_embeddings { seeder.without_embeddings() } else { seeder };

    let mut report = SeedReport::default();
    let outcome = seeder.seed_into(fixtures, &mut report).await;
    for failure in &report.failed {
        warn!(email = %failure.email, error = %failure.message, "user not seeded");
    }
    match outcome {
        Ok(()) => {
            info!(processed = report.processed, succeeded = report.succeeded, "seeding completed");
            Ok(())
        }
        Err(e) => {
            error!(processed = report.processed, succeeded = report.succeeded, "seeding aborted");
            Err(anyhow::Error::new(e).context("seeding aborted"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_usual_layout() {
        let cli = Cli::try_parse_from(["devseed"]).unwrap();
        assert_eq!(cli.profiles_dir, "dev-user-profiles");
        assert_eq!(cli.cache_dir, ".embedding_cache");
        assert!(cli.env_file.is_none());
        assert!(!cli.skip_embeddings);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "devseed",
            "--profiles-dir",
            "fixtures/users",
            "--env-file",
            ".env.local",
            "--skip-embeddings",
        ])
        .unwrap();
        assert_eq!(cli.profiles_dir, "fixtures/users");
        assert_eq!(cli.env_file.as_deref(), Some(".env.local"));
        assert!(cli.skip_embeddings);
    }
}
