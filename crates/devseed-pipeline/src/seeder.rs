use tracing::{error, info};

use devseed_core::error::Result;
use devseed_core::traits::{IdentityAdmin, TableWriter};
use devseed_core::types::UserFixture;
use devseed_embed::{embed_venture, EmbedProvider};

use crate::tables;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFailure {
    pub email: String,
    pub message: String,
}

/// Outcome of a run. `processed` counts every fixture attempted, whether or
/// not it seeded cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: Vec<SeedFailure>,
}

pub struct Seeder<I, W, E> where I: IdentityAdmin, W: TableWriter, E: EmbedProvider {
    identity: I,
    db: W,
    embedder: E,
    embeddings: bool,
}

impl<I, W, E> Seeder<I, W, E> where I: IdentityAdmin, W: TableWriter, E: EmbedProvider {
    pub fn new(identity: I, db: W, embedder: E) -> Self { Self { identity, db, embedder, embeddings: true } }

    /// Skip venture embeddings entirely (no embedding API calls, no
    /// `embeddings` rows).
    pub fn without_embeddings(mut self) -> Self { self.embeddings = false; self }

    /// Seed one user: resolve the auth user, stamp its id into every
    /// section, then write profile, ventures (and their embeddings),
    /// cofounder preferences and settings in that order. Stops at the first
    /// failure; rows already written stay written.
    pub async fn seed_user(&self, fixture: &mut UserFixture) -> Result<String> {
        let user_id = self
            .identity
            .get_or_create_user(&fixture.email, Some(fixture.password_or_default()), fixture.user_metadata())
            .await?;
        fixture.assign_user_id(&user_id);

        if let Some(profile) = &fixture.profile {
            tables::upsert_profile(&self.db, profile).await?;
        }

        if let Some(ventures) = fixture.ventures.as_deref().filter(|v| !v.is_empty()) {
            let rows = tables::upsert_ventures(&self.db, ventures).await?;
            if self.embeddings {
                for row in &rows {
                    let record = embed_venture(&user_id, row, &self.embedder).await?;
                    tables::upsert_embedding(&self.db, &record).await?;
                }
                info!(count = rows.len(), "venture embedding(s) upserted");
            }
        }

        if let Some(prefs) = fixture.cofounder_preferences.as_deref().filter(|p| !p.is_empty()) {
            tables::upsert_cofounder_preferences(&self.db, prefs).await?;
        }

        if let Some(settings) = &fixture.user_settings {
            tables::upsert_user_settings(&self.db, settings).await?;
        }

        info!(email = %fixture.email, "user seeded successfully");
        Ok(user_id)
    }

    /// Seed every fixture in order. A failing user is logged and skipped;
    /// only a credential rejection (see `Error::is_fatal`) stops the run.
    pub async fn seed_all(&self, fixtures: Vec<UserFixture>) -> Result<SeedReport> {
        let mut report = SeedReport::default();
        self.seed_into(fixtures, &mut report).await?;
        Ok(report)
    }

    /// Like [`Seeder::seed_all`], but tallies into a caller-owned report so
    /// the partial outcome is still available after a fatal error. The user
    /// that hit the fatal error is recorded in `failed` before returning.
    pub async fn seed_into(&self, fixtures: Vec<UserFixture>, report: &mut SeedReport) -> Result<()> {
        for mut fixture in fixtures {
            report.processed += 1;
            info!(email = %fixture.email, "seeding user");
            match self.seed_user(&mut fixture).await {
                Ok(_) => report.succeeded += 1,
                Err(e) => {
                    let message = error_chain(&e);
                    error!(email = %fixture.email, error = %message, "error seeding user");
                    report.failed.push(SeedFailure { email: fixture.email, message });
                    if e.is_fatal() {
                        return Err(e);
                    }
                }
            }
        }
        Ok(())
    }
}

fn error_chain(e: &dyn std::error::Error) -> String {
    let mut out = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
