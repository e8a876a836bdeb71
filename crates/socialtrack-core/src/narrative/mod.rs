//! The narrative-generation boundary.
//!
//! The report carries a free-text strategy observation. Generation is an
//! external collaborator behind the [`NarrativeGenerator`] trait; failures
//! at that boundary never reach the month record -- callers go through
//! [`observation_or_fallback`], which substitutes a fixed fallback string.
//!
//! The bundled [`TemplateNarrative`] generator is deterministic and
//! offline: it writes the observation from completion bands and the
//! activity mix.

use anyhow::Result;
use async_trait::async_trait;

use crate::stats::DashboardStats;

/// Observation used when the generator fails.
pub const FALLBACK_OBSERVATION: &str =
    "No automated analysis is available for this period. Activity was recorded \
     as shown in the summary table.";

/// Adapter interface for producing the monthly strategy observation.
///
/// Object-safe so the UI layer can hold a `Box<dyn NarrativeGenerator>`.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Human-readable name for this generator.
    fn name(&self) -> &str;

    /// Produce an observation for the given stats and period label.
    async fn generate(&self, stats: &DashboardStats, month_name: &str) -> Result<String>;
}

/// Run a generator, substituting [`FALLBACK_OBSERVATION`] on failure.
///
/// The failure is logged at warn level; no error propagates to the caller.
pub async fn observation_or_fallback(
    generator: &dyn NarrativeGenerator,
    stats: &DashboardStats,
    month_name: &str,
) -> String {
    match generator.generate(stats, month_name).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(generator = generator.name(), error = %e, "narrative generation failed");
            FALLBACK_OBSERVATION.to_string()
        }
    }
}

// ---------------------------------------------------------------------------

/// Deterministic, offline observation generator.
pub struct TemplateNarrative;

#[async_trait]
impl NarrativeGenerator for TemplateNarrative {
    fn name(&self) -> &str {
        "template"
    }

    async fn generate(&self, stats: &DashboardStats, month_name: &str) -> Result<String> {
        let opening = match stats.progress_percentage {
            100.. => format!(
                "{month_name} closed at full compliance: every deliverable in the \
                 plan was completed."
            ),
            75..=99 => format!(
                "{month_name} closed at {}% compliance, with the bulk of the plan \
                 delivered on schedule.",
                stats.progress_percentage
            ),
            40..=74 => format!(
                "{month_name} reached {}% compliance; delivery was steady but left \
                 room on the content calendar.",
                stats.progress_percentage
            ),
            1..=39 => format!(
                "{month_name} closed at {}% compliance; execution fell well short \
                 of the plan and needs attention next period.",
                stats.progress_percentage
            ),
            0 => format!("No tracked activity was completed in {month_name}."),
        };

        let mut parts = vec![opening];

        parts.push(format!(
            "Feed publications stand at {} of {}.",
            stats.posts_completed, stats.total_posts
        ));

        if stats.total_reels > 0 {
            if stats.reels_completed >= stats.total_reels {
                parts.push("The full reel quota was delivered.".to_string());
            } else {
                parts.push(format!(
                    "Reels stand at {} of {}; prioritizing the remaining short-form \
                     video would lift reach.",
                    stats.reels_completed, stats.total_reels
                ));
            }
        }

        let engagement = stats.stories_total + stats.comments_total;
        if engagement > 0 {
            parts.push(format!(
                "Audience engagement stayed active with {} stories and {} comment \
                 replies.",
                stats.stories_total, stats.comments_total
            ));
        } else {
            parts.push(
                "No stories or comment replies were recorded; adding even light \
                 engagement activity would improve the account's presence."
                    .to_string(),
            );
        }

        Ok(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(pct: u8) -> DashboardStats {
        DashboardStats {
            posts_completed: 6,
            total_posts: 12,
            reels_completed: 1,
            total_reels: 2,
            stories_total: 3,
            comments_total: 0,
            progress_percentage: pct,
        }
    }

    #[tokio::test]
    async fn template_mentions_period_and_counts() {
        let text = TemplateNarrative.generate(&stats(55), "March 2026").await.unwrap();
        assert!(text.contains("March 2026"), "missing period: {text}");
        assert!(text.contains("6 of 12"), "missing post counts: {text}");
        assert!(text.contains("1 of 2"), "missing reel counts: {text}");
    }

    #[tokio::test]
    async fn template_is_deterministic() {
        let a = TemplateNarrative.generate(&stats(80), "April 2026").await.unwrap();
        let b = TemplateNarrative.generate(&stats(80), "April 2026").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn zero_activity_gets_the_empty_band() {
        let s = DashboardStats {
            total_posts: 8,
            ..DashboardStats::default()
        };
        let text = TemplateNarrative.generate(&s, "May 2026").await.unwrap();
        assert!(text.contains("No tracked activity"), "unexpected: {text}");
    }

    #[tokio::test]
    async fn failing_generator_falls_back() {
        struct Failing;

        #[async_trait]
        impl NarrativeGenerator for Failing {
            fn name(&self) -> &str {
                "failing"
            }
            async fn generate(&self, _: &DashboardStats, _: &str) -> Result<String> {
                anyhow::bail!("boom")
            }
        }

        let text = observation_or_fallback(&Failing, &stats(10), "June 2026").await;
        assert_eq!(text, FALLBACK_OBSERVATION);
    }
}
