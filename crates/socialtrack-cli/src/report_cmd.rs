//! `strack report`, `strack sign` and `strack unsign`: the monthly report
//! and its client approval.

use std::path::Path;

use anyhow::{Context, Result};

use socialtrack_core::month::Command;
use socialtrack_core::narrative::{NarrativeGenerator, observation_or_fallback};
use socialtrack_core::stats::compute_stats;
use socialtrack_store::MonthStore;

use crate::export::{ReportDocument, TextRenderer};

/// Run the report command: print the month's report to stdout.
///
/// With `regenerate` set, the strategy observation is rewritten by the
/// generator and persisted before printing.
pub async fn run_report(
    store: &MonthStore,
    regenerate: bool,
    generator: &dyn NarrativeGenerator,
) -> Result<()> {
    let mut month = store.load();
    let stats = compute_stats(&month);

    if regenerate {
        month.ai_observation = observation_or_fallback(generator, &stats, &month.month_name).await;
        store.save(&month)?;
    } else if month.ai_observation.is_empty() && month.selected_plan.is_some() {
        // First view of the report: generate the observation once.
        month.ai_observation = observation_or_fallback(generator, &stats, &month.month_name).await;
        store.save(&month)?;
    }

    let doc = ReportDocument::build(&month, &stats)?;
    print!("{}", TextRenderer.render_string(&doc));
    Ok(())
}

/// Run the sign command: ingest a signature image file.
///
/// The image bytes are hex-encoded and stored as the opaque signature
/// payload; the core never interprets them.
pub fn run_sign(store: &MonthStore, image: &Path) -> Result<()> {
    let bytes = std::fs::read(image)
        .with_context(|| format!("failed to read signature image {}", image.display()))?;
    let payload = hex::encode(&bytes);

    let mut month = store.load();
    month
        .apply(Command::Sign(payload))
        .context("failed to record signature")?;
    store.save(&month)?;

    let signed_on = month
        .signature_date
        .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default();
    println!("Signature recorded ({} bytes) on {signed_on}.", bytes.len());
    Ok(())
}

/// Run the unsign command: clear the signature and its timestamp.
pub fn run_unsign(store: &MonthStore) -> Result<()> {
    let mut month = store.load();
    if !month.is_signed() {
        println!("The report is not signed.");
        return Ok(());
    }
    month
        .apply(Command::ClearSignature)
        .context("failed to clear signature")?;
    store.save(&month)?;
    println!("Signature cleared.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use socialtrack_core::catalog::PlanId;
    use socialtrack_core::narrative::TemplateNarrative;
    use socialtrack_test_utils::{month_with_plan, temp_store};

    #[test]
    fn sign_stores_the_hex_encoded_image() {
        let fixture = temp_store();
        fixture.store.save(&month_with_plan(PlanId::Basic)).unwrap();

        let tmp = tempfile::TempDir::new().unwrap();
        let image = tmp.path().join("signature.png");
        std::fs::write(&image, [0x89, 0x50, 0x4e, 0x47]).unwrap();

        run_sign(&fixture.store, &image).unwrap();
        let month = fixture.store.load();
        assert_eq!(month.client_signature.as_deref(), Some("89504e47"));
        assert!(month.signature_date.is_some());
    }

    #[test]
    fn sign_fails_on_a_missing_image() {
        let fixture = temp_store();
        let err = run_sign(&fixture.store, Path::new("/no/such/image.png")).unwrap_err();
        assert!(
            err.to_string().contains("failed to read signature image"),
            "unexpected error: {err}"
        );
        assert!(!fixture.store.load().is_signed());
    }

    #[test]
    fn unsign_clears_both_fields() {
        let fixture = temp_store();
        let mut month = month_with_plan(PlanId::Growth);
        month.apply(Command::Sign("cafe".into())).unwrap();
        fixture.store.save(&month).unwrap();

        run_unsign(&fixture.store).unwrap();
        let month = fixture.store.load();
        assert_eq!(month.client_signature, None);
        assert_eq!(month.signature_date, None);
    }

    #[tokio::test]
    async fn first_report_view_persists_an_observation() {
        let fixture = temp_store();
        fixture.store.save(&month_with_plan(PlanId::Growth)).unwrap();

        run_report(&fixture.store, false, &TemplateNarrative).await.unwrap();
        let month = fixture.store.load();
        assert!(!month.ai_observation.is_empty());
    }

    #[tokio::test]
    async fn regenerate_overwrites_the_observation() {
        let fixture = temp_store();
        let mut month = month_with_plan(PlanId::Growth);
        month.ai_observation = "stale text".into();
        fixture.store.save(&month).unwrap();

        run_report(&fixture.store, true, &TemplateNarrative).await.unwrap();
        let month = fixture.store.load();
        assert_ne!(month.ai_observation, "stale text");
    }
}
