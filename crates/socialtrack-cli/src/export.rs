//! Report document assembly and export.
//!
//! Builds a [`ReportDocument`] snapshot of the current month and hands it to
//! a [`ReportRenderer`]. Actual PDF/DOCX typesetting is an external
//! collaborator concern; the bundled [`TextRenderer`] produces a plain-text
//! rendition that carries the full document content, and the artifact name
//! follows the `Report_<month>.<ext>` convention regardless of renderer.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use chrono::Utc;

use socialtrack_core::month::MonthData;
use socialtrack_core::stats::{DashboardStats, WeekActivity, compute_stats, weekly_activity};
use socialtrack_store::MonthStore;

// -----------------------------------------------------------------------
// Export format
// -----------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown export format: {0} (expected pdf or docx)")]
pub struct ExportFormatParseError(String);

impl FromStr for ExportFormat {
    type Err = ExportFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            other => Err(ExportFormatParseError(other.to_string())),
        }
    }
}

/// Artifact filename for a month: `Report_<month>.<ext>` with whitespace
/// runs in the month name collapsed to single underscores.
pub fn artifact_filename(month_name: &str, format: ExportFormat) -> String {
    let sanitized = month_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("Report_{}.{}", sanitized, format.extension())
}

// -----------------------------------------------------------------------
// Document model
// -----------------------------------------------------------------------

/// One line of the activity summary table.
#[derive(Debug)]
pub struct SummaryRow {
    pub activity: &'static str,
    /// `None` for activities with no contractual target.
    pub target: Option<u32>,
    pub done: u32,
    pub state: Option<&'static str>,
}

/// Signature block of a signed report.
#[derive(Debug)]
pub struct SignatureBlock {
    pub signed_on: String,
}

/// Renderer-independent snapshot of everything a monthly report shows.
#[derive(Debug)]
pub struct ReportDocument {
    pub month_name: String,
    pub plan_name: &'static str,
    pub issued_on: String,
    pub progress_percentage: u8,
    pub rows: Vec<SummaryRow>,
    pub weekly: Vec<WeekActivity>,
    pub observation: String,
    pub signature: Option<SignatureBlock>,
}

impl ReportDocument {
    /// Assemble a document from a month record with a selected plan.
    ///
    /// Returns an error when no plan is selected; there is nothing to
    /// report against without one.
    pub fn build(month: &MonthData, stats: &DashboardStats) -> Result<Self> {
        let Some(plan_id) = month.selected_plan else {
            bail!("no plan selected; run `strack plan select <plan>` first");
        };
        let config = plan_id.config();

        let post_state = if stats.posts_completed >= stats.total_posts {
            "Completed"
        } else {
            "In progress"
        };
        let mut rows = vec![SummaryRow {
            activity: "Feed posts",
            target: Some(stats.total_posts),
            done: stats.posts_completed,
            state: Some(post_state),
        }];
        if config.total_reels > 0 {
            let reel_state = if stats.reels_completed >= stats.total_reels {
                "Completed"
            } else {
                "In progress"
            };
            rows.push(SummaryRow {
                activity: "Reels",
                target: Some(stats.total_reels),
                done: stats.reels_completed,
                state: Some(reel_state),
            });
        }
        rows.push(SummaryRow {
            activity: "Stories",
            target: None,
            done: stats.stories_total,
            state: None,
        });
        rows.push(SummaryRow {
            activity: "Replies to comments",
            target: None,
            done: stats.comments_total,
            state: None,
        });

        let signature = month.signature_date.map(|date| SignatureBlock {
            signed_on: date.format("%Y-%m-%d %H:%M UTC").to_string(),
        });

        Ok(Self {
            month_name: month.month_name.clone(),
            plan_name: config.name,
            issued_on: Utc::now().format("%Y-%m-%d").to_string(),
            progress_percentage: stats.progress_percentage,
            rows,
            weekly: weekly_activity(month),
            observation: month.ai_observation.clone(),
            signature,
        })
    }
}

// -----------------------------------------------------------------------
// Renderers
// -----------------------------------------------------------------------

/// Turns a [`ReportDocument`] into artifact bytes.
pub trait ReportRenderer {
    fn render(&self, doc: &ReportDocument) -> Result<Vec<u8>>;
}

/// Plain-text renderer used until a typesetting backend is wired in.
pub struct TextRenderer;

impl TextRenderer {
    pub fn render_string(&self, doc: &ReportDocument) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let _ = writeln!(out, "=========================================");
        let _ = writeln!(out, " MONTHLY REPORT");
        let _ = writeln!(out, " Social Media Management");
        let _ = writeln!(out, "=========================================");
        let _ = writeln!(out, "Period: {}", doc.month_name);
        let _ = writeln!(out, "Plan:   {}", doc.plan_name);
        let _ = writeln!(out, "Issued: {}", doc.issued_on);
        let _ = writeln!(out, "Completion: {}%", doc.progress_percentage);
        let _ = writeln!(out);

        let _ = writeln!(out, "ACTIVITY SUMMARY");
        let _ = writeln!(
            out,
            "{:<22} {:>6} {:>6}  {}",
            "ACTIVITY", "TARGET", "DONE", "STATE"
        );
        for row in &doc.rows {
            let target = row
                .target
                .map_or_else(|| "-".to_string(), |t| t.to_string());
            let _ = writeln!(
                out,
                "{:<22} {:>6} {:>6}  {}",
                row.activity,
                target,
                row.done,
                row.state.unwrap_or("-"),
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "WEEKLY ACTIVITY");
        for week in &doc.weekly {
            let _ = writeln!(
                out,
                "Week {}: {} posts, {} stories, {} replies",
                week.week, week.posts_done, week.stories, week.comments
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "STRATEGY OBSERVATIONS");
        let _ = writeln!(out, "{}", doc.observation);
        let _ = writeln!(out);

        let _ = writeln!(out, "CLIENT APPROVAL");
        match &doc.signature {
            Some(sig) => {
                let _ = writeln!(out, "Signed digitally on {}", sig.signed_on);
            }
            None => {
                let _ = writeln!(out, "Pending client signature.");
            }
        }
        out
    }
}

impl ReportRenderer for TextRenderer {
    fn render(&self, doc: &ReportDocument) -> Result<Vec<u8>> {
        Ok(self.render_string(doc).into_bytes())
    }
}

// -----------------------------------------------------------------------
// Command entry point
// -----------------------------------------------------------------------

/// Run the export command: render the current month and write the artifact
/// into `output_dir`. Returns the path written.
pub fn run_export(
    store: &MonthStore,
    format: ExportFormat,
    output_dir: &Path,
) -> Result<PathBuf> {
    let month = store.load();
    let stats = compute_stats(&month);
    let doc = ReportDocument::build(&month, &stats)?;

    let renderer = TextRenderer;
    let bytes = renderer.render(&doc)?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    let path = output_dir.join(artifact_filename(&month.month_name, format));
    std::fs::write(&path, &bytes)
        .with_context(|| format!("failed to write report artifact to {}", path.display()))?;

    tracing::info!(path = %path.display(), format = %format, "report exported");
    Ok(path)
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use socialtrack_core::catalog::PlanId;
    use socialtrack_core::month::Command;
    use socialtrack_test_utils::{month_with_plan, temp_store};

    #[test]
    fn filename_replaces_whitespace_with_underscores() {
        assert_eq!(
            artifact_filename("March 2026", ExportFormat::Pdf),
            "Report_March_2026.pdf"
        );
        assert_eq!(
            artifact_filename("March 2026", ExportFormat::Docx),
            "Report_March_2026.docx"
        );
    }

    #[test]
    fn filename_collapses_whitespace_runs() {
        assert_eq!(
            artifact_filename("Early  Spring\t2026", ExportFormat::Pdf),
            "Report_Early_Spring_2026.pdf"
        );
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("docx".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
        assert!("odt".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn build_requires_a_selected_plan() {
        let month = MonthData::pristine_named("March 2026".into());
        let stats = compute_stats(&month);
        let err = ReportDocument::build(&month, &stats).unwrap_err();
        assert!(
            err.to_string().contains("no plan selected"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn basic_plan_document_has_no_reel_row() {
        let month = month_with_plan(PlanId::Basic);
        let stats = compute_stats(&month);
        let doc = ReportDocument::build(&month, &stats).unwrap();
        assert!(doc.rows.iter().all(|r| r.activity != "Reels"));
    }

    #[test]
    fn text_rendition_carries_the_document_content() {
        let mut month = month_with_plan(PlanId::Growth);
        month.apply(Command::TogglePost { week: 1, slot: 0 }).unwrap();
        month.ai_observation = "steady cadence in week one".into();
        let stats = compute_stats(&month);
        let doc = ReportDocument::build(&month, &stats).unwrap();

        let text = TextRenderer.render_string(&doc);
        assert!(text.contains("Brand Growth"));
        assert!(text.contains("steady cadence in week one"));
        assert!(text.contains("Pending client signature."));
    }

    #[test]
    fn export_writes_the_conventional_filename() {
        let fixture = temp_store();
        let month = month_with_plan(PlanId::Basic);
        fixture.store.save(&month).unwrap();

        let out = tempfile::TempDir::new().unwrap();
        let path = run_export(&fixture.store, ExportFormat::Pdf, out.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "Report_Fixture_Month.pdf"
        );
        assert!(path.exists());
    }

    #[test]
    fn export_without_a_plan_fails() {
        let fixture = temp_store();
        let out = tempfile::TempDir::new().unwrap();
        let err = run_export(&fixture.store, ExportFormat::Pdf, out.path()).unwrap_err();
        assert!(err.to_string().contains("no plan selected"));
    }
}
