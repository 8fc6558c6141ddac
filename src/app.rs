//! One assign run, from database initialization to the printed result.
//!
//! Shared by the binary and the integration tests.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::db::Database;
use crate::services::{AssignReport, ImageAssigner};

/// List the media directory, initialize the database, run the assigner
/// against the car table and release the pool.
///
/// The missing-directory notice is written to `out` before the database is
/// touched, so it is printed even when the connection then fails.
pub async fn run<W: Write>(config: &Config, out: &mut W) -> Result<AssignReport> {
    let assigner = ImageAssigner::new(config.assigner_config());
    let scanned = assigner.scan().context("Image assignment failed")?;
    if scanned.is_none() {
        writeln!(out, "{}", assigner.missing_notice())?;
    }

    let db = Database::connect(&config.database_url, config.database_create_if_missing).await?;
    let outcome = assigner.assign(scanned, &db.cars()).await;
    db.close().await;

    let report = outcome.context("Image assignment failed")?;
    info!(updated = report.updated, "Run finished");

    for line in render_summary(&report, config.json_report)? {
        writeln!(out, "{}", line)?;
    }
    Ok(report)
}

/// Lines written to stdout once a run has finished
pub fn render_summary(report: &AssignReport, json: bool) -> Result<Vec<String>> {
    let mut lines = vec![report.summary_line()];
    if json {
        lines.push(serde_json::to_string_pretty(report).context("Failed to serialize report")?);
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::Assignment;

    fn report(updated: usize) -> AssignReport {
        AssignReport {
            media_dir: "media/car/images".to_string(),
            directory_found: true,
            candidates: updated,
            collisions: 0,
            records_scanned: updated,
            updated,
            dry_run: false,
            assignments: (0..updated)
                .map(|i| Assignment {
                    record_id: i as i64 + 1,
                    name: format!("car {}", i),
                    image: format!("car/images/car {}.jpg", i),
                    previous: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_render_summary_only() {
        let lines = render_summary(&report(0), false).unwrap();
        assert_eq!(lines, vec!["Updated images for 0 cars".to_string()]);
    }

    #[test]
    fn test_render_json_report() {
        let lines = render_summary(&report(1), true).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Updated images for 1 cars");

        let value: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(value["updated"], 1);
        assert_eq!(value["assignments"][0]["image"], "car/images/car 0.jpg");
    }
}
