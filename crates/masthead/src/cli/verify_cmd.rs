//! `masthead verify`: verify contacts and print their fused scores.

use crate::cli::output::{self, Styled};
use crate::pipeline::Pipeline;
use anyhow::Result;
use serde_json::json;

pub async fn run(pipeline: &Pipeline, contact_ids: &[String], tenant_id: &str) -> Result<()> {
    let s = Styled::new();
    let (results, summary) = pipeline.verify_contacts(contact_ids, tenant_id).await;

    if output::is_json() {
        output::print_json(&json!({
            "verified_contacts": results,
            "summary": summary,
        }));
        return Ok(());
    }

    output::print_section(&s, "Verification");
    for result in &results {
        let overall = &result.overall_verification;
        output::print_check(
            s.status_sym(overall.status),
            &result.contact_id,
            &format!("{} ({})", overall.confidence_score, overall.status),
        );
        for note in &overall.notes {
            output::print_detail(&s.dim(note));
        }
    }
    eprintln!();
    eprintln!(
        "  {}: {} of {} verified, {} failed, average confidence {:.1}",
        s.bold("Summary"),
        summary.verified_successfully,
        summary.total_requested,
        summary.failed,
        summary.average_confidence
    );
    Ok(())
}
