//! `masthead categorize`: run contact intelligence.

use crate::cli::output::{self, Styled};
use crate::pipeline::Pipeline;
use anyhow::Result;
use serde_json::json;

pub async fn run(pipeline: &Pipeline, contact_ids: &[String], tenant_id: &str) -> Result<()> {
    let s = Styled::new();
    let (processed, summary) = pipeline.categorize_contacts(contact_ids, tenant_id).await;

    if output::is_json() {
        output::print_json(&json!({
            "processed_contacts": processed,
            "summary": summary,
        }));
        return Ok(());
    }

    output::print_section(&s, "Intelligence");
    for intel in &processed {
        let cat = &intel.categorization;
        let mut beats = cat.primary_beat.clone();
        if !cat.secondary_beats.is_empty() {
            beats.push_str(&format!(" (+{})", cat.secondary_beats.join(", ")));
        }
        output::print_check(s.ok_sym(), &intel.contact_id, &beats);
        output::print_detail(&s.dim(&format!(
            "{} influence, {} local, best at {} {}",
            intel.influence_analysis.tier.as_str(),
            intel.geographic_analysis.local_influence_score,
            intel.communication_intelligence.preferred_contact_time,
            intel.geographic_analysis.timezone,
        )));
    }
    let failed = summary.failed;
    eprintln!();
    eprintln!(
        "  {}: {} of {} categorized{}",
        s.bold("Summary"),
        summary.successful,
        summary.processed,
        if failed > 0 { s.red(&format!(", {failed} failed")) } else { String::new() }
    );
    Ok(())
}
