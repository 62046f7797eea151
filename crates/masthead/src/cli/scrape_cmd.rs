//! `masthead scrape <url>`: scrape one outlet's staff pages.

use crate::cli::output::{self, Styled};
use crate::pipeline::Pipeline;
use anyhow::Result;

pub async fn run(pipeline: &Pipeline, outlet_url: &str, tenant_id: &str) -> Result<()> {
    let s = Styled::new();
    if !output::is_quiet() && !output::is_json() {
        eprintln!("  Scraping {outlet_url}...");
        eprintln!();
    }

    let report = pipeline.scrape_outlet(outlet_url, tenant_id).await?;

    if output::is_json() {
        output::print_json(&serde_json::to_value(&report)?);
        return Ok(());
    }

    let meta = &report.scraping_metadata;
    output::print_section(&s, &format!("{} ({})", report.outlet_name, report.outlet_url));
    for contact in &report.contacts_found {
        let c = &contact.candidate;
        let label = match &c.title {
            Some(title) => format!("{} - {title}", c.name),
            None => c.name.clone(),
        };
        let sym = if contact.created { s.ok_sym() } else { s.info_sym() };
        output::print_check(sym, &label, c.email.as_deref().unwrap_or("-"));
    }
    if report.contacts_found.is_empty() {
        eprintln!("    {} no contacts found", s.warn_sym());
    }
    eprintln!();
    eprintln!(
        "  {} pages scraped ({} failed), {} created, {} updated, {} duplicates in {}",
        meta.pages_scraped,
        meta.pages_failed,
        s.green(&meta.contacts_created.to_string()),
        meta.contacts_updated,
        meta.duplicates_removed,
        output::format_millis(meta.duration_ms)
    );
    Ok(())
}
