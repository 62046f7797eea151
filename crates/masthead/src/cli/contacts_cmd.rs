//! `masthead contacts`: list stored contacts for a tenant.

use crate::cli::output::{self, Styled};
use crate::pipeline::Pipeline;
use anyhow::Result;
use serde_json::json;

pub fn run(pipeline: &Pipeline, tenant_id: &str, outlet_id: Option<&str>) -> Result<()> {
    let s = Styled::new();
    let contacts = pipeline.store.list_contacts(tenant_id, outlet_id)?;

    if output::is_json() {
        output::print_json(&json!({ "count": contacts.len(), "contacts": contacts }));
        return Ok(());
    }

    if contacts.is_empty() {
        eprintln!("  No contacts for tenant {tenant_id}.");
        return Ok(());
    }
    output::print_section(&s, &format!("{} contacts", contacts.len()));
    for c in &contacts {
        let value = format!(
            "{:<32} {:>3} {}",
            c.email.as_deref().unwrap_or("-"),
            c.confidence_score,
            c.beat.as_deref().unwrap_or("")
        );
        output::print_check(s.status_sym(c.verification_status), &c.full_name(), &value);
    }
    Ok(())
}
