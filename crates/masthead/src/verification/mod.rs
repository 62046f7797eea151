//! Contact verification: four independent signals fused into one status.
//!
//! Each analyzer degrades to a neutral or zero block on failure, so a contact
//! only fails verification when it cannot be loaded or written back.

pub mod content;
pub mod email;
pub mod fusion;
pub mod influence;
pub mod social;
pub mod types;

use crate::batch::run_batches;
use crate::pipeline::Pipeline;
use crate::store::VerificationUpdate;
use anyhow::{anyhow, Result};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{info, warn};
pub use types::*;

impl Pipeline {
    /// Verify one contact and persist the outcome.
    pub async fn verify_contact(&self, contact_id: &str, tenant_id: &str) -> Result<VerificationResult> {
        let contact = self
            .store
            .get_contact(tenant_id, contact_id)?
            .ok_or_else(|| anyhow!("contact {contact_id} not found"))?;
        let outlet = match self.store.get_outlet(tenant_id, &contact.outlet_id) {
            Ok(outlet) => outlet,
            Err(e) => {
                warn!("outlet lookup for {contact_id} failed: {e:#}");
                None
            }
        };
        let full_name = contact.full_name();

        let (email, social, content, influence) = tokio::join!(
            email::verify_email(contact.email.as_deref(), self.mx.as_ref(), self.presence.as_ref()),
            social::verify_social(
                &self.http,
                &self.config.twitter_base,
                contact.twitter_handle.as_deref(),
                contact.linkedin_url.as_deref(),
            ),
            content::verify_content(
                self.search.as_ref(),
                &full_name,
                outlet.as_ref().map(|o| o.name.as_str()),
                Utc::now(),
            ),
            async { influence::assess_influence(&contact, outlet.as_ref()) },
        );

        let overall = fusion::fuse(&email, &social, &content, &influence, &self.config.thresholds, Utc::now());
        let result = VerificationResult {
            contact_id: contact.id.clone(),
            email_verification: email,
            social_verification: social,
            content_verification: content,
            influence_verification: influence,
            overall_verification: overall,
        };

        self.store.record_verification(
            tenant_id,
            contact_id,
            &VerificationUpdate {
                confidence_score: result.overall_verification.confidence_score,
                status: result.overall_verification.status,
                verified_at: result.overall_verification.verified_at,
                metadata: serde_json::to_value(&result)?,
            },
        )?;
        Ok(result)
    }

    /// Verify contacts in rate-limited batches.
    pub async fn verify_contacts(
        &self,
        contact_ids: &[String],
        tenant_id: &str,
    ) -> (Vec<VerificationResult>, VerificationSummary) {
        let policy = self.config.verification;
        info!("verifying {} contacts for tenant {tenant_id}", contact_ids.len());

        let run = run_batches(contact_ids.to_vec(), policy.batch_size, policy.cooldown, |id| async move {
            self.verify_contact(&id, tenant_id)
                .await
                .map_err(|e| e.context(format!("verifying {id}")))
        })
        .await;

        let mut results = Vec::new();
        for outcome in run.outcomes {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) => warn!("{e:#}"),
            }
        }

        let summary = summarize(&results, run.summary.requested, run.summary.failed, run.summary.batches);
        info!(
            "verification done: {} verified, {} failed, average confidence {:.1}",
            summary.verified_successfully, summary.failed, summary.average_confidence
        );
        (results, summary)
    }
}

fn summarize(
    results: &[VerificationResult],
    requested: usize,
    failed: usize,
    batches: usize,
) -> VerificationSummary {
    let mut status_counts = BTreeMap::new();
    for r in results {
        *status_counts
            .entry(r.overall_verification.status.to_string())
            .or_insert(0) += 1;
    }
    let average_confidence = if results.is_empty() {
        0.0
    } else {
        results
            .iter()
            .map(|r| r.overall_verification.confidence_score as f64)
            .sum::<f64>()
            / results.len() as f64
    };
    VerificationSummary {
        total_requested: requested,
        verified_successfully: results.len(),
        failed,
        batches,
        status_counts,
        average_confidence,
    }
}
