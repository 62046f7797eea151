//! Contact intelligence: beat categorization plus five heuristic analyses,
//! merged into one record and written back in a single update.
//!
//! The analyses run concurrently, so the ones that depend on a beat or an
//! expertise score read the values stored by the previous run.

pub mod ai_client;
pub mod categorize;
pub mod communication;
pub mod content_format;
pub mod geography;
pub mod influence;
pub mod relationship;
pub mod types;

use crate::batch::run_batches;
use crate::pipeline::Pipeline;
use crate::store::IntelligenceUpdate;
use anyhow::{anyhow, Result};
use tracing::{info, warn};
pub use types::*;

impl Pipeline {
    /// Run every analysis for one contact and persist the merged result.
    pub async fn categorize_contact(&self, contact_id: &str, tenant_id: &str) -> Result<ContactIntelligence> {
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
        let outlet = outlet.as_ref();
        let stored_beat = contact.beat.as_deref().unwrap_or("general");
        let context = categorize::build_context(&contact, outlet);

        let (categorization, influence, geography, communication, formats, relationship) = tokio::join!(
            categorize::categorize(self.categorizer.as_deref(), &context),
            async { influence::analyze_influence(&contact, outlet, contact.expertise_score.unwrap_or(0)) },
            async { geography::analyze_geography(&contact) },
            async { communication::analyze_communication(&contact, outlet, stored_beat) },
            async { content_format::analyze_formats(&contact, outlet) },
            async { relationship::analyze_relationship(&contact, outlet, stored_beat) },
        );

        let intel = ContactIntelligence {
            contact_id: contact.id.clone(),
            categorization,
            influence_analysis: influence,
            geographic_analysis: geography,
            communication_intelligence: communication,
            content_formats: formats,
            relationship_insights: relationship,
        };

        self.store.record_intelligence(
            tenant_id,
            contact_id,
            &IntelligenceUpdate {
                beat: intel.categorization.primary_beat.clone(),
                secondary_beats: intel.categorization.secondary_beats.clone(),
                expertise_score: intel.categorization.confidence_score,
                relationship_score: intel.relationship_insights.relationship_score,
                preferred_contact_time: intel.communication_intelligence.preferred_contact_time.clone(),
                timezone: intel.geographic_analysis.timezone.clone(),
                blob: serde_json::to_value(&intel)?,
            },
        )?;
        Ok(intel)
    }

    /// Categorize contacts in rate-limited batches.
    pub async fn categorize_contacts(
        &self,
        contact_ids: &[String],
        tenant_id: &str,
    ) -> (Vec<ContactIntelligence>, IntelligenceSummary) {
        let policy = self.config.intelligence;
        info!("categorizing {} contacts for tenant {tenant_id}", contact_ids.len());

        let run = run_batches(contact_ids.to_vec(), policy.batch_size, policy.cooldown, |id| async move {
            self.categorize_contact(&id, tenant_id)
                .await
                .map_err(|e| e.context(format!("categorizing {id}")))
        })
        .await;

        let mut processed = Vec::new();
        for outcome in run.outcomes {
            match outcome {
                Ok(intel) => processed.push(intel),
                Err(e) => warn!("{e:#}"),
            }
        }

        let mut summary = IntelligenceSummary {
            processed: run.summary.requested,
            successful: processed.len(),
            failed: run.summary.failed,
            batches: run.summary.batches,
            ..Default::default()
        };
        for intel in &processed {
            *summary
                .beat_distribution
                .entry(intel.categorization.primary_beat.clone())
                .or_insert(0) += 1;
            *summary
                .influence_tiers
                .entry(intel.influence_analysis.tier.as_str().to_string())
                .or_insert(0) += 1;
        }
        if !processed.is_empty() {
            summary.average_confidence = processed
                .iter()
                .map(|i| i.categorization.confidence_score as f64)
                .sum::<f64>()
                / processed.len() as f64;
        }
        info!(
            "categorization done: {} of {} succeeded",
            summary.successful, summary.processed
        );
        (processed, summary)
    }
}
