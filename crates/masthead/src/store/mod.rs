//! Persistence seam for outlets and contacts.
//!
//! Every operation is scoped by tenant; nothing reads across tenants.

pub mod sqlite;
pub mod types;

use anyhow::Result;
pub use types::*;

/// Keyed upsert and scoped select over outlets and contacts.
pub trait ContactStore: Send + Sync {
    fn find_outlet_by_url(&self, tenant_id: &str, url: &str) -> Result<Option<Outlet>>;

    fn get_outlet(&self, tenant_id: &str, outlet_id: &str) -> Result<Option<Outlet>>;

    /// Insert an outlet unless one already exists for tenant+url.
    /// Returns the stored record either way.
    fn insert_outlet_if_absent(&self, outlet: &Outlet) -> Result<Outlet>;

    /// Set the display name. Only called once a name has been resolved.
    fn set_outlet_name(&self, tenant_id: &str, outlet_id: &str, name: &str) -> Result<()>;

    /// Upsert a scraped contact keyed by tenant+email, or by
    /// tenant+outlet+name when there is no email. An emailed contact with no
    /// email match claims a same-name row that has no email yet.
    ///
    /// An existing record only has its empty descriptive fields filled. Its
    /// confidence score rises to the higher value until the first
    /// verification; after that only verification sets it.
    fn upsert_contact(&self, tenant_id: &str, contact: &NewContact) -> Result<(String, UpsertOutcome)>;

    fn get_contact(&self, tenant_id: &str, contact_id: &str) -> Result<Option<Contact>>;

    fn list_contacts(&self, tenant_id: &str, outlet_id: Option<&str>) -> Result<Vec<Contact>>;

    fn record_verification(
        &self,
        tenant_id: &str,
        contact_id: &str,
        update: &VerificationUpdate,
    ) -> Result<()>;

    fn record_intelligence(
        &self,
        tenant_id: &str,
        contact_id: &str,
        update: &IntelligenceUpdate,
    ) -> Result<()>;
}
