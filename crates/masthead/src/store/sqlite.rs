//! SQLite-backed contact store.

use super::types::*;
use super::ContactStore;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS outlets (
    id TEXT PRIMARY KEY,
    tenant_id TEXT NOT NULL,
    url TEXT NOT NULL,
    name TEXT NOT NULL,
    outlet_type TEXT NOT NULL,
    category TEXT NOT NULL,
    discovery_method TEXT NOT NULL,
    verification_status TEXT NOT NULL DEFAULT 'pending',
    domain_authority INTEGER,
    monthly_traffic INTEGER,
    created_at TEXT NOT NULL,
    UNIQUE (tenant_id, url)
);

CREATE TABLE IF NOT EXISTS contacts (
    id TEXT PRIMARY KEY,
    tenant_id TEXT NOT NULL,
    outlet_id TEXT NOT NULL REFERENCES outlets(id),
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT,
    title TEXT,
    bio TEXT,
    image_url TEXT,
    profile_url TEXT,
    twitter_handle TEXT,
    linkedin_url TEXT,
    personal_website TEXT,
    location TEXT,
    confidence_score INTEGER NOT NULL DEFAULT 0,
    verification_status TEXT NOT NULL DEFAULT 'pending',
    last_verified_at TEXT,
    verification_metadata TEXT,
    beat TEXT,
    secondary_beats TEXT,
    expertise_score INTEGER,
    relationship_score INTEGER,
    preferred_contact_time TEXT,
    timezone TEXT,
    ai_intelligence TEXT,
    response_rate REAL,
    avg_response_time_hours REAL,
    total_pitches INTEGER NOT NULL DEFAULT 0,
    successful_pitches INTEGER NOT NULL DEFAULT 0,
    interaction_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_contacts_tenant_email ON contacts (tenant_id, email);
CREATE INDEX IF NOT EXISTS idx_contacts_tenant_outlet ON contacts (tenant_id, outlet_id);
";

const CONTACT_COLUMNS: &str = "id, tenant_id, outlet_id, first_name, last_name, email, title, bio,
    image_url, profile_url, twitter_handle, linkedin_url, personal_website, location,
    confidence_score, verification_status, last_verified_at, verification_metadata,
    beat, secondary_beats, expertise_score, relationship_score, preferred_contact_time,
    timezone, ai_intelligence, response_rate, avg_response_time_hours, total_pitches,
    successful_pitches, interaction_count, created_at, updated_at";

const OUTLET_COLUMNS: &str = "id, tenant_id, url, name, outlet_type, category, discovery_method,
    verification_status, domain_authority, monthly_traffic, created_at";

/// Contact store in a single SQLite database.
pub struct SqliteStore {
    db: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let db = Connection::open(path)
            .with_context(|| format!("failed to open store: {}", path.display()))?;
        Self::init(db)
    }

    /// A private in-memory store, used by tests and one-off CLI runs.
    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory().context("failed to open in-memory store")?;
        Self::init(db)
    }

    fn init(db: Connection) -> Result<Self> {
        db.execute_batch(SCHEMA)
            .context("failed to create store tables")?;
        Ok(Self { db: Mutex::new(db) })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db.lock().map_err(|_| anyhow!("store connection lock poisoned"))
    }

    /// Set engagement history for a contact. The CRM owns these fields;
    /// exposed for imports and tests.
    pub fn set_engagement(&self, tenant_id: &str, contact_id: &str, e: &Engagement) -> Result<()> {
        self.conn()?.execute(
            "UPDATE contacts SET response_rate = ?3, avg_response_time_hours = ?4,
                 total_pitches = ?5, successful_pitches = ?6, interaction_count = ?7
             WHERE tenant_id = ?1 AND id = ?2",
            params![
                tenant_id,
                contact_id,
                e.response_rate,
                e.avg_response_time_hours,
                e.total_pitches,
                e.successful_pitches,
                e.interaction_count
            ],
        )?;
        Ok(())
    }

    /// Set outlet ranking data supplied by an external source.
    pub fn set_outlet_metrics(
        &self,
        tenant_id: &str,
        outlet_id: &str,
        domain_authority: Option<u8>,
        monthly_traffic: Option<u64>,
    ) -> Result<()> {
        self.conn()?.execute(
            "UPDATE outlets SET domain_authority = ?3, monthly_traffic = ?4
             WHERE tenant_id = ?1 AND id = ?2",
            params![
                tenant_id,
                outlet_id,
                domain_authority,
                monthly_traffic.map(|t| t.min(i64::MAX as u64) as i64)
            ],
        )?;
        Ok(())
    }

    /// Set a contact's location.
    pub fn set_location(&self, tenant_id: &str, contact_id: &str, location: &str) -> Result<()> {
        self.conn()?.execute(
            "UPDATE contacts SET location = ?3 WHERE tenant_id = ?1 AND id = ?2",
            params![tenant_id, contact_id, location],
        )?;
        Ok(())
    }

    fn existing_contact_id(
        db: &Connection,
        tenant_id: &str,
        contact: &NewContact,
    ) -> Result<Option<String>> {
        if let Some(email) = &contact.email {
            let by_email: Option<String> = db
                .query_row(
                    "SELECT id FROM contacts WHERE tenant_id = ?1 AND lower(email) = lower(?2)
                     ORDER BY created_at LIMIT 1",
                    params![tenant_id, email],
                    |row| row.get(0),
                )
                .optional()?;
            if by_email.is_some() {
                return Ok(by_email);
            }
        }
        // A same-name row without an address is the same person seen earlier
        // without one; the update fills the address in.
        let email_clause = if contact.email.is_some() {
            " AND email IS NULL"
        } else {
            ""
        };
        let id = db
            .query_row(
                &format!(
                    "SELECT id FROM contacts
                     WHERE tenant_id = ?1 AND outlet_id = ?2
                       AND lower(first_name) = lower(?3) AND lower(last_name) = lower(?4){email_clause}
                     ORDER BY created_at LIMIT 1"
                ),
                params![
                    tenant_id,
                    contact.outlet_id,
                    contact.first_name,
                    contact.last_name
                ],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }
}

impl ContactStore for SqliteStore {
    fn find_outlet_by_url(&self, tenant_id: &str, url: &str) -> Result<Option<Outlet>> {
        let db = self.conn()?;
        let outlet = db
            .query_row(
                &format!("SELECT {OUTLET_COLUMNS} FROM outlets WHERE tenant_id = ?1 AND url = ?2"),
                params![tenant_id, url],
                row_to_outlet,
            )
            .optional()?;
        Ok(outlet)
    }

    fn get_outlet(&self, tenant_id: &str, outlet_id: &str) -> Result<Option<Outlet>> {
        let db = self.conn()?;
        let outlet = db
            .query_row(
                &format!("SELECT {OUTLET_COLUMNS} FROM outlets WHERE tenant_id = ?1 AND id = ?2"),
                params![tenant_id, outlet_id],
                row_to_outlet,
            )
            .optional()?;
        Ok(outlet)
    }

    fn insert_outlet_if_absent(&self, outlet: &Outlet) -> Result<Outlet> {
        {
            let db = self.conn()?;
            db.execute(
                "INSERT OR IGNORE INTO outlets (id, tenant_id, url, name, outlet_type, category,
                     discovery_method, verification_status, domain_authority, monthly_traffic,
                     created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    outlet.id,
                    outlet.tenant_id,
                    outlet.url,
                    outlet.name,
                    outlet.outlet_type,
                    outlet.category,
                    outlet.discovery_method,
                    outlet.verification_status,
                    outlet.domain_authority,
                    outlet.monthly_traffic.map(|t| t.min(i64::MAX as u64) as i64),
                    outlet.created_at.to_rfc3339(),
                ],
            )
            .context("failed to insert outlet")?;
        }
        self.find_outlet_by_url(&outlet.tenant_id, &outlet.url)?
            .ok_or_else(|| anyhow!("outlet {} vanished after insert", outlet.url))
    }

    fn set_outlet_name(&self, tenant_id: &str, outlet_id: &str, name: &str) -> Result<()> {
        self.conn()?.execute(
            "UPDATE outlets SET name = ?3 WHERE tenant_id = ?1 AND id = ?2",
            params![tenant_id, outlet_id, name],
        )?;
        Ok(())
    }

    fn upsert_contact(&self, tenant_id: &str, contact: &NewContact) -> Result<(String, UpsertOutcome)> {
        let db = self.conn()?;
        let now = Utc::now().to_rfc3339();

        if let Some(id) = Self::existing_contact_id(&db, tenant_id, contact)? {
            db.execute(
                "UPDATE contacts SET
                     email = COALESCE(email, ?3),
                     title = COALESCE(title, ?4),
                     bio = COALESCE(bio, ?5),
                     image_url = COALESCE(image_url, ?6),
                     profile_url = COALESCE(profile_url, ?7),
                     twitter_handle = COALESCE(twitter_handle, ?8),
                     linkedin_url = COALESCE(linkedin_url, ?9),
                     personal_website = COALESCE(personal_website, ?10),
                     beat = COALESCE(beat, ?11),
                     confidence_score = CASE WHEN last_verified_at IS NULL
                         THEN MAX(confidence_score, ?12) ELSE confidence_score END,
                     updated_at = ?13
                 WHERE tenant_id = ?1 AND id = ?2",
                params![
                    tenant_id,
                    id,
                    contact.email,
                    contact.title,
                    contact.bio,
                    contact.image_url,
                    contact.profile_url,
                    contact.twitter_handle,
                    contact.linkedin_url,
                    contact.personal_website,
                    contact.beat,
                    contact.confidence_score,
                    now,
                ],
            )
            .context("failed to update contact")?;
            return Ok((id, UpsertOutcome::Updated));
        }

        let id = uuid::Uuid::new_v4().to_string();
        db.execute(
            "INSERT INTO contacts (id, tenant_id, outlet_id, first_name, last_name, email, title,
                 bio, image_url, profile_url, twitter_handle, linkedin_url, personal_website, beat,
                 confidence_score, verification_status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, 'pending',
                 ?16, ?16)",
            params![
                id,
                tenant_id,
                contact.outlet_id,
                contact.first_name,
                contact.last_name,
                contact.email,
                contact.title,
                contact.bio,
                contact.image_url,
                contact.profile_url,
                contact.twitter_handle,
                contact.linkedin_url,
                contact.personal_website,
                contact.beat,
                contact.confidence_score,
                now,
            ],
        )
        .context("failed to insert contact")?;
        Ok((id, UpsertOutcome::Created))
    }

    fn get_contact(&self, tenant_id: &str, contact_id: &str) -> Result<Option<Contact>> {
        let db = self.conn()?;
        let contact = db
            .query_row(
                &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE tenant_id = ?1 AND id = ?2"),
                params![tenant_id, contact_id],
                row_to_contact,
            )
            .optional()?;
        Ok(contact)
    }

    fn list_contacts(&self, tenant_id: &str, outlet_id: Option<&str>) -> Result<Vec<Contact>> {
        let db = self.conn()?;
        let mut stmt = db.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts
             WHERE tenant_id = ?1 AND (?2 IS NULL OR outlet_id = ?2)
             ORDER BY created_at, last_name, first_name"
        ))?;
        let contacts = stmt
            .query_map(params![tenant_id, outlet_id], row_to_contact)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    fn record_verification(
        &self,
        tenant_id: &str,
        contact_id: &str,
        update: &VerificationUpdate,
    ) -> Result<()> {
        let rows = self.conn()?.execute(
            "UPDATE contacts SET confidence_score = ?3, verification_status = ?4,
                 last_verified_at = ?5, verification_metadata = ?6, updated_at = ?5
             WHERE tenant_id = ?1 AND id = ?2",
            params![
                tenant_id,
                contact_id,
                update.confidence_score,
                update.status.as_str(),
                update.verified_at.to_rfc3339(),
                update.metadata.to_string(),
            ],
        )?;
        if rows == 0 {
            return Err(anyhow!("contact {contact_id} not found"));
        }
        Ok(())
    }

    fn record_intelligence(
        &self,
        tenant_id: &str,
        contact_id: &str,
        update: &IntelligenceUpdate,
    ) -> Result<()> {
        let secondary = serde_json::to_string(&update.secondary_beats)?;
        let rows = self.conn()?.execute(
            "UPDATE contacts SET beat = ?3, secondary_beats = ?4, expertise_score = ?5,
                 relationship_score = ?6, preferred_contact_time = ?7, timezone = ?8,
                 ai_intelligence = ?9, updated_at = ?10
             WHERE tenant_id = ?1 AND id = ?2",
            params![
                tenant_id,
                contact_id,
                update.beat,
                secondary,
                update.expertise_score,
                update.relationship_score,
                update.preferred_contact_time,
                update.timezone,
                update.blob.to_string(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        if rows == 0 {
            return Err(anyhow!("contact {contact_id} not found"));
        }
        Ok(())
    }
}

fn parse_time(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

fn parse_json(s: Option<String>) -> Option<serde_json::Value> {
    s.and_then(|s| serde_json::from_str(&s).ok())
}

fn row_to_outlet(row: &Row<'_>) -> rusqlite::Result<Outlet> {
    let created: String = row.get("created_at")?;
    let traffic: Option<i64> = row.get("monthly_traffic")?;
    Ok(Outlet {
        id: row.get("id")?,
        tenant_id: row.get("tenant_id")?,
        url: row.get("url")?,
        name: row.get("name")?,
        outlet_type: row.get("outlet_type")?,
        category: row.get("category")?,
        discovery_method: row.get("discovery_method")?,
        verification_status: row.get("verification_status")?,
        domain_authority: row.get("domain_authority")?,
        monthly_traffic: traffic.map(|t| t.max(0) as u64),
        created_at: parse_time(&created),
    })
}

fn row_to_contact(row: &Row<'_>) -> rusqlite::Result<Contact> {
    let status: String = row.get("verification_status")?;
    let verified_at: Option<String> = row.get("last_verified_at")?;
    let secondary: Option<String> = row.get("secondary_beats")?;
    let created: String = row.get("created_at")?;
    let updated: String = row.get("updated_at")?;
    Ok(Contact {
        id: row.get("id")?,
        tenant_id: row.get("tenant_id")?,
        outlet_id: row.get("outlet_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        title: row.get("title")?,
        bio: row.get("bio")?,
        image_url: row.get("image_url")?,
        profile_url: row.get("profile_url")?,
        twitter_handle: row.get("twitter_handle")?,
        linkedin_url: row.get("linkedin_url")?,
        personal_website: row.get("personal_website")?,
        location: row.get("location")?,
        confidence_score: row.get("confidence_score")?,
        verification_status: VerificationStatus::parse(&status),
        last_verified_at: verified_at.as_deref().map(parse_time),
        verification_metadata: parse_json(row.get("verification_metadata")?),
        beat: row.get("beat")?,
        secondary_beats: secondary
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default(),
        expertise_score: row.get("expertise_score")?,
        relationship_score: row.get("relationship_score")?,
        preferred_contact_time: row.get("preferred_contact_time")?,
        timezone: row.get("timezone")?,
        ai_intelligence: parse_json(row.get("ai_intelligence")?),
        response_rate: row.get("response_rate")?,
        avg_response_time_hours: row.get("avg_response_time_hours")?,
        total_pitches: row.get("total_pitches")?,
        successful_pitches: row.get("successful_pitches")?,
        interaction_count: row.get("interaction_count")?,
        created_at: parse_time(&created),
        updated_at: parse_time(&updated),
    })
}
