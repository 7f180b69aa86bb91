// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lead lifecycle operations.
//!
//! Every operation is a full load-modify-save cycle against the store and
//! enforces the ownership rules:
//! - admins see and modify every lead, and may assign leads to anyone;
//! - sales see and modify only leads assigned to them, and their own
//!   creations are always assigned to themselves;
//! - any other role is denied.

use std::io::Read;

use tracing::{debug, info};

use crate::analytics::{self, Summary};
use crate::clock::{Clock, SystemClock};
use crate::csv_io::{self, ImportReport};
use crate::error::{Error, Result};
use crate::id::generate_unique_id;
use crate::identity::{Identity, Role};
use crate::lead::{
    non_empty, Lead, LeadPatch, NewLead, CREATED_BY_PUBLIC, SOURCE_CONTACT_FORM, SOURCE_MANUAL,
};
use crate::store::LeadStore;

/// Creates, lists, updates, and deletes leads on behalf of callers.
#[derive(Debug)]
pub struct LeadService<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: LeadStore> LeadService<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: LeadStore, C: Clock> LeadService<S, C> {
    /// Creates a service with a custom clock source.
    pub fn with_clock(store: S, clock: C) -> Self {
        LeadService { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records a contact-form submission. The lead starts unassigned.
    pub fn create_public(&self, fields: NewLead) -> Result<Lead> {
        let mut leads = self.store.load()?;
        let lead = self.build(&leads, fields.or_source(SOURCE_CONTACT_FORM), CREATED_BY_PUBLIC);
        leads.push(lead.clone());
        self.store.save(&leads)?;
        info!("public lead created: {}", lead.id);
        Ok(lead)
    }

    /// Records a lead entered by an authenticated user.
    ///
    /// Sales creations are assigned to the creator regardless of the requested
    /// owner; admins may pick any owner or none.
    pub fn create_internal(&self, identity: &Identity, fields: NewLead) -> Result<Lead> {
        let mut leads = self.store.load()?;
        let lead = self.build_internal(identity, &leads, fields.or_source(SOURCE_MANUAL))?;
        leads.push(lead.clone());
        self.store.save(&leads)?;
        info!("lead created by {}: {}", identity.id, lead.id);
        Ok(lead)
    }

    /// Returns the leads visible to `identity`, newest first.
    ///
    /// Leads with equal timestamps keep their stored order.
    pub fn list(&self, identity: &Identity) -> Result<Vec<Lead>> {
        let mut leads = visible_to(identity, self.store.load()?)?;
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!("listed {} leads for {}", leads.len(), identity.id);
        Ok(leads)
    }

    /// Applies `patch` to the lead with `id`.
    ///
    /// Status changes are unrestricted. A new owner is applied only for admins.
    /// A note is appended with the caller's username as author.
    pub fn update(&self, identity: &Identity, id: &str, patch: LeadPatch) -> Result<Lead> {
        let mut leads = self.store.load()?;
        let lead = leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| Error::LeadNotFound(id.to_string()))?;

        if !identity.owns(lead.assigned_to.as_deref()) {
            return Err(Error::Forbidden("not authorized to edit this lead".into()));
        }

        if let Some(owner) = non_empty(patch.assigned_to.as_deref()) {
            if identity.is_admin() {
                lead.assigned_to = Some(owner.to_string());
            }
        }
        if let Some(status) = patch.status {
            lead.status = status;
        }
        if let Some(note) = non_empty(patch.note.as_deref()) {
            lead.append_note(note.to_string(), identity.username.clone(), self.clock.now());
        }

        let updated = lead.clone();
        self.store.save(&leads)?;
        debug!("lead {} updated by {}", updated.id, identity.id);
        Ok(updated)
    }

    /// Deletes the lead with `id`. Admin only.
    ///
    /// Returns whether a lead was removed; a missing id is not an error.
    pub fn delete(&self, identity: &Identity, id: &str) -> Result<bool> {
        if !identity.is_admin() {
            return Err(Error::Forbidden("admin only".into()));
        }
        let mut leads = self.store.load()?;
        let before = leads.len();
        leads.retain(|l| l.id != id);
        let removed = leads.len() != before;
        self.store.save(&leads)?;
        if removed {
            info!("lead {} deleted by {}", id, identity.id);
        }
        Ok(removed)
    }

    /// Creates one lead per usable CSV row, saving once at the end.
    pub fn import_csv<R: Read>(&self, identity: &Identity, input: R) -> Result<ImportReport> {
        ensure_lead_role(identity)?;
        let parsed = csv_io::parse_import(input)?;

        let mut leads = self.store.load()?;
        let mut report = ImportReport { added: 0, failed: parsed.failed };
        for fields in parsed.rows {
            let lead = self.build_internal(identity, &leads, fields)?;
            leads.push(lead);
            report.added += 1;
        }
        if report.added > 0 {
            self.store.save(&leads)?;
        }
        info!("csv import by {}: {} added, {} failed", identity.id, report.added, report.failed);
        Ok(report)
    }

    /// Renders the caller's visible leads as CSV.
    pub fn export_csv<F>(&self, identity: &Identity, display_name: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let leads = self.list(identity)?;
        csv_io::export(&leads, display_name)
    }

    /// Summarizes the caller's visible leads.
    pub fn analytics(&self, identity: &Identity, average_deal_value: u64) -> Result<Summary> {
        let leads = visible_to(identity, self.store.load()?)?;
        Ok(analytics::summarize(&leads, average_deal_value))
    }

    fn build_internal(&self, identity: &Identity, leads: &[Lead], fields: NewLead) -> Result<Lead> {
        let owner = match identity.role {
            Role::Sales => Some(identity.id.clone()),
            Role::Admin => non_empty(fields.assigned_to.as_deref()).map(str::to_string),
            Role::Other => return Err(access_denied()),
        };
        let mut lead = self.build(leads, fields, &identity.id);
        lead.assigned_to = owner;
        Ok(lead)
    }

    fn build(&self, leads: &[Lead], fields: NewLead, created_by: &str) -> Lead {
        let id = generate_unique_id(|candidate| leads.iter().any(|l| l.id == candidate));
        Lead::new(id, fields, created_by.to_string(), self.clock.now())
    }
}

fn visible_to(identity: &Identity, leads: Vec<Lead>) -> Result<Vec<Lead>> {
    match identity.role {
        Role::Admin => Ok(leads),
        Role::Sales => Ok(leads.into_iter().filter(|l| l.is_assigned_to(&identity.id)).collect()),
        Role::Other => Err(access_denied()),
    }
}

fn ensure_lead_role(identity: &Identity) -> Result<()> {
    match identity.role {
        Role::Admin | Role::Sales => Ok(()),
        Role::Other => Err(access_denied()),
    }
}

fn access_denied() -> Error {
    Error::Forbidden("access denied".into())
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
