use crate::core::models::contact::{Contact, ContactSummary};

/// Tallies contacts per confidence tier.
pub fn run(contacts: &[Contact]) -> ContactSummary {
    contacts
        .iter()
        .fold(ContactSummary::default(), |mut summary, contact| {
            summary.record(contact.tier);
            summary
        })
}
