use shared_types::ContactRecord;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

pub type SharedContactStore = Arc<RwLock<ContactStore>>;

/// In-memory, insertion-ordered list of contacts for the current session.
///
/// Contacts are never deduplicated: scanning the same card twice keeps both.
#[derive(Debug, Default)]
pub struct ContactStore {
    contacts: Vec<ContactRecord>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedContactStore {
        Arc::new(RwLock::new(Self::new()))
    }

    pub fn add(&mut self, contact: ContactRecord) {
        self.contacts.push(contact);
    }

    pub fn add_all(&mut self, contacts: impl IntoIterator<Item = ContactRecord>) {
        self.contacts.extend(contacts);
    }

    /// Returns false when no contact had that id.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|contact| contact.id != id);
        self.contacts.len() != before
    }

    /// Removes every contact in `ids`, keeping the others in their original order.
    pub fn remove_many(&mut self, ids: &HashSet<String>) -> usize {
        let before = self.contacts.len();
        self.contacts.retain(|contact| !ids.contains(&contact.id));
        before - self.contacts.len()
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    pub fn all(&self) -> &[ContactRecord] {
        &self.contacts
    }

    pub fn get(&self, id: &str) -> Option<&ContactRecord> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    /// Contacts whose id is in `ids`, in store order.
    pub fn select(&self, ids: &HashSet<String>) -> Vec<ContactRecord> {
        self.contacts
            .iter()
            .filter(|contact| ids.contains(&contact.id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}
