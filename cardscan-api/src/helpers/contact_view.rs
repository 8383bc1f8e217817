use shared_types::{ContactField, ContactPage, ContactQuery, ContactRecord, SortDirection};
use std::cmp::Reverse;

/// Keeps contacts where any field, or the raw card text, contains `term`
/// case-insensitively. A blank term keeps everything.
pub fn filter_contacts(contacts: &[ContactRecord], term: &str) -> Vec<ContactRecord> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return contacts.to_vec();
    }

    contacts
        .iter()
        .filter(|contact| {
            ContactField::ALL
                .iter()
                .map(|field| contact.field(*field))
                .chain(std::iter::once(contact.extracted_text.as_str()))
                .any(|value| value.to_lowercase().contains(&term))
        })
        .cloned()
        .collect()
}

/// Stable sort on the lower-cased value of `field`.
pub fn sort_contacts(contacts: &mut [ContactRecord], field: ContactField, direction: SortDirection) {
    match direction {
        SortDirection::Asc => {
            contacts.sort_by_cached_key(|contact| contact.field(field).to_lowercase())
        }
        SortDirection::Desc => {
            contacts.sort_by_cached_key(|contact| Reverse(contact.field(field).to_lowercase()))
        }
    }
}

pub fn paginate(contacts: Vec<ContactRecord>, page: usize, page_size: usize) -> ContactPage {
    let page_size = page_size.max(1);
    let total_contacts = contacts.len();
    let total_pages = total_contacts.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));

    let contacts = contacts
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    ContactPage {
        contacts,
        total_contacts,
        page,
        total_pages,
        page_size,
    }
}

/// Filter, sort and slice one page out of the store's contacts.
pub fn query_contacts(
    contacts: &[ContactRecord],
    query: &ContactQuery,
    page_size: usize,
) -> ContactPage {
    let mut visible = filter_contacts(contacts, query.search.as_deref().unwrap_or_default());
    sort_contacts(&mut visible, query.sort_field, query.direction);
    paginate(visible, query.page, page_size)
}
