//! Contact Picker Store
//!
//! State behind the contact dialog for one open session: the filter text,
//! the highlighted contact and the window of contact pages loaded so far.
//!
//! Pages are fetched one at a time. Each request is stamped with the filter
//! epoch it was issued under; reopening the dialog or changing the filter
//! starts a new epoch and responses stamped with an older one are dropped.

use crate::models::{Contact, ContactPage};

/// Distance in pixels from the bottom of the list that triggers the next page
pub const LOAD_MORE_THRESHOLD_PX: i32 = 48;

/// A page fetch the view should perform
#[derive(Clone, Debug, PartialEq)]
pub struct PageRequest {
    pub epoch: u64,
    pub page: u32,
    pub page_size: u32,
    pub filter: String,
}

#[derive(Clone, Debug)]
pub struct ContactPicker {
    page_size: u32,
    filter: String,
    highlighted: Option<Contact>,
    rows: Vec<Contact>,
    epoch: u64,
    next_page: u32,
    in_flight: bool,
    exhausted: bool,
    /// Why the last page fetch failed, until it is retried or the session restarts
    error: Option<String>,
}

impl ContactPicker {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            filter: String::new(),
            highlighted: None,
            rows: Vec::new(),
            epoch: 0,
            next_page: 0,
            in_flight: false,
            exhausted: false,
            error: None,
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn rows(&self) -> &[Contact] {
        &self.rows
    }

    #[cfg(test)]
    pub fn highlighted(&self) -> Option<&Contact> {
        self.highlighted.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Dialog went from closed to open: clear everything and fetch page 0
    pub fn open(&mut self) -> PageRequest {
        self.filter.clear();
        self.highlighted = None;
        self.restart()
    }

    /// Apply a committed filter edit. Empty input is ignored and the current
    /// filter stays in force; so is a value equal to the current filter.
    pub fn set_filter(&mut self, value: &str) -> Option<PageRequest> {
        if value.is_empty() || value == self.filter {
            return None;
        }
        self.filter = value.to_string();
        Some(self.restart())
    }

    /// The list was scrolled near its end
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.in_flight || self.exhausted || self.error.is_some() {
            return None;
        }
        Some(self.request(self.next_page))
    }

    /// Append a fetched page. Returns false when the response is stale
    /// (older epoch or not the page currently awaited) and was dropped.
    pub fn apply_page(&mut self, request: &PageRequest, page: ContactPage) -> bool {
        if !self.is_current(request) {
            log::debug!(
                "[ContactDialog] Dropping stale page {} (epoch {}, current {})",
                request.page, request.epoch, self.epoch
            );
            return false;
        }

        let received = page.content.len();
        self.exhausted = page.last.unwrap_or(received < self.page_size as usize);
        for contact in page.content {
            if !self.rows.iter().any(|row| row.id == contact.id) {
                self.rows.push(contact);
            }
        }
        self.next_page = request.page + 1;
        self.in_flight = false;
        self.error = None;
        true
    }

    /// A fetch failed; release the slot and hold the error until `retry`
    pub fn fail_page(&mut self, request: &PageRequest, message: impl Into<String>) {
        if self.is_current(request) {
            self.in_flight = false;
            self.error = Some(message.into());
        }
    }

    /// Re-request the page that failed
    pub fn retry(&mut self) -> Option<PageRequest> {
        self.error.take()?;
        self.load_more()
    }

    pub fn highlight(&mut self, contact: Contact) {
        self.highlighted = Some(contact);
    }

    /// Derived per-row checked state
    pub fn is_highlighted(&self, contact_id: i64) -> bool {
        self.highlighted.as_ref().map_or(false, |c| c.id == contact_id)
    }

    /// Whether the "Assign" action is enabled
    pub fn can_assign(&self) -> bool {
        self.highlighted.is_some()
    }

    /// Contact handed to the caller on "Assign"
    pub fn assignment(&self) -> Option<Contact> {
        self.highlighted.clone()
    }

    /// Id of the highlighted row, if it is among the loaded rows
    pub fn reveal_target(&self) -> Option<i64> {
        let id = self.highlighted.as_ref()?.id;
        self.rows.iter().any(|row| row.id == id).then_some(id)
    }

    fn restart(&mut self) -> PageRequest {
        self.epoch += 1;
        self.rows.clear();
        self.next_page = 0;
        self.exhausted = false;
        self.error = None;
        self.request(0)
    }

    fn request(&mut self, page: u32) -> PageRequest {
        self.in_flight = true;
        PageRequest {
            epoch: self.epoch,
            page,
            page_size: self.page_size,
            filter: self.filter.clone(),
        }
    }

    fn is_current(&self, request: &PageRequest) -> bool {
        self.in_flight && request.epoch == self.epoch && request.page == self.next_page
    }
}

/// Whether a scroll container is within the load-more threshold of its end.
/// A list shorter than its container counts as being at the end.
pub fn near_end(scroll_top: i32, client_height: i32, scroll_height: i32) -> bool {
    scroll_top + client_height >= scroll_height - LOAD_MORE_THRESHOLD_PX
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: i64) -> Contact {
        Contact {
            id,
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            email: format!("c{}@example.com", id),
            ..Default::default()
        }
    }

    fn page(ids: std::ops::Range<i64>) -> ContactPage {
        ContactPage { content: ids.map(contact).collect(), last: None }
    }

    fn ids(picker: &ContactPicker) -> Vec<i64> {
        picker.rows().iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_open_resets_and_requests_first_page() {
        let mut picker = ContactPicker::new(25);
        let first = picker.open();
        assert!(picker.apply_page(&first, page(0..25)));
        let filtered = picker.set_filter("ann").unwrap();
        picker.apply_page(&filtered, page(100..103));
        picker.highlight(contact(101));

        let request = picker.open();
        assert_eq!(request.page, 0);
        assert_eq!(request.page_size, 25);
        assert_eq!(request.filter, "");
        assert_eq!(picker.filter(), "");
        assert!(picker.highlighted().is_none());
        assert!(picker.rows().is_empty());

        assert!(picker.apply_page(&request, page(0..25)));
        assert_eq!(ids(&picker), (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_scroll_pages_concatenate_in_order() {
        let mut picker = ContactPicker::new(25);
        let first = picker.open();
        picker.apply_page(&first, page(0..25));

        let second = picker.load_more().expect("second page");
        assert_eq!(second.page, 1);
        assert_eq!(second.filter, "");
        picker.apply_page(&second, page(25..50));

        let third = picker.load_more().expect("third page");
        assert_eq!(third.page, 2);
        picker.apply_page(&third, page(50..60));

        assert_eq!(ids(&picker), (0..60).collect::<Vec<_>>());
        // short page ends the window
        assert!(picker.load_more().is_none());
    }

    #[test]
    fn test_one_request_in_flight() {
        let mut picker = ContactPicker::new(25);
        let first = picker.open();
        assert!(picker.load_more().is_none());
        picker.apply_page(&first, page(0..25));
        let second = picker.load_more().unwrap();
        assert!(picker.load_more().is_none());
        picker.apply_page(&second, page(25..50));
        assert!(picker.load_more().is_some());
    }

    #[test]
    fn test_last_flag_ends_paging() {
        let mut picker = ContactPicker::new(25);
        let first = picker.open();
        picker.apply_page(&first, ContactPage { content: (0..25).map(contact).collect(), last: Some(true) });
        assert!(picker.load_more().is_none());
    }

    #[test]
    fn test_filter_change_restarts_and_drops_stale_pages() {
        let mut picker = ContactPicker::new(25);
        let first = picker.open();
        picker.apply_page(&first, page(0..25));
        let stale = picker.load_more().unwrap();

        let filtered = picker.set_filter("smith").expect("filter request");
        assert_eq!(filtered.page, 0);
        assert_eq!(filtered.filter, "smith");
        assert!(filtered.epoch > stale.epoch);
        assert!(picker.rows().is_empty());

        // response for the old filter arrives late
        assert!(!picker.apply_page(&stale, page(25..50)));
        assert!(picker.rows().is_empty());

        assert!(picker.apply_page(&filtered, page(500..503)));
        assert_eq!(ids(&picker), vec![500, 501, 502]);
    }

    #[test]
    fn test_stale_response_after_reopen_is_dropped() {
        let mut picker = ContactPicker::new(25);
        let before = picker.open();
        let after = picker.open();
        assert!(!picker.apply_page(&before, page(0..25)));
        assert!(picker.apply_page(&after, page(0..3)));
        assert_eq!(picker.rows().len(), 3);
    }

    #[test]
    fn test_empty_filter_is_ignored() {
        let mut picker = ContactPicker::new(25);
        let first = picker.open();
        picker.apply_page(&first, page(0..25));
        let req = picker.set_filter("jo").unwrap();
        picker.apply_page(&req, page(0..2));

        assert!(picker.set_filter("").is_none());
        assert_eq!(picker.filter(), "jo");
        assert!(picker.set_filter("jo").is_none());
        assert_eq!(picker.rows().len(), 2);
    }

    #[test]
    fn test_duplicate_contacts_not_appended() {
        let mut picker = ContactPicker::new(3);
        let first = picker.open();
        picker.apply_page(&first, page(0..3));
        let second = picker.load_more().unwrap();
        picker.apply_page(&second, page(2..5));
        assert_eq!(ids(&picker), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_failed_page_can_be_retried() {
        let mut picker = ContactPicker::new(25);
        let first = picker.open();
        picker.apply_page(&first, page(0..25));
        let second = picker.load_more().unwrap();
        picker.fail_page(&second, "offline");
        assert_eq!(picker.error(), Some("offline"));
        // scrolling does not hammer a failing backend
        assert!(picker.load_more().is_none());

        let retry = picker.retry().unwrap();
        assert_eq!(retry, second);
        assert_eq!(picker.error(), None);
        assert!(picker.apply_page(&retry, page(25..30)));
        assert_eq!(picker.rows().len(), 30);
    }

    #[test]
    fn test_failed_first_page_recovers_without_scrolling() {
        let mut picker = ContactPicker::new(25);
        let first = picker.open();
        picker.fail_page(&first, "timeout");
        assert!(picker.rows().is_empty());
        assert!(!picker.is_loading());
        assert!(picker.set_filter("").is_none());

        let retry = picker.retry().expect("retry request");
        assert_eq!(retry.page, 0);
        assert_eq!(retry.filter, "");
        assert!(picker.apply_page(&retry, page(0..3)));
        assert_eq!(ids(&picker), vec![0, 1, 2]);
    }

    #[test]
    fn test_retry_without_error_does_nothing() {
        let mut picker = ContactPicker::new(25);
        let first = picker.open();
        assert!(picker.retry().is_none());
        picker.apply_page(&first, page(0..25));
        assert!(picker.retry().is_none());
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut picker = ContactPicker::new(25);
        let stale = picker.open();
        let current = picker.set_filter("ann").unwrap();
        picker.fail_page(&stale, "old");
        assert_eq!(picker.error(), None);
        assert!(picker.is_loading());
        assert!(picker.apply_page(&current, page(0..2)));
    }

    #[test]
    fn test_reopen_clears_error() {
        let mut picker = ContactPicker::new(25);
        let first = picker.open();
        picker.fail_page(&first, "down");
        picker.open();
        assert_eq!(picker.error(), None);
    }

    #[test]
    fn test_single_highlight() {
        let mut picker = ContactPicker::new(25);
        let first = picker.open();
        picker.apply_page(&first, page(0..5));
        assert!(!picker.can_assign());
        assert_eq!(picker.assignment(), None);

        picker.highlight(contact(1));
        picker.highlight(contact(3));
        let checked: Vec<i64> = picker.rows().iter().map(|c| c.id).filter(|id| picker.is_highlighted(*id)).collect();
        assert_eq!(checked, vec![3]);
        assert!(picker.can_assign());
        assert_eq!(picker.assignment().map(|c| c.id), Some(3));
    }

    #[test]
    fn test_highlight_survives_filter_change() {
        let mut picker = ContactPicker::new(25);
        let first = picker.open();
        picker.apply_page(&first, page(0..5));
        picker.highlight(contact(2));
        assert_eq!(picker.reveal_target(), Some(2));

        let req = picker.set_filter("x").unwrap();
        picker.apply_page(&req, page(10..12));
        assert!(picker.can_assign());
        assert_eq!(picker.reveal_target(), None);
    }

    #[test]
    fn test_unfilled_list_counts_as_near_end() {
        // five short rows in a 400px container
        assert!(near_end(0, 400, 150));
        assert!(near_end(0, 400, 400));
    }

    #[test]
    fn test_near_end() {
        assert!(near_end(560, 400, 1000));
        assert!(near_end(600, 400, 1000));
        assert!(!near_end(100, 400, 1000));
    }
}
