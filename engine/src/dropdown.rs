use crate::dom::{Disposition, Dom, Listener, SearchEvent};
use crate::index::{SearchIndex, TextIndexer};
use std::collections::HashSet;

/// The dropdown panel, but only while it is shown
pub fn open_panel<D: Dom>(dom: &D) -> Option<D::Node> {
    dom.panel().filter(|panel| dom.is_shown(panel))
}

/// Owns the panel's visibility and the document-level listeners
#[derive(Debug)]
pub struct DropdownController {
    search_input_id: String,
    registered: HashSet<Listener>,
}

impl DropdownController {
    pub fn new(search_input_id: impl Into<String>) -> Self {
        DropdownController {
            search_input_id: search_input_id.into(),
            registered: HashSet::new(),
        }
    }

    pub fn is_search_input(&self, event: &SearchEvent) -> bool {
        event.target.id == self.search_input_id
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.registered.contains(&listener)
    }

    /// Open the dropdown in response to a click on the search input.
    ///
    /// Builds the index on first use. A failed build is logged and the panel
    /// opens anyway; queries then come back empty until a later open
    /// succeeds in building.
    pub fn toggle_open<D: Dom, I: TextIndexer>(
        &mut self,
        dom: &mut D,
        index: &mut SearchIndex<I>,
        event: &SearchEvent,
    ) -> Disposition {
        self.close(dom, event);

        if let Err(e) = index.ensure_built() {
            tracing::error!(error = %e, "failed to build search index");
        }

        if let Some(panel) = dom.panel() {
            if !dom.is_shown(&panel) {
                dom.set_shown(&panel, true);
            }
            for listener in Listener::ALL {
                if !self.registered.contains(&listener) && dom.add_listener(listener) {
                    self.registered.insert(listener);
                }
            }
            tracing::debug!("search dropdown opened");
        } else {
            tracing::warn!("search dropdown panel not found");
        }

        Disposition::Consumed
    }

    /// Close the dropdown unless the event came from the search input itself
    pub fn close<D: Dom>(&mut self, dom: &mut D, event: &SearchEvent) -> bool {
        if self.is_search_input(event) {
            return false;
        }
        self.close_now(dom)
    }

    /// Hide the panel if shown and drop the outside-click listener.
    /// Key listeners stay installed.
    pub fn close_now<D: Dom>(&mut self, dom: &mut D) -> bool {
        let Some(panel) = open_panel(dom) else {
            return false;
        };
        dom.set_shown(&panel, false);
        if self.registered.remove(&Listener::OutsideClick) {
            dom.remove_listener(Listener::OutsideClick);
        }
        tracing::debug!("search dropdown closed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeDom;
    use crate::dom::TargetInfo;
    use crate::index::tests::{decline_store, CountingIndexer};

    fn target(id: &str) -> TargetInfo {
        TargetInfo {
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn input_click() -> SearchEvent {
        SearchEvent::click(target("search-bar"))
    }

    fn outside_click() -> SearchEvent {
        SearchEvent::click(target("main-content"))
    }

    fn setup() -> (DropdownController, FakeDom, SearchIndex<CountingIndexer>) {
        (
            DropdownController::new("search-bar"),
            FakeDom::new(),
            SearchIndex::new(decline_store(), CountingIndexer::default()),
        )
    }

    #[test]
    fn test_open_shows_builds_and_listens() {
        let (mut dropdown, mut dom, mut index) = setup();

        let disposition = dropdown.toggle_open(&mut dom, &mut index, &input_click());

        assert_eq!(disposition, Disposition::Consumed);
        assert!(dom.shown);
        assert!(index.is_built());
        for listener in Listener::ALL {
            assert_eq!(dom.registrations(listener), 1);
            assert!(dropdown.is_listening(listener));
        }
    }

    #[test]
    fn test_reopen_does_not_stack_listeners_or_rebuild() {
        let (mut dropdown, mut dom, _) = setup();
        let indexer = CountingIndexer::default();
        let builds = indexer.builds.clone();
        let mut index = SearchIndex::new(decline_store(), indexer);

        dropdown.toggle_open(&mut dom, &mut index, &input_click());
        dropdown.toggle_open(&mut dom, &mut index, &input_click());

        assert_eq!(builds.get(), 1);
        assert_eq!(dom.show_calls, 1);
        for listener in Listener::ALL {
            assert_eq!(dom.registrations(listener), 1);
        }
    }

    #[test]
    fn test_outside_click_closes_and_unregisters() {
        let (mut dropdown, mut dom, mut index) = setup();
        dropdown.toggle_open(&mut dom, &mut index, &input_click());

        assert!(dropdown.close(&mut dom, &outside_click()));
        assert!(!dom.shown);
        assert!(!dom.listening(Listener::OutsideClick));
        assert!(dom.listening(Listener::KeyDown));
        assert!(dom.listening(Listener::KeyUp));

        // A second outside click finds nothing to close
        assert!(!dropdown.close(&mut dom, &outside_click()));
        assert_eq!(dom.hide_calls, 1);
        assert_eq!(dom.registrations(Listener::OutsideClick), 0);
    }

    #[test]
    fn test_click_on_input_does_not_close() {
        let (mut dropdown, mut dom, mut index) = setup();
        dropdown.toggle_open(&mut dom, &mut index, &input_click());

        assert!(!dropdown.close(&mut dom, &input_click()));
        assert!(dom.shown);
        assert!(dom.listening(Listener::OutsideClick));
    }

    #[test]
    fn test_reopen_after_close_reregisters_outside_click() {
        let (mut dropdown, mut dom, mut index) = setup();
        dropdown.toggle_open(&mut dom, &mut index, &input_click());
        dropdown.close(&mut dom, &outside_click());
        dropdown.toggle_open(&mut dom, &mut index, &input_click());

        assert!(dom.shown);
        for listener in Listener::ALL {
            assert_eq!(dom.registrations(listener), 1);
        }
    }

    #[test]
    fn test_missing_panel() {
        let mut dropdown = DropdownController::new("search-bar");
        let mut dom = FakeDom::without_panel();
        let mut index = SearchIndex::new(decline_store(), CountingIndexer::default());

        let disposition = dropdown.toggle_open(&mut dom, &mut index, &input_click());

        assert_eq!(disposition, Disposition::Consumed);
        assert!(index.is_built());
        assert!(dom.listeners.is_empty());
        assert!(!dropdown.close_now(&mut dom));
    }

    #[test]
    fn test_refused_listener_retried_on_next_open() {
        let (mut dropdown, mut dom, mut index) = setup();
        dom.refuse_listeners = true;

        dropdown.toggle_open(&mut dom, &mut index, &input_click());
        assert!(dom.shown);
        for listener in Listener::ALL {
            assert!(!dropdown.is_listening(listener));
        }

        dom.refuse_listeners = false;
        dropdown.toggle_open(&mut dom, &mut index, &input_click());
        for listener in Listener::ALL {
            assert!(dropdown.is_listening(listener));
            assert_eq!(dom.registrations(listener), 1);
        }
    }

    #[test]
    fn test_failed_build_still_opens() {
        let mut dropdown = DropdownController::new("search-bar");
        let mut dom = FakeDom::new();
        let indexer = CountingIndexer {
            fail_build: true,
            ..Default::default()
        };
        let mut index = SearchIndex::new(decline_store(), indexer);

        dropdown.toggle_open(&mut dom, &mut index, &input_click());

        assert!(dom.shown);
        assert!(!index.is_built());
    }
}
