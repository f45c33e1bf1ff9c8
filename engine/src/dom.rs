use crate::types::ResultItem;

/// Document-level listeners the widget installs while the dropdown is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    OutsideClick,
    KeyDown,
    KeyUp,
}

impl Listener {
    pub const ALL: [Listener; 3] = [Listener::OutsideClick, Listener::KeyDown, Listener::KeyUp];

    /// DOM event type the listener is registered for
    pub fn event_type(self) -> &'static str {
        match self {
            Listener::OutsideClick => "click",
            Listener::KeyDown => "keydown",
            Listener::KeyUp => "keyup",
        }
    }
}

/// Keys the widget reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Escape,
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` value, including the legacy IE/Edge names
    pub fn from_key(key: &str) -> Self {
        match key {
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }

    /// Map a legacy `KeyboardEvent.keyCode`
    pub fn from_code(code: u32) -> Self {
        match code {
            40 => Key::ArrowDown,
            38 => Key::ArrowUp,
            27 => Key::Escape,
            _ => Key::Other,
        }
    }

    /// Navigation keys never trigger a search
    pub fn is_navigation(self) -> bool {
        !matches!(self, Key::Other)
    }
}

/// Snapshot of an event's target element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetInfo {
    pub id: String,
    /// Id of the parent element, if it has one
    pub parent_id: Option<String>,
    /// Current value when the target is an input element
    pub value: String,
}

/// A browser event as seen by the widget
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchEvent {
    pub target: TargetInfo,
    /// Set for keyboard events
    pub key: Option<Key>,
}

impl SearchEvent {
    pub fn click(target: TargetInfo) -> Self {
        SearchEvent { target, key: None }
    }

    pub fn key(target: TargetInfo, key: Key) -> Self {
        SearchEvent {
            target,
            key: Some(key),
        }
    }
}

/// What the browser should do with an event after the widget handled it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Prevent the default action and stop propagation
    Consumed,
    /// Leave the event untouched
    PassThrough,
}

/// Host page operations used by the widget
pub trait Dom {
    type Node;

    /// The dropdown panel element, if the page has one
    fn panel(&self) -> Option<Self::Node>;

    fn is_shown(&self, panel: &Self::Node) -> bool;

    fn set_shown(&mut self, panel: &Self::Node, shown: bool);

    /// Remove every child of `node`
    fn clear(&mut self, node: &Self::Node);

    /// Append one result list item to `node`
    fn append_result(&mut self, node: &Self::Node, item: &ResultItem);

    /// Focus the link of the result list item with element id `id`.
    /// Returns false when no such item exists.
    fn focus_result(&mut self, id: &str) -> bool;

    /// Register a document-level listener. Returns false if the page refused it.
    fn add_listener(&mut self, listener: Listener) -> bool;

    fn remove_listener(&mut self, listener: Listener);
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashMap;

    /// In-memory page: a single panel holding result items
    #[derive(Debug, Default)]
    pub(crate) struct FakeDom {
        pub has_panel: bool,
        pub shown: bool,
        pub items: Vec<ResultItem>,
        pub focused: Option<String>,
        /// Live registrations per listener; a real page would fire a listener
        /// once per registration of a distinct handler
        pub listeners: HashMap<Listener, usize>,
        /// Make every `add_listener` call fail
        pub refuse_listeners: bool,
        pub show_calls: usize,
        pub hide_calls: usize,
        pub clears: usize,
    }

    impl FakeDom {
        pub fn new() -> Self {
            FakeDom {
                has_panel: true,
                ..Default::default()
            }
        }

        pub fn without_panel() -> Self {
            FakeDom::default()
        }

        pub fn listening(&self, listener: Listener) -> bool {
            self.registrations(listener) > 0
        }

        pub fn registrations(&self, listener: Listener) -> usize {
            self.listeners.get(&listener).copied().unwrap_or(0)
        }

        pub fn titles(&self) -> Vec<&str> {
            self.items.iter().map(|i| i.title.as_str()).collect()
        }
    }

    impl Dom for FakeDom {
        type Node = ();

        fn panel(&self) -> Option<()> {
            self.has_panel.then_some(())
        }

        fn is_shown(&self, _panel: &()) -> bool {
            self.shown
        }

        fn set_shown(&mut self, _panel: &(), shown: bool) {
            if shown {
                self.show_calls += 1;
            } else {
                self.hide_calls += 1;
            }
            self.shown = shown;
        }

        fn clear(&mut self, _node: &()) {
            self.clears += 1;
            self.items.clear();
        }

        fn append_result(&mut self, _node: &(), item: &ResultItem) {
            self.items.push(item.clone());
        }

        fn focus_result(&mut self, id: &str) -> bool {
            if self.items.iter().any(|i| i.id == id) {
                self.focused = Some(id.to_string());
                true
            } else {
                false
            }
        }

        fn add_listener(&mut self, listener: Listener) -> bool {
            if self.refuse_listeners {
                return false;
            }
            *self.listeners.entry(listener).or_insert(0) += 1;
            true
        }

        fn remove_listener(&mut self, listener: Listener) {
            if let Some(count) = self.listeners.get_mut(&listener) {
                *count = count.saturating_sub(1);
            }
        }
    }
}
