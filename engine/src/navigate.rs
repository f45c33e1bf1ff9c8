use crate::dom::{Disposition, Dom, Key, SearchEvent};

/// Where keyboard focus is, as implied by the event target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    /// A result link; `None` when the list item id has no parsable index
    Result(Option<usize>),
    Elsewhere,
}

/// What a key press should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    FocusResult(usize),
    Close,
    Stay,
}

/// Moves focus through the rendered results with the arrow keys
#[derive(Debug, Clone)]
pub struct KeyboardNavigator {
    search_input_id: String,
    result_id_prefix: String,
}

impl KeyboardNavigator {
    pub fn new(search_input_id: impl Into<String>, result_id_prefix: impl Into<String>) -> Self {
        KeyboardNavigator {
            search_input_id: search_input_id.into(),
            result_id_prefix: result_id_prefix.into(),
        }
    }

    /// Classify the event target. A result link sits inside an `<li>` whose
    /// id carries the result prefix.
    pub fn focus_of(&self, event: &SearchEvent) -> Focus {
        if event.target.id == self.search_input_id {
            return Focus::Input;
        }
        match event
            .target
            .parent_id
            .as_deref()
            .and_then(|parent| parent.strip_prefix(self.result_id_prefix.as_str()))
        {
            Some(suffix) => Focus::Result(suffix.parse().ok()),
            None => Focus::Elsewhere,
        }
    }

    /// Decide the transition for `key` from `focus`. None means the key is
    /// not ours and passes through.
    pub fn action(focus: Focus, key: Key) -> Option<NavAction> {
        if focus == Focus::Elsewhere {
            return None;
        }
        let action = match (key, focus) {
            (Key::ArrowDown, Focus::Input) => NavAction::FocusResult(0),
            (Key::ArrowDown, Focus::Result(Some(i))) => {
                i.checked_add(1).map_or(NavAction::Stay, NavAction::FocusResult)
            }
            (Key::ArrowUp, Focus::Result(Some(i))) if i > 0 => NavAction::FocusResult(i - 1),
            (Key::ArrowDown | Key::ArrowUp, _) => NavAction::Stay,
            (Key::Escape, _) => NavAction::Close,
            (Key::Other, _) => return None,
        };
        Some(action)
    }

    /// Handle a key-down. Focus moves only to result items that exist.
    /// Returns the disposition and whether the dropdown should close.
    pub fn on_key_down<D: Dom>(&self, dom: &mut D, event: &SearchEvent) -> (Disposition, bool) {
        let Some(key) = event.key else {
            return (Disposition::PassThrough, false);
        };
        let focus = self.focus_of(event);
        let Some(action) = Self::action(focus, key) else {
            return (Disposition::PassThrough, false);
        };

        match action {
            NavAction::FocusResult(index) => {
                let id = format!("{}{}", self.result_id_prefix, index);
                if !dom.focus_result(&id) {
                    tracing::trace!(id = %id, "no result to focus");
                }
                (Disposition::Consumed, false)
            }
            NavAction::Close => (Disposition::Consumed, true),
            NavAction::Stay => (Disposition::Consumed, false),
        }
    }
}
