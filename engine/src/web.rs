use crate::config::WidgetConfig;
use crate::dom::{Disposition, Dom, Key, Listener, SearchEvent, TargetInfo};
use crate::error::WidgetError;
use crate::types::ResultItem;
use std::collections::{HashMap, HashSet};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent};

const ITEM_CLASS: &str = "dropdown-item";
const LINK_CLASS: &str = "dropdown-item-link";
const LINK_TEXT_CLASS: &str = "dropdown-item-link-text";

/// The live page
pub struct WebDom {
    document: Document,
    panel_id: String,
    shown_class: String,
    search_input: Option<Element>,
    on_search_click: js_sys::Function,
    handlers: HashMap<Listener, js_sys::Function>,
    attached: HashSet<Listener>,
}

impl WebDom {
    /// Look up the page and attach the click handler to the search input
    pub fn attach(config: &WidgetConfig) -> Result<Self, WidgetError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| WidgetError::Dom("no document available".to_string()))?;

        let handlers = Listener::ALL
            .into_iter()
            .map(|listener| (listener, handler(listener)))
            .collect();

        let search_input = document.get_element_by_id(&config.search_input_id);
        let on_search_click = into_function(|event: Event| {
            let search = SearchEvent::click(snapshot(&event));
            if let Some(disposition) = crate::dispatch(|w| w.on_search_click(&search)) {
                apply(&event, disposition);
            }
        });
        match &search_input {
            Some(input) => input
                .add_event_listener_with_callback("click", &on_search_click)
                .map_err(|e| WidgetError::Dom(format!("{:?}", e)))?,
            None => tracing::warn!(id = %config.search_input_id, "search input not found"),
        }

        Ok(WebDom {
            document,
            panel_id: config.panel_id.clone(),
            shown_class: config.shown_class.clone(),
            search_input,
            on_search_click,
            handlers,
            attached: HashSet::new(),
        })
    }

    fn create(&self, tag: &str, class: &str) -> Result<Element, JsValue> {
        let element = self.document.create_element(tag)?;
        element.set_class_name(class);
        Ok(element)
    }

    fn build_item(&self, item: &ResultItem) -> Result<Element, JsValue> {
        let li = self.create("li", ITEM_CLASS)?;
        li.set_id(&item.id);

        let link = self.create("a", LINK_CLASS)?;
        link.set_attribute("title", &item.title)?;
        link.set_attribute("href", &item.href)?;

        let text = self.create("span", LINK_TEXT_CLASS)?;
        text.set_text_content(Some(&item.title));

        link.append_child(&text)?;
        li.append_child(&link)?;
        Ok(li)
    }
}

impl Drop for WebDom {
    fn drop(&mut self) {
        for listener in self.attached.drain() {
            if let Some(f) = self.handlers.get(&listener) {
                let _ = self
                    .document
                    .remove_event_listener_with_callback(listener.event_type(), f);
            }
        }
        if let Some(input) = &self.search_input {
            let _ = input.remove_event_listener_with_callback("click", &self.on_search_click);
        }
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn panel(&self) -> Option<Element> {
        self.document.get_element_by_id(&self.panel_id)
    }

    fn is_shown(&self, panel: &Element) -> bool {
        panel.class_list().contains(&self.shown_class)
    }

    fn set_shown(&mut self, panel: &Element, shown: bool) {
        let classes = panel.class_list();
        let result = if shown {
            classes.add_1(&self.shown_class)
        } else {
            classes.remove_1(&self.shown_class)
        };
        if let Err(e) = result {
            tracing::warn!(error = ?e, "failed to toggle dropdown class");
        }
    }

    fn clear(&mut self, node: &Element) {
        while let Some(child) = node.first_child() {
            if let Err(e) = node.remove_child(&child) {
                tracing::warn!(error = ?e, "failed to remove result");
                break;
            }
        }
    }

    fn append_result(&mut self, node: &Element, item: &ResultItem) {
        let appended = self
            .build_item(item)
            .and_then(|li| node.append_child(&li));
        if let Err(e) = appended {
            tracing::warn!(id = %item.id, error = ?e, "failed to render result");
        }
    }

    fn focus_result(&mut self, id: &str) -> bool {
        let link = self
            .document
            .get_element_by_id(id)
            .and_then(|li| li.first_element_child())
            .and_then(|link| link.dyn_into::<HtmlElement>().ok());
        match link {
            Some(link) => link.focus().is_ok(),
            None => false,
        }
    }

    fn add_listener(&mut self, listener: Listener) -> bool {
        let Some(f) = self.handlers.get(&listener) else {
            return false;
        };
        match self
            .document
            .add_event_listener_with_callback(listener.event_type(), f)
        {
            Ok(()) => {
                self.attached.insert(listener);
                true
            }
            Err(e) => {
                tracing::warn!(?listener, error = ?e, "failed to add listener");
                false
            }
        }
    }

    fn remove_listener(&mut self, listener: Listener) {
        let Some(f) = self.handlers.get(&listener) else {
            return;
        };
        match self
            .document
            .remove_event_listener_with_callback(listener.event_type(), f)
        {
            Ok(()) => {
                self.attached.remove(&listener);
            }
            Err(e) => tracing::warn!(?listener, error = ?e, "failed to remove listener"),
        }
    }
}

fn into_function(f: impl FnMut(Event) + 'static) -> js_sys::Function {
    Closure::<dyn FnMut(Event)>::new(f)
        .into_js_value()
        .unchecked_into()
}

/// Document-level handler for `listener`
fn handler(listener: Listener) -> js_sys::Function {
    match listener {
        Listener::OutsideClick => into_function(|event: Event| {
            let search = SearchEvent::click(snapshot(&event));
            if let Some(disposition) = crate::dispatch(|w| w.on_document_click(&search)) {
                apply(&event, disposition);
            }
        }),
        Listener::KeyDown => into_function(|event: Event| {
            let search = SearchEvent::key(snapshot(&event), key_of(&event));
            if let Some(disposition) = crate::dispatch(|w| w.on_key_down(&search)) {
                apply(&event, disposition);
            }
        }),
        Listener::KeyUp => into_function(|event: Event| {
            let search = SearchEvent::key(snapshot(&event), key_of(&event));
            let start = js_sys::Date::now();
            if let Some(outcome) = crate::dispatch(|w| w.on_key_up(&search)) {
                tracing::debug!(
                    ?outcome,
                    elapsed_ms = js_sys::Date::now() - start,
                    "key-up handled"
                );
            }
        }),
    }
}

fn apply(event: &Event, disposition: Disposition) {
    if disposition == Disposition::Consumed {
        event.prevent_default();
        event.stop_propagation();
    }
}

fn key_of(event: &Event) -> Key {
    match event.dyn_ref::<KeyboardEvent>() {
        Some(e) => match Key::from_key(&e.key()) {
            Key::Other => Key::from_code(e.key_code()),
            key => key,
        },
        None => Key::Other,
    }
}

/// Capture what the widget needs to know about the event target
fn snapshot(event: &Event) -> TargetInfo {
    let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return TargetInfo::default();
    };
    TargetInfo {
        id: element.id(),
        parent_id: element.parent_element().map(|p| p.id()),
        value: element
            .dyn_ref::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default(),
    }
}
