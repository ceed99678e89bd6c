//! Tab selector over several snippet widgets.
//!
//! All tabs receive every input change, but only the selected tab is active,
//! so only its formatter ever runs. The Java selector offers "Platform"
//! (index 0) and "Spring" (index 1).

use crate::bridge::CopyOutcome;
use crate::config;
use crate::models::{Header, RequestSpec};
use crate::snippets::SnippetTarget;
use crate::widget::SnippetWidget;

/// A labelled snippet widget inside a [`SnippetTabs`].
#[derive(Debug)]
pub struct SnippetTab {
    pub label: String,
    pub widget: SnippetWidget,
}

/// A set of snippet widgets of which at most one is active.
#[derive(Debug)]
pub struct SnippetTabs {
    tabs: Vec<SnippetTab>,
    selected: usize,
    active: bool,
}

impl SnippetTabs {
    /// Creates an inactive selector with tab 0 selected.
    pub fn new(tabs: Vec<SnippetTab>) -> Self {
        Self {
            tabs,
            selected: 0,
            active: false,
        }
    }

    /// Creates the Java selector, preselecting the configured framework.
    pub fn java() -> Self {
        let mut tabs = Self::new(vec![
            SnippetTab {
                label: "Platform".to_string(),
                widget: SnippetWidget::new(SnippetTarget::JavaPlatform),
            },
            SnippetTab {
                label: "Spring".to_string(),
                widget: SnippetWidget::new(SnippetTarget::JavaSpring),
            },
        ]);
        tabs.selected = config::get_config().default_java_framework.tab_index();
        tabs
    }

    /// Tab labels in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.label.as_str()).collect()
    }

    /// Index of the selected tab. May be out of range.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The selected widget, or `None` if the index is out of range.
    pub fn selected_widget(&self) -> Option<&SnippetWidget> {
        self.tabs.get(self.selected).map(|t| &t.widget)
    }

    /// Mutable access to the selected widget, e.g. to install a highlighter.
    pub fn selected_widget_mut(&mut self) -> Option<&mut SnippetWidget> {
        self.tabs.get_mut(self.selected).map(|t| &mut t.widget)
    }

    /// The widget at `index`.
    pub fn widget(&self, index: usize) -> Option<&SnippetWidget> {
        self.tabs.get(index).map(|t| &t.widget)
    }

    /// Selects a tab.
    ///
    /// The index is not validated: selecting a missing tab leaves no widget
    /// active and the displayed code empty.
    pub fn select(&mut self, index: usize) {
        if index == self.selected {
            return;
        }
        if let Some(tab) = self.tabs.get_mut(self.selected) {
            tab.widget.deactivate();
        }
        self.selected = index;
        if self.active {
            match self.tabs.get_mut(index) {
                Some(tab) => tab.widget.activate(),
                None => log::debug!("Selected tab {} does not exist", index),
            }
        }
    }

    /// Makes the selector live, activating the selected tab.
    pub fn activate(&mut self) {
        self.active = true;
        if let Some(widget) = self.selected_widget_mut() {
            widget.activate();
        }
    }

    /// Deactivates every tab.
    pub fn deactivate(&mut self) {
        self.active = false;
        for tab in &mut self.tabs {
            tab.widget.deactivate();
        }
    }

    /// Sets the URL on every tab.
    ///
    /// Inactive tabs only store the value and render it when selected.
    pub fn set_url(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.for_each_widget(|w| w.set_url(url.clone()));
    }

    /// Sets the method on every tab.
    pub fn set_method(&mut self, method: impl Into<String>) {
        let method = method.into();
        self.for_each_widget(|w| w.set_method(method.clone()));
    }

    /// Sets the header list on every tab.
    pub fn set_headers(&mut self, headers: Vec<Header>) {
        self.for_each_widget(|w| w.set_headers(headers.clone()));
    }

    /// Sets the payload on every tab.
    pub fn set_payload(&mut self, payload: impl Into<String>) {
        let payload = payload.into();
        self.for_each_widget(|w| w.set_payload(payload.clone()));
    }

    /// Replaces all inputs on every tab at once.
    pub fn set_request(&mut self, request: RequestSpec) {
        self.for_each_widget(|w| w.set_request(request.clone()));
    }

    /// Generated code of the selected tab, empty when none is selected.
    pub fn code(&self) -> String {
        self.selected_widget()
            .map(SnippetWidget::code)
            .unwrap_or_default()
    }

    /// Copies the selected tab's code.
    pub fn copy_to_clipboard(&self) -> CopyOutcome {
        match self.selected_widget() {
            Some(widget) => widget.copy_to_clipboard(),
            None => CopyOutcome::Unsupported,
        }
    }

    fn for_each_widget(&mut self, mut apply: impl FnMut(&mut SnippetWidget)) {
        for tab in &mut self.tabs {
            apply(&mut tab.widget);
        }
    }
}
