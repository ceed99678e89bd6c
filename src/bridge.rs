//! Collaborators a snippet widget talks to.
//!
//! A widget does not highlight code or own a clipboard. It hands generated
//! code to an injected [`Highlighter`] and, on copy, first offers the text to
//! an injected [`CopyInterceptor`] before falling back to a [`ClipboardHost`].

use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Code offered to a highlighter.
///
/// The highlighter may replace `code` with highlighted markup. Whatever is in
/// `code` after the call is what gets displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRequest {
    /// Generated code; replace in place to highlight.
    pub code: String,
    /// Syntax identifier, e.g. `"java"`.
    pub lang: &'static str,
}

/// Applies syntax highlighting to generated code.
///
/// Called synchronously once per recomputation.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, request: &mut HighlightRequest);
}

impl<F> Highlighter for F
where
    F: Fn(&mut HighlightRequest) + Send + Sync,
{
    fn highlight(&self, request: &mut HighlightRequest) {
        self(request)
    }
}

/// Runs `code` through `highlighter`, or returns it verbatim without one.
pub fn highlight(highlighter: Option<&dyn Highlighter>, code: String, lang: &'static str) -> String {
    match highlighter {
        Some(highlighter) => {
            let mut request = HighlightRequest { code, lang };
            highlighter.highlight(&mut request);
            request.code
        }
        None => code,
    }
}

/// Notification sent before the widget copies its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentCopy {
    /// Text about to be copied.
    pub value: String,
    default_prevented: bool,
}

impl ContentCopy {
    /// Creates a copy notification for `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            default_prevented: false,
        }
    }

    /// Tells the widget that the text has been handled elsewhere.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Returns `true` if a listener called [`ContentCopy::prevent_default`].
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Gets the first say on every copy request.
///
/// An interceptor that copies the text through its own channel calls
/// `prevent_default()` so the widget skips the host clipboard.
pub trait CopyInterceptor: Send + Sync {
    fn before_copy(&self, event: &mut ContentCopy);
}

impl<F> CopyInterceptor for F
where
    F: Fn(&mut ContentCopy) + Send + Sync,
{
    fn before_copy(&self, event: &mut ContentCopy) {
        self(event)
    }
}

/// Error reported by a clipboard host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// The host has no usable clipboard.
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// Nothing was selected when copy was requested.
    #[error("Nothing selected")]
    NothingSelected,
}

/// The host environment's selection and clipboard primitives.
pub trait ClipboardHost: Send + Sync {
    /// Selects `text` as the current selection.
    fn select(&self, text: &str);

    /// Copies the current selection to the clipboard.
    fn copy_selection(&self) -> Result<(), ClipboardError>;

    /// Clears the current selection.
    fn clear_selection(&self);
}

/// Result of a copy request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The host clipboard received the text.
    Copied,
    /// An interceptor handled the copy; the host was not touched.
    Intercepted,
    /// The host clipboard failed; the failure was logged.
    Failed,
    /// No clipboard host is configured.
    Unsupported,
}

/// Performs the copy protocol for `text`.
///
/// The interceptor runs first. When it does not prevent the default, `text`
/// is selected on the host, copied, and the selection is cleared again
/// whether or not the copy succeeded.
pub fn copy_text(
    text: &str,
    interceptor: Option<&dyn CopyInterceptor>,
    host: Option<&dyn ClipboardHost>,
) -> CopyOutcome {
    let mut event = ContentCopy::new(text);
    if let Some(interceptor) = interceptor {
        interceptor.before_copy(&mut event);
    }
    if event.default_prevented() {
        log::debug!("Copy handled by interceptor");
        return CopyOutcome::Intercepted;
    }

    let Some(host) = host else {
        return CopyOutcome::Unsupported;
    };

    host.select(text);
    let outcome = match host.copy_selection() {
        Ok(()) => CopyOutcome::Copied,
        Err(e) => {
            log::warn!("Copy error: {}", e);
            CopyOutcome::Failed
        }
    };
    host.clear_selection();
    outcome
}

/// An in-process clipboard.
///
/// Holds the selection and the clipboard contents in memory. Useful for
/// embedding applications without a system clipboard, and for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    state: Arc<Mutex<MemoryClipboardState>>,
}

#[derive(Debug, Default)]
struct MemoryClipboardState {
    selection: Option<String>,
    contents: Option<String>,
    copy_calls: usize,
}

impl MemoryClipboard {
    /// Creates an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the copied text, if any.
    pub fn contents(&self) -> Option<String> {
        self.state.lock().ok().and_then(|s| s.contents.clone())
    }

    /// Returns the current selection, if any.
    pub fn selection(&self) -> Option<String> {
        self.state.lock().ok().and_then(|s| s.selection.clone())
    }

    /// Number of times `copy_selection` was called.
    pub fn copy_calls(&self) -> usize {
        self.state.lock().map(|s| s.copy_calls).unwrap_or(0)
    }
}

impl ClipboardHost for MemoryClipboard {
    fn select(&self, text: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.selection = Some(text.to_string());
        }
    }

    fn copy_selection(&self) -> Result<(), ClipboardError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        state.copy_calls += 1;
        let selection = state
            .selection
            .clone()
            .ok_or(ClipboardError::NothingSelected)?;
        state.contents = Some(selection);
        Ok(())
    }

    fn clear_selection(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.selection = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingClipboard {
        cleared: Mutex<bool>,
    }

    impl ClipboardHost for FailingClipboard {
        fn select(&self, _text: &str) {}

        fn copy_selection(&self) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("no display".to_string()))
        }

        fn clear_selection(&self) {
            *self.cleared.lock().unwrap() = true;
        }
    }

    #[test]
    fn test_highlight_without_highlighter_is_verbatim() {
        assert_eq!(highlight(None, "a < b".to_string(), "java"), "a < b");
    }

    #[test]
    fn test_highlight_replaces_code() {
        let highlighter = |request: &mut HighlightRequest| {
            request.code = format!("<{}>{}</{}>", request.lang, request.code, request.lang);
        };

        let code = highlight(Some(&highlighter), "x".to_string(), "java");
        assert_eq!(code, "<java>x</java>");
    }

    #[test]
    fn test_highlighter_may_leave_code_alone() {
        let highlighter = |_request: &mut HighlightRequest| {};
        assert_eq!(highlight(Some(&highlighter), "x".to_string(), "java"), "x");
    }

    #[test]
    fn test_copy_uses_host_clipboard() {
        let clipboard = MemoryClipboard::new();

        let outcome = copy_text("test-code", None, Some(&clipboard));

        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(clipboard.contents().as_deref(), Some("test-code"));
        assert_eq!(clipboard.selection(), None);
    }

    #[test]
    fn test_interceptor_sees_value_and_can_prevent_copy() {
        let clipboard = MemoryClipboard::new();
        let seen = Arc::new(Mutex::new(None));
        let seen_by_interceptor = Arc::clone(&seen);
        let interceptor = move |event: &mut ContentCopy| {
            *seen_by_interceptor.lock().unwrap() = Some(event.value.clone());
            event.prevent_default();
        };

        let outcome = copy_text("test-code", Some(&interceptor), Some(&clipboard));

        assert_eq!(outcome, CopyOutcome::Intercepted);
        assert_eq!(seen.lock().unwrap().as_deref(), Some("test-code"));
        assert_eq!(clipboard.copy_calls(), 0);
        assert_eq!(clipboard.contents(), None);
    }

    #[test]
    fn test_interceptor_without_prevent_default_falls_through() {
        let clipboard = MemoryClipboard::new();
        let interceptor = |_event: &mut ContentCopy| {};

        let outcome = copy_text("abc", Some(&interceptor), Some(&clipboard));

        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(clipboard.copy_calls(), 1);
    }

    #[test]
    fn test_host_failure_is_swallowed_and_selection_cleared() {
        let clipboard = FailingClipboard {
            cleared: Mutex::new(false),
        };

        let outcome = copy_text("abc", None, Some(&clipboard));

        assert_eq!(outcome, CopyOutcome::Failed);
        assert!(*clipboard.cleared.lock().unwrap());
    }

    #[test]
    fn test_no_host() {
        assert_eq!(copy_text("abc", None, None), CopyOutcome::Unsupported);
    }
}
