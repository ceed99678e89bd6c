//! Snippet widget: one formatter plus debounced recomputation.
//!
//! A [`SnippetWidget`] holds the four request inputs. Every change restarts a
//! short timer (25ms by default); when the timer expires the formatter runs on
//! the latest snapshot, the result goes through the highlighter and becomes
//! the displayed code.
//!
//! The timer is a tokio task owned by the widget. A newer change, a call to
//! [`SnippetWidget::deactivate`] or dropping the widget aborts it. Each
//! scheduled task also carries a generation number that is checked under the
//! display lock before publishing, so a superseded task that was already
//! running can never overwrite a newer result.

use crate::bridge::{self, ClipboardHost, CopyInterceptor, CopyOutcome, Highlighter};
use crate::config;
use crate::models::{Header, RequestSpec};
use crate::snippets::{SnippetFormatter, SnippetTarget};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// What the widget currently shows.
#[derive(Debug, Default)]
struct Display {
    /// Generated code before highlighting.
    code: String,
    /// Code after the highlighter ran; this is what gets rendered.
    markup: String,
    /// Number of completed recomputations.
    renders: usize,
    /// Generation of the most recently scheduled recomputation.
    generation: u64,
}

/// Everything a recomputation needs, cloneable into the timer task.
#[derive(Clone)]
struct Renderer {
    widget_id: String,
    formatter: Arc<dyn SnippetFormatter>,
    highlighter: Option<Arc<dyn Highlighter>>,
    display: Arc<Mutex<Display>>,
}

impl Renderer {
    /// Formats `request` and publishes the result unless `generation` has
    /// been superseded in the meantime.
    fn render(&self, request: &RequestSpec, generation: u64) {
        let Ok(mut display) = self.display.lock() else {
            log::warn!("[{}] Display state poisoned, skipping render", self.widget_id);
            return;
        };
        if display.generation != generation {
            log::debug!(
                "[{}] Dropping superseded render {} (current {})",
                self.widget_id,
                generation,
                display.generation
            );
            return;
        }

        let code = self.formatter.format(request);
        let markup = if code.is_empty() {
            String::new()
        } else {
            bridge::highlight(
                self.highlighter.as_deref(),
                code.clone(),
                self.formatter.lang(),
            )
        };

        display.code = code;
        display.markup = markup;
        display.renders += 1;
        log::debug!("[{}] Rendered generation {}", self.widget_id, generation);
    }
}

/// A widget wrapping one snippet formatter.
///
/// Inputs may be set at any time. While the widget is active each change
/// schedules a recomputation; while it is inactive changes are only stored
/// and picked up by the next [`SnippetWidget::activate`].
pub struct SnippetWidget {
    id: String,
    request: RequestSpec,
    delay: Duration,
    active: bool,
    pending: Option<JoinHandle<()>>,
    renderer: Renderer,
    copy_interceptor: Option<Arc<dyn CopyInterceptor>>,
    clipboard: Option<Arc<dyn ClipboardHost>>,
}

impl SnippetWidget {
    /// Creates an inactive widget for `target`.
    ///
    /// The debounce delay comes from the global configuration.
    pub fn new(target: SnippetTarget) -> Self {
        Self::with_formatter(target.formatter())
    }

    /// Creates an inactive widget around any formatter.
    pub fn with_formatter(formatter: Arc<dyn SnippetFormatter>) -> Self {
        let id = Uuid::new_v4().to_string();
        Self {
            renderer: Renderer {
                widget_id: id.clone(),
                formatter,
                highlighter: None,
                display: Arc::new(Mutex::new(Display::default())),
            },
            id,
            request: RequestSpec::default(),
            delay: config::get_config().debounce_delay(),
            active: false,
            pending: None,
            copy_interceptor: None,
            clipboard: None,
        }
    }

    /// Sets the debounce delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the highlighter consulted after every recomputation.
    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.renderer.highlighter = Some(Arc::new(highlighter));
        self
    }

    /// Sets the interceptor consulted before every copy.
    pub fn with_copy_interceptor(mut self, interceptor: impl CopyInterceptor + 'static) -> Self {
        self.copy_interceptor = Some(Arc::new(interceptor));
        self
    }

    /// Sets the clipboard used when no interceptor handles a copy.
    pub fn with_clipboard(mut self, clipboard: impl ClipboardHost + 'static) -> Self {
        self.clipboard = Some(Arc::new(clipboard));
        self
    }

    /// Unique identifier of this widget, used in log output.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Syntax identifier of the generated code.
    pub fn lang(&self) -> &'static str {
        self.renderer.formatter.lang()
    }

    /// Current request inputs.
    pub fn request(&self) -> &RequestSpec {
        &self.request
    }

    /// Returns `true` between `activate()` and `deactivate()`.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` while a recomputation is scheduled but has not run.
    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Sets the request URL.
    ///
    /// While the widget is active this restarts the debounce timer; the
    /// formatter runs once the inputs have been quiet for the configured
    /// delay.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL, or a path starting with `/`
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.request.url = Some(url.into());
        self.values_changed();
    }

    /// Sets the HTTP method. The value is used verbatim.
    pub fn set_method(&mut self, method: impl Into<String>) {
        self.request.method = Some(method.into());
        self.values_changed();
    }

    /// Replaces the header list. Order and duplicates are kept.
    pub fn set_headers(&mut self, headers: Vec<Header>) {
        self.request.headers = Some(headers);
        self.values_changed();
    }

    /// Sets the request body.
    pub fn set_payload(&mut self, payload: impl Into<String>) {
        self.request.payload = Some(payload.into());
        self.values_changed();
    }

    /// Replaces all four inputs at once, counting as a single change.
    pub fn set_request(&mut self, request: RequestSpec) {
        self.request = request;
        self.values_changed();
    }

    /// Makes the widget live.
    ///
    /// Computes immediately from the current inputs unless a recomputation is
    /// already scheduled.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        if !self.has_pending() {
            let generation = self.next_generation();
            self.renderer.render(&self.request, generation);
        }
    }

    /// Stops the widget and aborts any scheduled recomputation.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.cancel_pending();
    }

    /// Runs a scheduled recomputation right away instead of waiting for the
    /// timer. Does nothing when nothing is scheduled.
    pub fn flush(&mut self) {
        if self.has_pending() {
            self.cancel_pending();
            let generation = self.next_generation();
            self.renderer.render(&self.request, generation);
        }
    }

    /// Generated code as plain text.
    pub fn code(&self) -> String {
        self.with_display(|d| d.code.clone())
    }

    /// Displayed code, i.e. the highlighter's output.
    pub fn markup(&self) -> String {
        self.with_display(|d| d.markup.clone())
    }

    /// Number of recomputations that have completed so far.
    pub fn renders(&self) -> usize {
        self.with_display(|d| d.renders)
    }

    /// Copies the generated code.
    ///
    /// The copy interceptor runs first; if it prevents the default, the
    /// clipboard is not touched. Clipboard failures are logged and reported
    /// through the returned outcome.
    pub fn copy_to_clipboard(&self) -> CopyOutcome {
        let code = self.code();
        bridge::copy_text(
            &code,
            self.copy_interceptor.as_deref(),
            self.clipboard.as_deref(),
        )
    }

    fn values_changed(&mut self) {
        if !self.active {
            return;
        }
        self.cancel_pending();

        let generation = self.next_generation();
        let snapshot = self.request.clone();
        let renderer = self.renderer.clone();

        // Outside a runtime there is nothing to debounce on
        match Handle::try_current() {
            Ok(handle) => {
                let delay = self.delay;
                log::debug!(
                    "[{}] Scheduling render {} in {:?}",
                    self.id,
                    generation,
                    delay
                );
                self.pending = Some(handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    renderer.render(&snapshot, generation);
                }));
            }
            Err(_) => {
                log::debug!("[{}] No async runtime, rendering synchronously", self.id);
                renderer.render(&snapshot, generation);
            }
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                log::debug!("[{}] Cancelling scheduled render", self.id);
            }
            handle.abort();
        }
    }

    fn next_generation(&self) -> u64 {
        match self.renderer.display.lock() {
            Ok(mut display) => {
                display.generation += 1;
                display.generation
            }
            Err(_) => 0,
        }
    }

    fn with_display<T: Default>(&self, read: impl FnOnce(&Display) -> T) -> T {
        self.renderer
            .display
            .lock()
            .map(|d| read(&*d))
            .unwrap_or_default()
    }
}

impl Drop for SnippetWidget {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

impl std::fmt::Debug for SnippetWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnippetWidget")
            .field("id", &self.id)
            .field("lang", &self.lang())
            .field("request", &self.request)
            .field("delay", &self.delay)
            .field("active", &self.active)
            .finish()
    }
}
