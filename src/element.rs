//! Renderable tile elements.
//!
//! A rendering widget expects its per-tile draw callback to hand back a
//! displayable element immediately and to populate that element's image
//! payload later. [`TileElement`] is that element: a cheaply clonable handle
//! whose presentation attributes are fixed at construction and whose image
//! source is assigned exactly once, asynchronously, afterwards.
//!
//! The first source assignment (or error signal) settles the element: the
//! one-shot completion hook wired by the layer fires, and any
//! [`settled`](TileElement::settled) awaiters resume.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use tokio::sync::watch;

/// ARIA role carried by every tile element, so screen readers skip tiles.
pub const TILE_ROLE: &str = "presentation";

/// Cross-origin attribute value requested when the layer is configured for
/// cross-origin tile fetching.
pub const CROSS_ORIGIN_ANONYMOUS: &str = "anonymous";

/// Native signal that settled a tile element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileLoadEvent {
    /// The element's image payload finished loading.
    Load,
    /// The element's image payload failed to decode or load.
    Error,
}

/// One-shot completion hook invoked when a tile element settles.
pub type SettleHook = Box<dyn FnOnce(TileLoadEvent) + Send + 'static>;

struct ElementInner {
    alt: String,
    cross_origin: Option<&'static str>,
    source: RwLock<Option<String>>,
    completion: Mutex<Option<SettleHook>>,
    fired: AtomicBool,
    settled: watch::Sender<Option<TileLoadEvent>>,
}

/// A renderable tile image element.
///
/// Clones share the same underlying element, so a spawned fill task can
/// assign the source while the widget holds its own handle.
///
/// # Example
///
/// ```
/// use cached_tile_layer::{TileElement, TileLoadEvent};
///
/// let element = TileElement::new(true);
/// assert_eq!(element.alt(), "");
/// assert_eq!(element.role(), "presentation");
/// assert_eq!(element.cross_origin(), Some("anonymous"));
/// assert_eq!(element.source(), None);
///
/// element.set_source("data:image/png;base64,AAAA");
/// assert_eq!(element.source().as_deref(), Some("data:image/png;base64,AAAA"));
/// assert!(element.is_settled());
/// ```
#[derive(Clone)]
pub struct TileElement {
    inner: Arc<ElementInner>,
}

impl TileElement {
    /// Create an element with empty alternative text, the presentation
    /// role, and the anonymous cross-origin attribute iff `cross_origin`.
    pub fn new(cross_origin: bool) -> Self {
        let (settled, _) = watch::channel(None);
        Self {
            inner: Arc::new(ElementInner {
                alt: String::new(),
                cross_origin: cross_origin.then_some(CROSS_ORIGIN_ANONYMOUS),
                source: RwLock::new(None),
                completion: Mutex::new(None),
                fired: AtomicBool::new(false),
                settled,
            }),
        }
    }

    /// Alternative text. Always empty, keeping screen readers from reading
    /// out tile URLs.
    pub fn alt(&self) -> &str {
        &self.inner.alt
    }

    /// ARIA role. Always [`TILE_ROLE`].
    pub fn role(&self) -> &str {
        TILE_ROLE
    }

    /// Cross-origin attribute, when the layer was configured with the
    /// cross-origin option.
    pub fn cross_origin(&self) -> Option<&str> {
        self.inner.cross_origin
    }

    /// Current image source, once assigned.
    pub fn source(&self) -> Option<String> {
        self.inner.source.read().unwrap().clone()
    }

    /// Wire the one-shot completion hook.
    ///
    /// The hook is consumed by whichever of the load and error signals
    /// arrives first; a replacement wired afterwards never fires.
    pub fn on_settled(&self, hook: SettleHook) {
        *self.inner.completion.lock().unwrap() = Some(hook);
    }

    /// Assign the image source and fire the native load signal.
    ///
    /// The first assignment (or error signal) settles the element; a later
    /// assignment updates the source without re-firing completion.
    pub fn set_source(&self, source: impl Into<String>) {
        *self.inner.source.write().unwrap() = Some(source.into());
        self.signal(TileLoadEvent::Load);
    }

    /// Fire the native error signal.
    ///
    /// For host adapters whose decode of an already-assigned source fails;
    /// the layer itself always settles elements through
    /// [`set_source`](Self::set_source).
    pub fn signal_error(&self) {
        self.signal(TileLoadEvent::Error);
    }

    /// Whether a load or error signal has been delivered.
    pub fn is_settled(&self) -> bool {
        self.inner.settled.borrow().is_some()
    }

    /// Wait for the element to settle, returning the signal that settled
    /// it. Resolves immediately when already settled.
    pub async fn settled(&self) -> TileLoadEvent {
        let mut events = self.inner.settled.subscribe();
        let settled = match events.wait_for(Option::is_some).await {
            Ok(event) => (*event).unwrap_or(TileLoadEvent::Error),
            Err(_) => TileLoadEvent::Error,
        };
        settled
    }

    fn signal(&self, event: TileLoadEvent) {
        if self.inner.fired.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(hook) = self.inner.completion.lock().unwrap().take() {
            hook(event);
        }
        self.inner.settled.send_replace(Some(event));
    }
}

impl std::fmt::Debug for TileElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileElement")
            .field("alt", &self.inner.alt)
            .field("role", &TILE_ROLE)
            .field("cross_origin", &self.inner.cross_origin)
            .field("source", &self.source())
            .field("settled", &self.is_settled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_new_attributes() {
        let element = TileElement::new(false);
        assert_eq!(element.alt(), "");
        assert_eq!(element.role(), "presentation");
        assert_eq!(element.cross_origin(), None);
        assert_eq!(element.source(), None);
        assert!(!element.is_settled());
    }

    #[test]
    fn test_cross_origin_anonymous() {
        let element = TileElement::new(true);
        assert_eq!(element.cross_origin(), Some("anonymous"));
    }

    #[test]
    fn test_set_source_fires_load_once() {
        let element = TileElement::new(false);
        let fired = Arc::new(AtomicUsize::new(0));
        let seen = fired.clone();
        element.on_settled(Box::new(move |event| {
            assert_eq!(event, TileLoadEvent::Load);
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        element.set_source("data:,first");
        element.set_source("data:,second");

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(element.source().as_deref(), Some("data:,second"));
    }

    #[test]
    fn test_error_signal_consumes_hook() {
        let element = TileElement::new(false);
        let fired = Arc::new(AtomicUsize::new(0));
        let seen = fired.clone();
        element.on_settled(Box::new(move |event| {
            assert_eq!(event, TileLoadEvent::Error);
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        element.signal_error();
        element.set_source("data:,late");

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hook_wired_after_settle_never_fires() {
        let element = TileElement::new(false);
        element.set_source("data:,tile");

        let fired = Arc::new(AtomicUsize::new(0));
        let seen = fired.clone();
        element.on_settled(Box::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));
        element.signal_error();

        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_clone_shares_state() {
        let element = TileElement::new(false);
        let handle = element.clone();
        handle.set_source("data:,shared");
        assert_eq!(element.source().as_deref(), Some("data:,shared"));
        assert!(element.is_settled());
    }

    #[tokio::test]
    async fn test_settled_resolves_after_assignment() {
        let element = TileElement::new(false);
        let handle = element.clone();
        let waiter = tokio::spawn(async move { handle.settled().await });

        element.set_source("data:,tile");
        assert_eq!(waiter.await.unwrap(), TileLoadEvent::Load);
    }

    #[tokio::test]
    async fn test_settled_resolves_immediately_when_settled() {
        let element = TileElement::new(false);
        element.signal_error();
        assert_eq!(element.settled().await, TileLoadEvent::Error);
    }

    #[test]
    fn test_debug_output() {
        let element = TileElement::new(true);
        let rendered = format!("{:?}", element);
        assert!(rendered.contains("presentation"));
        assert!(rendered.contains("anonymous"));
    }
}
