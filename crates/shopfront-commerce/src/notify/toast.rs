//! Add-to-cart toast with auto-hide.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How long a toast stays up without user action.
pub const DEFAULT_TOAST_DELAY: Duration = Duration::from_millis(2500);

/// What the toast currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ToastState {
    /// Nothing on screen.
    #[default]
    Hidden,
    /// Showing the name of the product just added.
    Visible { product_name: String },
}

impl ToastState {
    /// Whether the toast is on screen.
    pub fn is_visible(&self) -> bool {
        matches!(self, ToastState::Visible { .. })
    }

    /// Product name, if visible.
    pub fn product_name(&self) -> Option<&str> {
        match self {
            ToastState::Visible { product_name } => Some(product_name),
            ToastState::Hidden => None,
        }
    }

    /// Product name cut to `max_chars`, with `...` appended when cut.
    pub fn label(&self, max_chars: usize) -> Option<String> {
        let name = self.product_name()?;
        match name.char_indices().nth(max_chars) {
            Some((idx, _)) => Some(format!("{}...", &name[..idx])),
            None => Some(name.to_string()),
        }
    }
}

/// Toast controller.
///
/// Each `show` supersedes the previous toast: the pending auto-hide is
/// aborted and a fresh one is scheduled. The state is published on a watch
/// channel so the presentation layer can subscribe to changes.
#[derive(Debug)]
pub struct Toast {
    state: Arc<watch::Sender<ToastState>>,
    generation: Arc<AtomicU64>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Toast {
    /// A hidden toast that auto-hides after `delay`.
    pub fn new(delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(ToastState::Hidden);
        Self {
            state: Arc::new(tx),
            generation: Arc::new(AtomicU64::new(0)),
            delay,
            pending: None,
        }
    }

    /// Show `product_name`, replacing any toast already on screen.
    ///
    /// The auto-hide needs a tokio runtime; without one the toast stays up
    /// until dismissed.
    pub fn show(&mut self, product_name: impl Into<String>) {
        self.cancel_pending();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(ToastState::Visible {
            product_name: product_name.into(),
        });

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("no async runtime, toast will not auto-hide");
                return;
            }
        };

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        let delay = self.delay;
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            state.send_if_modified(|s| {
                if current.load(Ordering::SeqCst) != generation || !s.is_visible() {
                    return false;
                }
                *s = ToastState::Hidden;
                true
            });
        }));
    }

    /// Hide now and cancel the pending auto-hide.
    pub fn dismiss(&mut self) {
        self.cancel_pending();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_if_modified(|s| {
            let was_visible = s.is_visible();
            *s = ToastState::Hidden;
            was_visible
        });
    }

    /// Current state.
    pub fn state(&self) -> ToastState {
        self.state.borrow().clone()
    }

    /// Whether the toast is on screen.
    pub fn is_visible(&self) -> bool {
        self.state.borrow().is_visible()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ToastState> {
        self.state.subscribe()
    }

    /// Auto-hide delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

impl Default for Toast {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DELAY)
    }
}

impl Drop for Toast {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_auto_hides_after_delay() {
        let mut toast = Toast::default();
        toast.show("Red Mug");
        assert_eq!(toast.state().product_name(), Some("Red Mug"));

        tokio::time::sleep(Duration::from_millis(2400)).await;
        assert!(toast.is_visible());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!toast.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_show_supersedes_pending_hide() {
        let mut toast = Toast::default();
        toast.show("Red Mug");
        tokio::time::sleep(Duration::from_millis(2000)).await;

        toast.show("Blue Mug");
        tokio::time::sleep(Duration::from_millis(1000)).await;
        // The first timer would have fired by now.
        assert_eq!(toast.state().product_name(), Some("Blue Mug"));

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert!(!toast.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_hides_immediately() {
        let mut toast = Toast::default();
        let mut rx = toast.subscribe();
        toast.show("Red Mug");
        toast.dismiss();

        assert!(!toast.is_visible());
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), ToastState::Hidden);
    }

    #[test]
    fn test_show_without_runtime_stays_visible() {
        let mut toast = Toast::default();
        toast.show("Red Mug");
        assert!(toast.is_visible());
        toast.dismiss();
        assert!(!toast.is_visible());
    }

    #[test]
    fn test_label_truncation() {
        let state = ToastState::Visible {
            product_name: "Extra Large Insulated Travel Mug With Lid".to_string(),
        };
        assert_eq!(
            state.label(30).as_deref(),
            Some("Extra Large Insulated Travel M...")
        );

        let short = ToastState::Visible {
            product_name: "Mug".to_string(),
        };
        assert_eq!(short.label(30).as_deref(), Some("Mug"));
        assert_eq!(ToastState::Hidden.label(30), None);
    }
}
