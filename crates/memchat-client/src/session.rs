//! Stream session lifecycle.
//!
//! One [`ChatSession`] drives at most one chat stream at a time: open
//! the transport, pull chunks, decode and classify, dispatch each frame
//! to the handler before the next pull, then drain (release the
//! transport, fire the terminal notification exactly once) and return
//! to idle for reuse.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures::StreamExt;
use tokio::sync::Notify;

use crate::streaming::{parse_chat_sse_stream, StreamEvent};
use crate::traits::{ChatRequest, ChatStreamHandler, StreamTransport};

/// Per-session flags shared with [`SessionHandle`] views.
#[derive(Default)]
struct SessionState {
    /// Input-lock flag: set from stream start, cleared at text
    /// completion or drain, whichever comes first.
    streaming: AtomicBool,
    /// Lifecycle guard: held from start until draining finishes. Keeps
    /// a second start from opening a second transport while the first
    /// is still owned.
    active: AtomicBool,
    /// Terminal-notification guard, checked-and-set once per session.
    terminal_fired: AtomicBool,
    cancel_requested: AtomicBool,
    cancel_notify: Notify,
    last_error: Mutex<Option<String>>,
}

impl SessionState {
    /// Resolves once cancellation has been requested, including when it
    /// was requested before this call.
    async fn cancelled(&self) {
        while !self.cancel_requested.load(Ordering::SeqCst) {
            self.cancel_notify.notified().await;
        }
    }

    fn set_last_error(&self, error: Option<String>) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = error;
    }

    fn get_last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// Cloneable, UI-agnostic view of a session.
///
/// Lets callers observe the busy flag and last fault, and request
/// cancellation, without borrowing the session itself.
#[derive(Clone)]
pub struct SessionHandle {
    state: Arc<SessionState>,
}

impl SessionHandle {
    /// Whether response text is still streaming. Cleared early when the
    /// backend marks the text done, before side-channel data finishes.
    pub fn is_streaming(&self) -> bool {
        self.state.streaming.load(Ordering::SeqCst)
    }

    /// The fault from the most recent session, if it ended in one.
    pub fn last_error(&self) -> Option<String> {
        self.state.get_last_error()
    }

    /// Ask the in-flight stream to stop. Not an error: the terminal
    /// notification still fires, with no error value. Safe to call at
    /// any time, any number of times.
    pub fn cancel(&self) {
        self.state.cancel_requested.store(true, Ordering::SeqCst);
        self.state.cancel_notify.notify_waiters();
    }
}

/// Drives chat streams against a [`StreamTransport`], one at a time.
pub struct ChatSession<T: StreamTransport> {
    transport: T,
    state: Arc<SessionState>,
}

impl<T: StreamTransport> ChatSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: Arc::new(SessionState::default()),
        }
    }

    /// A cloneable view of this session's flags.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            state: Arc::clone(&self.state),
        }
    }

    /// Whether response text is still streaming.
    pub fn is_streaming(&self) -> bool {
        self.state.streaming.load(Ordering::SeqCst)
    }

    /// The fault from the most recent session, if it ended in one.
    pub fn last_error(&self) -> Option<String> {
        self.state.get_last_error()
    }

    /// Open a stream for `request` and dispatch its frames to `handler`.
    ///
    /// A no-op while a previous stream is still active: the prior stream
    /// is never queued behind or cancelled implicitly. Faults are not
    /// returned; they surface through `on_terminal` and
    /// [`last_error`](Self::last_error), and the terminal notification
    /// fires exactly once per session on every exit path.
    pub async fn send_message<H: ChatStreamHandler>(&self, request: ChatRequest, handler: &mut H) {
        if !self.begin() {
            tracing::debug!("Stream already active, ignoring start request");
            return;
        }

        let error = self.run(&request, handler).await;

        if let Some(message) = &error {
            tracing::debug!("Stream session ended with fault: {}", message);
        }
        self.state.set_last_error(error.clone());

        if !self.state.terminal_fired.swap(true, Ordering::SeqCst) {
            handler.on_terminal(error.as_deref());
        }

        self.state.streaming.store(false, Ordering::SeqCst);
        self.state.active.store(false, Ordering::SeqCst);
    }

    /// Acquire the lifecycle guard and reset per-session state.
    /// Returns false when a stream is already active.
    fn begin(&self) -> bool {
        if self
            .state
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }

        self.state.streaming.store(true, Ordering::SeqCst);
        self.state.terminal_fired.store(false, Ordering::SeqCst);
        self.state.cancel_requested.store(false, Ordering::SeqCst);
        self.state.set_last_error(None);
        true
    }

    /// The opening and streaming phases. Returns the fault message, if
    /// any. The transport stream is dropped here on every path, before
    /// the caller fires the terminal notification.
    async fn run<H: ChatStreamHandler>(
        &self,
        request: &ChatRequest,
        handler: &mut H,
    ) -> Option<String> {
        let bytes = match self.transport.open_stream(request).await {
            Ok(bytes) => bytes,
            Err(e) => return Some(format!("{:#}", e)),
        };

        tracing::debug!("Chat stream open");
        let mut events = parse_chat_sse_stream(bytes);

        loop {
            tokio::select! {
                biased;
                _ = self.state.cancelled() => {
                    tracing::debug!("Stream cancelled");
                    return None;
                }
                next = events.next() => match next {
                    Some(Ok(StreamEvent::Message { content })) => handler.on_chunk(&content),
                    Some(Ok(StreamEvent::TextDone)) => {
                        // Unlock input early; ads may still be on the way.
                        self.state.streaming.store(false, Ordering::SeqCst);
                        handler.on_text_done();
                    }
                    Some(Ok(StreamEvent::Advertise { items })) => handler.on_advertise(&items),
                    Some(Ok(StreamEvent::Done)) => return None,
                    Some(Ok(StreamEvent::Error { message })) => return Some(message),
                    Some(Err(e)) => return Some(format!("{:#}", e)),
                    None => return None,
                }
            }
        }
    }
}
