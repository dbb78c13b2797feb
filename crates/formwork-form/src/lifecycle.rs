#![forbid(unsafe_code)]

//! Lifecycle callbacks and the attach task.
//!
//! Cancel/save/delete/print callbacks are stored on the form and invoked
//! by the UI collaborator through [`Callbacks::dispatch`]. The attach
//! callback runs off the UI thread as an [`AttachTask`], tied to the
//! form's [`ViewLifetime`]: once the view closes, tasks that have not
//! started yet skip the callback.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Thread spawn fails | OS refuses a new thread | `io::Error` returned, callback not run |
//! | Callback panics | Caller bug | [`AttachTask::join`] reports [`AttachOutcome::Panicked`] |

use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::thread::JoinHandle;

use tokio_util::sync::CancellationToken;

/// A lifecycle signal raised by the UI collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Cancel,
    Save,
    Delete,
    Print,
    /// The user clicked the preview of an uploaded photo to confirm it.
    PreviewConfirmed { field: String },
}

/// UI-thread callback.
pub type Callback = Rc<dyn Fn(&FormEvent)>;

/// Attach callback, run on a background thread.
pub type AttachCallback = Arc<dyn Fn() + Send + Sync>;

/// The callbacks a form or grid stores for its collaborator.
#[derive(Clone, Default)]
pub struct Callbacks {
    pub(crate) cancel: Option<Callback>,
    pub(crate) save: Option<Callback>,
    pub(crate) delete: Option<Callback>,
    pub(crate) print: Option<Callback>,
    pub(crate) attach: Option<AttachCallback>,
}

impl Callbacks {
    #[must_use]
    pub fn has_save(&self) -> bool {
        self.save.is_some()
    }

    #[must_use]
    pub fn has_attach(&self) -> bool {
        self.attach.is_some()
    }

    fn slot(&self, event: &FormEvent) -> Option<&Callback> {
        match event {
            FormEvent::Cancel => self.cancel.as_ref(),
            FormEvent::Save | FormEvent::PreviewConfirmed { .. } => self.save.as_ref(),
            FormEvent::Delete => self.delete.as_ref(),
            FormEvent::Print => self.print.as_ref(),
        }
    }

    /// Invoke the callback for `event`. Returns whether one was registered.
    pub fn dispatch(&self, event: &FormEvent) -> bool {
        match self.slot(event) {
            Some(cb) => {
                cb(event);
                true
            }
            None => {
                tracing::debug!(?event, "no callback registered");
                false
            }
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("cancel", &self.cancel.is_some())
            .field("save", &self.save.is_some())
            .field("delete", &self.delete.is_some())
            .field("print", &self.print.is_some())
            .field("attach", &self.attach.is_some())
            .finish()
    }
}

/// Cancellation scope of a rendered view. Closing or dropping it cancels
/// every attach task spawned under it.
#[derive(Debug, Default)]
pub struct ViewLifetime {
    token: CancellationToken,
}

impl ViewLifetime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for a task scoped to this view.
    #[must_use]
    pub fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ViewLifetime {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// How an attach task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    Completed,
    /// The view closed before the task started.
    Cancelled,
    Panicked,
}

/// A detached run of the attach callback.
#[derive(Debug)]
pub struct AttachTask {
    handle: JoinHandle<bool>,
    token: CancellationToken,
}

impl AttachTask {
    /// Run `callback` on a new thread unless `token` is cancelled first.
    pub fn spawn(callback: AttachCallback, token: CancellationToken) -> io::Result<Self> {
        let task_token = token.clone();
        let handle = std::thread::Builder::new()
            .name("formwork-attach".into())
            .spawn(move || {
                if task_token.is_cancelled() {
                    return false;
                }
                callback();
                true
            })?;
        tracing::debug!("attach task dispatched");
        Ok(Self { handle, token })
    }

    /// Ask the task to skip its callback if it has not started.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task.
    pub fn join(self) -> AttachOutcome {
        match self.handle.join() {
            Ok(true) => AttachOutcome::Completed,
            Ok(false) => AttachOutcome::Cancelled,
            Err(_) => {
                tracing::error!("attach callback panicked");
                AttachOutcome::Panicked
            }
        }
    }
}
