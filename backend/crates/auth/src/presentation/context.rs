//! Request Session Context
//!
//! Cloneable handle to the restored session, shared between the session
//! middleware and handlers through request extensions. Mutations mark
//! the context dirty; the middleware writes dirty sessions back after
//! the handler has run, so handlers never talk to the store directly.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::entity::session::{FlashBag, Session};
use crate::domain::value_object::{session_id::SessionId, user_id::UserId};

#[derive(Debug)]
struct CtxInner {
    session: Session,
    dirty: bool,
    discarded: bool,
}

/// What the session middleware should do after the handler
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SessionOutcome {
    /// Login or signup replaced the session; this row was already retired
    Discarded,
    /// Payload changed, write the session back
    Dirty(Session),
    /// Untouched; at most refresh the activity timestamp
    Clean(Session),
}

/// Session handle for one request
#[derive(Debug, Clone)]
pub struct SessionCtx {
    inner: Arc<Mutex<CtxInner>>,
}

impl SessionCtx {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CtxInner {
                session,
                dirty: false,
                discarded: false,
            })),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.lock().session.session_id
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.lock().session.user_id
    }

    /// Queue a success message for the next rendered page
    pub fn flash_success(&self, message: impl Into<String>) {
        let mut inner = self.lock();
        inner.session.data.flash.push_success(message);
        inner.dirty = true;
    }

    /// Queue an error message for the next rendered page
    pub fn flash_error(&self, message: impl Into<String>) {
        let mut inner = self.lock();
        inner.session.data.flash.push_error(message);
        inner.dirty = true;
    }

    /// Take all pending flash messages. Draining consumes them: the
    /// same message is never shown on two renders.
    pub fn drain_flash(&self) -> FlashBag {
        let mut inner = self.lock();
        let drained = inner.session.data.flash.drain();
        if !drained.is_empty() {
            inner.dirty = true;
        }
        drained
    }

    /// Remember where to send the user after login. Later intents win.
    pub fn set_return_to(&self, target: impl Into<String>) {
        let mut inner = self.lock();
        inner.session.data.return_to = Some(target.into());
        inner.dirty = true;
    }

    /// Consume the saved redirect target. It is handed out exactly once.
    pub fn take_return_to(&self) -> Option<String> {
        let mut inner = self.lock();
        let target = inner.session.data.return_to.take();
        if target.is_some() {
            inner.dirty = true;
        }
        target
    }

    /// Drop the user binding (logout). The row and its flashes survive.
    pub fn clear_identity(&self) {
        let mut inner = self.lock();
        inner.session.clear_identity();
        inner.dirty = true;
    }

    /// Mark the session as replaced. The middleware will neither save
    /// nor touch it; the handler has already issued a new cookie.
    pub fn discard(&self) {
        self.lock().discarded = true;
    }

    pub(crate) fn outcome(&self) -> SessionOutcome {
        let inner = self.lock();
        if inner.discarded {
            SessionOutcome::Discarded
        } else if inner.dirty {
            SessionOutcome::Dirty(inner.session.clone())
        } else {
            SessionOutcome::Clean(inner.session.clone())
        }
    }

    fn lock(&self) -> MutexGuard<'_, CtxInner> {
        // A poisoned lock only means another handler panicked mid-write;
        // the session data itself is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
