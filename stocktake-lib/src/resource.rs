//! Async-loadable resource cells.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use thiserror::Error;

use crate::store::StoreError;
use crate::wakeup::WakeupSender;

/// Error type for resource loading failures.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ResourceError {
    pub message: String,
}

impl ResourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<StoreError> for ResourceError {
    fn from(err: StoreError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for ResourceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ResourceError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// The state of an async-loadable resource.
#[derive(Debug, Clone, Default)]
pub enum ResourceState<T> {
    /// Loading has not started.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The resource loaded successfully.
    Ready(T),
    /// The request failed.
    Error(ResourceError),
}

impl<T> ResourceState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ResourceError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Async resource with interior mutability.
///
/// Wraps a [`ResourceState`] behind `Arc<RwLock<_>>`, making it cheap to
/// clone into async tasks: the task sets the state, the owning view reads
/// it on the next render. Setting any state raises a dirty flag and sends
/// a wakeup signal when a sender is installed.
#[derive(Debug)]
pub struct Resource<T> {
    inner: Arc<RwLock<ResourceState<T>>>,
    dirty: Arc<AtomicBool>,
    wakeup: Arc<Mutex<Option<WakeupSender>>>,
}

impl<T> Resource<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ResourceState::Idle)),
            dirty: Arc::new(AtomicBool::new(false)),
            wakeup: Arc::new(Mutex::new(None)),
        }
    }

    /// Install a wakeup sender shared by all clones of this resource.
    pub fn install_wakeup(&self, sender: WakeupSender) {
        if let Ok(mut guard) = self.wakeup.lock() {
            *guard = Some(sender);
        }
    }

    fn send_wakeup(&self) {
        if let Ok(guard) = self.wakeup.lock() {
            if let Some(sender) = guard.as_ref() {
                log::debug!("resource sending wakeup");
                sender.send();
            }
        }
    }

    /// Get a clone of the current state.
    pub fn get(&self) -> ResourceState<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(ResourceState::Idle)
    }

    pub fn set_loading(&self) {
        self.set_state(ResourceState::Loading);
    }

    pub fn set_ready(&self, value: T) {
        self.set_state(ResourceState::Ready(value));
    }

    pub fn set_error(&self, err: impl Into<ResourceError>) {
        self.set_state(ResourceState::Error(err.into()));
    }

    fn set_state(&self, state: ResourceState<T>) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = state;
            self.dirty.store(true, Ordering::SeqCst);
            self.send_wakeup();
        }
    }

    pub fn is_loading(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_loading())
            .unwrap_or(false)
    }

    /// Check and clear the modified-since-last-look flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            wakeup: Arc::clone(&self.wakeup),
        }
    }
}
