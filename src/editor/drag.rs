//! Pointer drag sessions.
//!
//! A drag registers two listeners with the host (pointer moved, pointer
//! released) when it starts and must remove both exactly once when it ends,
//! whether the pointer was released or the editor was torn down mid-gesture.
//! [`DragSession::release`] consumes the session, so a second release cannot
//! be written.

/// Listener kinds a drag registers with the pointer host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerListener {
    /// Pointer moved while the button is held.
    Move,
    /// Pointer button released.
    Release,
}

/// Handle returned by the host for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Host that delivers pointer events for the duration of a gesture.
#[cfg_attr(test, mockall::automock)]
pub trait PointerHost {
    fn attach(&mut self, listener: PointerListener) -> ListenerId;
    fn detach(&mut self, id: ListenerId);
}

/// An active drag of one schedule entry.
#[derive(Debug, PartialEq, Eq)]
pub struct DragSession {
    source_index: usize,
    move_listener: ListenerId,
    release_listener: ListenerId,
}

impl DragSession {
    /// Start dragging the entry at `source_index`, registering both listeners.
    pub fn begin(host: &mut dyn PointerHost, source_index: usize) -> Self {
        let move_listener = host.attach(PointerListener::Move);
        let release_listener = host.attach(PointerListener::Release);
        Self {
            source_index,
            move_listener,
            release_listener,
        }
    }

    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// End the drag, removing both listeners.
    pub fn release(self, host: &mut dyn PointerHost) {
        host.detach(self.move_listener);
        host.detach(self.release_listener);
    }
}
