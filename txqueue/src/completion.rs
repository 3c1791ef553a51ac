/// "Transmission complete" event plus the handle of the task waiting for it.
///
/// The sender records itself with [`arm`](Completion::arm) before it yields; the interrupt
/// handler calls [`signal`](Completion::signal) when the last byte is out and gets back the
/// waiter it has to resume, if any.
#[derive(Debug)]
pub struct Completion<W> {
    waiter: Option<W>,
    signaled: bool,
}

impl<W: Copy> Completion<W> {
    pub fn new() -> Self {
        Completion {
            waiter: None,
            signaled: false,
        }
    }

    /// Record `waiter` and clear any stale event.
    pub fn arm(&mut self, waiter: W) {
        self.waiter = Some(waiter);
        self.signaled = false;
    }

    /// Set the event. Returns the waiter to resume; a second signal without a new `arm`
    /// returns `None`.
    pub fn signal(&mut self) -> Option<W> {
        self.signaled = true;
        self.waiter.take()
    }

    /// Consume the event, returns whether it was set.
    pub fn take(&mut self) -> bool {
        core::mem::replace(&mut self.signaled, false)
    }

    pub fn is_armed(&self) -> bool {
        self.waiter.is_some()
    }
}

impl<W: Copy> Default for Completion<W> {
    fn default() -> Self {
        Self::new()
    }
}
