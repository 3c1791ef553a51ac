use crate::{LineStatus, TxError, TxPort};

/// Outcome of [`TransmitQueue::start_send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// everything went out synchronously, nobody needs to wait.
    Complete,
    /// bytes remain; the TXE interrupt is armed and will finish the job.
    Pending,
}

/// Outcome of one [`TransmitQueue::continue_send`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// the last byte was just pushed and the interrupt is disabled.
    Complete,
    NotComplete,
}

/// One in-flight transmission, driven from the task side by `start_send` and from the
/// interrupt side by `continue_send`.
///
/// Invariant: `sent <= data.len()`, and `sent == data.len()` means the TXE interrupt is off.
/// Enabling the interrupt in `start_send` hands write progress to the interrupt context;
/// disabling it in `continue_send` hands it back. The caller must make sure the two never
/// run concurrently (in RTIC: access the queue through a shared resource lock).
pub struct TransmitQueue<'a, P> {
    port: P,
    data: &'a [u8],
    sent: usize,
}

impl<'a, P: TxPort> TransmitQueue<'a, P> {
    pub fn new(port: P) -> Self {
        TransmitQueue {
            port,
            data: &[],
            sent: 0,
        }
    }

    /// Start sending `text`. Pushes the first byte right away.
    ///
    /// Returns [`SendStatus::Pending`] when the interrupt has to push the rest, and
    /// [`TxError::Busy`] without touching anything when a transmission is still in flight.
    pub fn start_send(&mut self, text: &'a [u8]) -> Result<SendStatus, TxError> {
        if self.is_pending() {
            trace!(
                "[WARNING] start_send while {} of {} bytes are still pending",
                self.remaining(),
                self.data.len()
            );
            return Err(TxError::Busy);
        }

        self.data = text;
        self.sent = 0;

        let first = match text.first() {
            Some(byte) => *byte,
            None => return Ok(SendStatus::Complete),
        };
        self.port.push_byte(first);
        self.sent = 1;

        if self.sent < self.data.len() {
            self.port.listen_tx_empty();
            Ok(SendStatus::Pending)
        } else {
            Ok(SendStatus::Complete)
        }
    }

    /// Push the next byte. Call this once per TXE interrupt.
    pub fn continue_send(&mut self) -> Progress {
        if !self.is_pending() {
            // nothing to send, so the interrupt has no business being on.
            trace!("[ERROR] TXE fired while the transmit queue is idle.");
            self.port.unlisten_tx_empty();
            return Progress::NotComplete;
        }

        let status = self.port.line_status();
        if status.has_fault() {
            // faults are not recovered from, the byte still goes out.
            trace!("[WARNING] USART line fault while sending: {:?}", status);
        }
        // shared vectors and spurious wakeups both end up here without room in the register.
        if !status.contains(LineStatus::TX_EMPTY) {
            return Progress::NotComplete;
        }

        self.port.push_byte(self.data[self.sent]);
        self.sent += 1;

        if self.sent == self.data.len() {
            self.port.unlisten_tx_empty();
            Progress::Complete
        } else {
            Progress::NotComplete
        }
    }

    pub fn is_pending(&self) -> bool {
        self.sent < self.data.len()
    }

    /// bytes already handed to the hardware for the current message.
    pub fn sent(&self) -> usize {
        self.sent
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.sent
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use crate::{LineStatus, TxPort};

    /// Records every byte and tracks the TXE interrupt enable.
    pub(crate) struct FakePort {
        pub pushed: Vec<u8>,
        pub status: LineStatus,
        pub listening: bool,
        pub listen_calls: usize,
    }

    impl FakePort {
        pub fn new() -> Self {
            FakePort {
                pushed: Vec::new(),
                status: LineStatus::TX_EMPTY | LineStatus::TX_COMPLETE,
                listening: false,
                listen_calls: 0,
            }
        }
    }

    impl TxPort for FakePort {
        fn push_byte(&mut self, byte: u8) {
            self.pushed.push(byte);
        }

        fn line_status(&self) -> LineStatus {
            self.status
        }

        fn listen_tx_empty(&mut self) {
            self.listening = true;
            self.listen_calls += 1;
        }

        fn unlisten_tx_empty(&mut self) {
            self.listening = false;
        }
    }
}
