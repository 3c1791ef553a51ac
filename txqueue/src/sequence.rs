use heapless::Vec;

use crate::{Completion, SendStatus, TransmitQueue, TxError, TxPort};

/// What the sender should do after [`MessageSequence::resume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// the completion is armed, return and wait to be resumed.
    Waiting,
    /// every message went out.
    Finished,
}

/// Ordered list of messages, sent one after the other through a [`TransmitQueue`].
///
/// A run-to-completion task cannot block, so the "send, wait, send, wait" body of the sender
/// lives here as a cursor that `resume` advances until it has to wait again.
pub struct MessageSequence<'a, const N: usize> {
    messages: Vec<&'a [u8], N>,
    next: usize,
    running: bool,
}

impl<'a, const N: usize> MessageSequence<'a, N> {
    pub fn new() -> Self {
        MessageSequence {
            messages: Vec::new(),
            next: 0,
            running: false,
        }
    }

    pub fn from_messages(messages: &[&'a [u8]]) -> Result<Self, TxError> {
        let mut sequence = Self::new();
        for &message in messages {
            sequence.push(message)?;
        }
        Ok(sequence)
    }

    pub fn push(&mut self, message: &'a [u8]) -> Result<(), TxError> {
        self.messages.push(message).map_err(|_| TxError::SequenceFull)
    }

    /// Rewind to the first message and mark the sequence as running.
    ///
    /// Refused with [`TxError::AlreadyRunning`] while a previous run has not finished; the
    /// cursor is left where it is.
    pub fn restart(&mut self) -> Result<(), TxError> {
        if self.running {
            return Err(TxError::AlreadyRunning);
        }
        self.next = 0;
        self.running = true;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Send messages until one has to be finished by the interrupt, or none are left.
    ///
    /// `queue` and `completion` must be accessed under the same lock the interrupt handler
    /// takes, otherwise the completion could fire before it is armed.
    pub fn resume<P, W>(
        &mut self,
        queue: &mut TransmitQueue<'a, P>,
        completion: &mut Completion<W>,
        waiter: W,
    ) -> Step
    where
        P: TxPort,
        W: Copy,
    {
        if !self.running {
            return Step::Finished;
        }

        while let Some(&message) = self.messages.get(self.next) {
            match queue.start_send(message) {
                Ok(SendStatus::Complete) => self.next += 1,
                Ok(SendStatus::Pending) => {
                    self.next += 1;
                    completion.arm(waiter);
                    return Step::Waiting;
                }
                Err(_) => {
                    // woken before the previous message drained, go back to waiting.
                    trace!("[WARNING] resumed while message {} is still in flight", self.next);
                    completion.arm(waiter);
                    return Step::Waiting;
                }
            }
        }

        self.running = false;
        Step::Finished
    }
}

impl<'a, const N: usize> Default for MessageSequence<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::fake::FakePort;
    use crate::Progress;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Sender;

    #[test]
    fn short_messages_never_wait() {
        let mut q = TransmitQueue::new(FakePort::new());
        let mut c = Completion::new();
        let mut seq: MessageSequence<4> =
            MessageSequence::from_messages(&[b"a" as &[u8], b"", b"b"]).unwrap();

        seq.restart().unwrap();
        assert_eq!(seq.resume(&mut q, &mut c, Sender), Step::Finished);
        assert_eq!(q.port().pushed, b"ab");
        assert!(!c.is_armed());
        assert!(!seq.is_running());
    }

    #[test]
    fn waits_on_each_pending_message() {
        let mut q = TransmitQueue::new(FakePort::new());
        let mut c = Completion::new();
        let mut seq: MessageSequence<2> =
            MessageSequence::from_messages(&[b"Hola" as &[u8], b"Mundo"]).unwrap();

        seq.restart().unwrap();
        assert_eq!(seq.resume(&mut q, &mut c, Sender), Step::Waiting);
        assert_eq!(q.port().pushed, b"H");
        assert!(c.is_armed());

        while q.continue_send() != Progress::Complete {}
        assert_eq!(c.signal(), Some(Sender));
        assert!(c.take());

        assert_eq!(seq.resume(&mut q, &mut c, Sender), Step::Waiting);
        assert_eq!(q.port().pushed, b"HolaM");

        while q.continue_send() != Progress::Complete {}
        assert_eq!(c.signal(), Some(Sender));
        assert_eq!(seq.resume(&mut q, &mut c, Sender), Step::Finished);
        assert_eq!(q.port().pushed, b"HolaMundo");
    }

    #[test]
    fn early_wake_goes_back_to_waiting() {
        let mut q = TransmitQueue::new(FakePort::new());
        let mut c = Completion::new();
        let mut seq: MessageSequence<2> =
            MessageSequence::from_messages(&[b"one" as &[u8], b"two"]).unwrap();

        seq.restart().unwrap();
        assert_eq!(seq.resume(&mut q, &mut c, Sender), Step::Waiting);

        // forced wake while "one" still has two bytes to go.
        assert_eq!(c.signal(), Some(Sender));
        assert_eq!(seq.resume(&mut q, &mut c, Sender), Step::Waiting);
        assert!(c.is_armed());
        assert_eq!(q.port().pushed, b"o");

        while q.continue_send() != Progress::Complete {}
        assert_eq!(seq.resume(&mut q, &mut c, Sender), Step::Waiting);
        assert_eq!(q.port().pushed, b"onet");
    }

    #[test]
    fn restart_while_running_changes_nothing() {
        let mut q = TransmitQueue::new(FakePort::new());
        let mut c = Completion::new();
        let mut seq: MessageSequence<2> =
            MessageSequence::from_messages(&[b"Hola" as &[u8], b"Mundo"]).unwrap();

        seq.restart().unwrap();
        assert_eq!(seq.resume(&mut q, &mut c, Sender), Step::Waiting);
        while q.continue_send() != Progress::Complete {}
        assert_eq!(c.signal(), Some(Sender));
        assert_eq!(seq.resume(&mut q, &mut c, Sender), Step::Waiting);

        // key pressed again while "Mundo" is still going out.
        assert_eq!(seq.restart(), Err(TxError::AlreadyRunning));
        assert!(seq.is_running());
        assert_eq!(q.port().pushed, b"HolaM");

        while q.continue_send() != Progress::Complete {}
        assert_eq!(c.signal(), Some(Sender));
        assert_eq!(seq.resume(&mut q, &mut c, Sender), Step::Finished);
        assert_eq!(q.port().pushed, b"HolaMundo");

        // finished, so the next press starts over.
        assert_eq!(seq.restart(), Ok(()));
        assert_eq!(seq.resume(&mut q, &mut c, Sender), Step::Waiting);
        assert_eq!(q.port().pushed, b"HolaMundoH");
    }

    #[test]
    fn idle_sequence_does_nothing() {
        let mut q = TransmitQueue::new(FakePort::new());
        let mut c = Completion::new();
        let mut seq: MessageSequence<1> =
            MessageSequence::from_messages(&[b"hi" as &[u8]]).unwrap();

        assert_eq!(seq.resume(&mut q, &mut c, Sender), Step::Finished);
        assert!(q.port().pushed.is_empty());
    }

    #[test]
    fn capacity_is_enforced() {
        let result: Result<MessageSequence<1>, _> =
            MessageSequence::from_messages(&[b"a" as &[u8], b"b"]);
        assert_eq!(result.err(), Some(TxError::SequenceFull));
    }
}
