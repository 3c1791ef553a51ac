use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxError {
    /// a transmission is still pending, the new one was rejected.
    Busy,
    /// the message sequence has no room left.
    SequenceFull,
    /// the sequence is still going out, it was not restarted.
    AlreadyRunning,
}

impl fmt::Display for TxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxError::Busy => f.write_str("transmission still in flight"),
            TxError::SequenceFull => f.write_str("message sequence is full"),
            TxError::AlreadyRunning => f.write_str("message sequence is still running"),
        }
    }
}
