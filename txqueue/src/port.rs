use bitflags::bitflags;

bitflags! {
    /// Snapshot of the UART line status, independent of the peripheral's register layout.
    pub struct LineStatus: u8 {
        /// the transmit data register can take another byte.
        const TX_EMPTY = 1 << 0;
        /// the shift register finished sending the last byte.
        const TX_COMPLETE = 1 << 1;
        const RX_READY = 1 << 2;
        const OVERRUN = 1 << 3;
        const NOISE = 1 << 4;
        const FRAMING_ERROR = 1 << 5;
        const PARITY_ERROR = 1 << 6;
    }
}

impl LineStatus {
    /// Any of the receive-side fault flags.
    pub fn has_fault(&self) -> bool {
        self.intersects(
            LineStatus::OVERRUN
                | LineStatus::NOISE
                | LineStatus::FRAMING_ERROR
                | LineStatus::PARITY_ERROR,
        )
    }
}

/// Transmit half of a UART, as seen by the [`TransmitQueue`](crate::TransmitQueue).
///
/// All operations are assumed to succeed; the queue never retries.
pub trait TxPort {
    /// Write `byte` to the transmit data register.
    fn push_byte(&mut self, byte: u8);

    /// Read the current line status.
    fn line_status(&self) -> LineStatus;

    /// Enable the "transmit register empty" interrupt.
    ///
    /// From this point on the interrupt handler owns the progress of the transmission.
    fn listen_tx_empty(&mut self);

    /// Disable the "transmit register empty" interrupt, handing the queue back to the task side.
    fn unlisten_tx_empty(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_flags_are_not_faults() {
        let idle = LineStatus::TX_EMPTY | LineStatus::TX_COMPLETE | LineStatus::RX_READY;
        assert!(!idle.has_fault());
        assert!((LineStatus::TX_EMPTY | LineStatus::OVERRUN).has_fault());
        assert!(LineStatus::FRAMING_ERROR.has_fault());
    }
}
