//! Single-slot, interrupt-driven UART transmit queue.
//!
//! A producer starts a transmission with [`TransmitQueue::start_send`], which pushes the first
//! byte synchronously. Every remaining byte is pushed from the UART's "transmit register empty"
//! interrupt through [`TransmitQueue::continue_send`]. When the last byte goes out the interrupt
//! handler signals the waiting task through a [`Completion`].
//!
//! The hardware is reached only through the [`TxPort`] trait, so the queue can be exercised on
//! the host against a fake port.
//!
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod trace;

/// the hardware boundary: byte push, line status, TXE interrupt control.
pub mod port;
/// the transmit queue itself.
pub mod queue;
/// completion event + waiter handle, the task <-> interrupt rendezvous.
pub mod completion;
/// resumable "send these messages in order" logic of the sender task.
pub mod sequence;
/// key state edge detection.
pub mod keypad;
mod error;

pub use completion::Completion;
pub use error::TxError;
pub use keypad::{KeyAction, KeyScanner, Keys};
pub use port::{LineStatus, TxPort};
pub use queue::{Progress, SendStatus, TransmitQueue};
pub use sequence::{MessageSequence, Step};
