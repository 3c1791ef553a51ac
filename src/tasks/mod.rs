//! This module contains RTIC tasks for doing various things.
//! Each task is in its own submodule, and is pub(crate) re-exported by this module for usage.
//!

/*
   private interface
*/

/// USART2 TXE interrupt, continues the pending transmission.
mod usart2_tx;

/// Task sending the greeting, one message at a time.
mod send_greeting;

/// Task periodicly scanning the keys.
/// Note: this task requires a monotonic clock with at least 1ms resolution.
mod scan_keys;

/// Tasks that can wait on the completion event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waiter {
    Greeting,
}

/*
    public(crate) interface
*/
pub(crate) use scan_keys::scan_keys;
pub use send_greeting::Trigger;
pub(crate) use send_greeting::send_greeting;
pub(crate) use usart2_tx::on_usart2_txe;
