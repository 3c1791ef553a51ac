use rtic::mutex_prelude::*;
use txqueue::{Completion, Progress};

use crate::app::{on_usart2_txe, send_greeting, Usart2TxQueue};
use crate::fault;
use crate::tasks::{Trigger, Waiter};

/// USART2 handler: pushes the next byte of the pending message and wakes the sender once the
/// last one is out.
pub(crate) fn on_usart2_txe(mut ctx: on_usart2_txe::Context) {
    // the handler disables TXE itself on completion, so nothing past this point runs again
    // until the next `start_send`.
    let woken = (ctx.shared.tx, ctx.shared.completion).lock(
        |tx: &mut Usart2TxQueue, completion: &mut Completion<Waiter>| match tx.continue_send() {
            Progress::Complete => completion.signal(),
            Progress::NotComplete => None,
        },
    );

    if let Some(Waiter::Greeting) = woken {
        if send_greeting::spawn(Trigger::Completion).is_err() {
            ctx.shared
                .leds
                .lock(|leds| fault::shutdown(leds, "could not resume the sender."));
        }
    }
}
