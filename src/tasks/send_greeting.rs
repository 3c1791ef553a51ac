use rtic::mutex_prelude::*;
use rtt_target::rprintln;
use txqueue::{Completion, Step};

use crate::app::{send_greeting, Usart2TxQueue};
use crate::tasks::Waiter;

/// Why the sender runs.
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// key 1 was pressed.
    KeyPress,
    /// the completion event was set, by the USART2 handler or by key 4.
    Completion,
}

pub(crate) fn send_greeting(mut ctx: send_greeting::Context, trigger: Trigger) {
    let greeting = ctx.local.greeting;

    match trigger {
        Trigger::KeyPress => {
            // re-activating a running sender is only worth a warning, not a shutdown.
            if greeting.restart().is_err() {
                rprintln!("[WARNING] greeting requested while the previous one is going out!");
                return;
            }
            rprintln!("sending greeting...");
            ctx.shared.leds.lock(|leds| leds.set_busy(true));
        }
        Trigger::Completion => {
            // an event nobody set is dropped with a warning, the sender keeps its state.
            if !ctx.shared.completion.lock(|completion| completion.take()) {
                rprintln!("[WARNING] sender resumed without a completion event.");
                return;
            }
        }
    }

    /*
        entering critical section
        USART2 is masked, so the completion is armed before the handler can signal it.
    */
    let step = (ctx.shared.tx, ctx.shared.completion).lock(
        |tx: &mut Usart2TxQueue, completion: &mut Completion<Waiter>| {
            greeting.resume(tx, completion, Waiter::Greeting)
        },
    );
    /*
        leaving critical section
    */

    match step {
        Step::Waiting => rprintln!("waiting for USART2 to drain."),
        Step::Finished => {
            ctx.shared.leds.lock(|leds| leds.set_busy(false));
            rprintln!("greeting sent.");
        }
    }
}
