use rtic::mutex_prelude::*;
use rtt_target::rprintln;
use txqueue::KeyAction;

use crate::app::{scan_keys, send_greeting};
use crate::config::SCAN_PERIOD;
use crate::fault;
use crate::tasks::{Trigger, Waiter};

pub(crate) fn scan_keys(mut ctx: scan_keys::Context) {
    let keys = ctx.local.keypad.read();

    match ctx.local.scanner.scan(keys) {
        Some(KeyAction::SendGreeting) => {
            // capacity 2 covers one key press plus one completion in the queue.
            // a press while the greeting runs is a warning in the sender, not a fault.
            if send_greeting::spawn(Trigger::KeyPress).is_err() {
                rprintln!("[WARNING] greeting already queued, key press dropped.");
            }
        }
        Some(KeyAction::ForceCompletion) => {
            rprintln!("forcing the completion event.");
            // signaling with nobody waiting just leaves the event set, nothing halts.
            let woken = ctx.shared.completion.lock(|completion| completion.signal());
            if let Some(Waiter::Greeting) = woken {
                if send_greeting::spawn(Trigger::Completion).is_err() {
                    ctx.shared
                        .leds
                        .lock(|leds| fault::shutdown(leds, "could not resume the sender."));
                }
            }
        }
        None => {}
    }

    ctx.shared.leds.lock(|leds| leds.toggle_heartbeat());

    if scan_keys::spawn_after(SCAN_PERIOD).is_err() {
        ctx.shared
            .leds
            .lock(|leds| fault::shutdown(leds, "could not reschedule the key scan."));
    }
}
