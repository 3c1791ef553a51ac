use rtt_target::rprintln;

use crate::board::StatusLeds;

/// Unrecoverable framework error: light the fault LED and stop.
///
/// The panic handler prints the reason over RTT and parks the core.
pub(crate) fn shutdown(leds: &mut StatusLeds, reason: &str) -> ! {
    leds.fault_on();
    rprintln!("[FATAL] {}", reason);
    panic!("shutdown: {}", reason);
}
