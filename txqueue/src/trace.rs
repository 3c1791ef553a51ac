/// Logs over RTT when the `rtt` feature is on, otherwise expands to nothing.
/// Host builds never touch the RTT control block this way.
macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "rtt")]
        {
            rtt_target::rprintln!($($arg)*);
        }
    }};
}
