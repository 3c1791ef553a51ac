use rtic::time::duration::Milliseconds;

/// DWT/SysTick monotonic clock frequency.
pub(crate) const MONONTONIC_FREQ: u32 = 8_000_000;

/// USART2 baud rate, 8N1.
pub(crate) const BAUD_RATE: u32 = 115_200;

/// delay between boot and the first key scan.
pub(crate) const SCAN_START_DELAY: Milliseconds = Milliseconds(250u32);
/// key scan period, also the heartbeat LED half-period.
pub(crate) const SCAN_PERIOD: Milliseconds = Milliseconds(100u32);

pub(crate) const GREETING_LEN: usize = 2;
/// Sent in order when key 1 is pressed. The second message starts once the first has drained.
pub(crate) const GREETING: [&[u8]; GREETING_LEN] = [b"Hola ", b"Mundo\r\n"];
