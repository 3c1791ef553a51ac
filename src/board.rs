//! Everything that knows which pin or register does what.
#![allow(unsafe_code)]

use stm32f4xx_hal::{
    gpio::{
        gpioa::{PA5, PA6, PA7},
        gpioc::{PC0, PC1, PC13, PC2},
        Input, Output, PullUp, PushPull,
    },
    hal::digital::v2::{InputPin, OutputPin},
    stm32::USART2,
};
use txqueue::{Keys, LineStatus, TxPort};

use crate::app::Usart2;

/// USART2 transmitter, driven directly through its registers.
///
/// The HAL configured the peripheral and the pin; holding on to its `Tx` keeps anyone else
/// from touching USART2.
pub(crate) struct Usart2Port {
    _tx: Usart2,
}

impl Usart2Port {
    pub(crate) fn new(tx: Usart2) -> Self {
        Usart2Port { _tx: tx }
    }
}

impl TxPort for Usart2Port {
    fn push_byte(&mut self, byte: u8) {
        // a new message can start right behind the interrupt's last byte.
        // this waits at most one character time.
        while !self.line_status().contains(LineStatus::TX_EMPTY) {}
        // SAFETY: single register write, this port owns the transmitter.
        unsafe { (*USART2::ptr()).dr.write(|w| w.dr().bits(u16::from(byte))) };
    }

    fn line_status(&self) -> LineStatus {
        // SAFETY: atomic read. reading SR alone does not clear any flag.
        let sr = unsafe { (*USART2::ptr()).sr.read() };

        let mut status = LineStatus::empty();
        status.set(LineStatus::TX_EMPTY, sr.txe().bit_is_set());
        status.set(LineStatus::TX_COMPLETE, sr.tc().bit_is_set());
        status.set(LineStatus::RX_READY, sr.rxne().bit_is_set());
        status.set(LineStatus::OVERRUN, sr.ore().bit_is_set());
        status.set(LineStatus::NOISE, sr.nf().bit_is_set());
        status.set(LineStatus::FRAMING_ERROR, sr.fe().bit_is_set());
        status.set(LineStatus::PARITY_ERROR, sr.pe().bit_is_set());
        status
    }

    fn listen_tx_empty(&mut self) {
        // SAFETY: read/modify/write cycle, USART2's interrupt is masked or disabled by the caller.
        unsafe { (*USART2::ptr()).cr1.modify(|_, w| w.txeie().set_bit()) };
    }

    fn unlisten_tx_empty(&mut self) {
        // SAFETY: read/modify/write cycle, called from the USART2 handler itself or with it masked.
        unsafe { (*USART2::ptr()).cr1.modify(|_, w| w.txeie().clear_bit()) };
    }
}

/// The four keys, active low.
pub(crate) struct Keypad {
    key1: PC13<Input<PullUp>>,
    key2: PC0<Input<PullUp>>,
    key3: PC1<Input<PullUp>>,
    key4: PC2<Input<PullUp>>,
}

impl Keypad {
    pub(crate) fn new(
        key1: PC13<Input<PullUp>>,
        key2: PC0<Input<PullUp>>,
        key3: PC1<Input<PullUp>>,
        key4: PC2<Input<PullUp>>,
    ) -> Self {
        Keypad {
            key1,
            key2,
            key3,
            key4,
        }
    }

    pub(crate) fn read(&self) -> Keys {
        let mut keys = Keys::empty();
        keys.set(Keys::KEY1, pressed(&self.key1));
        keys.set(Keys::KEY2, pressed(&self.key2));
        keys.set(Keys::KEY3, pressed(&self.key3));
        keys.set(Keys::KEY4, pressed(&self.key4));
        keys
    }
}

fn pressed<P: InputPin>(pin: &P) -> bool {
    pin.is_low().unwrap_or(false)
}

pub(crate) struct StatusLeds {
    heartbeat: PA5<Output<PushPull>>,
    heartbeat_on: bool,
    busy: PA6<Output<PushPull>>,
    fault: PA7<Output<PushPull>>,
}

impl StatusLeds {
    pub(crate) fn new(
        heartbeat: PA5<Output<PushPull>>,
        busy: PA6<Output<PushPull>>,
        fault: PA7<Output<PushPull>>,
    ) -> Self {
        let mut leds = StatusLeds {
            heartbeat,
            heartbeat_on: false,
            busy,
            fault,
        };
        drive(&mut leds.heartbeat, false);
        drive(&mut leds.busy, false);
        drive(&mut leds.fault, false);
        leds
    }

    pub(crate) fn toggle_heartbeat(&mut self) {
        self.heartbeat_on = !self.heartbeat_on;
        drive(&mut self.heartbeat, self.heartbeat_on);
    }

    pub(crate) fn set_busy(&mut self, on: bool) {
        drive(&mut self.busy, on);
    }

    pub(crate) fn fault_on(&mut self) {
        drive(&mut self.fault, true);
    }
}

fn drive<P: OutputPin>(pin: &mut P, on: bool) {
    let _ = if on { pin.set_high() } else { pin.set_low() };
}
