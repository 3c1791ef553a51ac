#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_rtt_target as _panic_handler;

/// board wiring: the USART2 transmit port, keys and status LEDs.
mod board;
/// compile-time configuration.
mod config;
/// fatal error path.
mod fault;
/// submodule holding task handlers
mod tasks;

/*
 Declare the RTIC application itself.
 Firstly, we must provide it with the path to the device's PAC.
   - most HALs provide this as their `{hal}::stm32` module.
 We also want the device's peripherals, so we request those.
   - RTIC will provde these on the Context object of init.
 Lastly, the key scan and the sender are "software tasks", so we need to donate an unused
 interrupt to RTIC.
  - this is done via the `dispatchers` argument
*/
#[rtic::app(
    device = stm32f4xx_hal::stm32,
    peripherals = true,
    dispatchers=[SPI2],
)]
mod app {
    use dwt_systick_monotonic::DwtSystick;
    use rtt_target::{rprintln, rtt_init_print};
    use stm32f4xx_hal::{prelude::*, serial, stm32::USART2};
    use txqueue::{Completion, KeyScanner, MessageSequence, TransmitQueue};

    use crate::board::{Keypad, StatusLeds, Usart2Port};
    use crate::config::{BAUD_RATE, GREETING, GREETING_LEN, MONONTONIC_FREQ, SCAN_START_DELAY};
    use crate::tasks::{Trigger, Waiter};

    #[monotonic(binds = SysTick, default = true)]
    type SysMono = DwtSystick<MONONTONIC_FREQ>;

    /// Serial connection type
    pub(crate) type Usart2 = serial::Tx<USART2>;
    /// the one transmit queue, fed by `send_greeting` and drained by `on_usart2_txe`.
    pub(crate) type Usart2TxQueue = TransmitQueue<'static, Usart2Port>;

    /* resources shared across RTIC tasks */
    #[shared]
    struct Shared {
        /// in-flight transmission
        tx: Usart2TxQueue,
        /// "transmission complete" event and the task waiting on it
        completion: Completion<Waiter>,
        leds: StatusLeds,
    }

    /* resources local to specific RTIC tasks */
    #[local]
    struct Local {
        keypad: Keypad,
        scanner: KeyScanner,
        greeting: MessageSequence<'static, GREETING_LEN>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        /*
            This patch enables the debugger to behave correctly during a WFI
            See Errata: https://www.st.com/content/ccc/resource/technical/document/errata_sheet/c3/6b/f8/32/fc/01/48/6e/DM00155929.pdf/files/DM00155929.pdf/jcr:content/translations/en.DM00155929.pdf#%5B%7B%22num%22%3A37%2C%22gen%22%3A0%7D%2C%7B%22name%22%3A%22XYZ%22%7D%2C67%2C724%2Cnull%5D
            See Also Github: https://github.com/probe-rs/probe-rs/issues/350#issuecomment-740550519
        */
        // enable the dma1 master
        ctx.device.RCC.ahb1enr.modify(|_, w| w.dma1en().enabled());
        // enable the debugger.
        ctx.device.DBGMCU.cr.modify(|_, w| {
            w.dbg_sleep().set_bit();
            w.dbg_standby().set_bit();
            w.dbg_stop().set_bit()
        });

        // Enable RTT logging
        rtt_init_print!();
        rprintln!("hello, world!");
        // retrieve the RCC register, which is needed to obtain a handle to the clocks
        let rcc = ctx.device.RCC.constrain();
        // then retreive the clocks, so we can configure the UART later on
        let clocks = rcc.cfgr.freeze();

        /* start RTIC monotonics */
        // configure RTIC's monotonic using the system tick.
        // Note: this has a maximum duration of ~20 seconds, so it can't be used for super long
        // delays.
        let mut dcb = ctx.core.DCB;
        let dwt = ctx.core.DWT;
        let systick = ctx.core.SYST;
        let mono = DwtSystick::new(&mut dcb, dwt, systick, MONONTONIC_FREQ);
        /* end RTIC monotonics */

        // obtain a reference to the GPIO* register blocks,
        // so we can configure pins on the P* buses.
        let gpioa = ctx.device.GPIOA.split();
        let gpioc = ctx.device.GPIOC.split();

        // keys pull the line low when pressed.
        let keypad = Keypad::new(
            gpioc.pc13.into_pull_up_input(),
            gpioc.pc0.into_pull_up_input(),
            gpioc.pc1.into_pull_up_input(),
            gpioc.pc2.into_pull_up_input(),
        );
        let leds = StatusLeds::new(
            gpioa.pa5.into_push_pull_output(),
            gpioa.pa6.into_push_pull_output(),
            gpioa.pa7.into_push_pull_output(),
        );

        // configure USART2.
        // On the nucleo boards this is wired to the ST-LINK's virtual COM port.
        let usart2_tx = gpioa.pa2.into_alternate();
        let usart2_config = serial::config::Config {
            baudrate: BAUD_RATE.bps(),
            wordlength: serial::config::WordLength::DataBits8,
            parity: serial::config::Parity::ParityNone,
            stopbits: serial::config::StopBits::STOP1,
            dma: serial::config::DmaConfig::None,
        };
        let usart2: Usart2 = serial::Serial::tx(ctx.device.USART2, usart2_tx, usart2_config, clocks)
            .expect("failed to configure USART2.");

        let greeting =
            MessageSequence::from_messages(&GREETING).expect("greeting does not fit its sequence.");

        // kick off the periodic key scan.
        scan_keys::spawn_after(SCAN_START_DELAY).expect("failed to kick off the key scan.");
        // lastly return the shared and local resources, as per RTIC's spec.
        (
            Shared {
                tx: TransmitQueue::new(Usart2Port::new(usart2)),
                completion: Completion::new(),
                leds,
            },
            Local {
                keypad,
                scanner: KeyScanner::new(),
                greeting,
            },
            init::Monotonics(mono),
        )
    }

    /* bring externed tasks into scope */
    use crate::tasks::{on_usart2_txe, scan_keys, send_greeting};

    // RTIC docs specify we can modularize the code by using these `extern` blocks.
    // This allows us to specify the tasks in other modules and still work within
    // RTIC's infrastructure.
    extern "Rust" {
        // USART2 interrupt handler, pushes the rest of the message one byte per TXE.
        #[task(binds = USART2, priority = 2, shared = [tx, completion, leds])]
        fn on_usart2_txe(context: on_usart2_txe::Context);

        // sends the greeting, resumed by the interrupt every time a message drains.
        #[task(capacity = 2, shared = [tx, completion, leds], local = [greeting])]
        fn send_greeting(context: send_greeting::Context, trigger: Trigger);

        // periodic key scan
        #[task(shared = [completion, leds], local = [keypad, scanner])]
        fn scan_keys(context: scan_keys::Context);
    }
}
