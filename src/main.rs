//! RustLogicBridge - Main entry point
//!
//! On the target:
//! 1. Configure the log UART, the host link UART and the board's GPIOs
//! 2. Enter *Running*: all outputs low, slot table empty
//! 3. Poll forever: link bytes, command line, scheduler pass, log drain
//!
//! On a development host the same loop runs as a simulator: command lines
//! come from stdin, input levels from the command line (or `@<bits>` lines),
//! and the output levels are printed after every line.

#![cfg_attr(target_os = "espidf", no_std)]
#![cfg_attr(target_os = "espidf", no_main)]

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys as esp_idf_sys;

#[cfg(target_os = "espidf")]
mod firmware {
    use super::esp_idf_sys;

    use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin};
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::uart::{self, UartDriver};
    use esp_idf_svc::hal::units::Hertz;
    use esp_idf_svc::sys::EspError;

    use rust_logic_bridge::hal::esp::{take_pins, EspLinkRx, EspLinkTx};
    use rust_logic_bridge::uart_logger::{drain_to, init_uart_logger, UartWriter};
    use rust_logic_bridge::{log_error, Bridge, BridgeConfig, LOG_STREAM};

    static CONFIG: BridgeConfig = BridgeConfig::new();

    pub fn timestamp_us() -> i64 {
        unsafe { esp_idf_sys::esp_timer_get_time() }
    }

    /// Bring up peripherals and run the control loop. Only returns on a
    /// startup error.
    pub fn run() -> Result<(), EspError> {
        let peripherals = Peripherals::take()?;

        // SAFETY: The log TX pin is not part of any board pin map.
        let log_tx = unsafe { AnyOutputPin::new(CONFIG.log_uart.tx_pin as i32) };
        let mut log_uart = init_uart_logger(peripherals.uart2, log_tx, &CONFIG.log_uart)?;

        let link_config = uart::config::Config::default().baudrate(Hertz(CONFIG.link_baud));
        let link = UartDriver::new(
            peripherals.uart0,
            peripherals.pins.gpio1,
            peripherals.pins.gpio3,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &link_config,
        )?;

        // SAFETY: Board pins are disjoint from the UART pins taken above and
        // are never reached through `peripherals.pins`.
        let (mut inputs, mut outputs) = unsafe { take_pins(CONFIG.board.pins())? };

        let mut bridge = Bridge::new(CONFIG, &LOG_STREAM);
        bridge.start(timestamp_us(), &mut outputs);

        let mut rx = EspLinkRx(&link);
        let mut tx = EspLinkTx(&link);

        loop {
            bridge.poll(timestamp_us(), &mut rx, &mut tx, &mut inputs, &mut outputs);
            drain_to(&LOG_STREAM, &mut UartWriter(&mut log_uart));

            // Yield one FreeRTOS tick so the idle task can feed the watchdog
            unsafe {
                esp_idf_sys::vTaskDelay(1);
            }
        }
    }

    pub fn halt(err: EspError) -> ! {
        log_error!(LOG_STREAM, timestamp_us(), "startup failed: {:?}", err);
        loop {
            unsafe {
                esp_idf_sys::vTaskDelay(1000);
            }
        }
    }
}

#[cfg(target_os = "espidf")]
#[no_mangle]
fn main() {
    // Initialize ESP-IDF
    esp_idf_sys::link_patches();

    if let Err(err) = firmware::run() {
        firmware::halt(err);
    }
}

#[cfg(not(target_os = "espidf"))]
mod simulator;

#[cfg(not(target_os = "espidf"))]
fn main() -> std::process::ExitCode {
    simulator::main()
}
