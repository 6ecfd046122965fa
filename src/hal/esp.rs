//! ESP-IDF GPIO adapter.
//!
//! Builds `PinDriver`s from a [`PinMap`] and exposes them through the
//! [`InputPort`] / [`OutputPort`] traits. The host link is a UART polled
//! with a zero timeout.

use esp_idf_svc::hal::delay::NON_BLOCK;
use esp_idf_svc::hal::gpio::{AnyInputPin, AnyOutputPin, Input, Level, Output, PinDriver};
use esp_idf_svc::hal::uart::UartDriver;
use esp_idf_svc::sys::EspError;
use heapless::Vec;

use super::{InputPort, LinkRx, OutputPort, PinMap};
use crate::signals::{INPUT_COUNT, OUTPUT_COUNT};

type InputDriver = PinDriver<'static, AnyInputPin, Input>;
type OutputDriver = PinDriver<'static, AnyOutputPin, Output>;

/// Input lines of the board, in `I1`..`I8` order.
pub struct EspInputs {
    pins: Vec<InputDriver, INPUT_COUNT>,
}

/// Output lines of the board. Unconnected slots are `None`.
pub struct EspOutputs {
    pins: Vec<Option<OutputDriver>, OUTPUT_COUNT>,
    errors: u32,
}

/// Configure every pin of `map`. All outputs start low.
///
/// Inputs rely on external pull-downs (GPIO34-39 have no internal ones).
///
/// # Safety
///
/// Pins are created from raw numbers. The caller must not use the same GPIOs
/// through the `Peripherals` singleton.
pub unsafe fn take_pins(map: &PinMap) -> Result<(EspInputs, EspOutputs), EspError> {
    let mut inputs = EspInputs { pins: Vec::new() };
    for &pin in map.inputs.iter() {
        let driver = PinDriver::input(AnyInputPin::new(pin as i32))?;
        // Capacity equals map.inputs length.
        let _ = inputs.pins.push(driver);
    }

    let mut outputs = EspOutputs {
        pins: Vec::new(),
        errors: 0,
    };
    for pin in map.outputs.iter() {
        let driver = match pin {
            Some(pin) => {
                let mut driver = PinDriver::output(AnyOutputPin::new(*pin as i32))?;
                driver.set_low()?;
                Some(driver)
            }
            None => None,
        };
        let _ = outputs.pins.push(driver);
    }

    Ok((inputs, outputs))
}

impl InputPort for EspInputs {
    fn read(&mut self, index: usize) -> bool {
        self.pins.get(index).map(|p| p.is_high()).unwrap_or(false)
    }
}

impl OutputPort for EspOutputs {
    fn write(&mut self, index: usize, level: bool) {
        if let Some(Some(pin)) = self.pins.get_mut(index) {
            if pin.set_level(Level::from(level)).is_err() {
                self.errors = self.errors.wrapping_add(1);
            }
        }
    }

    fn write_errors(&self) -> u32 {
        self.errors
    }
}

/// Receive half of the host link (USB-serial bridge on UART0).
pub struct EspLinkRx<'a, 'd>(pub &'a UartDriver<'d>);

/// Transmit half of the host link, for echo and diagnostics.
pub struct EspLinkTx<'a, 'd>(pub &'a UartDriver<'d>);

impl LinkRx for EspLinkRx<'_, '_> {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.0.read(&mut byte, NON_BLOCK) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }
}

impl core::fmt::Write for EspLinkTx<'_, '_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let mut bytes = s.as_bytes();
        while !bytes.is_empty() {
            let written = self.0.write(bytes).map_err(|_| core::fmt::Error)?;
            if written == 0 {
                return Err(core::fmt::Error);
            }
            bytes = &bytes[written..];
        }
        Ok(())
    }
}
