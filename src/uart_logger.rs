//! Log output.
//!
//! Formats drained [`LogEntry`]s as text lines. On the target the lines go
//! to a TX-only UART so the host link on UART0 only ever carries protocol
//! traffic.
//!
//! # Hardware Setup
//!
//! ```text
//! ESP32 GPIO (log TX) ──────▶ USB-UART RX
//!                              └─▶ PC Serial Monitor
//! ```

use core::fmt::Write;

use crate::logging::{BufWriter, LogEntry, LogStream};

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::peripheral::Peripheral;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::uart::{self, UartTxDriver};

/// Size of one formatted log line.
pub const LINE_BUF_SIZE: usize = 160;

/// UART configuration for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UartLoggerConfig {
    pub baud_rate: u32,
    pub tx_pin: u8,
}

impl Default for UartLoggerConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            tx_pin: 17, // UART2 TX on most ESP32 devkits
        }
    }
}

/// Format log entry to text.
///
/// Format: `[timestamp_us] LEVEL: message\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    let mut writer = BufWriter::new(buf);
    let _ = write!(
        writer,
        "[{:10}] {}: {}\n",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    );
    writer.len()
}

/// Drain every pending entry into `out`, then report drops if any.
///
/// Returns the number of entries written.
pub fn drain_to<const N: usize>(stream: &LogStream<N>, out: &mut dyn Write) -> usize {
    let mut buf = [0u8; LINE_BUF_SIZE];
    let mut count = 0;

    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut buf);
        if let Ok(line) = core::str::from_utf8(&buf[..len]) {
            let _ = out.write_str(line);
        }
        count += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[WARN] Dropped: {}", dropped);
        stream.reset_dropped();
    }

    count
}

/// Initialize a TX-only UART for logging output.
#[cfg(target_os = "espidf")]
pub fn init_uart_logger<'d, U: uart::Uart>(
    uart: impl Peripheral<P = U> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    config: &UartLoggerConfig,
) -> Result<UartTxDriver<'d>, esp_idf_svc::sys::EspError> {
    let uart_config = uart::config::Config::default()
        .baudrate(esp_idf_svc::hal::units::Hertz(config.baud_rate));

    UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None, // CTS
        Option::<gpio::AnyIOPin>::None, // RTS
        &uart_config,
    )
}

/// `core::fmt::Write` adapter over a UART TX driver.
#[cfg(target_os = "espidf")]
pub struct UartWriter<'a, 'd>(pub &'a mut UartTxDriver<'d>);

#[cfg(target_os = "espidf")]
impl Write for UartWriter<'_, '_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.0.write(s.as_bytes()).map(|_| ()).map_err(|_| core::fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MAX_MSG_LEN};

    fn entry(timestamp_us: i64, level: LogLevel, text: &[u8], len: u8) -> LogEntry {
        let mut msg = [0u8; MAX_MSG_LEN];
        msg[..text.len()].copy_from_slice(text);
        LogEntry {
            timestamp_us,
            level,
            len,
            msg,
        }
    }

    #[test]
    fn test_format_log_entry() {
        let e = entry(1234567, LogLevel::Info, b"Hello world", 11);

        let mut buf = [0u8; 256];
        let len = format_log_entry(&e, &mut buf);

        let formatted = core::str::from_utf8(&buf[..len]).unwrap();
        assert!(formatted.contains("1234567"));
        assert!(formatted.contains("INFO"));
        assert!(formatted.ends_with("Hello world\n"));
    }

    #[test]
    fn test_format_truncated_message() {
        let e = entry(999, LogLevel::Error, b"TEST12345X", 5);

        let mut buf = [0u8; 256];
        let len = format_log_entry(&e, &mut buf);

        let formatted = core::str::from_utf8(&buf[..len]).unwrap();
        assert!(formatted.contains("ERROR"));
        assert!(formatted.contains("TEST1"));
        assert!(!formatted.contains("X"));
    }

    #[test]
    fn test_drain_reports_drops() {
        let stream = LogStream::<2>::new();
        stream.push(1, LogLevel::Warn, b"a");
        stream.push(2, LogLevel::Warn, b"b");
        stream.push(3, LogLevel::Warn, b"c");

        let mut out = String::new();
        assert_eq!(drain_to(&stream, &mut out), 2);
        assert!(out.contains("WARN: a"));
        assert!(out.contains("WARN: b"));
        assert!(out.contains("Dropped: 1"));
        assert_eq!(stream.dropped(), 0);
    }
}
