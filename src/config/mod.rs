//! Module: config
//!
//! Purpose: Startup configuration for RustLogicBridge.
//!
//! Architecture:
//! - One `Copy` struct, built once at startup and handed to the engine
//! - `const fn` defaults so the firmware can keep it in a `static`
//! - Nothing here is part of the host protocol; the host cannot change it
//!
//! Safety: Safe. No unsafe blocks.

use crate::hal::BoardProfile;
use crate::logging::LogLevel;
use crate::uart_logger::UartLoggerConfig;

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// When inputs are read during a scheduler tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SampleMode {
    /// Read all inputs once per tick; every slot sees the same instant.
    #[default]
    Snapshot,
    /// Re-read all inputs before each non-empty slot.
    PerSlot,
}

/// Bridge configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Pin map
    pub board: BoardProfile,

    /// Host link baud rate
    pub link_baud: u32,

    /// Write each received line back to the host
    pub echo: bool,

    /// Report dropped sub-commands on the host link (`E0x: ...`).
    /// When off, dropped sub-commands are silent.
    pub diagnostics: bool,

    /// Input sampling strategy
    pub sample_mode: SampleMode,

    /// Most verbose log level kept
    pub log_level: LogLevel,

    /// Log UART
    pub log_uart: UartLoggerConfig,
}

impl BridgeConfig {
    /// Default configuration
    pub const fn new() -> Self {
        Self {
            board: BoardProfile::NodeMcuEsp32,
            link_baud: 115200,
            echo: true,
            diagnostics: false,
            sample_mode: SampleMode::Snapshot,
            log_level: LogLevel::Info,
            log_uart: UartLoggerConfig {
                baud_rate: 115200,
                tx_pin: 17,
            },
        }
    }

    /// Default configuration for `board`
    pub const fn for_board(board: BoardProfile) -> Self {
        let mut config = Self::new();
        config.board = board;
        config
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}
