//! # RustLogicBridge
//!
//! Boolean logic interpreter for small microcontrollers.
//!
//! ## Architecture
//!
//! The host sends lines such as `O1=I1&I2;O2=!I3` over a serial link. The
//! firmware stores each expression in its output slot and, on every loop
//! pass, re-evaluates all slots against the live inputs:
//!
//! ```text
//! host link ─▶ LinkReader ─▶ Engine::apply_line ─▶ SlotTable
//!                                                   │
//! inputs ──────────────────▶ Engine::tick ◀─────────┘ ─▶ outputs
//! ```
//!
//! - No heap: fixed-capacity slots, bounded evaluation stacks
//! - No interrupts, no tasks: one cooperative polling loop ([`Bridge`])
//! - Hardware behind [`hal::InputPort`] / [`hal::OutputPort`]

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod engine;
pub mod expr;
pub mod fault;
pub mod hal;
pub mod log_globals;
pub mod logging;
pub mod protocol;
pub mod runtime;
pub mod signals;
pub mod slots;
pub mod uart_logger;

pub use config::{BridgeConfig, SampleMode, VERSION};
pub use engine::{ApplyReport, Engine};
pub use expr::{evaluate, EvalError};
pub use fault::{FaultCode, FaultState};
pub use log_globals::LOG_STREAM;
pub use runtime::Bridge;
pub use signals::{InputVector, OutputLevels, INPUT_COUNT, OUTPUT_COUNT};
pub use slots::SlotTable;
