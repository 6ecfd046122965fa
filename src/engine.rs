//! Logic engine: slot table, command application, scheduler tick.
//!
//! Pure logic over the [`InputPort`] / [`OutputPort`] traits. Fully
//! testable on host with fake ports.
//!
//! # State
//!
//! One state, *Running*, entered by [`Engine::start`]. Two events re-enter
//! it:
//! - **command received** → [`Engine::apply_line`]: clear every slot, drive
//!   every output low, store the line's valid assignments
//! - **tick** → [`Engine::tick`]: evaluate every slot, drive every output
//!
//! Neither event can fail. Bad sub-commands are dropped, bad expressions
//! drive their output low.

use core::fmt::Write;

use crate::config::{BridgeConfig, SampleMode, VERSION};
use crate::expr::{evaluate, EvalError};
use crate::fault::FaultState;
use crate::hal::{InputPort, OutputPort};
use crate::logging::LogStream;
use crate::protocol::parse_line;
use crate::signals::{InputVector, OutputLevels, OUTPUT_COUNT};
use crate::slots::SlotTable;
use crate::{log_debug, log_info, log_warn};

/// Result of applying one command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Sub-commands stored into a slot
    pub assigned: u8,
    /// Sub-commands dropped as malformed
    pub dropped: u8,
}

/// Engine context.
///
/// Owns everything the control loop mutates. Hardware is passed in per
/// call, so the same engine runs against GPIO on the target and fakes in
/// tests.
pub struct Engine<'a> {
    config: BridgeConfig,
    slots: SlotTable,
    levels: OutputLevels,
    faults: FaultState,
    log: &'a LogStream,

    lines: u32,
    ticks: u32,
    write_errors: u32,
}

impl<'a> Engine<'a> {
    /// Create an engine with an empty slot table.
    pub fn new(config: BridgeConfig, log: &'a LogStream) -> Self {
        log.set_max_level(config.log_level);
        Self {
            config,
            slots: SlotTable::new(),
            levels: OutputLevels::LOW,
            faults: FaultState::new(),
            log,
            lines: 0,
            ticks: 0,
            write_errors: 0,
        }
    }

    /// Enter *Running*: drive every output low.
    pub fn start(&mut self, now_us: i64, outputs: &mut impl OutputPort) {
        self.drive_all_low(outputs);
        log_info!(
            self.log,
            now_us,
            "{} running, board={} sampling={:?}",
            VERSION,
            self.config.board.name(),
            self.config.sample_mode
        );
    }

    /// Apply one command line.
    ///
    /// Unconditional reset, not a merge: every slot is emptied and every
    /// output driven low before the line's assignments are stored. With
    /// diagnostics enabled, each dropped sub-command is reported on `reply`.
    pub fn apply_line(
        &mut self,
        now_us: i64,
        line: &str,
        outputs: &mut impl OutputPort,
        reply: &mut dyn Write,
    ) -> ApplyReport {
        self.slots.clear();
        self.faults.clear();
        self.drive_all_low(outputs);
        self.lines = self.lines.wrapping_add(1);

        let mut report = ApplyReport::default();

        for sub in parse_line(line) {
            let stored = match sub.result {
                Ok(a) => self.slots.assign(a.slot, a.expr),
                Err(e) => {
                    log_debug!(self.log, now_us, "drop '{}': {}", sub.text, e);
                    if self.config.diagnostics {
                        let _ = write!(reply, "{}: {}\r\n", e, sub.text);
                    }
                    false
                }
            };

            if stored {
                report.assigned = report.assigned.saturating_add(1);
            } else {
                report.dropped = report.dropped.saturating_add(1);
            }
        }

        log_debug!(
            self.log,
            now_us,
            "line {}: {} assigned, {} dropped",
            self.lines,
            report.assigned,
            report.dropped
        );

        report
    }

    /// One scheduler pass over all slots.
    pub fn tick(
        &mut self,
        now_us: i64,
        inputs: &mut impl InputPort,
        outputs: &mut impl OutputPort,
    ) {
        self.ticks = self.ticks.wrapping_add(1);

        let mut snapshot = match self.config.sample_mode {
            SampleMode::Snapshot => InputVector::sample(inputs),
            SampleMode::PerSlot => InputVector::LOW,
        };

        for index in 0..OUTPUT_COUNT {
            let Some(expr) = self.slots.get(index) else {
                self.drive(index, false, outputs);
                continue;
            };

            if self.config.sample_mode == SampleMode::PerSlot {
                snapshot = InputVector::sample(inputs);
            }

            let outcome = evaluate(expr, snapshot);
            if self.faults.record(index, outcome) {
                match outcome {
                    Err(e) => log_warn!(self.log, now_us, "O{} forced low: {}", index + 1, e),
                    Ok(_) => log_info!(self.log, now_us, "O{} recovered", index + 1),
                }
            }

            self.drive(index, outcome.unwrap_or(false), outputs);
        }

        self.check_write_errors(now_us, &*outputs);
    }

    /// Evaluate slot `index` against `inputs` without driving anything.
    ///
    /// `None` for an empty slot.
    pub fn evaluate_slot(&self, index: usize, inputs: InputVector) -> Option<Result<bool, EvalError>> {
        self.slots.get(index).map(|expr| evaluate(expr, inputs))
    }

    /// Current slot table
    pub fn slots(&self) -> &SlotTable {
        &self.slots
    }

    /// Levels last driven
    pub fn levels(&self) -> OutputLevels {
        self.levels
    }

    /// Evaluation fault state
    pub fn faults(&self) -> &FaultState {
        &self.faults
    }

    /// Active configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Log stream this engine writes to
    pub fn log(&self) -> &'a LogStream {
        self.log
    }

    /// Command lines applied since start
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Scheduler passes since start
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Failed output writes seen so far
    pub fn write_errors(&self) -> u32 {
        self.write_errors
    }

    // --- Private methods ---

    fn drive(&mut self, index: usize, level: bool, outputs: &mut impl OutputPort) {
        outputs.write(index, level);
        self.levels.set(index, level);
    }

    /// Warn once per pass in which the output port reported new failures.
    fn check_write_errors(&mut self, now_us: i64, outputs: &impl OutputPort) {
        let total = outputs.write_errors();
        if total != self.write_errors {
            log_warn!(
                self.log,
                now_us,
                "{} output write(s) failed",
                total.wrapping_sub(self.write_errors)
            );
            self.write_errors = total;
        }
    }

    fn drive_all_low(&mut self, outputs: &mut impl OutputPort) {
        for index in 0..OUTPUT_COUNT {
            self.drive(index, false, outputs);
        }
    }
}
