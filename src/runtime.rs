//! Control loop driver.
//!
//! One call to [`Bridge::poll`] is one loop iteration:
//!
//! 1. Read link bytes without blocking until a line completes or the link
//!    is empty (at most one line per pass)
//! 2. Apply a completed line (echo first)
//! 3. Run one full scheduler pass, always
//!
//! Command application and evaluation never interleave, so the slot table
//! needs no locking.

use core::fmt::Write;

use crate::config::BridgeConfig;
use crate::engine::{ApplyReport, Engine};
use crate::hal::{InputPort, LinkRx, OutputPort};
use crate::log_warn;
use crate::logging::LogStream;
use crate::protocol::{Feed, LinkReader, LINE_SIZE};

/// Engine plus host link state.
pub struct Bridge<'a> {
    engine: Engine<'a>,
    link: LinkReader,
}

impl<'a> Bridge<'a> {
    /// Create a bridge logging to `log`
    pub fn new(config: BridgeConfig, log: &'a LogStream) -> Self {
        Self {
            engine: Engine::new(config, log),
            link: LinkReader::new(),
        }
    }

    /// Enter *Running*: all outputs low, slot table empty
    pub fn start(&mut self, now_us: i64, outputs: &mut impl OutputPort) {
        self.engine.start(now_us, outputs);
    }

    /// One loop iteration.
    ///
    /// Returns the report of the line applied in this pass, if any.
    pub fn poll(
        &mut self,
        now_us: i64,
        rx: &mut impl LinkRx,
        tx: &mut dyn Write,
        inputs: &mut impl InputPort,
        outputs: &mut impl OutputPort,
    ) -> Option<ApplyReport> {
        let report = self.receive(now_us, rx, tx, outputs);
        self.engine.tick(now_us, inputs, outputs);
        report
    }

    /// The engine (slot table, levels, faults)
    pub fn engine(&self) -> &Engine<'a> {
        &self.engine
    }

    // --- Private methods ---

    fn receive(
        &mut self,
        now_us: i64,
        rx: &mut impl LinkRx,
        tx: &mut dyn Write,
        outputs: &mut impl OutputPort,
    ) -> Option<ApplyReport> {
        while let Some(byte) = rx.read_byte() {
            match self.link.feed(byte) {
                Feed::Pending => {}
                Feed::Line => {
                    let line = self.link.line();
                    if self.engine.config().echo {
                        let _ = write!(tx, "{}\r\n", line);
                    }
                    return Some(self.engine.apply_line(now_us, line, outputs, tx));
                }
                Feed::Overflow => {
                    log_warn!(
                        self.engine.log(),
                        now_us,
                        "line longer than {} bytes discarded",
                        LINE_SIZE
                    );
                }
            }
        }
        None
    }
}
