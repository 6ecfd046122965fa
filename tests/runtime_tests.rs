//! Control loop tests: link bytes in, echo and levels out

use core::fmt::Write;

use rust_logic_bridge::hal::{BufferRx, InputPort, OutputPort};
use rust_logic_bridge::logging::{LogLevel, LogStream};
use rust_logic_bridge::protocol::LINE_SIZE;
use rust_logic_bridge::uart_logger::drain_to;
use rust_logic_bridge::{Bridge, BridgeConfig, InputVector};

struct FakeInputs(InputVector);

impl InputPort for FakeInputs {
    fn read(&mut self, index: usize) -> bool {
        self.0.get(index)
    }
}

#[derive(Default)]
struct FakeOutputs {
    levels: [bool; 6],
}

impl OutputPort for FakeOutputs {
    fn write(&mut self, index: usize, level: bool) {
        self.levels[index] = level;
    }
}

struct TestOutput {
    buffer: String,
}

impl TestOutput {
    fn new() -> Self {
        Self { buffer: String::new() }
    }
}

impl Write for TestOutput {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}

struct Rig<'a> {
    bridge: Bridge<'a>,
    inputs: FakeInputs,
    outputs: FakeOutputs,
    tx: TestOutput,
}

impl<'a> Rig<'a> {
    fn new(config: BridgeConfig, log: &'a LogStream) -> Self {
        let mut rig = Self {
            bridge: Bridge::new(config, log),
            inputs: FakeInputs(InputVector::LOW),
            outputs: FakeOutputs::default(),
            tx: TestOutput::new(),
        };
        rig.bridge.start(0, &mut rig.outputs);
        rig
    }

    fn poll(&mut self, rx: &mut BufferRx<'_>) -> Option<rust_logic_bridge::ApplyReport> {
        self.bridge
            .poll(0, rx, &mut self.tx, &mut self.inputs, &mut self.outputs)
    }

    fn send(&mut self, bytes: &[u8]) -> Option<rust_logic_bridge::ApplyReport> {
        self.poll(&mut BufferRx::new(bytes))
    }
}

#[test]
fn test_line_applied_and_echoed() {
    let log = LogStream::new();
    let mut rig = Rig::new(BridgeConfig::new(), &log);

    let report = rig.send(b"O1=1\n");
    assert_eq!(report.map(|r| r.assigned), Some(1));
    assert_eq!(rig.tx.buffer, "O1=1\r\n");
    assert!(rig.outputs.levels[0]);
}

#[test]
fn test_crlf_line_echoed_once() {
    let log = LogStream::new();
    let mut rig = Rig::new(BridgeConfig::new(), &log);

    rig.send(b"O2=1\r\n");
    assert_eq!(rig.tx.buffer, "O2=1\r\n");
    assert!(rig.outputs.levels[1]);
}

#[test]
fn test_echo_disabled() {
    let log = LogStream::new();
    let mut config = BridgeConfig::new();
    config.echo = false;
    let mut rig = Rig::new(config, &log);

    rig.send(b"O1=1\n");
    assert!(rig.tx.buffer.is_empty());
    assert!(rig.outputs.levels[0]);
}

#[test]
fn test_line_split_across_polls() {
    let log = LogStream::new();
    let mut rig = Rig::new(BridgeConfig::new(), &log);

    assert_eq!(rig.send(b"O1=I"), None);
    assert!(!rig.outputs.levels[0]);
    assert!(rig.send(b"1\n").is_some());
    assert_eq!(rig.bridge.engine().slots().get(0), Some("I1"));
}

#[test]
fn test_one_line_per_poll() {
    let log = LogStream::new();
    let mut rig = Rig::new(BridgeConfig::new(), &log);
    let bytes = b"O1=1\nO2=1\n";
    let mut rx = BufferRx::new(bytes);

    assert!(rig.poll(&mut rx).is_some());
    assert_eq!(rx.remaining(), 5);
    assert_eq!(rig.outputs.levels[..2], [true, false]);

    assert!(rig.poll(&mut rx).is_some());
    assert_eq!(rx.remaining(), 0);
    assert_eq!(rig.outputs.levels[..2], [false, true]);
}

#[test]
fn test_idle_poll_follows_inputs() {
    let log = LogStream::new();
    let mut rig = Rig::new(BridgeConfig::new(), &log);

    rig.send(b"O1=I1&!I2\n");
    assert!(!rig.outputs.levels[0]);

    rig.inputs.0 = InputVector::parse("1").unwrap();
    assert_eq!(rig.send(b""), None);
    assert!(rig.outputs.levels[0]);

    rig.inputs.0 = InputVector::parse("11").unwrap();
    rig.send(b"");
    assert!(!rig.outputs.levels[0]);
}

#[test]
fn test_overlong_line_discarded() {
    let log = LogStream::new();
    let mut rig = Rig::new(BridgeConfig::new(), &log);

    rig.send(b"O1=1\n");
    rig.tx.buffer.clear();

    let mut line = b"O2=".to_vec();
    line.resize(LINE_SIZE + 20, b'1');
    line.push(b'\n');
    assert_eq!(rig.send(&line), None);

    // Previous assignment survives, nothing echoed
    assert!(rig.tx.buffer.is_empty());
    assert!(rig.outputs.levels[0]);
    assert!(!rig.outputs.levels[1]);
    assert_eq!(rig.bridge.engine().lines(), 1);

    let mut warned = false;
    while let Some(entry) = log.drain() {
        if entry.level == LogLevel::Warn && entry.message().contains("discarded") {
            warned = true;
        }
    }
    assert!(warned);
}

#[test]
fn test_diagnostics_follow_echo() {
    let log = LogStream::new();
    let mut config = BridgeConfig::new();
    config.diagnostics = true;
    let mut rig = Rig::new(config, &log);

    rig.send(b"O9=1;O1=1\n");
    assert_eq!(
        rig.tx.buffer,
        "O9=1;O1=1\r\nE04: output out of range: O9=1\r\n"
    );
    assert!(rig.outputs.levels[0]);
}

#[test]
fn test_log_drain_formats_entries() {
    let log = LogStream::new();
    let _rig = Rig::new(BridgeConfig::new(), &log);

    let mut out = TestOutput::new();
    let count = drain_to(&log, &mut out);
    assert_eq!(count, 1);
    assert!(out.buffer.contains("INFO: "));
    assert!(out.buffer.contains("running, board=esp32"));
    assert_eq!(log.pending(), 0);
}
