//! Host-side simulator.
//!
//! Runs the firmware loop against in-memory pins. Every stdin line is sent
//! to the bridge as a command line, except `@<bits>` lines, which set the
//! simulated inputs (`@10100000` = I1 and I3 high). After each line one
//! scheduler pass runs and the output levels are printed.

use std::fmt;
use std::io::{self, BufRead, Write as _};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use rust_logic_bridge::hal::{BoardProfile, BufferRx, InputPort, OutputPort};
use rust_logic_bridge::logging::LogLevel;
use rust_logic_bridge::uart_logger::drain_to;
use rust_logic_bridge::{Bridge, BridgeConfig, InputVector, SampleMode, LOG_STREAM, OUTPUT_COUNT};

#[derive(Parser, Debug)]
#[command(name = "bridge", version = env!("VERSION_STRING"), about = "Logic bridge simulator")]
struct Args {
    /// Initial input levels, first character is I1 (e.g. 10100000)
    #[arg(short, long, default_value = "", value_parser = parse_inputs)]
    inputs: InputVector,

    /// Board pin map: mega, uno or esp32
    #[arg(short, long, default_value = BoardProfile::default().name(), value_parser = parse_board)]
    board: BoardProfile,

    /// Report dropped sub-commands
    #[arg(short, long)]
    diagnostics: bool,

    /// Do not echo received lines
    #[arg(long)]
    no_echo: bool,

    /// Re-read inputs before every slot instead of once per pass
    #[arg(long)]
    per_slot: bool,

    /// Log debug messages to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_inputs(s: &str) -> Result<InputVector, String> {
    InputVector::parse(s).ok_or_else(|| format!("expected up to 8 of '0'/'1', got '{}'", s))
}

fn parse_board(s: &str) -> Result<BoardProfile, String> {
    BoardProfile::from_name(s).ok_or_else(|| format!("unknown board '{}'", s))
}

/// Simulated input lines
struct SimInputs(InputVector);

impl InputPort for SimInputs {
    fn read(&mut self, index: usize) -> bool {
        self.0.get(index)
    }
}

/// Simulated output lines; slots without a pin on the board stay `None`
struct SimOutputs {
    board: BoardProfile,
    pins: [Option<bool>; OUTPUT_COUNT],
}

impl OutputPort for SimOutputs {
    fn write(&mut self, index: usize, level: bool) {
        if self.board.pins().output_pin(index).is_some() {
            self.pins[index] = Some(level);
        }
    }
}

impl fmt::Display for SimOutputs {
    /// `O1=1 O2=0 ... O5=-` (`-` = not wired on this board)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, pin) in self.pins.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            match pin {
                Some(level) => write!(f, "O{}={}", index + 1, *level as u8)?,
                None => write!(f, "O{}=-", index + 1)?,
            }
        }
        Ok(())
    }
}

/// `fmt::Write` over stdout
struct Stdout(io::Stdout);

impl fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

/// `fmt::Write` over stderr
struct Stderr(io::Stderr);

impl fmt::Write for Stderr {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

pub fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = BridgeConfig::for_board(args.board);
    config.diagnostics = args.diagnostics;
    config.echo = !args.no_echo;
    if args.per_slot {
        config.sample_mode = SampleMode::PerSlot;
    }
    if args.verbose {
        config.log_level = LogLevel::Debug;
    }

    let started = Instant::now();
    let now_us = || started.elapsed().as_micros() as i64;

    let mut inputs = SimInputs(args.inputs);
    let mut outputs = SimOutputs {
        board: args.board,
        pins: [None; OUTPUT_COUNT],
    };
    let mut stdout = Stdout(io::stdout());
    let mut stderr = Stderr(io::stderr());

    let mut bridge = Bridge::new(config, &LOG_STREAM);
    bridge.start(now_us(), &mut outputs);
    drain_to(&LOG_STREAM, &mut stderr);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("stdin: {}", err);
                return ExitCode::FAILURE;
            }
        };

        let mut bytes = Vec::new();
        if let Some(bits) = line.strip_prefix('@') {
            // No command this pass, only a re-evaluation against new inputs
            match InputVector::parse(bits.trim()) {
                Some(v) => inputs.0 = v,
                None => eprintln!("bad input bits '{}'", bits),
            }
        } else {
            bytes = line.into_bytes();
            bytes.push(b'\n');
        }

        let mut rx = BufferRx::new(&bytes);
        bridge.poll(now_us(), &mut rx, &mut stdout, &mut inputs, &mut outputs);

        println!("{}", outputs);
        drain_to(&LOG_STREAM, &mut stderr);
    }

    ExitCode::SUCCESS
}
