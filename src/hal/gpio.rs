//! GPIO pin maps for the supported boards.
//!
//! The host editor knows a handful of boards; each one wires `I1`..`I8`
//! and `O1`..`O6` to fixed pins. Boards with fewer than six output pins
//! leave the upper slots unconnected (still evaluated, never driven).
//!
//! Only boards with numeric GPIOs are listed. The editor's clock pin is
//! not used: the loop is free-running.

use crate::signals::{INPUT_COUNT, OUTPUT_COUNT};

/// Numeric GPIO identifier.
pub type PinId = u8;

/// Pin assignment for one board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinMap {
    pub inputs: [PinId; INPUT_COUNT],
    pub outputs: [Option<PinId>; OUTPUT_COUNT],
}

impl PinMap {
    /// Pin wired to output `index`, if any
    pub fn output_pin(&self, index: usize) -> Option<PinId> {
        self.outputs.get(index).copied().flatten()
    }

    /// Pin wired to input `index`
    pub fn input_pin(&self, index: usize) -> Option<PinId> {
        self.inputs.get(index).copied()
    }

    /// Number of outputs that have a physical pin
    pub fn connected_outputs(&self) -> usize {
        self.outputs.iter().filter(|p| p.is_some()).count()
    }
}

/// Supported boards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoardProfile {
    /// Arduino Mega 2560
    ArduinoMega,
    /// Arduino Uno / Micro / Mini (same header layout)
    ArduinoUno,
    /// NodeMCU-32S style ESP32 devkit
    #[default]
    NodeMcuEsp32,
}

const MEGA: PinMap = PinMap {
    inputs: [22, 23, 24, 25, 26, 27, 28, 29],
    outputs: [Some(32), Some(33), Some(34), Some(35), Some(36), Some(37)],
};

const UNO: PinMap = PinMap {
    inputs: [2, 3, 4, 5, 6, 7, 8, 9],
    outputs: [Some(10), Some(11), Some(12), Some(13), None, None],
};

// GPIO34/35 are input-only on the ESP32, which is fine for I3/I4.
const NODEMCU_ESP32: PinMap = PinMap {
    inputs: [32, 33, 34, 35, 25, 26, 27, 14],
    outputs: [Some(23), Some(22), Some(21), Some(19), Some(18), Some(5)],
};

impl BoardProfile {
    /// All profiles, for lookup by name
    pub const ALL: [BoardProfile; 3] = [
        BoardProfile::ArduinoMega,
        BoardProfile::ArduinoUno,
        BoardProfile::NodeMcuEsp32,
    ];

    /// Pin map for this board
    pub const fn pins(self) -> &'static PinMap {
        match self {
            BoardProfile::ArduinoMega => &MEGA,
            BoardProfile::ArduinoUno => &UNO,
            BoardProfile::NodeMcuEsp32 => &NODEMCU_ESP32,
        }
    }

    /// Short name used in logs and the simulator
    pub const fn name(self) -> &'static str {
        match self {
            BoardProfile::ArduinoMega => "mega",
            BoardProfile::ArduinoUno => "uno",
            BoardProfile::NodeMcuEsp32 => "esp32",
        }
    }

    /// Find a profile by its short name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }
}
