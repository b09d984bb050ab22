#[cfg(feature = "minifb")]
pub mod minifb_mode;

pub mod windowed_mode;

use crate::{data::Program, error::BackendError};

#[derive(Debug, PartialEq, Copy, Clone, Default)]
pub enum Mode {
    #[default]
    Win,

    #[cfg(feature = "minifb")]
    WinLegacy,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Win => "winit",

            #[cfg(feature = "minifb")]
            Mode::WinLegacy => "minifb",
        }
    }

    /// Runs the frame loop until the user quits and hands the program back
    /// for the exit summary.
    pub fn run(self, prog: Program) -> Result<Program, BackendError> {
        match self {
            Mode::Win => windowed_mode::winit_main(prog),

            #[cfg(feature = "minifb")]
            Mode::WinLegacy => minifb_mode::minifb_main(prog),
        }
    }
}
