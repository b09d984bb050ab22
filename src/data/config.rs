use std::path::PathBuf;

use crate::{modes::Mode, scene::Variant};

use super::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Startup settings, filled in by `eval_args`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub count: i64,
    pub variant: Variant,
    pub mode: Mode,

    pub show_fps: bool,
    pub quiet: bool,
    pub help: bool,

    pub seed: Option<u64>,
    pub size: (u16, u16),

    #[cfg_attr(not(feature = "ttf"), allow(dead_code))]
    pub font: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count: 0,
            variant: Variant::default(),
            mode: Mode::default(),

            show_fps: true,
            quiet: false,
            help: false,

            seed: None,
            size: (DEFAULT_WIDTH, DEFAULT_HEIGHT),

            font: None,
        }
    }
}

impl Config {
    pub fn width(&self) -> usize {
        self.size.0 as usize
    }

    pub fn height(&self) -> usize {
        self.size.1 as usize
    }
}
