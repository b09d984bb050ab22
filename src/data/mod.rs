pub mod config;
pub mod fps;
pub mod reader;

use std::time::{Duration, Instant};

use crate::{
    error::BackendError,
    graphics::{text::FontFace, Argb, Pixel, PixelBuffer, P2},
    math::rng::{time_seed, Rng},
    modes::Mode,
    scene::{self, Scene, Variant},
};

use config::Config;
use fps::{FpsCounter, RunStats, RunSummary};

pub const DEFAULT_WIDTH: u16 = 640;
pub const DEFAULT_HEIGHT: u16 = 480;

/// Pause after each presented frame. Not corrected for frame time.
pub const FRAME_DELAY: Duration = Duration::from_millis(16);

pub const FPS_TEXT_POS: P2 = P2(10, 10);

/// Main program struct
///
/// Owns the canvas and the running scene. Backends feed it cursor
/// positions and timestamps, then copy `pix` out to their surface.
pub(crate) struct Program {
    pub pix: PixelBuffer,

    scene: Box<dyn Scene>,
    font: FontFace,

    fps: FpsCounter,
    stats: RunStats,

    show_fps: bool,
    quiet: bool,

    variant: Variant,
    pub mode: Mode,

    seed: u64,
}

impl Program {
    pub fn new(config: &Config, now: Instant) -> Result<Self, BackendError> {
        let seed = config.seed.unwrap_or_else(time_seed);

        let pix = PixelBuffer::new(config.width(), config.height());
        let scene = scene::build(config.variant, config.count, pix.size(), Rng::new(seed));

        Ok(Self {
            pix,
            scene,
            font: Self::load_font(config)?,

            fps: FpsCounter::new(now),
            stats: RunStats::new(now),

            show_fps: config.show_fps,
            quiet: config.quiet,

            variant: config.variant,
            mode: config.mode,

            seed,
        })
    }

    #[cfg(feature = "ttf")]
    fn load_font(config: &Config) -> Result<FontFace, BackendError> {
        match config.font.as_deref() {
            Some(path) => FontFace::load(path),
            None => Ok(FontFace::default()),
        }
    }

    #[cfg(not(feature = "ttf"))]
    fn load_font(_config: &Config) -> Result<FontFace, BackendError> {
        Ok(FontFace::default())
    }

    pub fn title(&self) -> &'static str {
        self.variant.title()
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn print_startup_info(&self) {
        let (w, h) = self.pix.sizeu();

        log::info!(
            "Running {} with {} shapes at {w}x{h}, seed {}",
            self.scene.name(),
            self.scene.population(),
            self.seed,
        );

        log::info!(
            "Backend: {}, FPS label {}",
            self.mode.name(),
            if self.show_fps { "on" } else { "off" }
        );
    }

    /// Renders one frame into `pix`.
    pub fn frame(&mut self, cursor: Option<P2>, now: Instant) {
        self.pix.clear();
        self.scene.perform(&mut self.pix, cursor);

        if let Some(rate) = self.fps.tick(now) {
            log::trace!("{rate:.1} fps, {} shapes", self.scene.population());
        }

        if self.show_fps {
            let label = self.fps.label();
            self.font
                .draw_text(&mut self.pix, FPS_TEXT_POS, &label, Argb::white());
        }
    }

    /// Adds the work time of one presented frame to the run statistics.
    pub fn record_frame(&mut self, frame_time: Duration) {
        self.stats.record(frame_time);
    }

    pub fn summary(&self, now: Instant) -> RunSummary {
        self.stats.summary(now)
    }
}
