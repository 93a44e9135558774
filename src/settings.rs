use std::time::Duration;

/// VCS configuration options
#[derive(Clone, Debug)]
pub struct VcsSettings {
    /// Processor setting: honour the decimal flag in ADC/SBC. When disabled
    /// the arithmetic is always binary, as in 6502 derivatives without the
    /// BCD circuitry
    pub decimal_mode: bool,

    /// Sleep between frames to keep the emulation close to 60 frames per
    /// second. Disable to run as fast as possible
    pub frame_throttle: bool,

    /// How often `Console::run` reports collected metrics
    pub metrics_interval: Duration,
}

pub const DEFAULT_METRICS_INTERVAL: Duration = Duration::from_secs(1);

impl Default for VcsSettings {
    fn default() -> Self {
        Self {
            decimal_mode: true,
            frame_throttle: true,
            metrics_interval: DEFAULT_METRICS_INTERVAL,
        }
    }
}
