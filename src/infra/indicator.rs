//! Liveness indicator toggled once per tick (typically a board LED).

/// Output toggled by the tick loop to show the node is alive.
pub trait StatusIndicator {
    fn toggle(&mut self);
}

/// Indicator for boards without a status output.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIndicator;

impl StatusIndicator for NoIndicator {
    fn toggle(&mut self) {}
}
