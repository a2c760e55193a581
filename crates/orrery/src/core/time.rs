/// Maps wall-clock time to simulation time.
///
/// The simulation is live: each frame derives its time from the host clock,
/// nothing accumulates between frames, so a dropped frame is only a visible
/// jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    /// Simulation units per wall-clock millisecond.
    time_scale: f64,
}

impl SimClock {
    pub fn new(time_scale: f64) -> Self {
        Self { time_scale }
    }

    /// Simulation time for a wall-clock reading in milliseconds.
    pub fn sim_time(&self, wall_clock_ms: f64) -> f64 {
        wall_clock_ms * self.time_scale
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }
}
