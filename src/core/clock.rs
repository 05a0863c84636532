use std::time::Instant;

/// Frame clock feeding elapsed time to the input bridge
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    delta: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            delta: 0.0,
        }
    }

    /// Advance to now and return the seconds since the previous tick
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.delta
    }

    /// Delta measured by the most recent tick
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
        self.delta = 0.0;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
