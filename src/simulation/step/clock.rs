/// Fixed-step accumulator.
///
/// Frame deltas go in, whole physics ticks come out. The leftover fraction is
/// the render interpolation factor.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    step: f32,
    accumulator: f32,
    max_ticks: u32,
}

impl FixedClock {
    pub fn new(step: f32, max_ticks: u32) -> Self {
        Self {
            step: if step > 0.0 { step } else { 1.0 / 60.0 },
            accumulator: 0.0,
            max_ticks: max_ticks.max(1),
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add `dt` seconds; returns how many ticks to run now.
    ///
    /// Long stalls (tab in background) are capped at `max_ticks`, and the
    /// excess time is dropped rather than replayed.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt;
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if self.accumulator >= self.step {
            self.accumulator = 0.0;
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator, in `0..1`.
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_ticks_and_remainder() {
        let mut clock = FixedClock::new(0.01, 5);
        assert_eq!(clock.advance(0.025), 2);
        assert!((clock.alpha() - 0.5).abs() < 1e-3);
        assert_eq!(clock.advance(0.006), 1);
        assert!((clock.alpha() - 0.1).abs() < 1e-3);
    }

    #[test]
    fn stalls_are_capped() {
        let mut clock = FixedClock::new(0.01, 5);
        assert_eq!(clock.advance(3.0), 5);
        assert_eq!(clock.alpha(), 0.0);
        assert_eq!(clock.advance(0.001), 0);
    }

    #[test]
    fn bad_deltas_run_nothing() {
        let mut clock = FixedClock::new(0.01, 5);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(f32::INFINITY), 0);
        assert_eq!(clock.alpha(), 0.0);
    }
}
