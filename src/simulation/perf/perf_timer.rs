/// Wall-clock stopwatch for stage timings.
///
/// `js_sys::Date` on wasm (no `Instant` there), `Instant` everywhere else.
#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    #[cfg(target_arch = "wasm32")]
    mark_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    mark: std::time::Instant,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            PerfTimer { mark_ms: js_sys::Date::now() }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            PerfTimer { mark: std::time::Instant::now() }
        }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now() - self.mark_ms
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.mark.elapsed().as_secs_f64() * 1000.0
        }
    }

    /// Elapsed time since the last lap (or start), then restart.
    pub(crate) fn lap_ms(&mut self) -> f64 {
        let ms = self.elapsed_ms();
        *self = Self::start();
        ms
    }
}
