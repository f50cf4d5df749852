use std::fmt;
use std::time::Duration;

/// One throughput sample: how many requests completed over how long.
///
/// Samples are never merged; every batch produces a fresh one.
#[derive(Debug, Clone, Copy)]
pub struct Throughput {
    pub requests: u32,
    pub elapsed: Duration,
}

impl Throughput {
    pub fn new(requests: u32, elapsed: Duration) -> Self {
        Self { requests, elapsed }
    }

    /// Requests per second. Infinite if `elapsed` is zero.
    pub fn per_second(&self) -> f64 {
        self.requests as f64 / self.elapsed.as_secs_f64()
    }

    /// Requests per second rounded to 3 decimal places.
    pub fn rounded(&self) -> f64 {
        (self.per_second() * 1_000.).round() / 1_000.
    }
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug keeps the trailing `.0` on whole numbers
        write!(f, "{:?}", self.rounded())
    }
}
