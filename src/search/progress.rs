//! Coarse progress reporting for long grid searches.
//!
//! The search advances in per-origin strides, so a callback carries its absolute position
//! within the full search (`start..stop`) and announces each time it crosses a percentage
//! threshold. A zero `percent` interval silences the callback entirely, which is how
//! non-reporting partitions of a parallel search are configured.

/// Tracks completed evaluations and prints threshold crossings to stderr.
#[derive(Debug, Clone)]
pub struct ProgressCallback {
    count: usize,
    stop: usize,
    percent: usize,
    next_percent: usize,
}

impl ProgressCallback {
    /// A callback positioned at `start` of `stop` total evaluations, announcing every
    /// `percent` percent. `percent == 0` disables all output.
    pub fn new(start: usize, stop: usize, percent: usize) -> Self {
        let mut callback = ProgressCallback {
            count: start,
            stop,
            percent,
            next_percent: 0,
        };
        if percent > 0 && stop > 0 {
            // skip the thresholds already behind us
            let done = 100 * start / stop;
            callback.next_percent = (done / percent + usize::from(done % percent != 0)) * percent;
            if callback.next_percent == 0 {
                callback.next_percent = percent;
            }
        }
        callback
    }

    /// Record `n` more completed evaluations, printing any thresholds crossed.
    pub fn iterate(&mut self, n: usize) {
        self.count += n;
        if self.percent == 0 || self.stop == 0 {
            return;
        }
        let done = 100 * self.count / self.stop;
        while self.next_percent <= done && self.next_percent <= 100 {
            eprintln!("  about {} percent finished", self.next_percent);
            self.next_percent += self.percent;
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
