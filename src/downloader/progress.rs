use std::time::{Duration, Instant};
use tracing::info;

/// A progress indicator driven by [`BlockProgress`].
pub trait ProgressReporter {
    /// A transfer begins. `total` is `None` when the server did not say.
    fn start(&mut self, total: Option<u64>);
    fn advance(&mut self, delta: u64);
    fn finish(&mut self);
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&mut self, _total: Option<u64>) {}
    fn advance(&mut self, _delta: u64) {}
    fn finish(&mut self) {}
}

/// Turns `(block_count, block_size, total_size)` reports from the transport
/// into indicator updates.
///
/// The first report of a transfer opens the indicator, every report advances
/// it by the bytes of the blocks received since the previous one, and once
/// `block_count * block_size` reaches the total the indicator is finished and
/// the counters are reset so the next transfer starts from zero.
#[derive(Debug)]
pub struct BlockProgress<R> {
    reporter: R,
    last_block_count: u64,
    position: u64,
    active: bool,
}

impl<R: ProgressReporter> BlockProgress<R> {
    pub fn new(reporter: R) -> Self {
        BlockProgress {
            reporter,
            last_block_count: 0,
            position: 0,
            active: false,
        }
    }

    pub fn update(&mut self, block_count: u64, block_size: u64, total_size: Option<u64>) {
        if !self.active {
            self.reporter.start(total_size);
            self.active = true;
        }

        let mut delta = block_count.saturating_sub(self.last_block_count) * block_size;
        if let Some(total) = total_size {
            delta = delta.min(total.saturating_sub(self.position));
        }
        if delta > 0 {
            self.reporter.advance(delta);
            self.position += delta;
        }
        self.last_block_count = block_count;

        if let Some(total) = total_size {
            if block_count.saturating_mul(block_size) >= total {
                self.close();
            }
        }
    }

    /// Finishes an indicator left open, e.g. when the total was unknown.
    pub fn complete(&mut self) {
        if self.active {
            self.close();
        }
    }

    /// Drops the counters of an interrupted transfer without finishing its
    /// indicator.
    pub fn reset(&mut self) {
        self.active = false;
        self.last_block_count = 0;
        self.position = 0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    fn close(&mut self) {
        self.reporter.finish();
        self.reset();
    }
}

/// Reports progress through `tracing`, at most once per interval.
pub struct LogReporter {
    name: String,
    interval: Duration,
    current: u64,
    total: Option<u64>,
    start_time: Instant,
    last_update: Instant,
}

impl LogReporter {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Instant::now();
        LogReporter {
            name: name.into(),
            interval: Duration::from_millis(500),
            current: 0,
            total: None,
            start_time: now,
            last_update: now,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    fn display(&self) {
        match self.total {
            Some(total) if total > 0 => {
                let percentage = (self.current as f64 / total as f64 * 100.0).round() as u8;
                info!(
                    "{}: {}% ({}/{})",
                    self.name,
                    percentage,
                    format_bytes(self.current),
                    format_bytes(total)
                );
            }
            _ => info!("{}: {}", self.name, format_bytes(self.current)),
        }
    }
}

impl ProgressReporter for LogReporter {
    fn start(&mut self, total: Option<u64>) {
        let now = Instant::now();
        self.current = 0;
        self.total = total;
        self.start_time = now;
        self.last_update = now;
        self.display();
    }

    fn advance(&mut self, delta: u64) {
        self.current += delta;
        if self.last_update.elapsed() >= self.interval {
            self.display();
            self.last_update = Instant::now();
        }
    }

    fn finish(&mut self) {
        info!(
            "{}: complete - {} in {:.1}s",
            self.name,
            format_bytes(self.current),
            self.start_time.elapsed().as_secs_f64()
        );
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        starts: Vec<Option<u64>>,
        advances: Vec<u64>,
        finishes: usize,
    }

    impl ProgressReporter for Recorder {
        fn start(&mut self, total: Option<u64>) {
            self.starts.push(total);
        }
        fn advance(&mut self, delta: u64) {
            self.advances.push(delta);
        }
        fn finish(&mut self) {
            self.finishes += 1;
        }
    }

    fn run_transfer(progress: &mut BlockProgress<Recorder>, blocks: u64, size: u64, total: u64) {
        for block_count in 0..=blocks {
            progress.update(block_count, size, Some(total));
        }
    }

    #[test]
    fn ten_blocks_advance_by_block_size_and_close() {
        let mut progress = BlockProgress::new(Recorder::default());

        progress.update(0, 1024, Some(10240));
        assert!(progress.is_active());
        assert_eq!(progress.reporter().starts, vec![Some(10240)]);
        assert!(progress.reporter().advances.is_empty());

        for block_count in 1..=9 {
            progress.update(block_count, 1024, Some(10240));
            assert_eq!(progress.reporter().advances.last(), Some(&1024));
            assert_eq!(progress.reporter().finishes, 0);
        }

        progress.update(10, 1024, Some(10240));
        let recorder = progress.reporter();
        assert_eq!(recorder.advances, vec![1024; 10]);
        assert_eq!(recorder.advances.iter().sum::<u64>(), 10240);
        assert_eq!(recorder.finishes, 1);
        assert!(!progress.is_active());
    }

    #[test]
    fn sequential_transfers_do_not_share_counters() {
        let mut progress = BlockProgress::new(Recorder::default());

        run_transfer(&mut progress, 10, 1024, 10240);
        run_transfer(&mut progress, 4, 512, 2048);

        let recorder = progress.into_reporter();
        assert_eq!(recorder.starts, vec![Some(10240), Some(2048)]);
        assert_eq!(recorder.finishes, 2);
        assert_eq!(&recorder.advances[10..], &[512, 512, 512, 512]);
    }

    #[test]
    fn reset_after_an_interrupted_transfer_starts_over() {
        let mut progress = BlockProgress::new(Recorder::default());
        progress.update(0, 1024, Some(10240));
        progress.update(4, 1024, Some(10240));

        progress.reset();
        assert!(!progress.is_active());
        run_transfer(&mut progress, 3, 1024, 3072);

        let recorder = progress.into_reporter();
        assert_eq!(recorder.starts, vec![Some(10240), Some(3072)]);
        assert_eq!(recorder.advances, vec![4096, 1024, 1024, 1024]);
        assert_eq!(recorder.finishes, 1);
    }

    #[test]
    fn skipped_blocks_are_counted() {
        let mut progress = BlockProgress::new(Recorder::default());
        progress.update(0, 100, Some(1000));
        progress.update(3, 100, Some(1000));
        progress.update(7, 100, Some(1000));
        assert_eq!(progress.reporter().advances, vec![300, 400]);
    }

    #[test]
    fn last_partial_block_does_not_overshoot_total() {
        let mut progress = BlockProgress::new(Recorder::default());
        progress.update(0, 1024, Some(2500));
        progress.update(1, 1024, Some(2500));
        progress.update(2, 1024, Some(2500));
        progress.update(3, 1024, Some(2500));

        let recorder = progress.into_reporter();
        assert_eq!(recorder.advances, vec![1024, 1024, 452]);
        assert_eq!(recorder.finishes, 1);
    }

    #[test]
    fn unknown_total_stays_open_until_completed() {
        let mut progress = BlockProgress::new(Recorder::default());
        progress.update(0, 10, None);
        progress.update(5, 10, None);
        assert!(progress.is_active());
        assert_eq!(progress.reporter().finishes, 0);

        progress.complete();
        progress.complete();
        assert!(!progress.is_active());
        assert_eq!(progress.reporter().finishes, 1);
        assert_eq!(progress.reporter().advances, vec![50]);
    }

    #[test]
    fn empty_body_opens_and_closes_at_once() {
        let mut progress = BlockProgress::new(Recorder::default());
        progress.update(0, 8192, Some(0));
        let recorder = progress.into_reporter();
        assert_eq!(recorder.starts, vec![Some(0)]);
        assert_eq!(recorder.finishes, 1);
        assert!(recorder.advances.is_empty());
    }

    #[test]
    fn log_reporter_tracks_bytes_across_transfers() {
        let mut reporter = LogReporter::new("apple2orange.zip").with_interval(Duration::ZERO);
        reporter.start(Some(4096));
        reporter.advance(4096);
        reporter.finish();
        assert_eq!(reporter.current, 4096);

        reporter.start(None);
        assert_eq!(reporter.current, 0);
        assert_eq!(reporter.total, None);
    }

    #[test]
    fn bytes_are_human_readable() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }
}
