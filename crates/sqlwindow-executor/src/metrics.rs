use std::sync::atomic::{AtomicU64, Ordering};

pub struct WindowMetrics {
    pub partition_count: AtomicU64,
    pub row_count: AtomicU64,
    pub largest_partition: AtomicU64,
    pub empty_frame_count: AtomicU64,
}

impl WindowMetrics {
    pub fn new() -> Self {
        Self {
            partition_count: AtomicU64::new(0),
            row_count: AtomicU64::new(0),
            largest_partition: AtomicU64::new(0),
            empty_frame_count: AtomicU64::new(0),
        }
    }

    pub fn record_partition(&self, rows: usize) {
        let rows = rows as u64;
        self.partition_count.fetch_add(1, Ordering::Relaxed);
        self.row_count.fetch_add(rows, Ordering::Relaxed);
        self.largest_partition.fetch_max(rows, Ordering::Relaxed);
    }

    pub fn record_empty_frames(&self, count: u64) {
        if count > 0 {
            self.empty_frame_count.fetch_add(count, Ordering::Relaxed);
        }
    }

    pub fn get_partition_count(&self) -> u64 {
        self.partition_count.load(Ordering::Relaxed)
    }

    pub fn get_row_count(&self) -> u64 {
        self.row_count.load(Ordering::Relaxed)
    }

    pub fn get_largest_partition(&self) -> u64 {
        self.largest_partition.load(Ordering::Relaxed)
    }

    pub fn get_empty_frame_count(&self) -> u64 {
        self.empty_frame_count.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.partition_count.store(0, Ordering::Relaxed);
        self.row_count.store(0, Ordering::Relaxed);
        self.largest_partition.store(0, Ordering::Relaxed);
        self.empty_frame_count.store(0, Ordering::Relaxed);
    }
}

impl Default for WindowMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WindowMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowMetrics")
            .field("partitions", &self.get_partition_count())
            .field("rows", &self.get_row_count())
            .field("largest_partition", &self.get_largest_partition())
            .field("empty_frames", &self.get_empty_frame_count())
            .finish()
    }
}
