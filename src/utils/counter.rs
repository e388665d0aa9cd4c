//! Run totals reported after `extract` and `apply`.
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::SeqCst;

pub struct Counter {
    scanned: AtomicUsize,
    without_text: AtomicUsize,
    rows: AtomicUsize,
    applied: AtomicUsize,
    failed: AtomicUsize,
    warning: AtomicUsize,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            scanned: AtomicUsize::new(0),
            without_text: AtomicUsize::new(0),
            rows: AtomicUsize::new(0),
            applied: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            warning: AtomicUsize::new(0),
        }
    }

    /// Records one asset read during extraction and the rows it produced.
    pub fn add_extracted(&self, rows: usize) {
        self.scanned.fetch_add(1, SeqCst);
        if rows == 0 {
            self.without_text.fetch_add(1, SeqCst);
        }
        self.rows.fetch_add(rows, SeqCst);
    }

    /// Records one asset rewritten by the applier.
    pub fn add_applied(&self) {
        self.applied.fetch_add(1, SeqCst);
    }

    /// Records a file that could not be read, parsed or written.
    pub fn add_failed(&self) {
        self.failed.fetch_add(1, SeqCst);
    }

    pub fn add_warning(&self) {
        self.warning.fetch_add(1, SeqCst);
    }

    pub fn extract_summary(&self) -> String {
        format!(
            "Scanned {} assets ({} without text, {} failed), {} rows, {} warnings",
            self.scanned.load(SeqCst) + self.failed.load(SeqCst),
            self.without_text.load(SeqCst),
            self.failed.load(SeqCst),
            self.rows.load(SeqCst),
            self.warning.load(SeqCst),
        )
    }

    pub fn apply_summary(&self) -> String {
        format!(
            "Applied {} assets, {} failed, {} warnings",
            self.applied.load(SeqCst),
            self.failed.load(SeqCst),
            self.warning.load(SeqCst),
        )
    }
}
