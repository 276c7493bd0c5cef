//! Optional progress reporting for build and extract passes.
//!
//! Core logic never prints; it drives an observer, and the CLI decides what
//! to do with the callbacks.  Entries are processed strictly in index order,
//! so `on_entry` is called with `index` ascending from 0.

/// Observer notified once per entry and once on completion.
pub trait ProgressObserver {
    fn on_entry(&mut self, _index: usize, _total: usize, _name: &str) {}
    fn on_complete(&mut self, _total: usize) {}
}

/// No-op observer for embedders that do not care about progress.
pub struct NullProgress;

impl ProgressObserver for NullProgress {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recording {
        entries: Vec<(usize, String)>,
        completed: Option<usize>,
    }

    impl ProgressObserver for Recording {
        fn on_entry(&mut self, index: usize, _total: usize, name: &str) {
            self.entries.push((index, name.to_owned()));
        }
        fn on_complete(&mut self, total: usize) {
            self.completed = Some(total);
        }
    }

    #[test]
    fn default_methods_are_no_ops() {
        let mut p = NullProgress;
        p.on_entry(0, 3, "a.png");
        p.on_complete(3);
    }

    #[test]
    fn recording_observer_sees_callbacks() {
        let mut p = Recording::default();
        p.on_entry(0, 2, "a.png");
        p.on_entry(1, 2, "b.png");
        p.on_complete(2);
        assert_eq!(p.entries.len(), 2);
        assert_eq!(p.completed, Some(2));
    }
}
