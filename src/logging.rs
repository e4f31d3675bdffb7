/// Sink for progress and diagnostic lines.
///
/// The tool logs plain lines. Passing the sink explicitly instead of going
/// through a shared handle keeps components free of process-wide state and
/// lets tests assert on what was logged.
pub trait Logger {
    /// Append one line to the log.
    fn line(&self, message: &str);
}

/// Logger that prints each line to stdout.
#[derive(Debug, Default, Clone)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn line(&self, message: &str) {
        println!("{}", message);
    }
}

/// Recording logger for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every appended line for verification in tests.
    #[derive(Debug, Default, Clone)]
    pub struct RecordingLogger {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingLogger {
        pub fn new() -> Self {
            Self::default()
        }

        /// All lines logged so far.
        pub fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }

        /// Whether any logged line contains `needle`.
        pub fn contains(&self, needle: &str) -> bool {
            self.lines
                .lock()
                .unwrap()
                .iter()
                .any(|line| line.contains(needle))
        }
    }

    impl Logger for RecordingLogger {
        fn line(&self, message: &str) {
            self.lines.lock().unwrap().push(message.to_string());
        }
    }
}
