/*
 * Responsibility
 * - gate が使うログの口 (info / warn / error の 3 レベル)
 * - 既定の TracingLogger は tracing に流す
 * - テスト用に記録するだけの RecordingLogger
 */
pub trait GateLogger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

// target は `bearer_gate` 固定 (RUST_LOG=bearer_gate=debug で絞れる)
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl GateLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "bearer_gate", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "bearer_gate", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "bearer_gate", "{message}");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::GateLogger;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Level {
        Info,
        Warn,
        Error,
    }

    #[derive(Debug, Default)]
    pub struct RecordingLogger {
        entries: Mutex<Vec<(Level, String)>>,
    }

    impl RecordingLogger {
        pub fn entries(&self) -> Vec<(Level, String)> {
            self.entries.lock().unwrap().clone()
        }

        pub fn count(&self, level: Level) -> usize {
            self.entries().iter().filter(|(l, _)| *l == level).count()
        }

        fn push(&self, level: Level, message: &str) {
            self.entries.lock().unwrap().push((level, message.to_string()));
        }
    }

    impl GateLogger for RecordingLogger {
        fn info(&self, message: &str) {
            self.push(Level::Info, message);
        }

        fn warn(&self, message: &str) {
            self.push(Level::Warn, message);
        }

        fn error(&self, message: &str) {
            self.push(Level::Error, message);
        }
    }
}
