use crate::logger::CorsLogger;
use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Level {
    Debug,
    Error,
}

#[derive(Default)]
pub(crate) struct RecordingLogger {
    entries: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub(crate) fn entries(&self) -> Vec<(Level, String)> {
        self.entries.lock().expect("logger lock").clone()
    }

    pub(crate) fn messages(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(entry_level, _)| *entry_level == level)
            .map(|(_, message)| message)
            .collect()
    }
}

impl CorsLogger for RecordingLogger {
    fn debug(&self, message: fmt::Arguments<'_>) {
        self.entries
            .lock()
            .expect("logger lock")
            .push((Level::Debug, message.to_string()));
    }

    fn error(&self, message: fmt::Arguments<'_>) {
        self.entries
            .lock()
            .expect("logger lock")
            .push((Level::Error, message.to_string()));
    }
}
