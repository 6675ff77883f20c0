//! In-memory log sink

use std::io;
use std::sync::{Arc, Mutex};

use keystone_config::LoggingConfig;
use keystone_telemetry::Logger;

/// Cloneable buffer collecting everything a [`Logger`] writes
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn logger(&self, config: &LoggingConfig) -> Logger {
        let sink = self.clone();
        Logger::with_writer(config, move || sink.clone())
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
