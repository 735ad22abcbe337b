/// Where handlers report what they did. Injected as `web::Data<dyn LogSink>`
/// so tests can swap in a recorder.
pub trait LogSink: Send + Sync {
    fn info(&self, component: &str, message: &str);
}

/// Forwards to the `log` facade; `env_logger` renders it
pub struct EnvLogSink;

impl LogSink for EnvLogSink {
    fn info(&self, component: &str, message: &str) {
        log::info!(target: "todo_api::handler", "[{}] {}", component, message);
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingSink {
    pub lines: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl LogSink for RecordingSink {
    fn info(&self, component: &str, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((component.to_string(), message.to_string()));
    }
}
