//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    Compress { sentence: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Compress { .. } => "compress",
        }
    }
}
