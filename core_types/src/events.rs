/// Progress reported by batch drivers to an observer as `(completed, total, message)`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Started { total: usize },
    Progress {
        completed: usize,
        total: usize,
        message: String,
    },
    Completed { total: usize },
}

impl ProgressEvent {
    pub fn progress(completed: usize, total: usize, message: impl Into<String>) -> Self {
        ProgressEvent::Progress {
            completed,
            total,
            message: message.into(),
        }
    }
}
