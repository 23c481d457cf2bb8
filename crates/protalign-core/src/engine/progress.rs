#[derive(Debug, Clone)]
pub enum Progress {
    /// A batch of `total_chains` chains is about to be processed.
    SetStart { total_chains: u64 },
    SetFinish,

    ChainStart { code: String },
    ChainFinish { code: String },
    ChainSkipped { code: String, reason: String },

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_silent() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::SetFinish);
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::ChainStart { code } = event {
                seen.lock().unwrap().push(code);
            }
        }));
        reporter.report(Progress::ChainStart {
            code: "1ABC".into(),
        });
        reporter.report(Progress::ChainStart {
            code: "2XYZ".into(),
        });
        drop(reporter);
        assert_eq!(*seen.lock().unwrap(), vec!["1ABC", "2XYZ"]);
    }
}
