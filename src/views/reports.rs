//! Report generation.
//!
//! Generation is simulated with a fixed delay; the request returns as soon
//! as the job is queued and completion is announced through the toasts and
//! activity log.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::feedback::{Feedback, Severity};

pub const REPORT_GENERATION_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Serialize)]
pub struct ReportJob {
    pub kind: String,
    pub status: &'static str,
}

#[derive(Clone)]
pub struct Reports {
    feedback: Feedback,
}

impl Reports {
    pub fn new(feedback: Feedback) -> Self {
        Self { feedback }
    }

    pub fn generate(&self, kind: &str) -> (ReportJob, tokio::task::JoinHandle<()>) {
        self.feedback.info(format!("Generating {} report...", kind));
        self.feedback
            .log(format!("Report generation started: {}", kind), Severity::Info);
        info!("Report generation started: {}", kind);

        let feedback = self.feedback.clone();
        let report = kind.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(REPORT_GENERATION_DELAY).await;
            feedback.success("Report generated successfully!");
            feedback.log(format!("Report generated: {}", report), Severity::Info);
            info!("Report generated: {}", report);
        });

        (
            ReportJob {
                kind: kind.to_string(),
                status: "started",
            },
            handle,
        )
    }
}
