use crate::workflow::state::{Workflow, WorkflowStatus};

pub const ANALYZE_LABEL: &str = "Analyze Image";
pub const UPLOADING_LABEL: &str = "Uploading...";
pub const ANALYZING_LABEL: &str = "Analyzing...";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Clean,
    Dirty,
}

impl Verdict {
    pub fn from_is_dirty(is_dirty: bool) -> Self {
        if is_dirty {
            Verdict::Dirty
        } else {
            Verdict::Clean
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Verdict::Clean => "Image is clean",
            Verdict::Dirty => "Image is dirty",
        }
    }
}

/// What the status area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusView<'a> {
    Hidden,
    Busy(&'static str),
    Verdict {
        verdict: Verdict,
        explanation: &'a str,
        imglink: &'a str,
    },
    Failure(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation<'a> {
    pub analyze_label: &'static str,
    pub analyze_enabled: bool,
    pub status: StatusView<'a>,
}

pub fn present(workflow: &Workflow) -> Presentation<'_> {
    let analyze_label = match workflow.status() {
        WorkflowStatus::Uploading => UPLOADING_LABEL,
        WorkflowStatus::Analyzing => ANALYZING_LABEL,
        _ => ANALYZE_LABEL,
    };

    let status = match workflow.status() {
        WorkflowStatus::Idle => StatusView::Hidden,
        WorkflowStatus::Uploading => StatusView::Busy(UPLOADING_LABEL),
        WorkflowStatus::Analyzing => StatusView::Busy(ANALYZING_LABEL),
        WorkflowStatus::Success => match workflow.result() {
            Some(result) => StatusView::Verdict {
                verdict: Verdict::from_is_dirty(result.is_dirty),
                explanation: &result.answer,
                imglink: &result.imglink,
            },
            None => StatusView::Hidden,
        },
        WorkflowStatus::Error => StatusView::Failure(FAILURE_MESSAGE),
    };

    Presentation {
        analyze_label,
        analyze_enabled: workflow.can_analyze(),
        status,
    }
}
