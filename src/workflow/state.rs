use crate::error::{ApiError, ValidationError};
use crate::upload::{AnalysisResult, FileReference, FileSummary, SelectedFile};
use std::fmt;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStatus {
    Idle,
    Uploading,
    Analyzing,
    Success,
    Error,
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStatus::Idle => "idle",
            WorkflowStatus::Uploading => "uploading",
            WorkflowStatus::Analyzing => "analyzing",
            WorkflowStatus::Success => "success",
            WorkflowStatus::Error => "error",
        };
        f.write_str(name)
    }
}

/// Identifies one selection cycle. Bumped on every accepted selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CycleId(pub u64);

impl CycleId {
    fn next(self) -> Self {
        CycleId(self.0 + 1)
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Workflow state. Each variant carries exactly what is valid in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle {
        reference: Option<FileReference>,
    },
    Uploading,
    Analyzing {
        reference: FileReference,
        /// Result of an earlier run on the same reference; kept, never shown.
        previous: Option<AnalysisResult>,
    },
    Succeeded {
        reference: FileReference,
        result: AnalysisResult,
    },
    Failed {
        reference: Option<FileReference>,
        previous: Option<AnalysisResult>,
    },
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle { reference: None }
    }
}

impl Phase {
    pub fn status(&self) -> WorkflowStatus {
        match self {
            Phase::Idle { .. } => WorkflowStatus::Idle,
            Phase::Uploading => WorkflowStatus::Uploading,
            Phase::Analyzing { .. } => WorkflowStatus::Analyzing,
            Phase::Succeeded { .. } => WorkflowStatus::Success,
            Phase::Failed { .. } => WorkflowStatus::Error,
        }
    }
}

/// Issued when a selection is accepted; the holder performs the upload.
#[derive(Debug, Clone)]
pub struct UploadTicket {
    pub cycle: CycleId,
    pub file: SelectedFile,
}

/// Issued when an analysis is accepted; the holder performs the request.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub cycle: CycleId,
    pub reference: FileReference,
}

/// Outcome of a finished remote call, tagged with the cycle it was issued in.
#[derive(Debug)]
pub enum Completion {
    Upload {
        cycle: CycleId,
        outcome: Result<FileReference, ApiError>,
    },
    Analysis {
        cycle: CycleId,
        outcome: Result<AnalysisResult, ApiError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The completion belonged to an earlier cycle or a phase that has
    /// since moved on; it was dropped.
    Stale,
}

pub fn ensure_single(count: usize) -> Result<(), ValidationError> {
    match count {
        0 => Err(ValidationError::NoFileSelected),
        1 => Ok(()),
        n => Err(ValidationError::TooManyFiles(n)),
    }
}

/// The controller state: the current phase plus a summary of the file that
/// started the current cycle. The bytes themselves travel with the ticket.
#[derive(Debug, Default)]
pub struct Workflow {
    cycle: CycleId,
    file: Option<FileSummary>,
    phase: Phase,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> WorkflowStatus {
        self.phase.status()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn cycle(&self) -> CycleId {
        self.cycle
    }

    pub fn selected_file(&self) -> Option<&FileSummary> {
        self.file.as_ref()
    }

    pub fn reference(&self) -> Option<&FileReference> {
        match &self.phase {
            Phase::Idle { reference } | Phase::Failed { reference, .. } => reference.as_ref(),
            Phase::Analyzing { reference, .. } | Phase::Succeeded { reference, .. } => {
                Some(reference)
            }
            Phase::Uploading => None,
        }
    }

    /// The result to present. Only a successful phase has one.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Uploading | Phase::Analyzing { .. })
    }

    pub fn can_analyze(&self) -> bool {
        !self.is_busy() && self.reference().is_some()
    }

    /// Starts a new cycle from a selection event. Exactly one file is
    /// accepted; anything else leaves the state untouched.
    pub fn select(&mut self, files: Vec<SelectedFile>) -> Result<UploadTicket, ValidationError> {
        if let Err(e) = ensure_single(files.len()) {
            warn!(count = files.len(), status = %self.status(), "selection rejected");
            return Err(e);
        }
        let Some(file) = files.into_iter().next() else {
            return Err(ValidationError::NoFileSelected);
        };

        if self.is_busy() {
            warn!(cycle = %self.cycle, status = %self.status(), "new selection supersedes in-flight request");
        }

        self.cycle = self.cycle.next();
        self.phase = Phase::Uploading;
        self.file = Some(file.summary());
        info!(cycle = %self.cycle, name = %file.name, "selection accepted, uploading");

        Ok(UploadTicket {
            cycle: self.cycle,
            file,
        })
    }

    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, ValidationError> {
        if self.is_busy() {
            warn!(status = %self.status(), "analysis requested while busy");
            return Err(ValidationError::OperationInFlight);
        }

        let (reference, previous) = match std::mem::take(&mut self.phase) {
            Phase::Idle {
                reference: Some(reference),
            } => (reference, None),
            Phase::Succeeded { reference, result } => (reference, Some(result)),
            Phase::Failed {
                reference: Some(reference),
                previous,
            } => (reference, previous),
            other => {
                self.phase = other;
                warn!(status = %self.status(), "analysis requested without a reference");
                return Err(ValidationError::NoReference);
            }
        };

        info!(cycle = %self.cycle, reference = %reference, "analyzing");
        self.phase = Phase::Analyzing {
            reference: reference.clone(),
            previous,
        };

        Ok(AnalysisTicket {
            cycle: self.cycle,
            reference,
        })
    }

    pub fn apply(&mut self, completion: Completion) -> Applied {
        match completion {
            Completion::Upload { cycle, outcome } => self.complete_upload(cycle, outcome),
            Completion::Analysis { cycle, outcome } => self.complete_analysis(cycle, outcome),
        }
    }

    pub fn complete_upload(
        &mut self,
        cycle: CycleId,
        outcome: Result<FileReference, ApiError>,
    ) -> Applied {
        if cycle != self.cycle || self.phase != Phase::Uploading {
            warn!(%cycle, current = %self.cycle, status = %self.status(), "discarding stale upload response");
            return Applied::Stale;
        }

        self.phase = match outcome {
            Ok(reference) => {
                info!(%cycle, reference = %reference, "upload complete, ready to analyze");
                Phase::Idle {
                    reference: Some(reference),
                }
            }
            Err(e) => {
                error!(%cycle, error = %e, "upload failed");
                Phase::Failed {
                    reference: None,
                    previous: None,
                }
            }
        };
        Applied::Applied
    }

    pub fn complete_analysis(
        &mut self,
        cycle: CycleId,
        outcome: Result<AnalysisResult, ApiError>,
    ) -> Applied {
        if cycle != self.cycle {
            warn!(%cycle, current = %self.cycle, "discarding stale analysis response");
            return Applied::Stale;
        }

        let (reference, previous) = match std::mem::take(&mut self.phase) {
            Phase::Analyzing {
                reference,
                previous,
            } => (reference, previous),
            other => {
                self.phase = other;
                warn!(%cycle, status = %self.status(), "discarding analysis response outside analysis");
                return Applied::Stale;
            }
        };

        self.phase = match outcome {
            Ok(result) => {
                info!(%cycle, is_dirty = result.is_dirty, "analysis complete");
                Phase::Succeeded { reference, result }
            }
            Err(e) => {
                error!(%cycle, error = %e, "analysis failed");
                Phase::Failed {
                    reference: Some(reference),
                    previous,
                }
            }
        };
        Applied::Applied
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
