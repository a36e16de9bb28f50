//! Run report: what a generation run produced and how

use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::PathBuf;
use uuid::Uuid;

use crate::generation::{ArtifactKind, BackendKind, SynthesisOrigin};

/// Final state of one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitStatus {
    Written,
    Skipped,
    Failed(String),
}

impl EmitStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EmitStatus::Written => "written",
            EmitStatus::Skipped => "skipped",
            EmitStatus::Failed(_) => "failed",
        }
    }
}

/// One row of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactOutcome {
    pub kind: ArtifactKind,
    pub name: String,
    /// Relative to the output directory
    pub path: PathBuf,
    /// `None` when the file already existed and nothing was synthesized
    pub origin: Option<SynthesisOrigin>,
    pub status: EmitStatus,
}

/// Aggregated result of a run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub timestamp: DateTime<Local>,
    pub backend: BackendKind,
    pub scenario_count: usize,
    pub page_count: usize,
    pub class_count: usize,
    pub report_path: PathBuf,
    pub outcomes: Vec<ArtifactOutcome>,
}

impl RunReport {
    pub fn new(
        backend: BackendKind,
        scenario_count: usize,
        page_count: usize,
        class_count: usize,
        report_path: PathBuf,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            timestamp: Local::now(),
            backend,
            scenario_count,
            page_count,
            class_count,
            report_path,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: ArtifactOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn generation_method(&self) -> String {
        self.backend.generation_method()
    }

    fn count(&self, status: fn(&EmitStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| status(&o.status)).count()
    }

    pub fn written_count(&self) -> usize {
        self.count(|s| matches!(s, EmitStatus::Written))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, EmitStatus::Skipped))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, EmitStatus::Failed(_)))
    }

    /// Artifacts that fell back to template output
    pub fn fallback_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.origin.as_ref().is_some_and(SynthesisOrigin::is_fallback))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    /// Contents of the persisted report file
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Test Suite Generation Report");
        let _ = writeln!(out, "============================");
        let _ = writeln!(out);
        let _ = writeln!(out, "Run ID: {}", self.run_id);
        let _ = writeln!(out, "Generation Method: {}", self.generation_method());
        let _ = writeln!(out, "Timestamp: {}", self.timestamp.format("%Y-%m-%d %H:%M:%S %z"));
        let _ = writeln!(out, "Scenarios: {}", self.scenario_count);
        let _ = writeln!(out, "Page Classes: {}", self.page_count);
        let _ = writeln!(out, "Test Classes: {}", self.class_count);
        let _ = writeln!(out, "Fallbacks: {}", self.fallback_count());
        let _ = writeln!(out);
        let _ = writeln!(out, "Generated Files:");
        for outcome in &self.outcomes {
            let _ = write!(out, "- {} [{}]", outcome.path.display(), outcome.status.label());
            if let Some(origin) = &outcome.origin {
                let _ = write!(out, " ({origin})");
            }
            if let EmitStatus::Failed(reason) = &outcome.status {
                let _ = write!(out, ": {reason}");
            }
            let _ = writeln!(out);
        }
        out
    }

    /// Short summary for the terminal
    pub fn render_console(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Generation Report");
        let _ = writeln!(out, "  Method:       {}", self.generation_method());
        let _ = writeln!(out, "  Scenarios:    {}", self.scenario_count);
        let _ = writeln!(out, "  Page classes: {}", self.page_count);
        let _ = writeln!(out, "  Test classes: {}", self.class_count);
        let _ = writeln!(
            out,
            "  Files:        {} written, {} skipped, {} failed",
            self.written_count(),
            self.skipped_count(),
            self.failed_count()
        );
        if self.fallback_count() > 0 {
            let _ = writeln!(out, "  Fallbacks:    {}", self.fallback_count());
        }
        for outcome in self.outcomes.iter().filter(|o| matches!(o.status, EmitStatus::Failed(_))) {
            let _ = writeln!(out, "  ✗ {}", outcome.path.display());
        }
        let _ = writeln!(out, "  Report:       {}", self.report_path.display());
        out
    }
}
