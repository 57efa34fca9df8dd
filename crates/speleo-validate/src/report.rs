//! Outcomes of checks and the report they fold into.

use serde::Serialize;
use speleo_model::TableKind;

use crate::issue::{Diagnostic, Issue, Severity};
use crate::pipeline::Gate;

/// Diagnostics produced by one check (or a chain of checks).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Outcome {
    diagnostics: Vec<Diagnostic>,
}

impl Outcome {
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn warning(table: TableKind, issue: Issue) -> Self {
        Diagnostic::new(Severity::Warning, table, issue).into()
    }

    pub fn informative(table: TableKind, issue: Issue) -> Self {
        Diagnostic::new(Severity::Informative, table, issue).into()
    }

    pub fn note(table: TableKind, issue: Issue) -> Self {
        Diagnostic::new(Severity::Note, table, issue).into()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn merge(&mut self, other: Outcome) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Number of counted diagnostics.
    pub fn warnings(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.counts()).count()
    }

    pub fn passed(&self) -> bool {
        self.warnings() == 0
    }

    /// Runs `next` only when this outcome passed; advisory diagnostics of
    /// both are kept.
    #[must_use]
    pub fn and_then(mut self, next: impl FnOnce() -> Outcome) -> Outcome {
        if self.passed() {
            self.merge(next());
        }
        self
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl From<Diagnostic> for Outcome {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl FromIterator<Outcome> for Outcome {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut outcome = Outcome::pass();
        outcome.extend(iter);
        outcome
    }
}

impl Extend<Outcome> for Outcome {
    fn extend<I: IntoIterator<Item = Outcome>>(&mut self, iter: I) {
        for other in iter {
            self.merge(other);
        }
    }
}

/// What happened to one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StageStatus {
    Ran { warnings: usize },
    Skipped { missing: Vec<Gate> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageRecord {
    pub stage: &'static str,
    pub status: StageStatus,
}

/// Final decision on a workbook that passed the structural gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// No warnings; the workbook may be uploaded.
    Accept,
    /// Warnings were raised; the submitter has to review them.
    Review,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Accept => "accept",
            Verdict::Review => "review",
        }
    }
}

/// Every diagnostic of a run, in emission order, plus the stage log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
    stages: Vec<StageRecord>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a stage that ran and folds in its outcome.
    pub fn record_run(&mut self, stage: &'static str, outcome: Outcome) {
        let warnings = outcome.warnings();
        self.diagnostics.extend(outcome.into_diagnostics());
        self.stages.push(StageRecord {
            stage,
            status: StageStatus::Ran { warnings },
        });
    }

    pub fn record_skip(&mut self, stage: &'static str, missing: Vec<Gate>) {
        self.stages.push(StageRecord {
            stage,
            status: StageStatus::Skipped { missing },
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn stages(&self) -> &[StageRecord] {
        &self.stages
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.counts())
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn verdict(&self) -> Verdict {
        if self.warning_count() == 0 {
            Verdict::Accept
        } else {
            Verdict::Review
        }
    }

    /// The transcript: one line per diagnostic, then the warning total.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for diagnostic in &self.diagnostics {
            out.push_str(&diagnostic.message());
            out.push('\n');
        }
        out.push_str(&format!(
            "{} warning/s were detected\n",
            self.warning_count()
        ));
        out
    }
}
