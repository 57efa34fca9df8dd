//! Quality-control rules for speleothem workbooks.
//!
//! [`validate`] runs every stage of [`STAGES`] over a structurally valid
//! [`Workbook`](speleo_model::Workbook) and returns a [`ValidationReport`]
//! whose verdict decides whether the workbook may be uploaded.

pub mod checks;
mod context;
mod format;
mod issue;
mod pipeline;
mod report;
mod stages;
mod view;

pub use context::Context;
pub use issue::{Category, Diagnostic, Issue, Repetition, Severity};
pub use pipeline::{Gate, STAGES, Stage, StageResult, run_stages, validate};
pub use report::{Outcome, StageRecord, StageStatus, ValidationReport, Verdict};
pub use view::{Row, View};
