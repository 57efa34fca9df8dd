//! Summary lines printed after every other stage.

use speleo_model::{Sheet, TableKind};

use super::{informative, note};
use crate::context::Context;
use crate::issue::Category;
use crate::pipeline::{Gate, StageResult};
use crate::report::Outcome;
use crate::view::View;

const UNKNOWN: &str = "unknown";

const DUMMY_DEPTHS: &str = "If depths really cannot be obtained, please add dummy depths to make sure that other checks can be performed. IMPORTANT: Do not forget to delete the dummy depths from the workbook once it has passed all checks.";

fn count_unknown(sheet: &Sheet) -> usize {
    sheet
        .rows()
        .iter()
        .flat_map(|row| row.cells.iter())
        .filter(|cell| cell.as_str() == Some(UNKNOWN))
        .count()
}

pub fn run(ctx: &Context<'_>) -> StageResult {
    let workbook = ctx.workbook();
    let mut outcome = Outcome::pass();

    let counts = [
        ("site table", count_unknown(workbook.site())),
        ("entity table", count_unknown(workbook.entity())),
        ("dating information table", count_unknown(workbook.dating())),
        ("sample table", count_unknown(workbook.sample())),
    ];
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total > 0 {
        let breakdown: String = counts
            .iter()
            .filter(|(_, n)| *n > 0)
            .map(|(table, n)| format!("{n} in the {table}; "))
            .collect();
        let entities = View::new(workbook.entity()).entity_names().len();
        outcome.merge(informative(
            TableKind::Entity,
            Category::Presence,
            "unknown_count",
            format!(
                "There is a total of {total} \"unknown\" in {entities} entities in this workbook: {breakdown}Please ensure that the information is truly inaccessible before choosing \"unknown\"."
            ),
        ));
    }

    for (sheet, gate) in [
        (workbook.dating(), Gate::DatingDepthsPresent),
        (workbook.sample(), Gate::SampleDepthsPresent),
    ] {
        if !sheet.is_empty() && !ctx.is_granted(gate) {
            outcome.merge(note(sheet.kind(), Category::Presence, "dummy_depths", DUMMY_DEPTHS));
        }
    }
    outcome.into()
}
