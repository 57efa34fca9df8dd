use crate::checks::references;
use crate::context::Context;
use crate::pipeline::StageResult;
use crate::report::Outcome;

pub fn run(ctx: &Context<'_>) -> StageResult {
    let refs = ctx.references();
    let outcome: Outcome = [
        references::citation_dois(&refs),
        references::doi_citations(&refs),
        references::repeated_citations(&refs),
        references::doi_format(&refs),
        references::citation_format(&refs),
    ]
    .into_iter()
    .collect();
    outcome.into()
}
