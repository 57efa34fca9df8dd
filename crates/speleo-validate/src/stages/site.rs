use speleo_model::TableKind;
use speleo_model::vocab::{Geology, RockAge, YesNoUnknown};

use super::{informative, note, warn};
use crate::checks::range::Bounds;
use crate::checks::{MissingPolicy, numeric, presence, range, required_term};
use crate::context::Context;
use crate::format::{has_outer_space, number};
use crate::issue::Category;
use crate::pipeline::StageResult;
use crate::report::Outcome;
use crate::view::View;

fn coordinate(site: &View<'_>, column: &str, limit: f64) -> Outcome {
    numeric::check(site, column).and_then(|| {
        range::check(
            site,
            column,
            Bounds::new(-limit, limit),
            MissingPolicy::Flag,
        )
    })
}

pub fn run(ctx: &Context<'_>) -> StageResult {
    let site = ctx.site();
    let mut outcome = Outcome::pass();

    let latitude = coordinate(&site, "latitude", 90.0);
    let longitude = coordinate(&site, "longitude", 180.0);
    let located = latitude.passed() && longitude.passed();
    outcome.merge(latitude);
    outcome.merge(longitude);
    if !located {
        outcome.merge(note(
            TableKind::Site,
            Category::Range,
            "coordinates",
            "The coordinates for this site are definitely wrong, please check",
        ));
    } else if let Some(row) = site.rows().next()
        && let (Some(lat), Some(lon)) = (row.number_in("latitude"), row.number_in("longitude"))
    {
        outcome.merge(informative(
            TableKind::Site,
            Category::Range,
            "coordinates",
            format!(
                "This site is at Lat: {} deg and Lon: {} deg. Ensure that these have been properly converted to decimal degrees and are correct",
                number(lat),
                number(lon)
            ),
        ));
    }

    outcome.merge(presence::check(&site, "site_name").and_then(|| {
        let padded = site
            .rows()
            .any(|row| row.text("site_name").is_some_and(|name| has_outer_space(&name)));
        if padded {
            warn(
                TableKind::Site,
                Category::Format,
                "site_name_spaces",
                "The site_name either starts or ends with a space. Please remove the extra space",
            )
        } else {
            Outcome::pass()
        }
    }));

    if site.all_present("elevation") {
        outcome.merge(numeric::check(&site, "elevation"));
    } else {
        outcome.merge(informative(
            TableKind::Site,
            Category::Presence,
            "elevation",
            "elevation is missing. Please check and make sure that elevation is truly missing.",
        ));
    }

    outcome.merge(required_term::<Geology>(&site, "geology"));
    outcome.merge(required_term::<RockAge>(&site, "rock_age"));
    outcome.merge(required_term::<YesNoUnknown>(&site, "monitoring"));
    outcome.into()
}
