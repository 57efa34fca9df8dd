//! Controlled vocabularies of the workbook dropdown lists.
//!
//! Each list is a closed enum. Parsing is exact and case-sensitive, so
//! `"Calcite"` is not a mineralogy term.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A closed set of allowed cell values.
pub trait Vocabulary: Sized + Copy + 'static {
    /// Human name of the list, used in listings.
    const NAME: &'static str;

    fn all() -> &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|term| term.as_str() == value)
    }

    fn labels() -> Vec<&'static str> {
        Self::all().iter().map(Self::as_str).collect()
    }
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $list:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Vocabulary for $name {
            const NAME: &'static str = $list;

            fn all() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as Vocabulary>::parse(s)
                    .ok_or_else(|| format!("Unknown {} term: {s}", $list))
            }
        }
    };
}

// === Site ===

vocabulary! {
    Geology, "geology" {
        Limestone => "limestone",
        Dolomite => "dolomite",
        Gypsum => "gypsum",
        Magmatic => "magmatic",
        Marble => "marble",
        Granite => "granite",
        Mixed => "mixed",
        Unknown => "unknown",
        Other => "other",
    }
}

vocabulary! {
    RockAge, "rock_age" {
        Holocene => "Holocene",
        Pleistocene => "Pleistocene",
        Pliocene => "Pliocene",
        Miocene => "Miocene",
        Oligocene => "Oligocene",
        Eocene => "Eocene",
        Palaeocene => "Palaeocene",
        Cretaceous => "Cretaceous",
        Jurassic => "Jurassic",
        Triassic => "Triassic",
        Permian => "Permian",
        Carboniferous => "Carboniferous",
        Devonian => "Devonian",
        Silurian => "Silurian",
        Ordovician => "Ordovician",
        Cambrian => "Cambrian",
        Precambrian => "Precambrian",
        Unknown => "unknown",
    }
}

vocabulary! {
    /// Tri-state flag used by `monitoring`, the proxy columns and `date_used`.
    YesNoUnknown, "yes/no/unknown" {
        Yes => "yes",
        No => "no",
        Unknown => "unknown",
    }
}

// === Entity ===

vocabulary! {
    SpeleothemType, "speleothem_type" {
        Composite => "composite",
        Stalagmite => "stalagmite",
        Stalactite => "stalactite",
        Flowstone => "flowstone",
        Other => "other",
        Unknown => "unknown",
    }
}

vocabulary! {
    DepthRef, "depth_ref" {
        FromTop => "from top",
        FromBase => "from base",
        NotApplicable => "not applicable",
    }
}

vocabulary! {
    DripType, "drip_type" {
        SeepageFlow => "seepage flow",
        SeasonalDrip => "seasonal drip",
        FastFlow => "fast flow",
        Mixture => "mixture",
        Unknown => "unknown",
        NotApplicable => "not applicable",
    }
}

vocabulary! {
    YesNo, "one_and_only" {
        Yes => "yes",
        No => "no",
    }
}

vocabulary! {
    EntityStatusInfo, "entity_status_info" {
        CompletelySupersedes => "completely supersedes",
        CompletelySupersededBy => "completely superseded by",
        PartiallySupersedes => "partially supersedes",
        PartiallySupersededBy => "partially superseded by",
        NotApplicable => "not applicable",
    }
}

// === Sample ===

vocabulary! {
    HiatusMarker, "hiatus" {
        Hiatus => "H",
    }
}

vocabulary! {
    GapMarker, "gap" {
        Gap => "G",
    }
}

vocabulary! {
    /// Reference epoch of an age column.
    ModernReference, "modern_reference" {
        Bp1950 => "BP (1950)",
        B2k => "b2k",
        CeBce => "CE/BCE",
        YearOfChemistry => "Year of chemistry",
    }
}

vocabulary! {
    Mineralogy, "mineralogy" {
        Calcite => "calcite",
        SecondaryCalcite => "secondary calcite",
        Aragonite => "aragonite",
        Vaterite => "vaterite",
        Mixed => "mixed",
        Unknown => "unknown",
    }
}

vocabulary! {
    AragCorr, "arag_corr" {
        Yes => "yes",
        No => "no",
        NotApplicable => "not applicable",
        Unknown => "unknown",
    }
}

vocabulary! {
    AgeModelType, "age_model_type" {
        Linear => "linear",
        LinearBetweenDates => "linear between dates",
        PolynomialFit => "polynomial fit",
        PolynomialFitOmittingOutliers => "polynomial fit omitting outliers",
        Bayesian => "Bayesian",
        BayesianBacon => "Bayesian Bacon",
        BayesianBchron => "Bayesian Bchron",
        StalAge => "StalAge",
        StalAgeAndOther => "StalAge and other",
        Clam => "Clam",
        Copra => "COPRA",
        OxCal => "OxCal",
        Combination => "combination of methods",
        Unknown => "unknown",
        Other => "other",
    }
}

vocabulary! {
    AnnLamCheck, "ann_lam_check" {
        C14Peak => "14C peak",
        C14Slope => "14C slope",
        UThCycle => "U/Th cycle",
        TraceElementCycle => "trace element cycle",
        Assumed => "assumed",
        Unknown => "unknown",
        NotApplicable => "not applicable",
        Other => "other",
    }
}

vocabulary! {
    DepRateCheck, "dep_rate_check" {
        Yes => "yes",
        No => "no",
        Assumed => "assumed",
        Unknown => "unknown",
        NotApplicable => "not applicable",
    }
}

vocabulary! {
    IsoStd, "iso_std" {
        Pdb => "PDB",
        ViennaPdb => "Vienna-PDB",
    }
}

// === Dating ===

vocabulary! {
    DateType, "date_type" {
        C14 => "C14",
        McIcpMsUTh => "MC-ICP-MS U/Th",
        IcpMsUThOther => "ICP-MS U/Th Other",
        AlphaUTh => "Alpha U/Th",
        Tims => "TIMS",
        UThUnspecified => "U/Th unspecified",
        CrossDating => "Cross-dating",
        MultipleMethods => "Multiple methods",
        Hiatus => "Event; hiatus",
        Gap => "Event; gap (composite record)",
        ActivelyForming => "Event; actively forming",
        StartOfLaminations => "Event; start of laminations",
        EndOfLaminations => "Event; end of laminations",
        Unknown => "unknown",
        Other => "other",
    }
}

impl DateType {
    /// The five `Event; ...` rows, which carry no measurement.
    pub fn is_event(&self) -> bool {
        matches!(
            self,
            DateType::Hiatus
                | DateType::Gap
                | DateType::ActivelyForming
                | DateType::StartOfLaminations
                | DateType::EndOfLaminations
        )
    }

    pub fn is_uranium_thorium(&self) -> bool {
        self.as_str().contains("U/Th") || matches!(self, DateType::Tims)
    }

    pub fn is_lamination_event(&self) -> bool {
        matches!(
            self,
            DateType::StartOfLaminations | DateType::EndOfLaminations
        )
    }
}

vocabulary! {
    MaterialDated, "material_dated" {
        Calcite => "calcite",
        Aragonite => "aragonite",
        Organic => "organic",
        Other => "other",
        Unknown => "unknown",
    }
}

vocabulary! {
    CalibUsed, "calib_used" {
        Intcal13Nh => "INTCAL13 NH",
        Intcal13Sh => "INTCAL13 SH",
        Intcal13Marine => "INTCAL13 marine",
        Intcal09 => "INTCAL09",
        Intcal09Marine => "INTCAL09 marine",
        Intcal04Nh => "INTCAL04 NH",
        Intcal04Sh => "INTCAL04 SH",
        Intcal98 => "INTCAL98",
        Fairbanks09 => "FAIRBANKS09",
        NotCalibrated => "not calibrated",
        Other => "other",
        Unknown => "unknown",
    }
}

vocabulary! {
    DecayConstant, "decay_constant" {
        Cheng2000 => "Cheng et al. 2000",
        Cheng2013 => "Cheng et al. 2013",
        Edwards1987 => "Edwards et al. 1987",
        IvanovichHarmon1992 => "Ivanovich & Harmon 1992",
        Other => "other",
        Unknown => "unknown",
    }
}

/// Sort direction implied by a depth reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl DepthRef {
    /// Depth order from youngest to oldest, if the reference has one.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            DepthRef::FromTop => Some(Direction::Ascending),
            DepthRef::FromBase => Some(Direction::Descending),
            DepthRef::NotApplicable => None,
        }
    }
}

/// One vocabulary as listed for users: the column(s) it governs and its terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyListing {
    pub table: &'static str,
    pub columns: &'static str,
    pub terms: Vec<&'static str>,
}

fn listing<V: Vocabulary>(table: &'static str, columns: &'static str) -> VocabularyListing {
    VocabularyListing {
        table,
        columns,
        terms: V::labels(),
    }
}

/// Every controlled vocabulary the workbook uses, in sheet order.
pub fn catalog() -> Vec<VocabularyListing> {
    vec![
        listing::<Geology>("Site metadata", "geology"),
        listing::<RockAge>("Site metadata", "rock_age"),
        listing::<YesNoUnknown>("Site metadata", "monitoring"),
        listing::<YesNo>("Entity metadata", "one_and_only"),
        listing::<EntityStatusInfo>("Entity metadata", "entity_status_info"),
        listing::<DepthRef>("Entity metadata", "depth_ref"),
        listing::<SpeleothemType>("Entity metadata", "speleothem_type"),
        listing::<DripType>("Entity metadata", "drip_type"),
        listing::<YesNoUnknown>("Entity metadata", "proxy columns (d13C ... Mg_Ca)"),
        listing::<DateType>("Dating information", "date_type"),
        listing::<MaterialDated>("Dating information", "material_dated"),
        listing::<CalibUsed>("Dating information", "calib_used"),
        listing::<YesNoUnknown>("Dating information", "date_used"),
        listing::<DecayConstant>("Dating information", "decay_constant"),
        listing::<ModernReference>("Dating / Lamina / Sample", "modern_reference"),
        listing::<HiatusMarker>("Sample data", "hiatus"),
        listing::<GapMarker>("Sample data", "gap"),
        listing::<Mineralogy>("Sample data", "mineralogy"),
        listing::<AragCorr>("Sample data", "arag_corr"),
        listing::<AgeModelType>("Sample data", "age_model_type"),
        listing::<AnnLamCheck>("Sample data", "ann_lam_check"),
        listing::<DepRateCheck>("Sample data", "dep_rate_check"),
        listing::<IsoStd>("Sample data", "iso_std"),
    ]
}
