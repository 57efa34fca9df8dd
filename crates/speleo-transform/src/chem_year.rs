//! Per-entity year of chemistry.

use std::collections::BTreeMap;

use speleo_model::vocab::ModernReference;
use speleo_model::{Sheet, Vocabulary};

use crate::epoch::{CHEM_YEAR_COLUMN, REFERENCE_COLUMN};

/// Year of chemistry for each entity, taken from its dating rows.
///
/// Every row referenced to `Year of chemistry` contributes, whatever its
/// `date_used`. When an entity has several finite values the most recent
/// one wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChemYearIndex {
    by_entity: BTreeMap<String, f64>,
}

impl ChemYearIndex {
    pub fn from_dating(dating: &Sheet) -> Self {
        let mut by_entity: BTreeMap<String, f64> = BTreeMap::new();
        for index in 0..dating.len() {
            let chemistry = dating
                .value(index, REFERENCE_COLUMN)
                .as_str()
                .and_then(ModernReference::parse)
                == Some(ModernReference::YearOfChemistry);
            if !chemistry {
                continue;
            }
            let (Some(entity), Some(year)) = (
                dating.value(index, "entity_name").as_text(),
                dating.value(index, CHEM_YEAR_COLUMN).as_finite(),
            ) else {
                continue;
            };
            by_entity
                .entry(entity.into_owned())
                .and_modify(|current| *current = current.max(year))
                .or_insert(year);
        }
        Self { by_entity }
    }

    pub fn get(&self, entity: &str) -> Option<f64> {
        self.by_entity.get(entity).copied()
    }

    pub fn len(&self) -> usize {
        self.by_entity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_entity.is_empty()
    }
}
