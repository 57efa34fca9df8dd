//! A structurally sound workbook.
//!
//! Holding a [`Workbook`] means the hard preconditions already hold: all six
//! sheets exist with their version-12 columns, there is exactly one site and
//! at least one entity, and entity names are unique.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{MissingColumns, Result, StructuralError};
use crate::sheet::Sheet;
use crate::table::TableKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workbook {
    site: Sheet,
    entity: Sheet,
    references: Sheet,
    dating: Sheet,
    lamina: Sheet,
    sample: Sheet,
}

impl Workbook {
    /// Assembles a workbook from loose sheets, in any order.
    pub fn from_sheets(sheets: Vec<Sheet>) -> Result<Self> {
        let samples = sheets
            .iter()
            .filter(|sheet| sheet.kind() == TableKind::Sample)
            .count();
        if samples > 1 {
            return Err(StructuralError::MultipleSampleSheets { count: samples });
        }

        let mut by_kind: BTreeMap<TableKind, Sheet> = BTreeMap::new();
        for sheet in sheets {
            by_kind.entry(sheet.kind()).or_insert(sheet);
        }
        let mut take = |kind: TableKind| {
            by_kind
                .remove(&kind)
                .ok_or(StructuralError::MissingSheet {
                    sheet: kind.sheet_name(),
                })
        };

        Self::new(
            take(TableKind::Site)?,
            take(TableKind::Entity)?,
            take(TableKind::References)?,
            take(TableKind::Dating)?,
            take(TableKind::Lamina)?,
            take(TableKind::Sample)?,
        )
    }

    pub fn new(
        site: Sheet,
        entity: Sheet,
        references: Sheet,
        dating: Sheet,
        lamina: Sheet,
        sample: Sheet,
    ) -> Result<Self> {
        let workbook = Self {
            site,
            entity,
            references,
            dating,
            lamina,
            sample,
        };
        workbook.check_schema()?;
        workbook.check_rows()?;
        Ok(workbook)
    }

    fn check_schema(&self) -> Result<()> {
        let missing: Vec<MissingColumns> = self
            .sheets()
            .filter_map(|sheet| {
                let columns = sheet.missing_columns();
                (!columns.is_empty()).then(|| MissingColumns {
                    table: sheet.kind(),
                    columns,
                })
            })
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StructuralError::MissingColumns { missing })
        }
    }

    fn check_rows(&self) -> Result<()> {
        if self.site.len() != 1 {
            return Err(StructuralError::SiteRowCount {
                rows: self.site.len(),
            });
        }
        if self.entity.is_empty() {
            return Err(StructuralError::NoEntities);
        }

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for index in 0..self.entity.len() {
            if let Some(name) = self.entity.value(index, "entity_name").as_text() {
                *counts.entry(name.into_owned()).or_default() += 1;
            }
        }
        let names: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect();
        if names.is_empty() {
            Ok(())
        } else {
            Err(StructuralError::DuplicateEntityNames { names })
        }
    }

    pub fn sheet(&self, kind: TableKind) -> &Sheet {
        match kind {
            TableKind::Site => &self.site,
            TableKind::Entity => &self.entity,
            TableKind::References => &self.references,
            TableKind::Dating => &self.dating,
            TableKind::Lamina => &self.lamina,
            TableKind::Sample => &self.sample,
        }
    }

    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        TableKind::ALL.into_iter().map(|kind| self.sheet(kind))
    }

    pub fn site(&self) -> &Sheet {
        &self.site
    }

    pub fn entity(&self) -> &Sheet {
        &self.entity
    }

    pub fn references(&self) -> &Sheet {
        &self.references
    }

    pub fn dating(&self) -> &Sheet {
        &self.dating
    }

    pub fn lamina(&self) -> &Sheet {
        &self.lamina
    }

    pub fn sample(&self) -> &Sheet {
        &self.sample
    }
}
