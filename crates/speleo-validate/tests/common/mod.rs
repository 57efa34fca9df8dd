//! Builders for small in-memory workbooks.

#![allow(dead_code)]

use speleo_model::{Sheet, TableKind, Value, Workbook};
use speleo_validate::{STAGES, Stage};

pub type Cells<'a> = &'a [(&'a str, &'a str)];

/// A sheet with the full column set; unnamed cells are empty.
pub fn sheet(kind: TableKind, rows: &[Cells<'_>]) -> Sheet {
    let mut sheet = Sheet::with_schema(kind);
    for cells in rows {
        let values = sheet
            .columns()
            .iter()
            .map(|column| {
                cells
                    .iter()
                    .find(|(name, _)| *name == column.as_str())
                    .map_or(Value::Missing, |(_, raw)| Value::from_raw(raw))
            })
            .collect();
        sheet.push_next(values);
    }
    sheet
}

/// Workbook with one site and the given sheets.
pub struct Builder {
    pub entity: Sheet,
    pub references: Sheet,
    pub dating: Sheet,
    pub lamina: Sheet,
    pub sample: Sheet,
}

impl Builder {
    /// Non-composite stalagmites measured from top.
    pub fn with_entities(names: &[&str]) -> Self {
        let rows: Vec<Vec<(&str, &str)>> = names
            .iter()
            .map(|name| {
                vec![
                    ("entity_name", *name),
                    ("speleothem_type", "stalagmite"),
                    ("depth_ref", "from top"),
                ]
            })
            .collect();
        let rows: Vec<Cells<'_>> = rows.iter().map(Vec::as_slice).collect();
        Self {
            entity: sheet(TableKind::Entity, &rows),
            references: Sheet::with_schema(TableKind::References),
            dating: Sheet::with_schema(TableKind::Dating),
            lamina: Sheet::with_schema(TableKind::Lamina),
            sample: Sheet::with_schema(TableKind::Sample),
        }
    }

    pub fn dating(mut self, rows: &[Cells<'_>]) -> Self {
        self.dating = sheet(TableKind::Dating, rows);
        self
    }

    pub fn lamina(mut self, rows: &[Cells<'_>]) -> Self {
        self.lamina = sheet(TableKind::Lamina, rows);
        self
    }

    pub fn sample(mut self, rows: &[Cells<'_>]) -> Self {
        self.sample = sheet(TableKind::Sample, rows);
        self
    }

    pub fn build(self) -> Workbook {
        let site = sheet(
            TableKind::Site,
            &[&[
                ("site_name", "Test cave"),
                ("latitude", "45.5"),
                ("longitude", "10.25"),
            ]],
        );
        Workbook::new(
            site,
            self.entity,
            self.references,
            self.dating,
            self.lamina,
            self.sample,
        )
        .unwrap()
    }
}

/// The named stages, in run order.
pub fn stages(names: &[&str]) -> Vec<Stage> {
    STAGES
        .iter()
        .filter(|stage| names.contains(&stage.name))
        .copied()
        .collect()
}
