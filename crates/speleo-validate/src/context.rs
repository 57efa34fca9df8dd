//! Shared, read-only state of one validation run.

use std::collections::BTreeSet;

use speleo_model::vocab::{DepthRef, HiatusMarker, SpeleothemType};
use speleo_model::{Sheet, Workbook};

use crate::pipeline::Gate;
use crate::view::View;

/// Workbook plus the partitions every stage works from.
///
/// Composite entities are split off up front: the sample, dating and lamina
/// views exclude them, the `composite_*` views hold only them.
#[derive(Debug)]
pub struct Context<'a> {
    workbook: &'a Workbook,
    entities: Vec<String>,
    composites: BTreeSet<String>,
    granted: BTreeSet<Gate>,
}

impl<'a> Context<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        let entity = View::new(workbook.entity());
        let composites = entity
            .filter(|row| row.is("speleothem_type", SpeleothemType::Composite))
            .entity_names()
            .into_iter()
            .collect();
        Self {
            workbook,
            entities: entity.entity_names_in_order(),
            composites,
            granted: BTreeSet::new(),
        }
    }

    pub fn workbook(&self) -> &'a Workbook {
        self.workbook
    }

    /// Declared entity names, in sheet order.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    pub fn declared(&self) -> BTreeSet<String> {
        self.entities.iter().cloned().collect()
    }

    pub fn is_composite(&self, entity: &str) -> bool {
        self.composites.contains(entity)
    }

    pub fn composites(&self) -> &BTreeSet<String> {
        &self.composites
    }

    /// The entity's depth reference, if it is a listed term.
    pub fn depth_ref(&self, entity: &str) -> Option<DepthRef> {
        self.entity()
            .for_entity(entity)
            .rows()
            .next()
            .and_then(|row| row.term::<DepthRef>("depth_ref"))
    }

    pub fn site(&self) -> View<'a> {
        View::new(self.workbook.site())
    }

    pub fn entity(&self) -> View<'a> {
        View::new(self.workbook.entity())
    }

    pub fn references(&self) -> View<'a> {
        View::new(self.workbook.references())
    }

    fn non_composite(&self, sheet: &'a Sheet) -> View<'a> {
        View::new(sheet).filter(|row| !row.entity().is_some_and(|name| self.is_composite(&name)))
    }

    fn composite(&self, sheet: &'a Sheet) -> View<'a> {
        View::new(sheet).filter(|row| row.entity().is_some_and(|name| self.is_composite(&name)))
    }

    /// Sample rows of non-composite entities.
    pub fn samples(&self) -> View<'a> {
        self.non_composite(self.workbook.sample())
    }

    /// Non-composite sample rows that are not hiatuses.
    pub fn hiatus_free_samples(&self) -> View<'a> {
        self.samples()
            .filter(|row| !row.is("hiatus", HiatusMarker::Hiatus))
    }

    /// Non-composite entities whose hiatus-free samples carry no interp_age.
    pub fn entities_without_age_model(&self) -> Vec<String> {
        let samples = self.hiatus_free_samples();
        samples
            .entity_names()
            .into_iter()
            .filter(|entity| {
                samples
                    .for_entity(entity)
                    .rows()
                    .all(|row| row.is_missing("interp_age"))
            })
            .collect()
    }

    pub fn dating(&self) -> View<'a> {
        self.non_composite(self.workbook.dating())
    }

    pub fn lamina(&self) -> View<'a> {
        self.non_composite(self.workbook.lamina())
    }

    pub fn composite_samples(&self) -> View<'a> {
        self.composite(self.workbook.sample())
    }

    pub fn composite_dating(&self) -> View<'a> {
        self.composite(self.workbook.dating())
    }

    pub fn composite_lamina(&self) -> View<'a> {
        self.composite(self.workbook.lamina())
    }

    pub fn is_granted(&self, gate: Gate) -> bool {
        self.granted.contains(&gate)
    }

    pub(crate) fn grant(&mut self, gate: Gate) {
        self.granted.insert(gate);
    }
}
