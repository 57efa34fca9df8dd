//! Read-only row subsets of a sheet.
//!
//! Checks never filter a sheet in place. A [`View`] is a list of row indices
//! over a borrowed sheet, so partitions (composite entities, hiatus-free rows,
//! one entity's rows) are cheap, immutable and freely combined.

use std::borrow::Cow;
use std::collections::BTreeSet;

use speleo_model::{Direction, Sheet, TableKind, Value, Vocabulary};

#[derive(Debug, Clone)]
pub struct View<'a> {
    sheet: &'a Sheet,
    rows: Vec<usize>,
}

/// One row of a view.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    sheet: &'a Sheet,
    index: usize,
}

impl<'a> View<'a> {
    /// Every row of `sheet`.
    pub fn new(sheet: &'a Sheet) -> Self {
        Self {
            sheet,
            rows: (0..sheet.len()).collect(),
        }
    }

    pub fn sheet(&self) -> &'a Sheet {
        self.sheet
    }

    pub fn table(&self) -> TableKind {
        self.sheet.kind()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'a>> + '_ {
        let sheet = self.sheet;
        self.rows.iter().map(move |&index| Row { sheet, index })
    }

    /// Rows for which `keep` holds.
    pub fn filter(&self, mut keep: impl FnMut(&Row<'a>) -> bool) -> View<'a> {
        let rows = self.rows().filter(|row| keep(row)).map(|row| row.index).collect();
        View {
            sheet: self.sheet,
            rows,
        }
    }

    /// Rows belonging to `entity`.
    pub fn for_entity(&self, entity: &str) -> View<'a> {
        self.filter(|row| row.entity().as_deref() == Some(entity))
    }

    /// The same rows over a derived copy of the sheet (same shape, rewritten
    /// values), such as an epoch-normalized sheet.
    pub fn rebase<'b>(&self, sheet: &'b Sheet) -> View<'b> {
        View {
            sheet,
            rows: self
                .rows
                .iter()
                .copied()
                .filter(|&index| index < sheet.len())
                .collect(),
        }
    }

    /// Distinct non-empty entity names, sorted.
    pub fn entity_names(&self) -> Vec<String> {
        self.rows()
            .filter_map(|row| row.entity().map(Cow::into_owned))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Entity names in first-appearance order.
    pub fn entity_names_in_order(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.rows()
            .filter_map(|row| row.entity().map(Cow::into_owned))
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    /// Spreadsheet row numbers of rows for which `pred` holds.
    pub fn row_numbers_where(&self, mut pred: impl FnMut(&Row<'a>) -> bool) -> Vec<usize> {
        self.rows()
            .filter(|row| pred(row))
            .map(|row| row.number())
            .collect()
    }

    /// Whether every row has `column` filled in. An empty view has no
    /// missing cells.
    pub fn all_present(&self, column: &str) -> bool {
        self.rows().all(|row| row.is_present(column))
    }

    pub fn any_present(&self, column: &str) -> bool {
        self.rows().any(|row| row.is_present(column))
    }

    /// Rows with a numeric `column`, ordered along `direction`.
    ///
    /// The sort is stable, so rows at equal depth keep sheet order.
    pub fn sorted_by(&self, column: &str, direction: Direction) -> Vec<(f64, Row<'a>)> {
        let mut rows: Vec<(f64, Row<'a>)> = self
            .rows()
            .filter_map(|row| row.number_in(column).map(|value| (value, row)))
            .collect();
        rows.sort_by(|a, b| match direction {
            Direction::Ascending => a.0.total_cmp(&b.0),
            Direction::Descending => b.0.total_cmp(&a.0),
        });
        rows
    }
}

impl<'a> Row<'a> {
    /// Spreadsheet row number.
    pub fn number(&self) -> usize {
        self.sheet.rows()[self.index].number
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self, column: &str) -> &'a Value {
        self.sheet.value(self.index, column)
    }

    pub fn is_missing(&self, column: &str) -> bool {
        self.value(column).is_missing()
    }

    pub fn is_present(&self, column: &str) -> bool {
        self.value(column).is_present()
    }

    pub fn number_in(&self, column: &str) -> Option<f64> {
        self.value(column).as_number()
    }

    pub fn text(&self, column: &str) -> Option<Cow<'a, str>> {
        self.value(column).as_text()
    }

    /// Vocabulary term in `column`; `None` when missing or not in the list.
    pub fn term<V: Vocabulary>(&self, column: &str) -> Option<V> {
        self.text(column).and_then(|text| V::parse(&text))
    }

    /// Whether `column` holds exactly the given term.
    pub fn is<V: Vocabulary + PartialEq>(&self, column: &str, term: V) -> bool {
        self.term::<V>(column) == Some(term)
    }

    pub fn entity(&self) -> Option<Cow<'a, str>> {
        self.text("entity_name")
    }
}
