pub mod error;
pub mod sheet;
pub mod table;
pub mod value;
pub mod vocab;
pub mod workbook;

pub use error::{MissingColumns, Result, StructuralError};
pub use sheet::{FIRST_DATA_ROW, Sheet, SheetRow};
pub use table::TableKind;
pub use value::{Value, format_numeric};
pub use vocab::{Direction, Vocabulary, VocabularyListing, catalog};
pub use workbook::Workbook;
