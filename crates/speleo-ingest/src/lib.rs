pub mod csv_sheet;
pub mod discovery;
pub mod error;
pub mod frame;
pub mod workbook;

pub use csv_sheet::{IngestOptions, read_sheet, read_sheet_from, write_sheet};
pub use discovery::{SheetFile, classify_sheet, discover_sheets, list_csv_files};
pub use error::{IngestError, Result};
pub use frame::{any_to_value, sheet_from_frame};
pub use workbook::load_workbook;
