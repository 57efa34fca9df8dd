//! Library side of the `speleo` command: logging setup and the check and
//! normalize workflows.

pub mod logging;
pub mod pipeline;
pub mod types;
