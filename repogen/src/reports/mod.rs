//! What each command prints.
//!
//! Ops fill a report struct; the command renders it to an `Output`.

mod check;
mod generate;
mod init;
mod output;

pub use check::{AnchorLine, CheckReport};
pub use generate::GenerateReport;
pub use init::InitReport;
pub use output::{Report, TerminalOutput};
