//! Export types and options.

use clap::ValueEnum;
use strum_macros::EnumIter;

/// Output file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, EnumIter)]
pub enum OutputFormat {
    /// UTF-8, comma-delimited, header row, no index column
    Csv,
    /// Single-sheet Excel workbook, header row, no index column
    Xlsx,
}

impl OutputFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    /// Human-readable label used in log messages.
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Xlsx => "Excel",
        }
    }
}
