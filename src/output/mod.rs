//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod formatters;
pub mod json;
pub mod table;

/// Types that can be rendered in any [`OutputFormat`]
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

/// Print a single record: a one-row table, or the bare object wrapped in JSON metadata.
pub fn print_record<T: Tabled + Serialize>(record: T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", table::format_table(&[record])),
        OutputFormat::Json => println!("{}", json::format_json(&record)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled, Serialize)]
    struct Row {
        #[tabled(rename = "ID")]
        id: i64,
    }

    #[test]
    fn test_vec_table_format() {
        let out = vec![Row { id: 7 }].format(OutputFormat::Table).unwrap();
        assert!(out.contains("ID"));
        assert!(out.contains('7'));
    }

    #[test]
    fn test_vec_json_format() {
        let out = vec![Row { id: 7 }].format(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["data"][0]["id"], 7);
    }
}
