//! Outcome reporting
//!
//! Renders the flow files transferred to each requested outcome category,
//! followed by a per-category count summary.

use std::io::{self, Write};

use chrono::{DateTime, Local, SecondsFormat};

use crate::constants::DASHED_LINE;
use crate::flowfile::FlowFile;

/// Which pieces of each flow file the report includes
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Render the attribute block for each flow file
    pub attributes: bool,
    /// Render the payload content for each flow file
    pub content: bool,
}

/// Renders one outcome category to the output stream
///
/// Flow files are rendered in the order given, each followed by a blank
/// line regardless of which outputs were requested, then a one-line count
/// summary and a final blank line. An empty list still gets its summary.
pub fn report_category<W: Write>(
    out: &mut W,
    name: &str,
    flow_files: &[FlowFile],
    options: &ReportOptions,
) -> io::Result<()> {
    for flow_file in flow_files {
        if options.attributes {
            write_attribute_block(out, flow_file)?;
        }
        if options.content {
            writeln!(out, "{}", flow_file.content_string())?;
        }
        writeln!(out)?;
    }
    writeln!(out, "Flow Files transferred to {}: {}", name, flow_files.len())?;
    writeln!(out)?;
    Ok(())
}

/// Fixed-format block of derived metadata and stored attributes
///
/// Derived metadata (entryDate, lineageStartDate, fileSize) always comes
/// first; stored attributes follow in map iteration order, which is
/// deliberately unspecified.
fn write_attribute_block<W: Write>(out: &mut W, flow_file: &FlowFile) -> io::Result<()> {
    writeln!(out, "Flow file {flow_file}")?;
    writeln!(out, "{DASHED_LINE}")?;
    writeln!(out, "FlowFile Attributes")?;
    write_key_value(out, "entryDate", &format_date(flow_file.entry_date()))?;
    write_key_value(
        out,
        "lineageStartDate",
        &format_date(flow_file.lineage_start_date()),
    )?;
    write_key_value(out, "fileSize", &flow_file.size().to_string())?;
    writeln!(out, "FlowFile Attribute Map Content")?;
    for (key, value) in flow_file.attributes() {
        write_key_value(out, key, value)?;
    }
    writeln!(out, "{DASHED_LINE}")?;
    Ok(())
}

fn write_key_value<W: Write>(out: &mut W, key: &str, value: &str) -> io::Result<()> {
    writeln!(out, "Key: '{key}'")?;
    writeln!(out, "\tValue: '{value}'")
}

fn format_date(date: DateTime<Local>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}
