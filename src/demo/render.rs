//! Console formatting of sections and service responses.

use std::io::{self, Write};

use serde_json::Value;

use super::transport::ApiResponse;

pub fn print_section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    let rule = "=".repeat(60);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "🎯 {title}")?;
    writeln!(out, "{rule}")
}

/// Pretty JSON for a 200 body; the raw text when it is not JSON.
///
/// Numbers keep their wire spelling.
pub fn format_body(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| body.to_string())
}

/// Print `response` under `title`. Returns whether the status was 200.
pub fn print_response<W: Write>(
    out: &mut W,
    title: &str,
    response: &ApiResponse,
) -> io::Result<bool> {
    writeln!(out, "\n📊 {title}:")?;
    writeln!(out, "Status Code: {}", response.status)?;
    if response.is_ok() {
        writeln!(out, "{}", format_body(&response.body))?;
    } else {
        writeln!(out, "Error: {}", response.body)?;
    }
    Ok(response.is_ok())
}
