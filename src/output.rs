//! Rendering of fetched commits.
//!
//! - `Json` → pretty-printed array, absent fields omitted
//! - `Text` → one `Date/Commit/Author/Message` block per commit
//! - `Short` → `git log --oneline` style
//!
//! Missing author or message data renders as empty fields.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;
use crate::models::CommitRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    Json,
    #[default]
    Text,
    Short,
}

pub struct MessageFormatter;

impl MessageFormatter {
    pub fn render(records: &[CommitRecord], mode: OutputMode) -> Result<String> {
        match mode {
            OutputMode::Json => render_json(records),
            OutputMode::Text => Ok(render_text(records)),
            OutputMode::Short => Ok(render_short(records)),
        }
    }
}

/// Pretty JSON indented by a single space
fn render_json(records: &[CommitRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    records.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn render_text(records: &[CommitRecord]) -> String {
    let blocks: Vec<String> = records.iter().map(text_block).collect();
    blocks.join("\n")
}

fn text_block(record: &CommitRecord) -> String {
    let (date, name, email) = match record.author() {
        Some(a) => (a.timestamp.to_rfc3339(), a.name.as_str(), a.email.as_str()),
        None => (String::new(), "", ""),
    };

    format!(
        "Date: {}\nCommit: {}\nAuthor: {} ({})\nMessage: {}\n",
        date,
        record.sha(),
        name,
        email,
        record.message().unwrap_or("")
    )
}

fn render_short(records: &[CommitRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{} {}\n", r.short_sha(), r.summary()))
        .collect()
}
