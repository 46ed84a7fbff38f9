//! Synthesized file bodies for backfilled commits.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

/// The shape of content written for a file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Markdown,
    Python,
    Rust,
    Json,
    Toml,
    Other,
}

impl FileKind {
    pub fn of(path: &str) -> Self {
        match extension(path).as_str() {
            "md" | "markdown" => FileKind::Markdown,
            "py" => FileKind::Python,
            "rs" => FileKind::Rust,
            "json" => FileKind::Json,
            "toml" => FileKind::Toml,
            _ => FileKind::Other,
        }
    }
}

#[derive(Serialize)]
struct UpdateRecord<'a> {
    update_date: String,
    update_number: usize,
    changes: &'a [&'a str],
}

const CONFIG_CHANGES: [&str; 3] = [
    "Updated configuration",
    "Modified settings",
    "Adjusted parameters",
];

fn extension(path: &str) -> String {
    Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Content for commit `index` (0-based) of `total` on `date`.
pub fn synthesize_content(path: &str, date: NaiveDate, index: usize, total: usize) -> String {
    let number = index + 1;
    let day = date.format("%Y-%m-%d").to_string();
    let compact = date.format("%Y%m%d").to_string();

    match FileKind::of(path) {
        FileKind::Markdown => format!(
            "# Update for {day}\n\nDocumentation update #{number}.\n\n## Changes\n\n\
             - Updated documentation\n- Improved examples\n- Fixed typos\n"
        ),
        FileKind::Python => format!(
            "\"\"\"\nModule updated on {day}\n\"\"\"\n\n\
             def sample_function_{compact}_{index}():\n    \
                 \"\"\"Example function added in update #{number}.\"\"\"\n    \
                 print(\"Sample function implementation\")\n    \
                 return True\n\n\
             # Added in update #{number}\n\
             class SampleClass:\n    \
                 \"\"\"Example class for demonstration.\"\"\"\n\n    \
                 def __init__(self):\n        \
                     self.value = \"{day}\"\n\n    \
                 def get_value(self):\n        \
                     return self.value\n"
        ),
        FileKind::Rust => format!(
            "//! Module updated on {day}\n\n\
             /// Example function added in update #{number}.\n\
             pub fn sample_function_{compact}_{index}() -> bool {{\n    \
                 true\n\
             }}\n\n\
             /// Added in update #{number}.\n\
             pub struct Sample{compact}{index} {{\n    \
                 pub value: &'static str,\n\
             }}\n\n\
             pub const SAMPLE_{compact}_{index}: Sample{compact}{index} = Sample{compact}{index} {{ value: \"{day}\" }};\n"
        ),
        FileKind::Json => {
            let record = UpdateRecord {
                update_date: day.clone(),
                update_number: number,
                changes: &CONFIG_CHANGES,
            };
            serde_json::to_string_pretty(&record)
                .map(|body| body + "\n")
                .unwrap_or_else(|_| placeholder(path, &day, number, total))
        }
        FileKind::Toml => {
            let record = UpdateRecord {
                update_date: day.clone(),
                update_number: number,
                changes: &CONFIG_CHANGES,
            };
            toml::to_string(&record).unwrap_or_else(|_| placeholder(path, &day, number, total))
        }
        FileKind::Other => placeholder(path, &day, number, total),
    }
}

fn placeholder(path: &str, day: &str, number: usize, total: usize) -> String {
    let ext = extension(path);
    let ext = if ext.is_empty() { "none" } else { ext.as_str() };
    format!("# Update for {day}\n\nCommit #{number} of {total}\n\nGenerated content for file type: {ext}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_file_kinds() {
        assert_eq!(FileKind::of("docs/updates.md"), FileKind::Markdown);
        assert_eq!(FileKind::of("README.md"), FileKind::Markdown);
        assert_eq!(FileKind::of("src/main.py"), FileKind::Python);
        assert_eq!(FileKind::of("config/settings.json"), FileKind::Json);
        assert_eq!(FileKind::of("Cargo.toml"), FileKind::Toml);
        assert_eq!(FileKind::of("notes.txt"), FileKind::Other);
        assert_eq!(FileKind::of("Makefile"), FileKind::Other);
    }

    #[test]
    fn test_markdown_mentions_date_and_number() {
        let body = synthesize_content("docs/updates.md", date(), 2, 4);
        assert!(body.starts_with("# Update for 2024-03-07"));
        assert!(body.contains("Documentation update #3."));
    }

    #[test]
    fn test_code_names_are_unique_per_commit() {
        let first = synthesize_content("src/main.py", date(), 0, 3);
        let second = synthesize_content("src/main.py", date(), 1, 3);
        assert!(first.contains("def sample_function_20240307_0():"));
        assert!(second.contains("def sample_function_20240307_1():"));
        assert!(first.contains("class SampleClass:"));
        assert_ne!(first, second);

        let rust = synthesize_content("src/lib.rs", date(), 1, 3);
        assert!(rust.contains("pub fn sample_function_20240307_1() -> bool"));
    }

    #[test]
    fn test_json_record() {
        let body = synthesize_content("data/sample.json", date(), 0, 1);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["update_date"], "2024-03-07");
        assert_eq!(value["update_number"], 1);
        assert_eq!(value["changes"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_toml_record() {
        let body = synthesize_content("config/app.toml", date(), 4, 5);
        let value: toml::Value = toml::from_str(&body).unwrap();
        assert_eq!(value["update_number"].as_integer(), Some(5));
    }

    #[test]
    fn test_unknown_extension_placeholder() {
        let body = synthesize_content("assets/logo.svg", date(), 1, 2);
        assert!(body.contains("Commit #2 of 2"));
        assert!(body.contains("Generated content for file type: svg"));
    }
}
