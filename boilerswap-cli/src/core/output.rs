use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::pipeline::RunReport;
use crate::refactor::{display_path, format_plan, generate_preview};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
    base: PathBuf,
    show_diffs: bool,
}

impl OutputWriter {
    /// Paths are shown relative to `base`. With `show_diffs`, dry-run text
    /// output carries a content diff per file.
    pub fn new(format: OutputFormat, base: impl Into<PathBuf>, show_diffs: bool) -> Self {
        Self {
            format,
            base: base.into(),
            show_diffs,
        }
    }

    pub fn write_reports(&self, reports: &[RunReport]) -> Result<()> {
        println!("{}", self.render_reports(reports)?);
        Ok(())
    }

    pub fn render_reports(&self, reports: &[RunReport]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json = match reports {
                    [single] => serde_json::to_string_pretty(single)?,
                    _ => serde_json::to_string_pretty(reports)?,
                };
                Ok(json)
            }
            OutputFormat::Text => Ok(reports
                .iter()
                .map(|r| self.render_text(r))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn render_text(&self, report: &RunReport) -> String {
        let mut output = String::new();
        let names = &report.names;

        output.push_str(&format!(
            "{} / {} -> {} / {} in {}\n",
            names.source_singular,
            names.source_plural,
            names.target_singular,
            names.target_plural,
            self.relative(&report.source_root).display()
        ));

        if report.plan.is_empty() {
            output.push_str("No template paths matched.\n");
            return output;
        }

        output.push_str(&format_plan(&report.plan, &self.base));

        if !report.overwritten.is_empty() {
            output.push_str(&format!("\n⚠️  Overwriting {} existing file(s):\n", report.overwritten.len()));
            for path in &report.overwritten {
                output.push_str(&format!("  • {}\n", self.relative(path).display()));
            }
        }

        if report.is_dry_run() {
            if self.show_diffs {
                output.push('\n');
                output.push_str(&generate_preview(&report.plan, &self.base));
            }
            output.push_str("\n💡 Run without --dry-run to write these files\n");
        } else {
            output.push_str(&format!(
                "\n✓ Wrote {} file(s), created {} director{}\n",
                report.result.files_written.len(),
                report.result.directories_created.len(),
                if report.result.directories_created.len() == 1 { "y" } else { "ies" }
            ));
        }

        output
    }

    fn relative(&self, path: &Path) -> PathBuf {
        display_path(path, &self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::fs::OsFileSystem;
    use crate::pipeline;
    use crate::validate::RunRequest;
    use std::fs;
    use tempfile::TempDir;

    fn dry_report(temp: &TempDir) -> RunReport {
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/boilerExample.ts"), "class BoilerExample {}\n").unwrap();
        let request = RunRequest {
            target_singular: Some("widgetItem".to_string()),
            target_plural: Some("widgetItems".to_string()),
            settings: Settings {
                source_dir: temp.path().join("src"),
                ..Settings::default()
            },
            dry_run: true,
            ..RunRequest::default()
        };
        pipeline::run(&request, &OsFileSystem).unwrap()
    }

    #[test]
    fn test_text_output_is_relative() {
        let temp = TempDir::new().unwrap();
        let report = dry_report(&temp);

        let writer = OutputWriter::new(OutputFormat::Text, temp.path(), false);
        let text = writer.render_reports(&[report]).unwrap();
        assert!(text.contains("boilerExample / boilerExamples -> widgetItem / widgetItems in src"));
        assert!(text.contains("src/boilerExample.ts -> src/widgetItem.ts"));
        assert!(text.contains("Run without --dry-run"));
        assert!(!text.contains("PREVIEW CHANGES"));
    }

    #[test]
    fn test_text_output_with_diffs() {
        let temp = TempDir::new().unwrap();
        let report = dry_report(&temp);

        let writer = OutputWriter::new(OutputFormat::Text, temp.path(), true);
        let text = writer.render_reports(&[report]).unwrap();
        assert!(text.contains("PREVIEW CHANGES"));
        assert!(text.contains("+class WidgetItem {}"));
    }

    #[test]
    fn test_json_output() {
        let temp = TempDir::new().unwrap();
        let report = dry_report(&temp);

        let writer = OutputWriter::new(OutputFormat::Json, temp.path(), false);
        let json: serde_json::Value =
            serde_json::from_str(&writer.render_reports(&[report]).unwrap()).unwrap();
        assert_eq!(json["names"]["target_singular"], "widgetItem");
        assert_eq!(json["mode"], "dry_run");
        assert_eq!(json["plan"]["files"][0]["replacements"], 1);
    }
}
