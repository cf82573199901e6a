use similar::TextDiff;
use std::path::{Path, PathBuf};

use super::write_plan::{PlannedFile, WritePlan};

/// Preview of one planned file
#[derive(Debug, Clone)]
pub struct PreviewDiff {
    pub source: PathBuf,
    pub destination: PathBuf,

    /// Occurrences replaced in the contents
    pub num_changes: usize,

    /// Unified diff of template vs. generated contents; empty for binary files
    pub diff: String,
}

impl PreviewDiff {
    pub fn from_file(file: &PlannedFile, base: &Path) -> Self {
        let source = display_path(&file.source, base);
        let destination = display_path(&file.destination, base);

        let diff = match (
            std::str::from_utf8(&file.template),
            std::str::from_utf8(&file.contents),
        ) {
            (Ok(old), Ok(new)) if old != new => TextDiff::from_lines(old, new)
                .unified_diff()
                .context_radius(2)
                .header(&source.to_string_lossy(), &destination.to_string_lossy())
                .to_string(),
            _ => String::new(),
        };

        Self {
            source,
            destination,
            num_changes: file.replacements,
            diff,
        }
    }

    /// Generate a human-readable diff output
    pub fn format_diff(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "📝 {} -> {}\n",
            self.source.display(),
            self.destination.display()
        ));
        output.push_str(&format!(
            "   {} change{}\n",
            self.num_changes,
            if self.num_changes == 1 { "" } else { "s" }
        ));
        if !self.diff.is_empty() {
            output.push('\n');
            output.push_str(&self.diff);
        }
        output
    }
}

/// Path relative to `base` when possible, for display.
pub fn display_path(path: &Path, base: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// One line per planned directory and file.
pub fn format_plan(plan: &WritePlan, base: &Path) -> String {
    let mut output = String::new();

    for dir in &plan.directories {
        output.push_str(&format!(
            "  📁 {} -> {}\n",
            display_path(&dir.source, base).display(),
            display_path(&dir.destination, base).display()
        ));
    }
    for file in &plan.files {
        output.push_str(&format!(
            "  📝 {} -> {} ({} bytes, {} replacement{})\n",
            display_path(&file.source, base).display(),
            display_path(&file.destination, base).display(),
            file.bytes,
            file.replacements,
            if file.replacements == 1 { "" } else { "s" }
        ));
    }

    output
}

/// Generate preview for all files
pub fn generate_preview(plan: &WritePlan, base: &Path) -> String {
    let diffs: Vec<PreviewDiff> = plan
        .files
        .iter()
        .map(|f| PreviewDiff::from_file(f, base))
        .collect();

    let mut output = String::new();

    let total_files = diffs.len();
    let total_changes: usize = diffs.iter().map(|d| d.num_changes).sum();

    output.push_str("========================================\n");
    output.push_str("           PREVIEW CHANGES\n");
    output.push_str("========================================\n\n");
    output.push_str(&format!(
        "📊 {} file{}, {} change{}\n\n",
        total_files,
        if total_files == 1 { "" } else { "s" },
        total_changes,
        if total_changes == 1 { "" } else { "s" }
    ));

    for (i, diff) in diffs.iter().enumerate() {
        output.push_str(&diff.format_diff());
        if i < diffs.len() - 1 {
            output.push_str("\n----------------------------------------\n\n");
        }
    }

    output.push_str("\n========================================\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planned() -> PlannedFile {
        PlannedFile {
            source: PathBuf::from("/work/src/boilerExample.ts"),
            destination: PathBuf::from("/work/src/widgetItem.ts"),
            template: b"class BoilerExample {}\n".to_vec(),
            contents: b"class WidgetItem {}\n".to_vec(),
            bytes: 20,
            replacements: 1,
        }
    }

    #[test]
    fn test_preview_diff_format() {
        let diff = PreviewDiff::from_file(&planned(), Path::new("/work"));
        assert_eq!(diff.source, PathBuf::from("src/boilerExample.ts"));

        let formatted = diff.format_diff();
        assert!(formatted.contains("src/boilerExample.ts -> src/widgetItem.ts"));
        assert!(formatted.contains("1 change\n"));
        assert!(formatted.contains("-class BoilerExample {}"));
        assert!(formatted.contains("+class WidgetItem {}"));
    }

    #[test]
    fn test_binary_file_has_no_diff() {
        let mut file = planned();
        file.template = vec![0xff, 0x00];
        file.contents = vec![0xff, 0x00];
        let diff = PreviewDiff::from_file(&file, Path::new("/work"));
        assert!(diff.diff.is_empty());
    }

    #[test]
    fn test_format_plan() {
        let plan = WritePlan {
            directories: Vec::new(),
            files: vec![planned()],
        };
        let text = format_plan(&plan, Path::new("/work"));
        assert!(text.contains("src/boilerExample.ts -> src/widgetItem.ts (20 bytes, 1 replacement)"));
        assert!(generate_preview(&plan, Path::new("/work")).contains("1 file, 1 change"));
    }
}
