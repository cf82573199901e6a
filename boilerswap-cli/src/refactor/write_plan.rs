use serde::Serialize;
use std::path::PathBuf;

use super::planner::PathEntry;
use super::substitute;
use crate::core::Result;
use crate::fs::{EntryKind, FileSystem};
use crate::names::ReplacementRules;

/// A file to create from a template file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub source: PathBuf,
    pub destination: PathBuf,

    /// Bytes of the template, kept for previews
    #[serde(skip)]
    pub template: Vec<u8>,

    /// Substituted bytes to write
    #[serde(skip)]
    pub contents: Vec<u8>,

    pub bytes: usize,

    /// Occurrences replaced inside the contents
    pub replacements: usize,
}

/// A rewritten directory to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedDirectory {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Everything a run would create, fully computed before any write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WritePlan {
    pub directories: Vec<PlannedDirectory>,
    pub files: Vec<PlannedFile>,
}

impl WritePlan {
    /// Read every planned file and substitute its contents.
    pub fn build(fs: &dyn FileSystem, entries: &[PathEntry], rules: &ReplacementRules) -> Result<Self> {
        let mut plan = WritePlan::default();

        for entry in entries {
            match entry.kind {
                EntryKind::File => {
                    let template = fs.read(&entry.source)?;
                    let (contents, replacements) = substitute::apply_bytes(&template, rules);
                    plan.files.push(PlannedFile {
                        source: entry.source.clone(),
                        destination: entry.destination.clone(),
                        bytes: contents.len(),
                        template,
                        contents,
                        replacements,
                    });
                }
                EntryKind::Directory => plan.directories.push(PlannedDirectory {
                    source: entry.source.clone(),
                    destination: entry.destination.clone(),
                }),
                EntryKind::Other => {}
            }
        }

        Ok(plan)
    }

    /// (source, destination) of every directory and file, directories first.
    pub fn destinations(&self) -> impl Iterator<Item = (&PathBuf, &PathBuf)> {
        self.directories
            .iter()
            .map(|d| (&d.source, &d.destination))
            .chain(self.files.iter().map(|f| (&f.source, &f.destination)))
    }

    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::OsFileSystem;
    use crate::names::{Axis, NamePairSet};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_substitutes_contents() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("boilerExample.ts");
        fs::write(&source, "class BoilerExample {}\nconst boilerExamples = [];\n").unwrap();

        let plural = NamePairSet::pair(Axis::Plural, "boilerExamples", "widgetItems").unwrap();
        let singular = NamePairSet::pair(Axis::Singular, "boilerExample", "widgetItem").unwrap();
        let rules = ReplacementRules::build(&plural, &singular);

        let entries = vec![
            PathEntry {
                source: source.clone(),
                destination: temp.path().join("widgetItem.ts"),
                kind: EntryKind::File,
            },
            PathEntry {
                source: temp.path().join("boiler-examples"),
                destination: temp.path().join("widget-items"),
                kind: EntryKind::Directory,
            },
        ];

        let plan = WritePlan::build(&OsFileSystem, &entries, &rules).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.directories[0].destination, temp.path().join("widget-items"));

        let file = &plan.files[0];
        assert_eq!(
            String::from_utf8(file.contents.clone()).unwrap(),
            "class WidgetItem {}\nconst widgetItems = [];\n"
        );
        assert_eq!(file.replacements, 2);
        assert_eq!(file.bytes, file.contents.len());
    }
}
