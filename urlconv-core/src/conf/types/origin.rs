use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a configuration block was declared.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub(crate) file: PathBuf,
    pub(crate) section: String,
    pub(crate) label: Option<String>,
}

impl Origin {
    pub fn new(file: &Path, section: &str, label: Option<&str>) -> Self {
        Self {
            file: file.to_path_buf(),
            section: section.to_owned(),
            label: label.map(str::to_owned),
        }
    }

    pub fn test(section: &str) -> Self {
        Self::new(Path::new("/test/urlconv.hcl"), section, None)
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(
                f,
                "{}: {} \"{}\" block",
                self.file.display(),
                self.section,
                label
            ),
            None => write!(f, "{}: {} block", self.file.display(), self.section),
        }
    }
}
