use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{ReportError, group::path::is_path_absolute, report::Report};

/// Where a report file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTarget {
    path: PathBuf,
}

impl ReportTarget {
    /// Absolute paths are used as they are, relative ones end up in `output_dir`.
    pub fn resolve(path: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let path = match is_path_absolute(&path.to_string_lossy()) {
            true => path.to_path_buf(),
            false => output_dir.as_ref().join(path),
        };
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `report` and write it to the target path.
    pub fn write(&self, report: &Report) -> Result<(), ReportError> {
        let xml = report.to_xml()?;
        fs::write(&self.path, xml).map_err(|source| ReportError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!("JUnit XML report generated in file://{}", self.path.display());
        Ok(())
    }
}
