//! Turning configured locator strings into canonical locators.

use std::{
    fs,
    path::{MAIN_SEPARATOR, Path, PathBuf},
};

use crate::ConfigurationError;

/// Whether `path` is absolute on any platform we accept in configuration.
///
/// Besides `/` and `\` roots this recognizes drive letters (`C:\`, `C:/`) and
/// stream wrappers (`vfs://`), independent of the host platform.
pub fn is_path_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    match bytes {
        [b'/' | b'\\', ..] => true,
        [drive, b':', b'/' | b'\\', ..] if drive.is_ascii_alphabetic() => true,
        _ => path.split_once("://").is_some_and(|(scheme, _)| {
            !scheme.is_empty() && scheme.bytes().all(|b| b.is_ascii_alphanumeric())
        }),
    }
}

/// Replace both kinds of slashes with the separator of the host platform.
pub fn unify_separators(path: &str) -> String {
    path.chars()
        .map(|c| match c {
            '/' | '\\' => MAIN_SEPARATOR,
            c => c,
        })
        .collect()
}

/// Split a locator into its file part and an optional method suffix.
///
/// For absolute paths starting with `/` the file ends at the first `:`, for
/// drive letter paths at the second one. Relative paths end at the first `:`.
/// Everything after the split is kept verbatim.
pub fn split_locator(locator: &str) -> (&str, Option<&str>) {
    if is_path_absolute(locator) && !locator.starts_with(['/', '\\']) {
        let Some(drive_end) = locator.find(':') else {
            return (locator, None);
        };
        return match locator[drive_end + 1..].find(':') {
            Some(idx) => {
                let split = drive_end + 1 + idx;
                (&locator[..split], Some(&locator[split + 1..]))
            }
            None => (locator, None),
        };
    }

    match locator.split_once(':') {
        Some((file, method)) => (file, Some(method)),
        None => (locator, None),
    }
}

/// Normalize one configured locator of `group`.
///
/// The file part is resolved against `root` when relative, has to exist and
/// is canonicalized so symlinked checkouts compare equal.
pub fn normalize_locator(
    locator: &str,
    root: &Path,
    group: &str,
) -> Result<String, ConfigurationError> {
    let (file, method) = split_locator(locator);
    let file = unify_separators(file);

    let path = match is_path_absolute(&file) {
        true => PathBuf::from(file),
        false => root.join(file),
    };

    let real = fs::canonicalize(&path).map_err(|_| ConfigurationError::MissingPath {
        path: path.clone(),
        group: group.to_string(),
    })?;

    let real = real.display().to_string();
    Ok(match method {
        Some(method) => format!("{real}:{method}"),
        None => real,
    })
}
