use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::SheetConfig;
use crate::error::SheetError;

/// A parsed config file plus the directory its relative paths hang off.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: SheetConfig,
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: SheetConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Sheet images named by the `input` entries, in entry order.
    ///
    /// Plain entries are taken as-is (a missing file is reported when it is
    /// opened). Glob entries expand to the regular files they match, sorted
    /// by path; a glob that matches nothing is an error. A sheet reached by
    /// more than one entry is only sliced once.
    pub fn sheet_paths(&self) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut sheets = Vec::new();

        for entry in &self.config.input {
            for path in expand_sheet_entry(&self.config_dir, entry)? {
                if seen.insert(path.clone()) {
                    sheets.push(path);
                }
            }
        }

        Ok(sheets)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.config_dir.join(&self.config.output_dir)
    }
}

fn expand_sheet_entry(config_dir: &Path, entry: &str) -> Result<Vec<PathBuf>> {
    // Escaping is a no-op for entries without wildcard characters
    if glob::Pattern::escape(entry) == entry {
        return Ok(vec![config_dir.join(entry)]);
    }

    let pattern = config_dir.join(entry);
    let matches = glob::glob(&pattern.to_string_lossy())
        .with_context(|| format!("invalid sheet pattern: {}", entry))?;

    let mut sheets = Vec::new();
    for path in matches {
        let path = path.with_context(|| format!("failed to read match for: {}", entry))?;
        if path.is_file() {
            sheets.push(path);
        }
    }

    if sheets.is_empty() {
        return Err(SheetError::NoSheetsMatched {
            pattern: entry.to_string(),
        }
        .into());
    }

    sheets.sort();
    Ok(sheets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, json: &str) -> LoadedConfig {
        let config_path = dir.join("cut.json");
        std::fs::write(&config_path, json).unwrap();
        LoadedConfig::load(&config_path).unwrap()
    }

    #[test]
    fn test_plain_entry_is_joined_without_checking() {
        let dir = tempfile::tempdir().unwrap();
        let sheets = expand_sheet_entry(dir.path(), "hero.png").unwrap();
        assert_eq!(sheets, vec![dir.path().join("hero.png")]);
    }

    #[test]
    fn test_sheet_paths_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sheets")).unwrap();
        std::fs::create_dir(dir.path().join("sheets/old.png")).unwrap();
        std::fs::write(dir.path().join("sheets/b.png"), b"").unwrap();
        std::fs::write(dir.path().join("sheets/a.png"), b"").unwrap();
        std::fs::write(dir.path().join("sheets/notes.txt"), b"").unwrap();

        let loaded = write_config(
            dir.path(),
            r#"{ "input": ["extra.png", "sheets/*.png"], "output_dir": "frames" }"#,
        );

        // Directories matching the glob are skipped
        assert_eq!(
            loaded.sheet_paths().unwrap(),
            vec![
                dir.path().join("extra.png"),
                dir.path().join("sheets/a.png"),
                dir.path().join("sheets/b.png"),
            ]
        );
        assert_eq!(loaded.output_dir(), dir.path().join("frames"));
    }

    #[test]
    fn test_sheet_paths_deduplicates_overlapping_entries() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hero.png"), b"").unwrap();
        std::fs::write(dir.path().join("slime.png"), b"").unwrap();

        let loaded = write_config(dir.path(), r#"{ "input": ["slime.png", "*.png"] }"#);

        assert_eq!(
            loaded.sheet_paths().unwrap(),
            vec![dir.path().join("slime.png"), dir.path().join("hero.png")]
        );
    }

    #[test]
    fn test_glob_matching_nothing_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hero.png"), b"").unwrap();

        let loaded = write_config(dir.path(), r#"{ "input": ["hero.png", "sheets/*.png"] }"#);
        let err = loaded.sheet_paths().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SheetError>(),
            Some(SheetError::NoSheetsMatched { pattern }) if pattern == "sheets/*.png"
        ));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("broken.json");
        std::fs::write(&config_path, "{ not json").unwrap();

        let err = LoadedConfig::load(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse config file"));
    }
}
