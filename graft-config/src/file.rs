use std::path::{Path, PathBuf};

use crate::{CompilerOptions, Error, Result};

/// A graft.toml file and the options parsed from it.
pub struct GraftToml {
    path: PathBuf,
    options: CompilerOptions,
}

impl GraftToml {
    /// Open and parse a graft.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let options = CompilerOptions::from_str_with_filename(&content, &filename)?;

        Ok(Self { path, options })
    }

    /// Look for graft.toml in `dir`, falling back to default options.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Option<Self>> {
        let candidate = dir.as_ref().join("graft.toml");
        if candidate.is_file() {
            Self::open(candidate).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the parsed options.
    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Consume the file, keeping only the options.
    pub fn into_options(self) -> CompilerOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_discover() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GraftToml::discover(dir.path()).unwrap().is_none());

        let path = dir.path().join("graft.toml");
        std::fs::write(&path, "[compiler]\nplugins = [\"seeded-random\"]\n").unwrap();

        let config = GraftToml::discover(dir.path())
            .unwrap()
            .expect("graft.toml should be found");
        assert_eq!(config.path(), path.as_path());
        assert_eq!(config.options().plugins, vec!["seeded-random"]);
    }

    #[test]
    fn test_open_missing_file() {
        let err = GraftToml::open("/no/such/graft.toml").err().unwrap();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
