//! Resolve `--file`, `--dir` and `--glob` arguments into gist files
//!
//! Sources are applied in a fixed order (files, then directories, then
//! globs) and merged into one map keyed by base name. A repeated base name
//! aborts the whole collection, so nothing is ever uploaded partially.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::GistError;

/// Gist file name to file content
pub type FileMap = BTreeMap<String, String>;

/// Name used for stdin content when `--name` is not given
pub const DEFAULT_FILE_NAME: &str = "gistfile1.txt";

/// One kind of input argument, expanded to concrete file paths
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Files(Vec<PathBuf>),
    Dirs(Vec<PathBuf>),
    Globs(Vec<String>),
}

impl Source {
    fn resolve(&self) -> Result<Vec<PathBuf>, GistError> {
        match self {
            Source::Files(paths) => Ok(paths.clone()),
            Source::Dirs(dirs) => {
                let mut paths = vec![];
                for dir in dirs {
                    paths.extend(dir_files(dir)?);
                }
                Ok(paths)
            }
            Source::Globs(patterns) => {
                let mut paths = vec![];
                for pattern in patterns {
                    paths.extend(glob_files(pattern)?);
                }
                Ok(paths)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Collector {
    sources: Vec<Source>,
}

impl Collector {
    /// Build a collector from the raw argument lists, skipping empty ones.
    pub fn new(files: Vec<PathBuf>, dirs: Vec<PathBuf>, globs: Vec<String>) -> Collector {
        let sources = vec![Source::Files(files), Source::Dirs(dirs), Source::Globs(globs)]
            .into_iter()
            .filter(|source| match source {
                Source::Files(v) | Source::Dirs(v) => !v.is_empty(),
                Source::Globs(v) => !v.is_empty(),
            })
            .collect();

        Collector { sources }
    }

    /// True when no file, directory or glob was given and stdin should be used
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn collect(&self) -> Result<FileMap, GistError> {
        let mut files = FileMap::new();

        for source in &self.sources {
            for path in source.resolve()? {
                let name = base_name(&path);
                if files.contains_key(&name) {
                    return Err(GistError::DuplicateFileName { name });
                }

                log::debug!("adding {} as {}", path.display(), name);
                files.insert(name, read_content(&path)?);
            }
        }

        Ok(files)
    }
}

/// Read all of `reader` as a single gist file called `name`.
pub fn read_stdin<R: Read>(mut reader: R, name: Option<&str>) -> Result<FileMap, GistError> {
    let mut bytes = vec![];
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| GistError::io("reading stdin", e))?;

    let name = name
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_FILE_NAME)
        .to_string();

    let mut files = FileMap::new();
    files.insert(name, String::from_utf8_lossy(&bytes).into_owned());
    Ok(files)
}

fn read_content(path: &Path) -> Result<String, GistError> {
    let bytes = fs::read(path).map_err(|e| GistError::io(format!("reading {}", path.display()), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn base_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}

fn is_dir(path: &Path) -> Result<bool, GistError> {
    fs::metadata(path)
        .map(|m| m.is_dir())
        .map_err(|e| GistError::io(format!("reading metadata of {}", path.display()), e))
}

/// Regular files directly inside `dir`, sorted by name
fn dir_files(dir: &Path) -> Result<Vec<PathBuf>, GistError> {
    let context = || format!("reading directory {}", dir.display());

    let mut entries = vec![];
    for entry in fs::read_dir(dir).map_err(|e| GistError::io(context(), e))? {
        let entry = entry.map_err(|e| GistError::io(context(), e))?;
        entries.push(entry.path());
    }
    entries.sort();

    let mut files = vec![];
    for path in entries {
        if !is_dir(&path)? {
            files.push(path);
        }
    }

    Ok(files)
}

/// Non-directory matches of `pattern`
fn glob_files(pattern: &str) -> Result<Vec<PathBuf>, GistError> {
    let matches = glob::glob(pattern).map_err(|source| GistError::Glob {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = vec![];
    for entry in matches {
        let path = entry.map_err(|e| {
            let context = format!("expanding {}: {}", pattern, e.path().display());
            GistError::io(context, e.into_error())
        })?;

        if !is_dir(&path)? {
            files.push(path);
        }
    }

    Ok(files)
}
