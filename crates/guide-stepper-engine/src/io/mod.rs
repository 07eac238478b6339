use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid content directory: {0}")]
    InvalidContentDir(String),
}

/// Read a document relative to the content root
pub fn read_document(relative_path: &RelativePath, content_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(content_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write a document relative to the content root, creating parent directories
pub fn write_document(
    relative_path: &RelativePath,
    content_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(content_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Find every document under `content_root` whose extension is in `extensions`.
///
/// Paths are relative to `content_root` and sorted.
pub fn scan_documents(
    content_root: &Path,
    extensions: &[String],
) -> Result<Vec<RelativePathBuf>, IoError> {
    validate_content_dir(content_root)?;

    let mut files = Vec::new();
    scan_directory_recursive(content_root, extensions, &mut files)?;

    let mut documents = files
        .iter()
        .map(|path| {
            let relative = path
                .strip_prefix(content_root)
                .map_err(|e| IoError::InvalidContentDir(e.to_string()))?;
            RelativePathBuf::from_path(relative)
                .map_err(|e| IoError::InvalidContentDir(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    documents.sort();
    Ok(documents)
}

fn scan_directory_recursive(
    dir: &Path,
    extensions: &[String],
    files: &mut Vec<PathBuf>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, extensions, files)?;
        } else if let Some(ext) = path.extension().and_then(|ext| ext.to_str())
            && extensions.iter().any(|wanted| wanted == ext)
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_content_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidContentDir(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}
