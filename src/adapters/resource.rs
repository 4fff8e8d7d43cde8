use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    artifact::model::BlobArtifact,
    foundation::error::{TesseraError, TesseraResult},
};

/// Extensions tried, in order, when a resource name has none.
pub const RESOURCE_EXTENSIONS: &[&str] = &["svg", "png", "jpg", "jpeg", "webp", "ttf", "otf"];

/// Maps a namespaced resource name (`"pack:path"` or plain `"path"`) to bytes.
pub trait ResourceResolver: Send + Sync {
    /// Look up `name`; unknown names fail with [`TesseraError::Reference`].
    fn resolve(&self, name: &str) -> TesseraResult<BlobArtifact>;
}

/// Resolves resources from `<root>/<pack>/<path>.<ext>` on disk.
#[derive(Clone, Debug)]
pub struct DirResourceResolver {
    root: PathBuf,
}

impl DirResourceResolver {
    /// Resolver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, name: &str) -> TesseraResult<Vec<PathBuf>> {
        let rel = match name.split_once(':') {
            Some((pack, path)) => {
                format!("{}/{}", normalize_rel_path(pack)?, normalize_rel_path(path)?)
            }
            None => normalize_rel_path(name)?,
        };
        let base = self.root.join(Path::new(&rel));
        let mut out = Vec::with_capacity(RESOURCE_EXTENSIONS.len() + 1);
        if content_type_for(&base).is_some() {
            out.push(base.clone());
        }
        for ext in RESOURCE_EXTENSIONS {
            out.push(base.with_extension(ext));
        }
        Ok(out)
    }
}

impl ResourceResolver for DirResourceResolver {
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn resolve(&self, name: &str) -> TesseraResult<BlobArtifact> {
        for path in self.candidates(name)? {
            if !path.is_file() {
                continue;
            }
            let Some(content_type) = content_type_for(&path) else {
                continue;
            };
            let bytes = std::fs::read(&path)
                .with_context(|| format!("read resource bytes from '{}'", path.display()))?;
            tracing::debug!(path = %path.display(), content_type, "resource resolved");
            return Ok(BlobArtifact::new(bytes, content_type));
        }
        Err(TesseraError::reference(format!(
            "gfx:resolve_resource: failed to find resource '{name}' under '{}'",
            self.root.display()
        )))
    }
}

/// In-memory resolver keyed by exact resource name.
#[derive(Clone, Debug, Default)]
pub struct MemoryResourceResolver {
    entries: BTreeMap<String, BlobArtifact>,
}

impl MemoryResourceResolver {
    /// Empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `blob` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, blob: BlobArtifact) {
        self.entries.insert(name.into(), blob);
    }

    /// Builder form of [`MemoryResourceResolver::insert`].
    pub fn with(mut self, name: impl Into<String>, blob: BlobArtifact) -> Self {
        self.insert(name, blob);
        self
    }
}

impl ResourceResolver for MemoryResourceResolver {
    fn resolve(&self, name: &str) -> TesseraResult<BlobArtifact> {
        self.entries.get(name).cloned().ok_or_else(|| {
            TesseraError::reference(format!(
                "gfx:resolve_resource: failed to find resource '{name}'"
            ))
        })
    }
}

/// Content type implied by a file extension, if it is one Tessera can consume.
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    Some(match ext.as_str() {
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        _ => return None,
    })
}

/// Normalize a relative resource path.
///
/// Uses `/` separators, drops `.` segments, and rejects absolute paths or `..` traversal.
pub fn normalize_rel_path(source: &str) -> TesseraResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(TesseraError::validation(format!(
            "resource paths must be relative, got '{source}'"
        )));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(TesseraError::validation(format!(
                "resource paths must not contain '..', got '{source}'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(TesseraError::validation(format!(
            "resource name must not be empty, got '{source}'"
        )));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/adapters/resource.rs"]
mod tests;
