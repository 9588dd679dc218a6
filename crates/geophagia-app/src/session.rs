//! The editor session: one height field, the mesh derived from it, and the
//! sink that receives every rebuilt mesh.
//!
//! Every mutating operation either succeeds, in which case the mesh is
//! rebuilt and uploaded exactly once, or fails and leaves field, mesh and
//! sink exactly as they were.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use geophagia_config::TerrainConfig;
use geophagia_mesh::{MeshSink, MeshTessellator, TerrainMesh};
use geophagia_terrain::{HeightField, HeightmapGenerator, TerrainError};
use image::ImageFormat;

use crate::presets::preview_field;

/// Errors reported by [`EditorSession`] operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Validation, I/O or degenerate-input error from the terrain layer.
    #[error(transparent)]
    Terrain(#[from] TerrainError),

    /// The file extension maps to neither raw nor an enabled image codec.
    #[error("unsupported heightmap format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl SessionError {
    /// `true` for degenerate requests that were ignored rather than failed.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Terrain(err) if err.is_warning())
    }
}

/// On-disk heightmap encodings, chosen by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeightmapFormat {
    /// `.raw` / `.r32`: 8-byte dimension header plus little-endian `f32`s.
    Raw,
    /// An 8-bit grayscale image in the given codec.
    Image(ImageFormat),
}

impl HeightmapFormat {
    /// Pick the format for `path` from its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, SessionError> {
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("raw" | "r32") => Ok(Self::Raw),
            _ => ImageFormat::from_path(path)
                .map(Self::Image)
                .map_err(|_| SessionError::UnsupportedFormat {
                    path: path.to_path_buf(),
                }),
        }
    }

    fn ensure_readable(self, path: &Path) -> Result<Self, SessionError> {
        match self {
            Self::Image(format) if !format.reading_enabled() => {
                Err(SessionError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
            _ => Ok(self),
        }
    }

    fn ensure_writable(self, path: &Path) -> Result<Self, SessionError> {
        match self {
            Self::Image(format) if !format.writing_enabled() => {
                Err(SessionError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
            _ => Ok(self),
        }
    }
}

/// Owns the editable terrain and keeps its mesh in sync.
///
/// Generators and loaders borrow the field mutably only for the duration of
/// a call; nothing else holds a reference to it.
pub struct EditorSession<S: MeshSink> {
    field: HeightField,
    mesh: TerrainMesh,
    tessellator: MeshTessellator,
    sink: S,
}

impl<S: MeshSink> EditorSession<S> {
    /// A session over an empty field. Nothing is uploaded until the first
    /// successful mutation or [`rebuild_mesh`](Self::rebuild_mesh).
    pub fn new(tessellator: MeshTessellator, sink: S) -> Self {
        Self {
            field: HeightField::empty(),
            mesh: TerrainMesh::new(),
            tessellator,
            sink,
        }
    }

    /// A session showing the configured preview pattern, already uploaded.
    pub fn from_config(config: &TerrainConfig, sink: S) -> Result<Self, SessionError> {
        let field = preview_field(config)?;
        let mut session = Self::new(MeshTessellator::new(config.texture_scale), sink);
        session.field = field;
        session.rebuild_mesh();
        Ok(session)
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }

    /// The mesh from the last rebuild.
    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    pub fn tessellator(&self) -> &MeshTessellator {
        &self.tessellator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Tear down the session, handing back the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Change the texture repeat count and rebuild.
    pub fn set_texture_scale(&mut self, texture_scale: f32) {
        self.tessellator.texture_scale = texture_scale;
        self.rebuild_mesh();
    }

    /// Regenerate the field in place at its current size.
    pub fn generate(&mut self, generator: &HeightmapGenerator) -> Result<(), SessionError> {
        let result = generator.generate(&mut self.field);
        self.finish(result.map_err(SessionError::from), generator.name())
    }

    /// Replace the field with the heightmap at `path`.
    pub fn load_file(&mut self, path: &Path) -> Result<(), SessionError> {
        let result = HeightmapFormat::from_path(path)
            .and_then(|format| format.ensure_readable(path))
            .and_then(|format| {
                match format {
                    HeightmapFormat::Raw => self.field.load_raw_file(path),
                    HeightmapFormat::Image(_) => self.field.load_image_file(path),
                }
                .map_err(SessionError::from)
            });
        if result.is_ok() {
            tracing::info!(
                path = %path.display(),
                width = self.field.width(),
                depth = self.field.depth(),
                "heightmap loaded"
            );
        }
        self.finish(result, "load")
    }

    /// Write the field to `path`. Does not touch the mesh or the sink.
    pub fn save_file(&self, path: &Path) -> Result<(), SessionError> {
        let result = HeightmapFormat::from_path(path)
            .and_then(|format| format.ensure_writable(path))
            .and_then(|format| {
                match format {
                    HeightmapFormat::Raw => self.field.save_raw_file(path),
                    HeightmapFormat::Image(_) => self.field.save_image_file(path),
                }
                .map_err(SessionError::from)
            });
        match &result {
            Ok(()) => tracing::info!(path = %path.display(), "heightmap saved"),
            Err(err) => tracing::warn!(path = %path.display(), "save failed: {err}"),
        }
        result
    }

    /// Replace the field with a flat `width × depth` grid.
    ///
    /// The new grid is built and validated first and only swapped in on
    /// success.
    pub fn resize_flat(&mut self, width: u32, depth: u32) -> Result<(), SessionError> {
        let result = HeightField::flat(width, depth)
            .and_then(|flat| self.field.update(flat.into_elevations(), width, depth));
        self.finish(result.map_err(SessionError::from), "resize")
    }

    /// Tessellate the current field and upload it.
    pub fn rebuild_mesh(&mut self) {
        self.mesh = self.tessellator.rebuild(&self.field);
        self.sink.upload(&self.mesh.vertices, &self.mesh.indices);
    }

    fn finish(
        &mut self,
        result: Result<(), SessionError>,
        operation: &str,
    ) -> Result<(), SessionError> {
        match &result {
            Ok(()) => self.rebuild_mesh(),
            Err(err) if err.is_warning() => tracing::warn!(operation, "ignored: {err}"),
            Err(err) => tracing::warn!(operation, "failed: {err}"),
        }
        result
    }
}
