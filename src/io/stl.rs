use crate::builder::GeneratedLayers;
use crate::errors::ExportError;
use crate::io::{BASE_SUFFIX, ExportSink, PREVIEW_SUFFIX, TOP_SUFFIX};
use crate::mesh::Mesh;
use crate::triangulated::Triangulated3D;
use log::info;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Export to ASCII STL
/// Convert a shape to an **ASCII STL** string with the given `name`.
///
/// ```rust
/// # use stencil_sign::sketch::Sketch;
/// let block = Sketch::rectangle(10.0, 5.0).extrude(0.0, 1.0).unwrap();
/// let text = block.to_stl_ascii("block");
/// assert!(text.starts_with("solid block"));
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        out.push_str(&format!("  facet normal {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for v in &tri {
            let p = v.position;
            out.push_str(&format!("      vertex {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// STL stores single precision; coordinates are rounded to `f32`.
pub fn to_stl_binary<T: Triangulated3D>(shape: &T) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();
    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        triangles.push(Triangle {
            normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
            vertices: tri.map(|v| {
                let p = v.position;
                Vertex::new([p.x as f32, p.y as f32, p.z as f32])
            }),
        });
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

impl Mesh {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }
}

/// Writes each layer as a binary STL file named `{name}_{suffix}.stl`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StlSink;

impl StlSink {
    fn write_layer(&self, mesh: &Mesh, layer: &'static str, path: PathBuf) -> Result<PathBuf, ExportError> {
        if mesh.is_empty() {
            return Err(ExportError::EmptyLayer { layer });
        }
        let bytes = mesh.to_stl_binary().map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, &bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        let written = fs::metadata(&path)
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?
            .len();
        if written == 0 {
            let _ = fs::remove_file(&path);
            return Err(ExportError::EmptyFile { path });
        }
        info!("wrote {} ({} triangles, {written} bytes)", path.display(), mesh.triangle_count());
        Ok(path)
    }
}

impl ExportSink for StlSink {
    fn export(&self, layers: GeneratedLayers, name: &str, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let file = |suffix: &str| dir.join(format!("{name}_{suffix}.stl"));

        let mut written = vec![
            self.write_layer(&layers.base, "base", file(BASE_SUFFIX))?,
            self.write_layer(&layers.top, "top", file(TOP_SUFFIX))?,
        ];
        if let Some(preview) = &layers.combined_preview {
            written.push(self.write_layer(preview, "preview", file(PREVIEW_SUFFIX))?);
        }
        Ok(written)
    }
}
