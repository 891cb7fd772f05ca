#![cfg(feature = "stl-io")]

mod support;

use std::fs::File;
use stencil_sign::builder::{GeneratedLayers, LayerStats};
use stencil_sign::config::GeneratorConfig;
use stencil_sign::errors::ExportError;
use stencil_sign::heaviness::WeightBucket;
use stencil_sign::io::stl::StlSink;
use stencil_sign::io::{ExportSink, file_stem};
use stencil_sign::mesh::Mesh;
use stencil_sign::sketch::Sketch;
use stencil_sign::SignGenerator;
use support::request;

fn layers(preview: bool) -> GeneratedLayers {
    let mut config = GeneratorConfig::default();
    config.build.combined_preview = preview;
    SignGenerator::new(config)
        .generate(&request("EXIT", 100.0, 25.0))
        .unwrap()
        .into_layers()
}

#[test]
fn sink_writes_named_binary_files() {
    let dir = tempfile::tempdir().unwrap();
    let layers = layers(true);
    let expected = [
        layers.base.triangle_count(),
        layers.top.triangle_count(),
        layers.base.triangle_count() + layers.top.triangle_count(),
    ];

    let name = file_stem("EXIT", WeightBucket::Regular);
    let files = StlSink.export(layers, &name, dir.path()).unwrap();

    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "EXIT_regular_bottom_black.stl",
            "EXIT_regular_top_yellow.stl",
            "EXIT_regular_combined_preview.stl",
        ]
    );

    for (path, triangles) in files.iter().zip(expected) {
        let mut file = File::open(path).unwrap();
        let mesh = stl_io::read_stl(&mut file).unwrap();
        assert_eq!(mesh.faces.len(), triangles, "{}", path.display());
        // binary STL: 80 byte header, count, 50 bytes per facet
        let len = std::fs::metadata(path).unwrap().len();
        assert_eq!(len, 84 + 50 * triangles as u64);
    }
}

#[test]
fn preview_file_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    let files = StlSink.export(layers(false), "exit", dir.path()).unwrap();
    assert_eq!(files.len(), 2);
}

#[test]
fn sink_creates_the_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("signs").join("today");
    let files = StlSink.export(layers(false), "exit", &nested).unwrap();
    assert!(files.iter().all(|f| f.starts_with(&nested) && f.exists()));
}

#[test]
fn empty_layers_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let base = Sketch::rectangle(10.0, 5.0).extrude(0.0, 1.0).unwrap();
    let layers = GeneratedLayers {
        base,
        top: Mesh::new(),
        combined_preview: None,
        stats: LayerStats {
            base_volume_mm3: 50.0,
            top_volume_mm3: 0.0,
            removed_area_mm2: 50.0,
            top_fragments: 0,
        },
    };
    let err = StlSink.export(layers, "empty", dir.path()).unwrap_err();
    assert!(matches!(err, ExportError::EmptyLayer { layer: "top" }), "{err}");
}

#[test]
fn ascii_output_lists_every_facet() {
    let mesh = Sketch::rectangle(4.0, 2.0).extrude(0.0, 1.0).unwrap();
    let text = mesh.to_stl_ascii("box");
    assert!(text.starts_with("solid box\n"));
    assert!(text.ends_with("endsolid box\n"));
    assert_eq!(text.matches("facet normal").count(), mesh.triangle_count());
}
