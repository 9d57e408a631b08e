//! Integration tests for the local JSON loader
//!
//! Fixtures are written to a unique temporary bundle root per test.

use core_resources::{
    Loadable, LocalJsonLoader, Named, ResourceError, ResourceId, ResourceLocator,
};
use core_runtime::decode::{CodingKey, DecodeError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

struct Bundle {
    root: PathBuf,
}

impl Bundle {
    fn new() -> Self {
        let root =
            std::env::temp_dir().join(format!("core-resources-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    fn write(&self, relative: &str, contents: &str) {
        let path = self.root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    fn loader(&self) -> LocalJsonLoader {
        LocalJsonLoader::new(ResourceLocator::new(&self.root))
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

impl Drop for Bundle {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct Color {
    name: String,
    hex: String,
}

impl Named for Color {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Loadable for Color {
    const RESOURCE: &'static str = "colors";
    const FOLDER: Option<&'static str> = Some("palettes");
}

/// Wire shape of a font entry
#[derive(Debug, Deserialize)]
struct FontResponse {
    family: String,
    size_pt: u32,
}

#[derive(Debug, PartialEq)]
struct Font {
    label: String,
}

impl From<FontResponse> for Font {
    fn from(response: FontResponse) -> Self {
        Self {
            label: format!("{} {}pt", response.family, response.size_pt),
        }
    }
}

#[derive(Debug, PartialEq)]
struct Spacing(u32);

impl TryFrom<u32> for Spacing {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value % 4 == 0 {
            Ok(Spacing(value))
        } else {
            Err(format!("{} is not on the 4pt grid", value))
        }
    }
}

const COLORS: &str = r##"[
    {"name": "red", "hex": "#ff0000"},
    {"name": "green", "hex": "#00ff00"},
    {"name": "blue", "hex": "#0000ff"}
]"##;

#[test]
fn test_load_all_returns_items_in_file_order() {
    let bundle = Bundle::new();
    bundle.write("palettes/colors.json", COLORS);

    let colors: Vec<Color> = bundle
        .loader()
        .load_all(&ResourceId::in_folder("colors", "palettes"))
        .unwrap();

    let names: Vec<&str> = colors.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["red", "green", "blue"]);
}

#[test]
fn test_empty_array_is_empty_result() {
    let bundle = Bundle::new();
    bundle.write("empty.json", "[]");

    let colors: Vec<Color> = bundle.loader().load_all(&"empty".into()).unwrap();
    assert!(colors.is_empty());
}

#[test]
fn test_missing_resource_is_not_found() {
    let bundle = Bundle::new();

    let err = bundle
        .loader()
        .load_all::<Color>(&ResourceId::new("colors"))
        .unwrap_err();

    match err {
        ResourceError::NotFound { path } => assert_eq!(path, bundle.root().join("colors.json")),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_truncated_document_is_decode_error_with_path() {
    let bundle = Bundle::new();
    bundle.write("colors.json", r##"[{"name": "a", "hex": "#000"}, {"name":]"##);

    let err = bundle
        .loader()
        .load_all::<Color>(&ResourceId::new("colors"))
        .unwrap_err();

    let decode = err.decode_error().expect("decode error");
    assert!(matches!(decode, DecodeError::DataCorrupted { .. }), "{:?}", decode);
    assert!(!decode.path().is_empty());
}

#[test]
fn test_malformed_document_at_root_is_decode_error_with_path() {
    let bundle = Bundle::new();

    for body in ["not json", "{", "", r#"{"a": 1}"#] {
        bundle.write("colors.json", body);

        let err = bundle
            .loader()
            .load_all::<Color>(&ResourceId::new("colors"))
            .unwrap_err();

        let decode = err.decode_error().expect("decode error");
        assert!(!decode.path().is_empty(), "{:?}", decode);
        assert_eq!(decode.path().keys(), &[CodingKey::Root]);
    }
}

#[test]
fn test_type_mismatch_reports_path() {
    let bundle = Bundle::new();
    bundle.write(
        "colors.json",
        r##"[{"name": "red", "hex": "#f00"}, {"name": "blue", "hex": 255}]"##,
    );

    let err = bundle
        .loader()
        .load_all::<Color>(&ResourceId::new("colors"))
        .unwrap_err();

    match err {
        ResourceError::Decode { resource, source } => {
            assert_eq!(resource, "colors");
            assert!(matches!(source, DecodeError::TypeMismatch { .. }));
            assert_eq!(
                source.path().keys(),
                &[CodingKey::Index(1), CodingKey::Key("hex".to_string())]
            );
        }
        other => panic!("expected Decode, got {:?}", other),
    }
}

#[test]
fn test_load_all_mapped_converts_wire_items() {
    let bundle = Bundle::new();
    bundle.write(
        "fonts.json",
        r#"[{"family": "Inter", "size_pt": 12}, {"family": "Mono", "size_pt": 10}]"#,
    );

    let fonts: Vec<Font> = bundle
        .loader()
        .load_all_mapped::<FontResponse, Font>(&ResourceId::new("fonts"))
        .unwrap();

    assert_eq!(
        fonts,
        vec![
            Font { label: "Inter 12pt".to_string() },
            Font { label: "Mono 10pt".to_string() },
        ]
    );
}

#[test]
fn test_try_load_all_mapped_stops_at_first_failure() {
    let bundle = Bundle::new();
    bundle.write("spacing.json", "[4, 8, 10, 12, 13]");

    let err = bundle
        .loader()
        .try_load_all_mapped::<u32, Spacing>(&ResourceId::new("spacing"))
        .unwrap_err();

    match err {
        ResourceError::Conversion { index, message } => {
            assert_eq!(index, 2);
            assert!(message.contains("10"));
        }
        other => panic!("expected Conversion, got {:?}", other),
    }

    bundle.write("spacing.json", "[4, 8, 16]");
    let spacing: Vec<Spacing> = bundle
        .loader()
        .try_load_all_mapped::<u32, Spacing>(&ResourceId::new("spacing"))
        .unwrap();
    assert_eq!(spacing, vec![Spacing(4), Spacing(8), Spacing(16)]);
}

#[test]
fn test_load_envelope() {
    let bundle = Bundle::new();
    bundle.write(
        "themes/colors.json",
        &format!(r#"{{"version": "2", "content": {}}}"#, COLORS),
    );

    let envelope = bundle
        .loader()
        .load_envelope::<Color>(&ResourceId::in_folder("colors", "themes"))
        .unwrap();

    assert_eq!(envelope.version, "2");
    assert_eq!(envelope.len(), 3);
    assert_eq!(envelope.content[2].name, "blue");
}

#[test]
fn test_envelope_missing_content_is_key_not_found() {
    let bundle = Bundle::new();
    bundle.write("colors.json", r#"{"version": "1"}"#);

    let err = bundle
        .loader()
        .load_envelope::<Color>(&ResourceId::new("colors"))
        .unwrap_err();

    match err.decode_error() {
        Some(DecodeError::KeyNotFound { key, .. }) => assert_eq!(key, "content"),
        other => panic!("expected KeyNotFound, got {:?}", other),
    }
}

#[test]
fn test_loadable_uses_declared_resource() {
    let bundle = Bundle::new();
    bundle.write("palettes/colors.json", COLORS);

    let colors: Vec<Color> = bundle.loader().load().unwrap();
    assert_eq!(colors.len(), 3);
}

#[test]
fn test_find_named() {
    let bundle = Bundle::new();
    bundle.write("palettes/colors.json", COLORS);
    let loader = bundle.loader();

    let green: Color = loader.find_named(&Color::resource_id(), "green").unwrap();
    assert_eq!(green.hex, "#00ff00");

    let err = loader
        .find_named::<Color>(&Color::resource_id(), "purple")
        .unwrap_err();
    assert!(matches!(
        err,
        ResourceError::NameNotFound { ref name, ref resource }
            if name == "purple" && resource == "palettes/colors"
    ));
}
