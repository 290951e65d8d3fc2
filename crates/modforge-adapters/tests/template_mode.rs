//! Template mode over the in-memory filesystem with a fake cloner.

mod common;

use std::path::Path;

use common::{FakeCloner, installer, settings};
use modforge_adapters::{MemoryFilesystem, builtin};
use modforge_core::{
    application::{TemplateSource, ports::Filesystem},
    domain::{GenerationStage, Settings, manifest},
    error::ErrorCategory,
};

const EVRONE: &str = "github.com/evrone/go-clean-template";

fn evrone_files() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        (
            "go.mod",
            b"module github.com/evrone/go-clean-template\n\ngo 1.19\n\nrequire github.com/gin-gonic/gin v1.9.0\n".to_vec(),
        ),
        (
            "cmd/app/main.go",
            b"package main\n\nimport \"github.com/evrone/go-clean-template/internal/app\"\n".to_vec(),
        ),
        (
            "internal/app/app.go",
            b"package app\n\n// see github.com/evrone/go-clean-template/docs\n".to_vec(),
        ),
        (".github/workflows/ci.yml", b"name: ci\n".to_vec()),
        (".git/HEAD", b"ref: refs/heads/master\n".to_vec()),
        ("docs/logo.png", vec![0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]),
    ]
}

#[test]
fn registered_template_gets_new_identity() {
    let fs = MemoryFilesystem::new();
    let cloner = FakeCloner::new(&fs, evrone_files());

    let report = installer(&fs, cloner)
        .install(
            &settings("/tmpl", &[]),
            &TemplateSource::Registered(EVRONE.into()),
        )
        .unwrap();
    assert_eq!(report.stage, GenerationStage::Done);

    let manifest = fs.contents("/tmpl/go.mod").unwrap();
    assert_eq!(manifest.lines().next(), Some("module example.com/foo"));
    assert!(manifest.contains("\ngo 1.22\n"));

    for path in fs.list_files() {
        if let Some(text) = fs.contents(&path) {
            assert!(!text.contains(EVRONE), "{} still mentions template", path.display());
        }
    }

    assert!(!fs.exists(Path::new("/tmpl/.git")));
    assert!(!fs.exists(Path::new("/tmpl/.github")));
    assert!(fs.exists(Path::new("/tmpl/docs/logo.png")));
}

#[test]
fn unknown_registered_template_is_template_error() {
    let fs = MemoryFilesystem::new();
    let cloner = FakeCloner::new(&fs, evrone_files());

    let err = installer(&fs, cloner)
        .install(
            &settings("/tmpl", &[]),
            &TemplateSource::Registered("github.com/nobody/nothing".into()),
        )
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Template);
    assert!(fs.list_files().is_empty());
}

#[test]
fn custom_url_is_normalized_into_import_path() {
    let fs = MemoryFilesystem::new();
    let files = vec![
        ("go.mod", b"module gitlab.com/acme/base\n\ngo 1.20\n".to_vec()),
        ("main.go", b"import \"gitlab.com/acme/base/pkg\"\n".to_vec()),
    ];
    let cloner = FakeCloner::new(&fs, files);

    installer(&fs, cloner)
        .install(
            &settings("/custom", &[]),
            &TemplateSource::Custom("https://gitlab.com/acme/base.git".into()),
        )
        .unwrap();

    assert_eq!(
        fs.contents("/custom/main.go").unwrap(),
        "import \"example.com/foo/pkg\"\n"
    );
}

#[test]
fn module_extending_template_path_is_written_once() {
    let fs = MemoryFilesystem::new();
    let cloner = FakeCloner::new(&fs, evrone_files());
    let fork = format!("{EVRONE}-fork");
    let settings = Settings::builder()
        .module(fork.as_str())
        .go_version("1.22")
        .path("/fork")
        .build(&builtin::registry())
        .unwrap();

    installer(&fs, cloner)
        .install(&settings, &TemplateSource::Registered(EVRONE.into()))
        .unwrap();

    let manifest = fs.contents("/fork/go.mod").unwrap();
    assert_eq!(manifest::declared_module(&manifest), Some(fork.as_str()));
    assert!(!manifest.contains("-fork-fork"));
    assert_eq!(
        fs.contents("/fork/cmd/app/main.go").unwrap(),
        format!("package main\n\nimport \"{fork}/internal/app\"\n")
    );
}

#[test]
fn imports_follow_the_module_declared_by_the_clone() {
    let fs = MemoryFilesystem::new();
    let files = vec![
        ("go.mod", b"module github.com/acme/base/v2\n\ngo 1.20\n".to_vec()),
        ("main.go", b"import \"github.com/acme/base/v2/pkg\"\n".to_vec()),
    ];
    let cloner = FakeCloner::new(&fs, files);

    installer(&fs, cloner)
        .install(
            &settings("/v2", &[]),
            &TemplateSource::Custom("https://github.com/acme/base".into()),
        )
        .unwrap();

    assert_eq!(
        manifest::declared_module(&fs.contents("/v2/go.mod").unwrap()),
        Some("example.com/foo")
    );
    assert_eq!(
        fs.contents("/v2/main.go").unwrap(),
        "import \"example.com/foo/pkg\"\n"
    );
}

#[test]
fn malformed_custom_url_is_validation_error() {
    let fs = MemoryFilesystem::new();
    let cloner = FakeCloner::new(&fs, Vec::new());

    let err = installer(&fs, cloner)
        .install(
            &settings("/custom", &[]),
            &TemplateSource::Custom("https://".into()),
        )
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Validation);
}

#[test]
fn clone_failure_clears_target() {
    let fs = MemoryFilesystem::new();
    fs.create_dir_all(Path::new("/keep")).unwrap();
    let mut cloner = FakeCloner::new(&fs, evrone_files());
    cloner.fail = true;

    let err = installer(&fs, cloner)
        .install(
            &settings("/keep", &[]),
            &TemplateSource::Registered(EVRONE.into()),
        )
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Template);
    assert!(fs.is_dir(Path::new("/keep")));
    assert!(fs.is_empty_or_absent(Path::new("/keep")).unwrap());
}

#[test]
fn template_without_manifest_fails_and_cleans_up() {
    let fs = MemoryFilesystem::new();
    let cloner = FakeCloner::new(&fs, vec![("README.md", b"hello".to_vec())]);

    let err = installer(&fs, cloner)
        .install(
            &settings("/nomod", &[]),
            &TemplateSource::Registered(EVRONE.into()),
        )
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Template);
    assert!(!fs.exists(Path::new("/nomod")));
}
