use super::*;
use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn animal_source(root: &Path) -> PathBuf {
    let src = root.join("src");
    write(&src, "Animal.cfp", r#"{ "name": "Animal", "nickname": "Anml", "version": "v1" }"#);
    write(&src, "Animal.cfh", "parcel Animal;\nclass Animal {}\n");
    write(&src, "Animal/Dog.cfh", "parcel Animal;\nclass Animal::Dog inherits Animal {}\n");
    src
}

fn options(root: &Path) -> Options {
    Options {
        source_dirs: vec![animal_source(root)],
        dest: root.join("autogen"),
        ..Options::default()
    }
}

#[test]
fn reports_classes_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let report = run(&options(dir.path())).unwrap();

    assert_eq!(
        report.classes,
        vec![
            ClassInfo {
                name: "Animal".into(),
                parcel: "Animal".into(),
                full_struct_sym: "anml_Animal".into(),
                parent: None,
                included: false,
            },
            ClassInfo {
                name: "Animal::Dog".into(),
                parcel: "Animal".into(),
                full_struct_sym: "anml_Dog".into(),
                parent: Some("Animal".into()),
                included: false,
            },
        ]
    );
    // Nothing generated yet.
    assert_eq!(report.modified_files.len(), 2);
}

#[test]
fn fresh_headers_are_up_to_date() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = options(dir.path());
    let include = options.dest.join("include");
    write(&include, "Animal.h", "");
    write(&include, "Animal/Dog.h", "");

    let report = run(&options).unwrap();
    assert!(!report.any_modified());
    assert!(report.render(false).ends_with("Everything up to date\n"));

    options.force_modified = true;
    assert!(run(&options).unwrap().any_modified());
}

#[test]
fn render_listing() {
    let report = Report {
        classes: vec![
            ClassInfo {
                name: "Clownfish::Obj".into(),
                parcel: "Clownfish".into(),
                full_struct_sym: "cfish_Obj".into(),
                parent: None,
                included: true,
            },
            ClassInfo {
                name: "Animal".into(),
                parcel: "Animal".into(),
                full_struct_sym: "anml_Animal".into(),
                parent: Some("Clownfish::Obj".into()),
                included: false,
            },
        ],
        modified_files: vec![PathBuf::from("src/Animal.cfh")],
    };

    assert_eq!(
        report.render(false),
        "Classes (2):\n  Clownfish::Obj\n  Animal\nModified files (1):\n  src/Animal.cfh\n"
    );
    assert_eq!(
        report.render(true),
        "Classes (2):\n  \
         Clownfish::Obj [Clownfish] cfish_Obj (included)\n  \
         Animal [Animal] anml_Animal inherits Clownfish::Obj\n\
         Modified files (1):\n  src/Animal.cfh\n"
    );
}

#[test]
fn loads_host_data() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = options(dir.path());
    write(&options.source_dirs[0], "parcel_perl.json", "{ \"classes\": { \"Animal::Cat\": {} } }");

    options.host = Some("perl".into());
    let err = run(&options).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "Class 'Animal::Cat' in '{}' not found",
            options.source_dirs[0].join("parcel_perl.json").display()
        )
    );

    options.host = None;
    run(&options).unwrap();
}

#[test]
fn build_errors_surface() {
    let dir = tempfile::tempdir().unwrap();
    let options = Options {
        source_dirs: vec![dir.path().join("missing")],
        ..Options::default()
    };
    let err = run(&options).unwrap_err();
    assert!(matches!(err, CliError::Hierarchy(HierarchyError::Io { .. })), "{err}");
}
