use super::*;
use crate::ErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn new_derives_prefixes_from_nickname() {
    let parcel = Parcel::new("Animal", Some("Anml"), None, false).unwrap();
    assert_eq!(parcel.name(), "Animal");
    assert_eq!(parcel.nickname(), "Anml");
    assert_eq!(parcel.prefix(), "anml_");
    assert_eq!(parcel.camel_prefix(), "Anml_");
    assert_eq!(parcel.upper_prefix(), "ANML_");
    assert_eq!(parcel.privacy_sym(), "CFP_ANML");
    assert_eq!(parcel.version(), &Version::zero());
    assert_eq!(parcel.major_version(), &Version::zero());
    assert!(parcel.is_installed());
    assert!(!parcel.is_required());
}

#[test]
fn nickname_defaults_to_name() {
    let parcel = Parcel::new("Crustacean", None, None, false).unwrap();
    assert_eq!(parcel.nickname(), "Crustacean");
    assert_eq!(parcel.prefix(), "crustacean_");
}

#[test]
fn new_rejects_invalid_names() {
    for (name, nick) in [("", None), ("Foo_Bar", None), ("Foo9", None), ("Foo", Some("F o"))] {
        let err = Parcel::new(name, nick, None, false).unwrap_err();
        assert!(matches!(err, ModelError::InvalidName { .. }), "{name:?}/{nick:?}: {err}");
    }
}

#[test]
fn from_spec_reads_every_key() {
    let text = r#"
        {
            "name": "Animal",
            "nickname": "Anml",
            "version": "v0.1.0",
            "major_version": "v0.1",
            "installed": false,
            "prerequisites": {
                "Clownfish": "v0.5",
                "Util": null
            }
        }
    "#;
    let spec = FileSpec::new("src/Animal.cfp", false);
    let parcel = Parcel::from_spec(text, &spec).unwrap();

    assert_eq!(parcel.name(), "Animal");
    assert_eq!(parcel.nickname(), "Anml");
    assert_eq!(parcel.version().vstring(), "v0.1.0");
    assert_eq!(parcel.major_version().vstring(), "v0.1");
    assert!(!parcel.is_installed());
    assert_eq!(parcel.source(), Some(Path::new("src/Animal.cfp")));

    let prereqs: Vec<(&str, &str)> = parcel
        .prereqs()
        .iter()
        .map(|p| (p.name(), p.version().vstring()))
        .collect();
    assert_eq!(prereqs, vec![("Clownfish", "v0.5"), ("Util", "v0")]);
}

#[test]
fn included_parcels_are_never_installed() {
    let text = r#"{ "name": "Animal", "version": "v1", "installed": true }"#;
    let parcel = Parcel::from_spec(text, &FileSpec::new("inc/Animal.cfp", true)).unwrap();
    assert!(parcel.included());
    assert!(!parcel.is_installed());

    let parcel = Parcel::from_json(text, false).unwrap();
    assert!(!parcel.included());
    assert!(parcel.is_installed());
    assert_eq!(parcel.source(), None);
}

#[test]
fn from_json_rejects_bad_specs() {
    let cases = [
        ("", ErrorKind::Parse),
        ("[]", ErrorKind::Parse),
        (r#""Animal""#, ErrorKind::Parse),
        (r#"{ "version": "v1" }"#, ErrorKind::Parse),
        (r#"{ "name": "Animal" }"#, ErrorKind::Parse),
        (r#"{ "name": "Animal", "version": "v1", "color": "red" }"#, ErrorKind::Parse),
        (r#"{ "name": true, "version": "v1" }"#, ErrorKind::Parse),
        (r#"{ "name": "Animal", "version": "v1", "installed": "yes" }"#, ErrorKind::Parse),
        (r#"{ "name": "Animal", "version": "v1", "prerequisites": "Foo" }"#, ErrorKind::Parse),
        (r#"{ "name": "Animal", "version": "v1", "prerequisites": { "Foo": true } }"#, ErrorKind::Parse),
        (r#"{ "name": "Animal", "version": "1.0" }"#, ErrorKind::Parse),
        (r#"{ "name": "Ani mal", "version": "v1" }"#, ErrorKind::Parse),
        (r#"{ "name": "Animal", "version": "v1", "prerequisites": { "F_o": null } }"#, ErrorKind::Parse),
    ];
    for (text, kind) in cases {
        let err = Parcel::from_json(text, false).unwrap_err();
        assert_eq!(err.kind(), kind, "{text}: {err}");
    }
}

#[test]
fn error_messages_name_the_spec_file() {
    let spec = FileSpec::new("src/Animal.cfp", false);
    let err = Parcel::from_spec(r#"{ "name": "Animal" }"#, &spec).unwrap_err();
    assert_eq!(err.to_string(), "Missing required key 'version' (filepath 'src/Animal.cfp')");

    let err = Parcel::from_json(r#"{ "name": "Animal", "version": "v1", "x": null }"#, false)
        .unwrap_err();
    assert!(err.to_string().contains("[NULL]"), "{err}");
}

#[test]
fn value_errors_name_the_spec_file() {
    let spec = FileSpec::new("src/Animal.cfp", false);
    let cases = [
        (
            r#"{ "name": "Animal", "version": "1.0" }"#,
            "Invalid version string: '1.0' (filepath 'src/Animal.cfp')",
        ),
        (
            r#"{ "name": "Animal", "version": "v1", "major_version": "x" }"#,
            "Invalid version string: 'x' (filepath 'src/Animal.cfp')",
        ),
        (
            r#"{ "name": "Ani mal", "version": "v1" }"#,
            "Invalid parcel name: 'Ani mal' (filepath 'src/Animal.cfp')",
        ),
        (
            r#"{ "name": "Animal", "version": "v1", "prerequisites": { "Foo": "2" } }"#,
            "Invalid version string: '2' (filepath 'src/Animal.cfp')",
        ),
    ];
    for (text, message) in cases {
        let err = Parcel::from_spec(text, &spec).unwrap_err();
        assert_eq!(err.to_string(), message);
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}

#[test]
fn equals_compares_identity_fields() {
    let a = Parcel::new("Animal", Some("Anml"), Some(Version::parse("v1").unwrap()), false).unwrap();
    let b = Parcel::new("Animal", Some("Anml"), Some(Version::parse("v1.0").unwrap()), false)
        .unwrap()
        .with_installed(false);
    let c = Parcel::new("Animal", Some("Anml"), Some(Version::parse("v1").unwrap()), true).unwrap();
    let d = Parcel::new("Animal", None, Some(Version::parse("v1").unwrap()), false).unwrap();

    assert!(a.equals(&b));
    assert!(!a.equals(&c));
    assert!(!a.equals(&d));
}

#[test]
fn from_file_reads_spec() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Animal.cfp");
    fs::write(&path, r#"{ "name": "Animal", "nickname": "Anml", "version": "v0.1.0" }"#).unwrap();

    let parcel = Parcel::from_file(&FileSpec::new(&path, false)).unwrap();
    assert_eq!(parcel.prefix(), "anml_");
    assert_eq!(parcel.source(), Some(path.as_path()));
}

#[test]
fn from_file_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Parcel::from_file(&FileSpec::new(dir.path().join("Nope.cfp"), false)).unwrap_err();
    assert!(matches!(err, ModelError::Io { .. }), "{err}");
}
