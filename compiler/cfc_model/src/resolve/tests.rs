use super::*;
use crate::{ErrorKind, Parcel, Prereq, Version};
use pretty_assertions::assert_eq;

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

fn parcel(name: &str, version: &str, prereqs: &[(&str, &str)]) -> Parcel {
    let prereqs = prereqs
        .iter()
        .map(|&(name, version)| Prereq::new(name, Some(v(version))).unwrap())
        .collect();
    Parcel::new(name, None, Some(v(version)), false)
        .unwrap()
        .with_prereqs(prereqs)
}

#[test]
fn satisfied_prereqs_mark_closure_required() {
    let mut ctx = ModelContext::new();
    let cfish = ctx.register(parcel("Clownfish", "v0.5.0", &[])).unwrap();
    let util = ctx
        .register(parcel("Util", "v1.0", &[("Clownfish", "v0.5")]))
        .unwrap();
    let unrelated = ctx.register(parcel("Unrelated", "v1", &[])).unwrap();
    let animal = ctx
        .register(parcel("Animal", "v0.1", &[("Util", "v1"), ("Clownfish", "v0.4")]))
        .unwrap();

    ctx.check_prereqs(animal).unwrap();

    assert!(ctx.parcel(animal).is_required());
    assert!(ctx.parcel(util).is_required());
    assert!(ctx.parcel(cfish).is_required());
    assert!(!ctx.parcel(unrelated).is_required());

    // A second run is a no-op.
    ctx.check_prereqs(animal).unwrap();
}

#[test]
fn required_version_must_not_exceed_found() {
    for (found, ok) in [("v1.9", false), ("v2.0", true), ("v2.1", true), ("v2", true)] {
        let mut ctx = ModelContext::new();
        ctx.register(parcel("Foo", found, &[])).unwrap();
        let bar = ctx.register(parcel("Bar", "v1", &[("Foo", "v2.0")])).unwrap();

        let result = ctx.check_prereqs(bar);
        assert_eq!(result.is_ok(), ok, "Foo {found}");
        if let Err(err) = result {
            assert_eq!(err.kind(), ErrorKind::VersionIncompatible);
            assert_eq!(
                err.to_string(),
                format!(
                    "Version {found} of parcel 'Foo' required by 'Bar' is lower than \
                     required version v2.0"
                )
            );
        }
    }
}

#[test]
fn major_version_above_requirement_fails() {
    let mut ctx = ModelContext::new();
    ctx.register(parcel("Foo", "v3.2", &[]).with_major_version(v("v3")))
        .unwrap();
    let old = ctx.register(parcel("Old", "v1", &[("Foo", "v2.5")])).unwrap();
    let new = ctx.register(parcel("New", "v1", &[("Foo", "v3.1")])).unwrap();

    let err = ctx.check_prereqs(old).unwrap_err();
    assert!(matches!(err, ModelError::MajorVersionTooHigh { .. }), "{err}");
    ctx.check_prereqs(new).unwrap();
}

#[test]
fn any_version_prereq_ignores_major_version() {
    let mut ctx = ModelContext::new();
    ctx.register(parcel("Foo", "v2.0", &[]).with_major_version(v("v2")))
        .unwrap();
    let bar = ctx.register(
        Parcel::new("Bar", None, Some(v("v1")), false)
            .unwrap()
            .with_prereqs(vec![Prereq::new("Foo", None).unwrap()]),
    )
    .unwrap();

    ctx.check_prereqs(bar).unwrap();
    assert!(ctx.parcel(bar).is_required());
}

#[test]
fn explicit_v0_prereq_still_checks_major_version() {
    let mut ctx = ModelContext::new();
    ctx.register(parcel("Foo", "v2.0", &[]).with_major_version(v("v2")))
        .unwrap();
    let bar = ctx.register(parcel("Bar", "v1", &[("Foo", "v0")])).unwrap();

    let err = ctx.check_prereqs(bar).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Major version v2 of parcel 'Foo' required by 'Bar' is higher than required version v0"
    );
}

#[test]
fn missing_prereq_is_unresolved() {
    let mut ctx = ModelContext::new();
    let animal = ctx.register(parcel("Animal", "v1", &[("Ghost", "v0")])).unwrap();

    let err = ctx.check_prereqs(animal).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnresolvedReference);
    assert_eq!(
        err.to_string(),
        "Parcel 'Ghost' required by 'Animal' not found"
    );
    assert!(!ctx.parcel(animal).is_required());
}

#[test]
fn prereq_cycle_is_reported() {
    let mut ctx = ModelContext::new();
    let a = ctx.register(parcel("Alpha", "v1", &[("Beta", "v1")])).unwrap();
    ctx.register(parcel("Beta", "v1", &[("Gamma", "v1")])).unwrap();
    ctx.register(parcel("Gamma", "v1", &[("Beta", "v1")])).unwrap();

    let err = ctx.check_prereqs(a).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CyclicDependency);
    assert_eq!(err.to_string(), "Prerequisite cycle: Beta -> Gamma -> Beta");
}

#[test]
fn self_prereq_is_a_cycle() {
    let mut ctx = ModelContext::new();
    let a = ctx.register(parcel("Alpha", "v1", &[("Alpha", "v1")])).unwrap();
    let err = ctx.check_prereqs(a).unwrap_err();
    assert_eq!(err.to_string(), "Prerequisite cycle: Alpha -> Alpha");
}

#[test]
fn diamond_is_not_a_cycle() {
    let mut ctx = ModelContext::new();
    ctx.register(parcel("Base", "v1", &[])).unwrap();
    ctx.register(parcel("Left", "v1", &[("Base", "v1")])).unwrap();
    ctx.register(parcel("Right", "v1", &[("Base", "v1")])).unwrap();
    let top = ctx
        .register(parcel("Top", "v1", &[("Left", "v1"), ("Right", "v1")]))
        .unwrap();
    ctx.check_prereqs(top).unwrap();
}
