use super::*;
use std::path::PathBuf;
use std::time::Duration;

use rustc_hash::FxHashMap;

struct Fixed(FxHashMap<PathBuf, SystemTime>);

impl Timestamps for Fixed {
    fn modified(&self, path: &Path) -> Option<SystemTime> {
        self.0.get(path).copied()
    }
}

fn at(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

#[test]
fn current_when_artifact_not_older() {
    let times = Fixed(
        [
            (PathBuf::from("old.cfh"), at(10)),
            (PathBuf::from("new.cfh"), at(30)),
            (PathBuf::from("out.h"), at(20)),
            (PathBuf::from("same.cfh"), at(20)),
        ]
        .into_iter()
        .collect(),
    );
    let out = Path::new("out.h");

    assert!(is_current(&times, Path::new("old.cfh"), out));
    assert!(is_current(&times, Path::new("same.cfh"), out));
    assert!(!is_current(&times, Path::new("new.cfh"), out));
    assert!(!is_current(&times, Path::new("old.cfh"), Path::new("missing.h")));
    assert!(is_current(&times, Path::new("gone.cfh"), out));
}

#[test]
fn fs_timestamps_reads_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Animal.cfh");
    assert_eq!(FsTimestamps.modified(&path), None);

    fs::write(&path, "parcel Animal;").unwrap();
    let past = SystemTime::now() - Duration::from_secs(3600);
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(past)
        .unwrap();
    let read = FsTimestamps.modified(&path).unwrap();
    let skew = read.duration_since(past).unwrap_or_else(|e| e.duration());
    assert!(skew < Duration::from_secs(2), "{skew:?}");
}
