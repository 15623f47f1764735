use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn is_audio_file_matches_configured_extensions_case_insensitive() {
    let settings = LibrarySettings::default();
    assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.m4a"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.WMA"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.aac"), &settings));
    assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
    assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
}

#[test]
fn container_kind_follows_extension() {
    assert_eq!(ContainerKind::from_path(Path::new("a.MP3")), ContainerKind::Mp3);
    assert_eq!(ContainerKind::from_path(Path::new("a.m4a")), ContainerKind::Mp4);
    assert_eq!(ContainerKind::from_path(Path::new("a.mp4")), ContainerKind::Mp4);
    assert_eq!(ContainerKind::from_path(Path::new("a.flac")), ContainerKind::Flac);
    assert_eq!(ContainerKind::from_path(Path::new("a.ogg")), ContainerKind::Ogg);
    assert_eq!(ContainerKind::from_path(Path::new("a.opus")), ContainerKind::Generic);
    assert_eq!(ContainerKind::from_path(Path::new("noext")), ContainerKind::Generic);
    assert_eq!(ContainerKind::from_extension(".WAV"), ContainerKind::Wav);
}

#[test]
fn scan_recurses_filters_and_sorts() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();

    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("a.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();
    fs::write(sub.join("d.flac"), b"not a real flac").unwrap();

    let settings = LibrarySettings::default();
    let files = scan(dir.path(), &settings, None);
    let names: Vec<&str> = files.iter().filter_map(|f| f.file_name()).collect();
    assert_eq!(names, vec!["a.ogg", "b.MP3", "d.flac"]);
    assert_eq!(files[2].kind, ContainerKind::Flac);
}

#[test]
fn scan_respects_include_hidden_false() {
    let dir = tempdir().unwrap();
    let hidden_dir = dir.path().join(".cache");
    fs::create_dir_all(&hidden_dir).unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(hidden_dir.join("inside.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        include_hidden: false,
        ..LibrarySettings::default()
    };
    let files = scan(dir.path(), &settings, None);

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name(), Some("visible.mp3"));
}

#[test]
fn scan_respects_max_depth() {
    let dir = tempdir().unwrap();
    let d1 = dir.path().join("d1");
    let d2 = d1.join("d2");
    fs::create_dir_all(&d2).unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    fs::write(d1.join("one.mp3"), b"not real").unwrap();
    fs::write(d2.join("two.mp3"), b"not real").unwrap();

    // WalkDir depth counts root as 0, children as 1, grandchildren as 2...
    let settings = LibrarySettings {
        max_depth: Some(2),
        ..LibrarySettings::default()
    };
    let files = scan(dir.path(), &settings, None);

    let names: Vec<&str> = files.iter().filter_map(|f| f.file_name()).collect();
    assert!(names.contains(&"root.mp3"));
    assert!(names.contains(&"one.mp3"));
    assert!(!names.contains(&"two.mp3"));
}

#[test]
fn scan_prunes_excluded_subtree() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    fs::create_dir_all(out.join("1999")).unwrap();
    fs::write(dir.path().join("keep.mp3"), b"not real").unwrap();
    fs::write(out.join("1999").join("copied.mp3"), b"not real").unwrap();

    let settings = LibrarySettings::default();
    let files = scan(dir.path(), &settings, Some(&out));
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name(), Some("keep.mp3"));
}

#[test]
fn configured_extensions_are_normalized_once_for_the_walk() {
    let settings = LibrarySettings {
        extensions: vec![" .MP3 ".to_string(), "Flac".to_string(), " . ".to_string()],
        ..LibrarySettings::default()
    };
    assert_eq!(
        super::scan::normalized_extensions(&settings),
        vec!["mp3".to_string(), "flac".to_string()]
    );

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("b.FLAC"), b"not real").unwrap();
    fs::write(dir.path().join("c.ogg"), b"not real").unwrap();

    let files = scan(dir.path(), &settings, None);
    let names: Vec<&str> = files.iter().filter_map(|f| f.file_name()).collect();
    assert_eq!(names, vec!["a.mp3", "b.FLAC"]);
}
