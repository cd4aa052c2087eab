use std::io::Cursor;

use super::*;

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn extension_check_is_case_insensitive() {
    assert!(extension_allowed(Path::new("a/B.JPG")));
    assert!(extension_allowed(Path::new("shot.Tif")));
    assert!(extension_allowed(Path::new("sensor.raw")));
    assert!(!extension_allowed(Path::new("notes.txt")));
    assert!(!extension_allowed(Path::new("no_extension")));
    assert!(!extension_allowed(Path::new("clip.webp")));
}

#[test]
fn scan_accepts_extension_or_sniffed_mime() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::write(root.join("a.png"), png_bytes()).unwrap();
    std::fs::write(root.join("b.txt"), b"plain text").unwrap();
    // Wrong extension, real PNG content: qualifies through the MIME pass.
    std::fs::write(root.join("c.dat"), png_bytes()).unwrap();
    std::fs::create_dir(root.join("nested")).unwrap();
    std::fs::write(root.join("nested").join("d.JPEG"), b"not really a jpeg").unwrap();

    let found = scan_folder(root).unwrap();
    let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["a.png", "c.dat", "d.JPEG"]);

    let sniffed = found.iter().find(|c| c.name == "c.dat").unwrap();
    assert_eq!(sniffed.mime, Some("image/png"));
    assert_eq!(found[0].mime, None);
}

#[test]
fn empty_selection_keeps_previous_candidates() {
    let good = tempfile::tempdir().unwrap();
    std::fs::write(good.path().join("one.gif"), b"GIF89a").unwrap();
    let bad = tempfile::tempdir().unwrap();
    std::fs::write(bad.path().join("readme.md"), b"# hi").unwrap();

    let mut picker = FilePicker::new();
    assert_eq!(picker.select_folder(good.path()).unwrap(), 1);

    let err = picker.select_folder(bad.path()).unwrap_err();
    assert!(matches!(err, WrapError::NoValidImages));
    assert_eq!(picker.candidates().len(), 1);
    assert_eq!(picker.get(0).unwrap().name, "one.gif");
}

#[test]
fn new_selection_replaces_candidates() {
    let first = tempfile::tempdir().unwrap();
    std::fs::write(first.path().join("x.png"), png_bytes()).unwrap();
    let second = tempfile::tempdir().unwrap();
    std::fs::write(second.path().join("y.bmp"), b"BM").unwrap();
    std::fs::write(second.path().join("z.jpg"), b"").unwrap();

    let mut picker = FilePicker::new();
    picker.select_folder(first.path()).unwrap();
    picker.select_folder(second.path()).unwrap();
    let names: Vec<_> = picker.candidates().iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, ["y.bmp", "z.jpg"]);
}

#[test]
fn scanning_a_file_is_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("f.png");
    std::fs::write(&file, png_bytes()).unwrap();
    assert!(matches!(scan_folder(&file), Err(WrapError::Validation(_))));
}

#[test]
fn candidate_descriptor_is_custom_file() {
    let c = LocalImageCandidate {
        path: PathBuf::from("/pics/a.png"),
        name: "a.png".into(),
        mime: None,
    };
    assert_eq!(c.descriptor(), ImageDescriptor::file("/pics/a.png"));
}
