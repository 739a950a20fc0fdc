use super::*;

#[test]
fn data_uri_is_decoded_inline() {
    let src = ImageSource::parse("data:image/png;base64,aGVsbG8=").unwrap();
    assert_eq!(
        src,
        ImageSource::Inline {
            media_type: "image/png".to_string(),
            bytes: b"hello".to_vec(),
        }
    );
    assert_eq!(src.read_bytes(None).unwrap(), b"hello");
}

#[test]
fn data_uri_tolerates_line_breaks() {
    let src = ImageSource::parse("data:image/jpeg;base64,aGVs\nbG8=").unwrap();
    assert_eq!(src.read_bytes(None).unwrap(), b"hello");
}

#[test]
fn non_base64_data_uri_is_rejected() {
    let err = ImageSource::parse("data:text/plain,hello").unwrap_err();
    assert!(matches!(err, LikenessError::ImageUnavailable(_)));
    assert!(ImageSource::parse("data:image/png;base64").is_err());
    assert!(ImageSource::parse("data:image/png;base64,@@@").is_err());
}

#[test]
fn remote_urls_are_unsupported() {
    for url in ["http://example.com/a.jpg", "HTTPS://example.com/a.jpg"] {
        let err = ImageSource::parse(url).unwrap_err();
        assert!(matches!(err, LikenessError::ImageUnavailable(_)));
    }
}

#[test]
fn plain_and_file_paths() {
    assert_eq!(
        ImageSource::parse("photos/kid.jpg").unwrap(),
        ImageSource::Path(PathBuf::from("photos/kid.jpg"))
    );
    assert_eq!(
        ImageSource::parse("file:///tmp/kid.jpg").unwrap(),
        ImageSource::Path(PathBuf::from("/tmp/kid.jpg"))
    );
    assert!(ImageSource::parse("   ").is_err());
}

#[test]
fn missing_file_is_image_unavailable() {
    let src = ImageSource::Path(PathBuf::from("definitely/not/here.png"));
    let err = src.load(None).unwrap_err();
    assert!(matches!(err, LikenessError::ImageUnavailable(_)));
}

#[test]
fn relative_paths_resolve_against_base_dir() {
    let dir = std::env::temp_dir().join(format!("likeness-source-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("bytes.bin"), b"abc").unwrap();
    let src = ImageSource::parse("bytes.bin").unwrap();
    assert_eq!(src.read_bytes(Some(&dir)).unwrap(), b"abc");
    let _ = std::fs::remove_dir_all(&dir);
}
