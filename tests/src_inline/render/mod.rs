use super::*;

#[test]
fn test_image_format_from_extension() {
    assert_eq!(ImageFormat::from_path(Path::new("plot.png")).unwrap(), ImageFormat::Png);
    assert_eq!(ImageFormat::from_path(Path::new("out/plot.SVG")).unwrap(), ImageFormat::Svg);
}

#[test]
fn test_unsupported_format_rejected() {
    assert!(matches!(
        ImageFormat::from_path(Path::new("plot.pdf")),
        Err(RenderError::UnsupportedFormat(ext)) if ext == "pdf"
    ));
    assert!(ImageFormat::from_path(Path::new("plot")).is_err());
}
