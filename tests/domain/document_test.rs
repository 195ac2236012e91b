use docinsight::domain::{ContentType, UploadedDocument};

#[test]
fn given_pdf_filename_when_detecting_then_returns_pdf_content_type() {
    assert_eq!(
        ContentType::from_filename("report.pdf"),
        Some(ContentType::Pdf)
    );
}

#[test]
fn given_uppercase_jpeg_extension_when_detecting_then_returns_jpeg() {
    assert_eq!(
        ContentType::from_filename("PHOTO.JPEG"),
        Some(ContentType::Jpeg)
    );
    assert_eq!(ContentType::from_filename("scan.jpg"), Some(ContentType::Jpeg));
}

#[test]
fn given_png_filename_when_detecting_then_returns_png_mime() {
    let content_type = ContentType::from_filename("diagram.png").unwrap();
    assert_eq!(content_type.as_mime(), "image/png");
}

#[test]
fn given_unsupported_or_missing_extension_when_detecting_then_returns_none() {
    assert_eq!(ContentType::from_filename("notes.txt"), None);
    assert_eq!(ContentType::from_filename("README"), None);
    assert_eq!(ContentType::from_filename("archive.pdf.zip"), None);
}

#[test]
fn given_accepted_upload_when_building_document_then_keeps_name_and_size() {
    let document = UploadedDocument::from_upload("invoice.pdf".to_string(), vec![0u8; 42]).unwrap();

    assert_eq!(document.filename, "invoice.pdf");
    assert_eq!(document.content_type, ContentType::Pdf);
    assert_eq!(document.size_bytes(), 42);
}

#[test]
fn given_rejected_extension_when_building_document_then_returns_none() {
    assert!(UploadedDocument::from_upload("song.mp3".to_string(), vec![1, 2, 3]).is_none());
}
