//! Integration tests for text extraction.

mod common;

use std::io::Write;

use common::{hello_document, DocBuilder};
use pdfscan::{
    extract_text, parse_bytes, parse_bytes_with_options, parse_file, Error, ObjectType,
    ParseOptions, Rect, StreamKind,
};

#[test]
fn test_compressed_object_text_and_font() {
    let data = hello_document();
    let doc = parse_bytes(&data).unwrap();

    assert_eq!(doc.declared_size, 4);
    assert_eq!(doc.objects.len(), 3);
    assert_eq!(doc.plain_text(), "Hello");

    let object = doc.object(2).unwrap();
    assert!(object.is_compressed());
    let font = object.font().unwrap();
    assert_eq!(font.name, "F1");
    assert_eq!(font.size, 12.0);

    assert_eq!(doc.object(1).unwrap().object_type, ObjectType::Catalog);
    assert_eq!(doc.object(3).unwrap().object_type, ObjectType::Font);
}

#[test]
fn test_extraction_is_repeatable() {
    let data = hello_document();
    let first = parse_bytes(&data).unwrap().plain_text();
    let second = parse_bytes(&data).unwrap().plain_text();
    assert_eq!(first, second);
}

#[test]
fn test_missing_ids_are_skipped() {
    let data = DocBuilder::new()
        .content(b"BT\n(One) Tj\nET\n")
        .skip()
        .skip()
        .compressed(b"BT\n(Four) Tj\nET\n")
        .build();
    let doc = parse_bytes(&data).unwrap();

    let ids: Vec<u32> = doc.objects.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 4]);
    assert_eq!(doc.plain_text(), "OneFour");
}

#[test]
fn test_string_encodings() {
    let data = DocBuilder::new()
        .compressed(b"BT\n/F1 10 Tf\n<48656C6C6F> Tj\n[(, ) -120 (wor) 15 (ld)] TJ\nET\n")
        .content(b"BT\n<CFF0E8E2E5F2> Tj\nET\n")
        .build();
    let doc = parse_bytes(&data).unwrap();

    assert_eq!(doc.object(1).unwrap().plain_text(), "Hello, world");
    assert_eq!(doc.object(2).unwrap().plain_text(), "Привет");
}

#[test]
fn test_custom_code_page() {
    let data = DocBuilder::new()
        .content(b"BT\n<F0D2C9D7C5D4> Tj\nET\n")
        .build();
    let options = ParseOptions::new().with_code_page(encoding_rs::KOI8_R);
    let doc = parse_bytes_with_options(&data, options).unwrap();

    assert_eq!(doc.plain_text(), "Привет");
}

#[test]
fn test_scopes_and_operator_order() {
    let data = DocBuilder::new()
        .compressed(b"BT\n[(b)] TJ\n(a) Tj\nET\nBT\n/F2 8 Tf\n(c) Tj (d) Tj\nET\n")
        .build();
    let doc = parse_bytes(&data).unwrap();
    let object = doc.object(1).unwrap();

    assert_eq!(object.text_blocks.len(), 2);
    assert_eq!(object.plain_text(), "abcd");
    assert_eq!(object.font().map(|f| f.name.as_str()), Some("F2"));
}

#[test]
fn test_pages_are_collected_separately() {
    let data = DocBuilder::new()
        .object("<< /Type /Pages /Kids [2 0 R] /Count 1 >>")
        .object("<< /Type /Page /Parent 1 0 R /MediaBox [0 0 595 842] /BleedBox [5 5 590 837] >>")
        .content(b"BT\n(Body) Tj\nET\n")
        .build();

    let doc = parse_bytes(&data).unwrap();
    assert_eq!(doc.page_count(), 1);
    assert_eq!(doc.objects.len(), 2);
    assert_eq!(doc.pages[0].id, 2);
    assert_eq!(doc.pages[0].media_box, Some(Rect::new(0.0, 0.0, 595.0, 842.0)));
    assert_eq!(doc.pages[0].bleed_box, Some(Rect::new(5.0, 5.0, 590.0, 837.0)));
    assert_eq!(doc.pages[0].size(), Some((595.0, 842.0)));

    let doc = parse_bytes_with_options(&data, ParseOptions::new().with_pages(false)).unwrap();
    assert_eq!(doc.page_count(), 0);
    assert_eq!(doc.plain_text(), "Body");
}

#[test]
fn test_filtered_stream_without_zlib_header() {
    let data = DocBuilder::new()
        .stream("/Filter/FlateDecode", b"BT\n(Raw) Tj\nET")
        .build();
    let doc = parse_bytes(&data).unwrap();

    assert_eq!(doc.objects[0].stream, StreamKind::Unsupported);
    assert_eq!(doc.plain_text(), "Raw");
}

#[test]
fn test_corrupt_stream_lenient_and_strict() {
    let data = DocBuilder::new()
        .stream("/Filter/FlateDecode", &[0x78, 0x9C, 0xFF, 0xFF, 0xFF, 0x00])
        .compressed(b"BT\n(Fine) Tj\nET\n")
        .build();

    let doc = parse_bytes(&data).unwrap();
    assert_eq!(doc.object(1).unwrap().stream, StreamKind::Corrupt);
    assert!(doc.object(1).unwrap().text_blocks.is_empty());
    assert_eq!(doc.plain_text(), "Fine");

    let strict = parse_bytes_with_options(&data, ParseOptions::new().strict());
    assert!(matches!(strict, Err(Error::Decode(_))));
}

#[test]
fn test_document_without_trailer() {
    let data = b"%PDF-1.4\n1 0 obj\nBT\n(Lost) Tj\nET\nendobj\n";
    let doc = parse_bytes(data).unwrap();
    assert_eq!(doc.declared_size, 0);
    assert!(doc.is_empty());
    assert_eq!(doc.plain_text(), "");
}

#[test]
fn test_oversized_length_falls_back_to_endstream() {
    let data = format!(
        "%PDF-1.4\n1 0 obj\n<< /Length {}/Filter/FlateDecode >>\nstream\nBT (Kept) Tj ET\nendstream\nendobj\ntrailer\n<< /Size 2 >>\n",
        usize::MAX
    )
    .into_bytes();

    let doc = parse_bytes_with_options(&data, ParseOptions::new().strict()).unwrap();
    assert_eq!(doc.objects.len(), 1);
    assert_eq!(doc.objects[0].stream, StreamKind::Unsupported);
    assert_eq!(doc.plain_text(), "Kept");
}

#[test]
fn test_absurd_declared_size() {
    let data = b"%PDF-1.4\ntrailer\n<< /Size 4000000000 >>\n";
    let doc = parse_bytes(data).unwrap();

    assert_eq!(doc.declared_size, 4_000_000_000);
    assert!(doc.is_empty());
}

#[test]
fn test_file_api() {
    let mut file = tempfile::Builder::new().suffix(".PDF").tempfile().unwrap();
    file.write_all(&hello_document()).unwrap();

    assert_eq!(extract_text(file.path()).unwrap(), "Hello");
    assert_eq!(parse_file(file.path()).unwrap().version.as_deref(), Some("1.4"));
}

#[test]
fn test_file_api_rejects_bad_paths() {
    let mut text_file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    text_file.write_all(&hello_document()).unwrap();

    assert!(matches!(
        extract_text(text_file.path()),
        Err(Error::UnsupportedExtension(_))
    ));

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        extract_text(dir.path().join("missing.pdf")),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_json_output() {
    let doc = parse_bytes(&hello_document()).unwrap();
    let json = pdfscan::render::to_json(&doc, pdfscan::JsonFormat::Compact).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["version"], "1.4");
    assert_eq!(value["objects"][1]["stream"], "Compressed");
    assert_eq!(value["objects"][1]["text_blocks"][0]["runs"][0], "Hello");
}
