//! Synthetic document builder shared by the integration tests.

#![allow(dead_code)]

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

/// Builds a small PDF with sequentially numbered objects.
pub struct DocBuilder {
    body: Vec<u8>,
    next_id: u32,
}

impl DocBuilder {
    pub fn new() -> Self {
        Self {
            body: b"%PDF-1.4\n".to_vec(),
            next_id: 1,
        }
    }

    /// Add an object holding only a dictionary.
    pub fn object(mut self, dict: &str) -> Self {
        let id = self.take_id();
        self.body
            .extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", id, dict).as_bytes());
        self
    }

    /// Add an object with an uncompressed content stream.
    pub fn content(self, content: &[u8]) -> Self {
        self.stream("", content)
    }

    /// Add an object whose content stream is zlib compressed.
    pub fn compressed(self, content: &[u8]) -> Self {
        let data = deflate(content);
        self.stream("/Filter/FlateDecode", &data)
    }

    /// Add a stream object with arbitrary payload bytes.
    pub fn stream(mut self, filter: &str, data: &[u8]) -> Self {
        let id = self.take_id();
        self.body.extend_from_slice(
            format!("{} 0 obj\n<< /Length {}{} >>\nstream\n", id, data.len(), filter).as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\nendstream\nendobj\n");
        self
    }

    /// Leave an id unused.
    pub fn skip(mut self) -> Self {
        self.next_id += 1;
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("trailer\n<< /Size {} >>\n%%EOF\n", self.next_id).as_bytes());
        self.body
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

pub fn deflate(content: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content).unwrap();
    encoder.finish().unwrap()
}

/// The three-object document: catalog, compressed text, font.
pub fn hello_document() -> Vec<u8> {
    DocBuilder::new()
        .object("<< /Type /Catalog >>")
        .compressed(b"BT\n/F1 12 Tf\n(Hello) Tj\nET\n")
        .object("<< /Type /Font /BaseFont /Helvetica >>")
        .build()
}
