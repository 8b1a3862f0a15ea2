//! C-ABI FFI bindings for cross-language integration.
//!
//! Strings cross the boundary as null-terminated UTF-8. Every
//! [`PdfscanResult`] must be released with [`pdfscan_free_result`].

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

use crate::render::{self, JsonFormat};
use crate::{parse_file_with_options, ParseOptions};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct PdfscanResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed).
    pub data: *mut c_char,
    /// Error message (null if succeeded).
    pub error: *mut c_char,
}

impl PdfscanResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

impl From<crate::Result<String>> for PdfscanResult {
    fn from(result: crate::Result<String>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

/// Borrow a C string argument as a path.
unsafe fn path_arg<'a>(ptr: *const c_char, name: &str) -> Result<&'a Path, PdfscanResult> {
    if ptr.is_null() {
        return Err(PdfscanResult::error(format!("{} cannot be null", name)));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(Path::new)
        .map_err(|_| PdfscanResult::error(format!("Invalid UTF-8 {}", name)))
}

/// Extract the plain text of a PDF file.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `pdfscan_free_result`.
#[no_mangle]
pub unsafe extern "C" fn pdfscan_extract_text(path: *const c_char) -> PdfscanResult {
    match path_arg(path, "path") {
        Ok(path) => crate::extract_text(path).into(),
        Err(result) => result,
    }
}

/// Convert a PDF file to JSON.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `pdfscan_free_result`.
#[no_mangle]
pub unsafe extern "C" fn pdfscan_to_json(path: *const c_char, pretty: bool) -> PdfscanResult {
    let path = match path_arg(path, "path") {
        Ok(path) => path,
        Err(result) => return result,
    };

    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    to_json_internal(path, format).into()
}

fn to_json_internal(path: &Path, format: JsonFormat) -> crate::Result<String> {
    let doc = parse_file_with_options(path, ParseOptions::new().lenient())?;
    render::to_json(&doc, format)
}

/// Redact a PDF file into `output`.
///
/// On success `data` holds the redaction report as JSON.
///
/// # Safety
///
/// Both `input` and `output` must be valid null-terminated UTF-8 strings.
/// The returned result must be freed with `pdfscan_free_result`.
#[no_mangle]
pub unsafe extern "C" fn pdfscan_redact_file(
    input: *const c_char,
    output: *const c_char,
) -> PdfscanResult {
    let input = match path_arg(input, "input") {
        Ok(path) => path,
        Err(result) => return result,
    };
    let output = match path_arg(output, "output") {
        Ok(path) => path,
        Err(result) => return result,
    };

    redact_file_internal(input, output).into()
}

fn redact_file_internal(input: &Path, output: &Path) -> crate::Result<String> {
    crate::detect::check_extension(input)?;
    let data = std::fs::read(input)?;
    let (redacted, report) = crate::redact_bytes(&data)?;
    std::fs::write(output, redacted)?;

    serde_json::to_string(&report)
        .map_err(|e| crate::Error::Render(format!("JSON serialization error: {}", e)))
}

/// Check if a file is a valid PDF.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
#[no_mangle]
pub unsafe extern "C" fn pdfscan_is_pdf(path: *const c_char) -> bool {
    match path_arg(path, "path") {
        Ok(path) => crate::detect::is_pdf(path),
        Err(result) => {
            pdfscan_free_result(result);
            false
        }
    }
}

/// Free a result returned by any pdfscan function.
///
/// # Safety
///
/// The `result` must have been returned by a pdfscan function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn pdfscan_free_result(result: PdfscanResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Get the version of the pdfscan library.
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn pdfscan_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
