use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::{AppError, GeneratedBundle};

const FILE_MODE: u32 = 0o644;
const EXECUTABLE_MODE: u32 = 0o755;

/// Encode every file of the bundle into an in-memory zip archive.
pub fn encode(bundle: &GeneratedBundle) -> Result<Vec<u8>, AppError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for file in &bundle.files {
        let mode = if file.executable { EXECUTABLE_MODE } else { FILE_MODE };
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(mode);
        writer.start_file(file.path.as_str(), options)?;
        writer.write_all(file.content.as_bytes())?;
    }

    Ok(writer.finish()?.into_inner())
}
