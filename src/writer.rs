/*!
 * Output writer for RepoDump
 */

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::ExtractionResult;

/// File name of the concatenated dump
pub const CODE_FILE: &str = "code.txt";

/// File name of the JSON metadata document
pub const METADATA_FILE: &str = "metadata.json";

/// Paths of the files produced by a write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutput {
    /// Dump text file
    pub code: PathBuf,
    /// Metadata JSON file
    pub metadata: PathBuf,
}

/// Writes extraction results into an output folder
pub struct OutputWriter {
    /// Folder receiving the output files
    dir: PathBuf,
}

impl OutputWriter {
    /// Create a new writer targeting `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `code.txt` and `metadata.json`, creating the folder if needed
    pub fn write(&self, result: &ExtractionResult) -> Result<WrittenOutput> {
        fs::create_dir_all(&self.dir)?;

        let code = self.dir.join(CODE_FILE);
        write_file(&code, &result.dump_text)?;

        let metadata = self.dir.join(METADATA_FILE);
        write_file(&metadata, &result.metadata_json()?)?;

        Ok(WrittenOutput { code, metadata })
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    Ok(())
}
