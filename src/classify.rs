/*!
 * Text/binary classification of files
 */

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes sampled when classifying a file
pub const SAMPLE_SIZE: u64 = 1024;

/// Check whether a file looks like text.
///
/// Reads at most the first [`SAMPLE_SIZE`] bytes and reports text unless one of
/// them is a null byte. A file that cannot be opened or read is reported as
/// not text.
pub fn is_text(path: &Path) -> bool {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    let mut sample = Vec::with_capacity(SAMPLE_SIZE as usize);
    match file.take(SAMPLE_SIZE).read_to_end(&mut sample) {
        Ok(_) => !sample.contains(&0),
        Err(_) => false,
    }
}
