//! Hash — xxHash-32 file digests.

use std::io::Read;
use std::path::Path;

use xxhash_rust::xxh32::Xxh32;

/// Compute the xxHash-32 digest of a file, returning 8-char lowercase hex.
///
/// The file is read in chunks; it is never loaded whole.
pub fn xxh32_file(path: impl AsRef<Path>) -> Result<String, std::io::Error> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Xxh32::new(0);
    let mut buf = [0u8; 64 * 1024];

    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }

    Ok(format!("{:08x}", hasher.digest()))
}
