//! Rewriting swapped dumps in canonical (`.z64`) order.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::byte_order::{FileByteOrder, SIGNATURE_LEN, read_fully, read_section};
use crate::error::Error;

/// Streaming buffer size. A multiple of every chunk size so no chunk is
/// split across two reads.
pub const CONVERT_BUFFER_LEN: usize = 64 * 1024;

const _: () = assert!(CONVERT_BUFFER_LEN % 4 == 0);

/// Copy `source` to `dest` in canonical order.
///
/// The source is rewound after detecting its byte order. Fails with
/// [`Error::AlreadyCanonical`] when there is nothing to do. Returns the
/// number of bytes written.
pub fn convert_stream<R, W>(source: &mut R, dest: &mut W) -> Result<u64, Error>
where
    R: Read + Seek + ?Sized,
    W: Write + ?Sized,
{
    let mut signature = [0u8; SIGNATURE_LEN];
    read_section(source, &mut signature, "signature")?;
    let byte_order = FileByteOrder::detect(signature)?;
    if byte_order.is_canonical() {
        return Err(Error::AlreadyCanonical);
    }
    source.seek(SeekFrom::Start(0))?;

    debug!(from = %byte_order, "converting to z64");
    let mut buf = vec![0u8; CONVERT_BUFFER_LEN];
    let mut written = 0u64;
    loop {
        let filled = read_fully(source, &mut buf)?;
        if filled == 0 {
            break;
        }
        let block = &mut buf[..filled];
        byte_order.normalize(block);
        dest.write_all(block)?;
        written += filled as u64;
        if filled < buf.len() {
            break;
        }
    }
    dest.flush()?;
    Ok(written)
}

/// Convert the file at `source` into a new canonical file at `dest`.
///
/// `dest` is created or truncated; callers decide whether overwriting is
/// acceptable.
pub fn convert_file(source: &Path, dest: &Path) -> Result<u64, Error> {
    let mut input = File::open(source)?;

    // An already-canonical source must not leave an empty destination behind.
    let mut signature = [0u8; SIGNATURE_LEN];
    read_section(&mut input, &mut signature, "signature")?;
    if FileByteOrder::detect(signature)?.is_canonical() {
        return Err(Error::AlreadyCanonical);
    }
    input.seek(SeekFrom::Start(0))?;

    let written = write_converted(&mut input, dest)?;
    info!(
        "converted {} -> {} ({written} bytes)",
        source.display(),
        dest.display()
    );
    Ok(written)
}

/// Create `dest` and stream the converted bytes into it, removing the
/// partial file again when the conversion fails.
fn write_converted<R>(input: &mut R, dest: &Path) -> Result<u64, Error>
where
    R: Read + Seek + ?Sized,
{
    let result = convert_stream(input, &mut BufWriter::new(File::create(dest)?));
    if result.is_err() {
        if let Err(err) = fs::remove_file(dest) {
            warn!("could not remove partial output {}: {err}", dest.display());
        }
    }
    result
}
