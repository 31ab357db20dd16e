//! Binary container for a saved index.
//!
//! ```text
//! |PAYLOAD|METADATA|META_OFFSET(2B)|
//!
//! PAYLOAD  = block*            block = varint(term len) | term bytes | posting codec bytes
//! METADATA = u16le*            start offset of every block but the first
//! trailer  = u16le             payload length, i.e. where METADATA begins
//! ```
//!
//! All offsets are 16 bits wide, which caps the payload at 65535 bytes. A save
//! that would exceed this fails; lifting the cap means a new layout with wider
//! fields, not a silent change to this one.

use std::io::Write;
use std::path::Path;

use ahash::AHashMap;
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use log::{debug, info, warn};
use tempfile::NamedTempFile;

use crate::codec;
use crate::error::{IndexError, Result};
use crate::index::config::IndexConfig;
use crate::index::store::InvertedIndex;
use crate::posting::{DocId, PostingList};
use crate::util::varint::{decode_u64, encode_u64_into};

/// Width of every offset field, including the trailer.
pub const OFFSET_WIDTH: usize = 2;

/// Largest payload the 16-bit offsets can address.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Serialize the term dictionary of `index`.
///
/// Blocks are written in term order, so equal indexes produce equal bytes.
/// Fails with [`IndexError::InvalidInput`] if the payload outgrows
/// [`MAX_PAYLOAD_LEN`].
pub fn to_bytes(index: &InvertedIndex) -> Result<Vec<u8>> {
    let entries = index.sorted_entries();
    let mut buf = Vec::with_capacity(index.config().write_buffer_size);
    let mut offsets = Vec::with_capacity(entries.len());

    for (term, list) in entries {
        offsets.push(payload_offset(buf.len())?);
        encode_u64_into(term.len() as u64, &mut buf);
        buf.extend_from_slice(term.as_bytes());
        codec::encode_into(list.as_slice(), &mut buf)?;
    }

    let meta_offset = payload_offset(buf.len())?;
    buf.reserve((offsets.len() + 1) * OFFSET_WIDTH);
    for &offset in offsets.iter().skip(1) {
        buf.write_u16::<LittleEndian>(offset)?;
    }
    buf.write_u16::<LittleEndian>(meta_offset)?;

    Ok(buf)
}

fn payload_offset(len: usize) -> Result<u16> {
    u16::try_from(len).map_err(|_| {
        IndexError::invalid_input(format!(
            "index payload of {len} bytes exceeds the {MAX_PAYLOAD_LEN}-byte limit of the file format"
        ))
    })
}

/// Rebuild an index from bytes produced by [`to_bytes`].
///
/// `universe` becomes the document universe of the result; it is not stored
/// in the bytes. Every malformed layout is reported as
/// [`IndexError::CorruptFormat`].
pub fn from_bytes<U>(bytes: &[u8], universe: U, config: IndexConfig) -> Result<InvertedIndex>
where
    U: IntoIterator<Item = DocId>,
{
    if bytes.len() < OFFSET_WIDTH {
        return Err(IndexError::corrupt(format!(
            "{} bytes is too short to hold the trailer",
            bytes.len()
        )));
    }

    let trailer_pos = bytes.len() - OFFSET_WIDTH;
    let meta_offset = LittleEndian::read_u16(&bytes[trailer_pos..]) as usize;
    if meta_offset > trailer_pos {
        return Err(IndexError::corrupt(format!(
            "metadata offset {meta_offset} lies beyond the trailer at {trailer_pos}"
        )));
    }

    let payload = &bytes[..meta_offset];
    let meta = &bytes[meta_offset..trailer_pos];
    if meta.len() % OFFSET_WIDTH != 0 {
        return Err(IndexError::corrupt(format!(
            "metadata region of {} bytes is not a multiple of {OFFSET_WIDTH}",
            meta.len()
        )));
    }

    let mut terms = AHashMap::new();
    if payload.is_empty() {
        if !meta.is_empty() {
            return Err(IndexError::corrupt("block offsets present with an empty payload"));
        }
    } else {
        let mut boundaries = Vec::with_capacity(meta.len() / OFFSET_WIDTH + 2);
        boundaries.push(0);
        boundaries.extend(
            meta.chunks_exact(OFFSET_WIDTH)
                .map(|chunk| LittleEndian::read_u16(chunk) as usize),
        );
        boundaries.push(meta_offset);

        terms.reserve(boundaries.len() - 1);
        for (block, pair) in boundaries.windows(2).enumerate() {
            let (start, end) = (pair[0], pair[1]);
            if end > meta_offset || start >= end {
                return Err(IndexError::corrupt(format!(
                    "block {block} spans {start}..{end}, outside the {meta_offset}-byte payload or empty"
                )));
            }

            let (term, list) = decode_block(&payload[start..end], start)?;
            if terms.insert(term, list).is_some() {
                return Err(IndexError::corrupt(format!(
                    "block {block} at offset {start} repeats a term"
                )));
            }
        }
    }

    let universe = PostingList::from_unsorted(universe);
    let unknown = terms
        .values()
        .filter(|list| !list.difference(&universe).is_empty())
        .count();
    if unknown > 0 {
        warn!(
            "{unknown} posting lists reference documents outside the supplied universe of {}",
            universe.len()
        );
    }

    Ok(InvertedIndex::from_parts(terms, universe, config))
}

fn decode_block(block: &[u8], offset: usize) -> Result<(String, PostingList)> {
    let (term_len, n) = decode_u64(block)
        .map_err(|e| e.context(format!("term length in block at {offset}")))?;

    let term_end = usize::try_from(term_len)
        .ok()
        .and_then(|len| n.checked_add(len))
        .filter(|&end| end <= block.len())
        .ok_or_else(|| {
            IndexError::corrupt(format!(
                "term of {term_len} bytes overruns the {}-byte block at {offset}",
                block.len()
            ))
        })?;

    let term = std::str::from_utf8(&block[n..term_end])
        .map_err(|e| IndexError::corrupt(format!("term in block at {offset}: {e}")))?
        .to_owned();
    let list = codec::decode(&block[term_end..])
        .map_err(|e| e.context(format!("postings of {term:?} at {offset}")))?;

    Ok((term, list))
}

/// Write `index` to `path`.
///
/// The bytes go to a temporary file in the destination directory which then
/// replaces `path` in one rename; a failure at any point leaves the previous
/// file intact.
pub fn save<P: AsRef<Path>>(index: &InvertedIndex, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(index)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(&bytes)?;
    if index.config().sync_writes {
        temp.as_file().sync_all()?;
    }
    debug!("Wrote {} bytes to {}", bytes.len(), temp.path().display());

    temp.persist(path).map_err(|e| IndexError::Io(e.error))?;

    info!(
        "Saved {} terms ({} bytes) to {}",
        index.term_count(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

/// Read an index saved by [`save`].
pub fn load<P, U>(path: P, universe: U, config: IndexConfig) -> Result<InvertedIndex>
where
    P: AsRef<Path>,
    U: IntoIterator<Item = DocId>,
{
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let index = from_bytes(&bytes, universe, config)?;

    info!(
        "Loaded {} terms over {} documents from {}",
        index.term_count(),
        index.doc_count(),
        path.display()
    );
    Ok(index)
}
