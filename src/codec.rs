//! Posting-list codec.
//!
//! A list is stored as its first id followed by the gaps between consecutive
//! ids, each written as an unsigned varint:
//!
//! ```text
//! [1, 5, 6, 300]  ->  varint(1) varint(4) varint(1) varint(294)
//! ```
//!
//! The empty list encodes to zero bytes. There is no length prefix; a decoder
//! reads until its input is exhausted, so the caller frames the bytes.

use crate::error::{IndexError, Result};
use crate::posting::{DocId, PostingList, check_ascending};
use crate::util::varint::{decode_u64, encode_u64_into, encoded_len};

/// Encode a strictly ascending list of ids.
pub fn encode(doc_ids: &[DocId]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(doc_ids.len() * 2);
    encode_into(doc_ids, &mut buf)?;
    Ok(buf)
}

/// Append the encoding of `doc_ids` to `buf`, returning the bytes written.
///
/// Nothing is appended when the list is rejected.
pub fn encode_into(doc_ids: &[DocId], buf: &mut Vec<u8>) -> Result<usize> {
    check_ascending(doc_ids)?;

    let mut written = 0;
    let mut prev: Option<DocId> = None;
    for &doc_id in doc_ids {
        let value = match prev {
            Some(p) => doc_id - p,
            None => doc_id,
        };
        written += encode_u64_into(value, buf);
        prev = Some(doc_id);
    }
    Ok(written)
}

/// Size in bytes of the encoding of an already valid list.
pub fn encoded_size(list: &PostingList) -> usize {
    let mut prev: Option<DocId> = None;
    list.iter()
        .map(|doc_id| {
            let value = prev.map_or(doc_id, |p| doc_id - p);
            prev = Some(doc_id);
            encoded_len(value)
        })
        .sum()
}

/// Decode a posting list, consuming all of `bytes`.
///
/// A trailing partial varint, a zero gap (repeated id) or a running sum that
/// overflows [`DocId`] is reported as [`IndexError::CorruptFormat`].
pub fn decode(bytes: &[u8]) -> Result<PostingList> {
    let mut doc_ids: Vec<DocId> = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let (value, n) = decode_u64(&bytes[pos..])
            .map_err(|e| e.context(format!("posting list at byte {pos}")))?;

        let doc_id = match doc_ids.last() {
            None => value,
            Some(_) if value == 0 => {
                return Err(IndexError::corrupt(format!(
                    "zero delta at byte {pos} repeats a document id"
                )));
            }
            Some(&prev) => prev.checked_add(value).ok_or_else(|| {
                IndexError::corrupt(format!("document id overflows at byte {pos}"))
            })?,
        };

        doc_ids.push(doc_id);
        pos += n;
    }

    Ok(PostingList::from_merged(doc_ids))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        assert_eq!(encode(&[]).unwrap(), Vec::<u8>::new());
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_known_encoding() {
        let bytes = encode(&[1, 5, 6, 300]).unwrap();
        // 1, then gaps 4, 1, 294 (= 0xA6 0x02)
        assert_eq!(bytes, vec![0x01, 0x04, 0x01, 0xA6, 0x02]);
        assert_eq!(decode(&bytes).unwrap().as_slice(), &[1, 5, 6, 300]);
    }

    #[test]
    fn test_round_trip() {
        let lists: Vec<Vec<DocId>> = vec![
            vec![0],
            vec![0, 1, 2, 3],
            vec![127, 128, 16384],
            vec![3, 1_000_000, u64::MAX - 1, u64::MAX],
            (0..1000).map(|i| i * 37 + 11).collect(),
        ];

        for list in lists {
            let bytes = encode(&list).unwrap();
            assert_eq!(bytes.len(), encoded_size(&PostingList::from_sorted(list.clone()).unwrap()));
            assert_eq!(decode(&bytes).unwrap().into_vec(), list);
        }
    }

    #[test]
    fn test_rejects_unsorted_input() {
        assert!(matches!(encode(&[3, 2]), Err(IndexError::InvalidInput(_))));
        assert!(matches!(encode(&[1, 1]), Err(IndexError::InvalidInput(_))));

        let mut buf = vec![0xFF];
        assert!(encode_into(&[5, 4, 6], &mut buf).is_err());
        assert_eq!(buf, vec![0xFF]);
    }

    #[test]
    fn test_truncated_input() {
        let mut bytes = encode(&[10, 200]).unwrap();
        bytes.push(0x80);
        let err = decode(&bytes).unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_truncated_message_names_position_once() {
        let err = decode(&[0x0A, 0x80]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Corrupt format: posting list at byte 1: incomplete varint after 1 bytes"
        );
    }

    #[test]
    fn test_zero_delta_is_corrupt() {
        assert!(decode(&[0x05, 0x00]).unwrap_err().is_corrupt());
        // A leading zero is a valid first id
        assert_eq!(decode(&[0x00, 0x01]).unwrap().as_slice(), &[0, 1]);
    }

    #[test]
    fn test_overflowing_sum_is_corrupt() {
        let mut bytes = crate::util::varint::encode_u64(u64::MAX);
        bytes.push(0x01);
        assert!(decode(&bytes).unwrap_err().is_corrupt());
    }
}
