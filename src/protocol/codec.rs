//! X-Plane packet codec (encode/decode)
//!
//! All multi-byte fields are little-endian. Every packet starts with a
//! five-byte tag, see [`MessageTag`].

use std::slice::ChunksExact;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{
    DIRECT_WRITE_PACKET_SIZE, Error, MessageTag, Result, SAMPLE_RECORD_SIZE,
    SUBSCRIBE_NAME_FIELD_SIZE, SUBSCRIBE_PACKET_SIZE, Sample, TAG_SIZE,
};

/// Encode a command packet
///
/// # Format
///
/// ```text
/// ["CMND\0"] [PATH (UTF-8, unterminated)]
/// ```
#[must_use]
pub fn encode_command(path: &str) -> Bytes {
    let mut bytes = BytesMut::with_capacity(TAG_SIZE + path.len());
    bytes.put_slice(MessageTag::Command.as_bytes());
    bytes.put_slice(path.as_bytes());
    bytes.freeze()
}

/// Encode a direct dataref write
///
/// # Format
///
/// ```text
/// ["DREF\0"] [VALUE (f32)] [NAME] [NUL] [ZERO PADDING up to 509 bytes]
/// ```
///
/// Names of 500 bytes or more leave no room for padding; the packet is then
/// emitted unpadded and longer than 509 bytes.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] if the name contains a NUL byte.
pub fn encode_direct_write(dataref: &str, value: f32) -> Result<Bytes> {
    check_name(dataref)?;

    let unpadded = TAG_SIZE + 4 + dataref.len() + 1;
    let mut bytes = BytesMut::with_capacity(unpadded.max(DIRECT_WRITE_PACKET_SIZE));
    bytes.put_slice(MessageTag::DirectWrite.as_bytes());
    bytes.put_f32_le(value);
    bytes.put_slice(dataref.as_bytes());
    bytes.put_u8(0);

    if bytes.len() < DIRECT_WRITE_PACKET_SIZE {
        bytes.put_bytes(0, DIRECT_WRITE_PACKET_SIZE - bytes.len());
    }

    Ok(bytes.freeze())
}

/// Encode a dataref subscription request
///
/// # Format
///
/// ```text
/// ["RREF\0"] [FREQUENCY (i32)] [INDEX (i32)] [NAME + NUL, zero-padded to 400 bytes]
/// ```
///
/// # Errors
///
/// Returns [`Error::NameTooLong`] if the name plus its terminator exceeds
/// the 400-byte field, or [`Error::InvalidName`] if it contains a NUL byte.
pub fn encode_subscribe(index: i32, dataref: &str, frequency: i32) -> Result<Bytes> {
    check_name(dataref)?;

    let name_len = dataref.len() + 1;
    if name_len > SUBSCRIBE_NAME_FIELD_SIZE {
        return Err(Error::NameTooLong {
            len: name_len,
            max: SUBSCRIBE_NAME_FIELD_SIZE,
        });
    }

    let mut bytes = BytesMut::with_capacity(SUBSCRIBE_PACKET_SIZE);
    bytes.put_slice(MessageTag::Subscribe.as_bytes());
    bytes.put_i32_le(frequency);
    bytes.put_i32_le(index);
    bytes.put_slice(dataref.as_bytes());
    bytes.put_bytes(0, SUBSCRIBE_NAME_FIELD_SIZE - dataref.len());

    Ok(bytes.freeze())
}

/// Decode the samples carried by an `RREF` response
///
/// The five-byte header is skipped without inspecting its content. A
/// datagram shorter than the header yields no samples, and a trailing
/// partial record is ignored.
#[must_use]
pub fn decode_samples(datagram: &[u8]) -> Samples<'_> {
    let records = datagram.get(TAG_SIZE..).unwrap_or_default();
    Samples {
        records: records.chunks_exact(SAMPLE_RECORD_SIZE),
    }
}

/// Lazy iterator over the samples of one datagram
///
/// Cloning the iterator restarts decoding from the current position.
#[derive(Debug, Clone)]
pub struct Samples<'a> {
    records: ChunksExact<'a, u8>,
}

impl Iterator for Samples<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = self.records.next()?;
        let index = record.get_i32_le();
        let value = record.get_f32_le();
        Some(Sample { index, value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for Samples<'_> {}

fn check_name(dataref: &str) -> Result<()> {
    match dataref.bytes().position(|b| b == 0) {
        Some(position) => Err(Error::InvalidName { position }),
        None => Ok(()),
    }
}
