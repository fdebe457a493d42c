//! Reader and writer adapters.
//!
//! The codec itself works on in-memory buffers. These helpers move those
//! buffers through any `Read`/`Write` the caller has opened.

use std::io::{Read, Write};

use kith_core::{PersonGraph, PersonId, RootedGraph};

use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::CodecError;

/// Encode `root`'s graph and write the bytes to `writer`.
///
/// Returns the number of bytes written.
pub fn write_to<W: Write>(
    encoder: &Encoder,
    writer: &mut W,
    graph: &PersonGraph,
    root: PersonId,
) -> Result<usize, CodecError> {
    let bytes = encoder.encode(graph, root)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(bytes.len())
}

/// Read `reader` to the end and decode the bytes.
pub fn read_from<R: Read>(decoder: &Decoder, reader: &mut R) -> Result<RootedGraph, CodecError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decoder.decode(&data)
}
