use bytes::{BufMut, Bytes, BytesMut};

pub const CURRENT_MARKER: &str = "<<<<<<< HEAD\n";
pub const SEPARATOR_MARKER: &str = "=======\n";
pub const OTHER_MARKER: &str = ">>>>>>>\n";

/// Content written in place of a file both branches changed differently
///
/// Both versions are embedded byte for byte; a missing version is empty.
pub fn conflict_block(current: &[u8], other: &[u8]) -> Bytes {
    let mut block = BytesMut::with_capacity(
        CURRENT_MARKER.len()
            + current.len()
            + SEPARATOR_MARKER.len()
            + other.len()
            + OTHER_MARKER.len(),
    );

    block.put_slice(CURRENT_MARKER.as_bytes());
    block.put_slice(current);
    block.put_slice(SEPARATOR_MARKER.as_bytes());
    block.put_slice(other);
    block.put_slice(OTHER_MARKER.as_bytes());

    block.freeze()
}
