//! Wire frame encoder and decoder
//!
//! Frames are a fixed binary layout, big-endian throughout:
//!
//! ```text
//! offset  size  field
//! 0       4     magic "PANE"
//! 4       1     kind marker
//! 5       16    origin peer id (uuid bytes)
//! 21      ...   kind-specific payload
//! ```
//!
//! Kind markers:
//! ```text
//! 0x01 - Announce       (payload: x i32, y i32, width u32, height u32)
//! 0x02 - Unannounce     (no payload)
//! 0x03 - ResyncRequest  (no payload)
//! ```
//!
//! Decoding is lenient at the protocol edge: an unknown marker or a
//! malformed frame yields a `DecodeError` and the caller drops the
//! frame. There is no version negotiation; newer peers may emit kinds
//! we skip.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::canvas::Geometry;
use crate::error::DecodeError;

use super::message::{PeerId, PeerMessage};

/// Frame magic, "PANE"
const MAGIC: [u8; 4] = *b"PANE";

// Kind markers
const MARKER_ANNOUNCE: u8 = 0x01;
const MARKER_UNANNOUNCE: u8 = 0x02;
const MARKER_RESYNC_REQUEST: u8 = 0x03;

/// Header length: magic + marker + origin id
const HEADER_LEN: usize = 4 + 1 + 16;

/// Announce payload length: x, y, width, height
const ANNOUNCE_PAYLOAD_LEN: usize = 16;

/// Encode a message into a wire frame
pub fn encode(message: &PeerMessage) -> Bytes {
    let mut buf = BytesMut::with_capacity(HEADER_LEN + ANNOUNCE_PAYLOAD_LEN);
    buf.put_slice(&MAGIC);

    match message {
        PeerMessage::Announce { id, geometry } => {
            buf.put_u8(MARKER_ANNOUNCE);
            buf.put_slice(id.as_bytes());
            buf.put_i32(geometry.position.x);
            buf.put_i32(geometry.position.y);
            buf.put_u32(geometry.size.width);
            buf.put_u32(geometry.size.height);
        }
        PeerMessage::Unannounce { id } => {
            buf.put_u8(MARKER_UNANNOUNCE);
            buf.put_slice(id.as_bytes());
        }
        PeerMessage::ResyncRequest { requester } => {
            buf.put_u8(MARKER_RESYNC_REQUEST);
            buf.put_slice(requester.as_bytes());
        }
    }

    buf.freeze()
}

/// Decode a wire frame into a message
pub fn decode(frame: &Bytes) -> Result<PeerMessage, DecodeError> {
    let mut buf = frame.clone();

    if buf.remaining() < HEADER_LEN {
        return Err(DecodeError::UnexpectedEof);
    }

    let mut magic = [0u8; 4];
    buf.copy_to_slice(&mut magic);
    if magic != MAGIC {
        return Err(DecodeError::BadMagic);
    }

    let marker = buf.get_u8();

    let mut id_bytes = [0u8; 16];
    buf.copy_to_slice(&mut id_bytes);
    let origin = PeerId::from_bytes(id_bytes);

    let message = match marker {
        MARKER_ANNOUNCE => {
            if buf.remaining() < ANNOUNCE_PAYLOAD_LEN {
                return Err(DecodeError::UnexpectedEof);
            }
            let x = buf.get_i32();
            let y = buf.get_i32();
            let width = buf.get_u32();
            let height = buf.get_u32();
            PeerMessage::Announce {
                id: origin,
                geometry: Geometry::new(x, y, width, height),
            }
        }
        MARKER_UNANNOUNCE => PeerMessage::Unannounce { id: origin },
        MARKER_RESYNC_REQUEST => PeerMessage::ResyncRequest { requester: origin },
        other => return Err(DecodeError::UnknownKind(other)),
    };

    if buf.has_remaining() {
        return Err(DecodeError::TrailingBytes(buf.remaining()));
    }

    Ok(message)
}

/// Read the origin id out of a frame without a full decode
///
/// Transports use this to filter self-delivered frames before handing
/// them up. Returns `None` for frames too short to carry a header; the
/// full decode will reject those anyway.
pub fn frame_origin(frame: &[u8]) -> Option<PeerId> {
    if frame.len() < HEADER_LEN || frame[..4] != MAGIC {
        return None;
    }
    let mut id_bytes = [0u8; 16];
    id_bytes.copy_from_slice(&frame[5..21]);
    Some(PeerId::from_bytes(id_bytes))
}
