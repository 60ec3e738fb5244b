//! Message — the one broadcast every robot repeats.
//!
//! Layout of the payload:
//!
//! | byte | meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | sender role id                            |
//! | 1    | T-cell/antibody contact age               |
//! | 2    | antibody/antigen contact age              |
//! | 3    | strength-report age (0 from T-cells)      |
//! | 4    | response strength (0 or a T-cell role id) |
//!
//! On the air the payload is followed by a CRC-16 trailer (reflected
//! CCITT, little-endian). Frames whose trailer does not match are
//! dropped by the radio before the agent ever sees them.

use crate::error::CodecError;
use crate::role::Role;
use crate::types::EventAges;
use serde::{Deserialize, Serialize};

/// Payload length in bytes.
pub const PAYLOAD_LEN: usize = 5;
/// Payload plus checksum trailer.
pub const FRAME_LEN: usize = PAYLOAD_LEN + 2;

/// A decoded broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Raw sender role id. May name no known role.
    pub sender: u8,
    pub ages: EventAges,
    /// Raw response-strength byte.
    pub strength: u8,
}

impl Message {
    pub fn new(sender: Role, ages: EventAges, strength: u8) -> Self {
        Self {
            sender: sender.id(),
            ages,
            strength,
        }
    }

    /// The sender's role, if the id is one we know.
    pub fn sender_role(&self) -> Option<Role> {
        Role::from_id(self.sender)
    }

    pub fn to_payload(&self) -> [u8; PAYLOAD_LEN] {
        [
            self.sender,
            self.ages.t_ab,
            self.ages.ab_ag,
            self.ages.strength,
            self.strength,
        ]
    }

    pub fn from_payload(payload: [u8; PAYLOAD_LEN]) -> Self {
        Self {
            sender: payload[0],
            ages: EventAges::new(payload[1], payload[2], payload[3]),
            strength: payload[4],
        }
    }

    /// Serialize to an on-air frame with checksum trailer.
    pub fn encode_frame(&self) -> [u8; FRAME_LEN] {
        let payload = self.to_payload();
        let crc = crc16(&payload).to_le_bytes();
        let mut frame = [0u8; FRAME_LEN];
        frame[..PAYLOAD_LEN].copy_from_slice(&payload);
        frame[PAYLOAD_LEN..].copy_from_slice(&crc);
        frame
    }

    /// Parse and verify an on-air frame.
    pub fn decode_frame(frame: &[u8]) -> Result<Self, CodecError> {
        if frame.len() != FRAME_LEN {
            return Err(CodecError::WrongLength {
                expected: FRAME_LEN,
                found: frame.len(),
            });
        }

        let mut payload = [0u8; PAYLOAD_LEN];
        payload.copy_from_slice(&frame[..PAYLOAD_LEN]);
        let found = u16::from_le_bytes([frame[PAYLOAD_LEN], frame[PAYLOAD_LEN + 1]]);
        let expected = crc16(&payload);
        if found != expected {
            return Err(CodecError::ChecksumMismatch { expected, found });
        }

        Ok(Self::from_payload(payload))
    }
}

/// CRC-16, reflected CCITT polynomial (0x8408), initial value 0xFFFF.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = 0xFFFFu16;
    for &byte in data {
        crc ^= u16::from(byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg() & 0x8408;
            crc = (crc >> 1) ^ mask;
        }
    }
    crc
}
