//! Wire messages and room bookkeeping for the peer-to-peer relay. The transport itself is out of
//! scope: this module only decides what goes to whom, as [`Envelope`]s the caller delivers.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::Seat;
use crate::card::Color;
use crate::deck::Mode;
use crate::error::RelayError;

/// Guests a host admits; with the host that makes four participants.
pub const MAX_GUESTS: usize = 3;
pub const ROOM_CODE_LEN: usize = 4;
const HOST_PREFIX: &str = "gamehub-";
const ROOM_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Serialized action exchanged between peers: `{"action": ..., "payload": ...}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", content = "payload")]
pub enum Message {
    #[serde(rename = "uno:start")]
    Start { mode: Mode },
    #[serde(rename = "uno:play")]
    Play {
        index: usize,
        /// Only sent for wild plays whose color was declared before sending.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
    },
    #[serde(rename = "uno:draw")]
    Draw {},
    /// UNO declared by `seat`; may arrive on either turn.
    #[serde(rename = "uno:call")]
    CallUno { seat: Seat },
    /// Relay-level notice, never applied to the game.
    #[serde(rename = "system")]
    System(String),
}

impl Message {
    pub fn play(index: usize) -> Self {
        Message::Play { index, color: None }
    }

    pub fn to_json(&self) -> Result<String, RelayError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, RelayError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn room_full() -> Self {
        Message::System(format!("room full (max {})", MAX_GUESTS + 1))
    }
}

/// Opaque identifier of a connected peer.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PeerId(pub String);

impl PeerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Four-character room code, normalised to upper case.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn parse(input: &str) -> Result<Self, RelayError> {
        let code = input.trim().to_ascii_uppercase();
        if code.len() != ROOM_CODE_LEN || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(RelayError::InvalidRoomCode(input.to_string()));
        }
        Ok(Self(code))
    }

    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..ROOM_CODE_LEN)
            .map(|_| ROOM_ALPHABET[rng.gen_range(0..ROOM_ALPHABET.len())] as char)
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Peer id the host registers under, which guests dial.
    pub fn host_peer_id(&self) -> PeerId {
        PeerId(format!("{HOST_PREFIX}{}", self.0))
    }

    /// Stable seed shared by every peer of the room.
    pub fn seed(&self) -> u64 {
        // FNV-1a
        self.0.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        })
    }
}

impl FromStr for RoomCode {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomCode::parse(s)
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A message addressed to one peer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub to: PeerId,
    pub message: Message,
}

/// Host side of a room: tracks guests and fans messages out between them.
#[derive(Clone, Debug)]
pub struct Hub {
    code: RoomCode,
    guests: Vec<PeerId>,
}

impl Hub {
    pub fn new(code: RoomCode) -> Self {
        Self {
            code,
            guests: Vec::with_capacity(MAX_GUESTS),
        }
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn guests(&self) -> &[PeerId] {
        &self.guests
    }

    pub fn join(&mut self, peer: PeerId) -> Result<(), RelayError> {
        if self.guests.contains(&peer) {
            return Ok(());
        }
        if self.guests.len() >= MAX_GUESTS {
            tracing::info!(room = %self.code, %peer, "rejected guest, room full");
            return Err(RelayError::RoomFull {
                max: MAX_GUESTS + 1,
            });
        }
        tracing::info!(room = %self.code, %peer, guests = self.guests.len() + 1, "guest joined");
        self.guests.push(peer);
        Ok(())
    }

    pub fn leave(&mut self, peer: &PeerId) -> bool {
        let before = self.guests.len();
        self.guests.retain(|guest| guest != peer);
        let left = self.guests.len() != before;
        if left {
            tracing::info!(room = %self.code, %peer, guests = self.guests.len(), "guest left");
        }
        left
    }

    pub fn broadcast(&self, message: &Message) -> Vec<Envelope> {
        self.guests
            .iter()
            .map(|guest| Envelope {
                to: guest.clone(),
                message: message.clone(),
            })
            .collect()
    }

    /// Forwards a guest's message verbatim to every other guest.
    pub fn route(&self, from: &PeerId, message: &Message) -> Result<Vec<Envelope>, RelayError> {
        if !self.guests.contains(from) {
            return Err(RelayError::UnknownPeer(from.to_string()));
        }
        Ok(self
            .guests
            .iter()
            .filter(|guest| *guest != from)
            .map(|guest| Envelope {
                to: guest.clone(),
                message: message.clone(),
            })
            .collect())
    }
}

/// This peer's role in the relay.
#[derive(Clone, Debug, Default)]
pub enum Relay {
    #[default]
    Offline,
    Host(Hub),
    Guest { room: RoomCode, host: PeerId },
}

impl Relay {
    pub fn host(code: RoomCode) -> Self {
        Relay::Host(Hub::new(code))
    }

    pub fn guest(code: RoomCode) -> Self {
        let host = code.host_peer_id();
        Relay::Guest { room: code, host }
    }

    pub fn room(&self) -> Option<&RoomCode> {
        match self {
            Relay::Offline => None,
            Relay::Host(hub) => Some(hub.code()),
            Relay::Guest { room, .. } => Some(room),
        }
    }

    /// Where a locally originated message goes.
    pub fn outgoing(&self, message: &Message) -> Vec<Envelope> {
        match self {
            Relay::Offline => Vec::new(),
            Relay::Host(hub) => hub.broadcast(message),
            Relay::Guest { host, .. } => vec![Envelope {
                to: host.clone(),
                message: message.clone(),
            }],
        }
    }

    /// Where a message received from `from` is forwarded. Only a host forwards.
    pub fn forward(&self, from: &PeerId, message: &Message) -> Result<Vec<Envelope>, RelayError> {
        match self {
            Relay::Host(hub) => hub.route(from, message),
            Relay::Offline | Relay::Guest { .. } => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn room_codes_are_case_insensitive() {
        let code = RoomCode::parse(" ab1z ").unwrap();
        assert_eq!(code.as_str(), "AB1Z");
        assert_eq!(code.host_peer_id(), PeerId::new("gamehub-AB1Z"));
        assert_eq!(code.seed(), RoomCode::parse("AB1Z").unwrap().seed());
        assert!(RoomCode::parse("ABC").is_err());
        assert!(RoomCode::parse("AB-1").is_err());
    }

    #[test]
    fn generated_codes_parse() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let code = RoomCode::generate(&mut rng);
            assert_eq!(RoomCode::parse(code.as_str()).unwrap(), code);
        }
    }

    #[test]
    fn hub_caps_guests() {
        let mut hub = Hub::new(RoomCode::parse("ROOM").unwrap());
        for i in 0..MAX_GUESTS {
            hub.join(PeerId::new(format!("g{i}"))).unwrap();
        }
        assert!(matches!(
            hub.join(PeerId::new("late")),
            Err(RelayError::RoomFull { max: 4 })
        ));
        assert!(hub.leave(&PeerId::new("g0")));
        assert!(hub.join(PeerId::new("late")).is_ok());
    }

    #[test]
    fn route_skips_sender() {
        let mut hub = Hub::new(RoomCode::parse("ROOM").unwrap());
        for id in ["a", "b", "c"] {
            hub.join(PeerId::new(id)).unwrap();
        }
        let out = hub.route(&PeerId::new("b"), &Message::Draw {}).unwrap();
        let targets: Vec<_> = out.iter().map(|e| e.to.0.as_str()).collect();
        assert_eq!(targets, vec!["a", "c"]);
        assert!(hub.route(&PeerId::new("zz"), &Message::Draw {}).is_err());
    }
}
