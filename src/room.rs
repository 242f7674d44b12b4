//! Room joining. Multiplayer races are not implemented; joining only
//! validates and logs the identifier.

use log::info;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomId(String);

impl RoomId {
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let id = raw.trim();
        if id.is_empty() || id.contains(char::is_whitespace) {
            return Err(Error::InvalidRoomId { id: raw.to_string() });
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RoomId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn join(room: &RoomId) {
    info!("join room requested: {room} (no multiplayer backend, racing solo)");
}
