use std::sync::Arc;

use crate::bytes;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("MIDI initialization failed")]
    Init(#[from] midir::InitError),

    #[error("Couldn't retrieve a MIDI port name")]
    PortInfo(#[from] midir::PortInfoError),

    #[error("No MIDI port matching {}", .0)]
    PortNotFound(Arc<str>),

    #[error("Error connecting to MIDI port {}", .0)]
    PortConnection(Arc<str>),

    #[error("MIDI port not connected")]
    NotConnected,

    #[error("Invalid two bytes value: {}", .0)]
    InvalidTwoBytesValue(bytes::Displayable<'static>),

    #[error("Couldn't send MIDI message: {}", .0)]
    Send(#[from] midir::SendError),
}
