use crate::bytes;

/// An owned raw MIDI message: status byte followed by its data bytes.
#[derive(Debug, Default)]
pub struct Msg(Box<[u8]>);

impl Msg {
    pub fn inner(&self) -> &[u8] {
        self.0.as_ref()
    }

    pub fn display(&self) -> bytes::Displayable<'_> {
        bytes::Displayable::from(self.0.as_ref())
    }

    /// Wraps `payload` in a System Exclusive frame.
    pub fn new_sysex(payload: &[u8]) -> Self {
        use super::sysex;

        let mut buf = Vec::with_capacity(payload.len() + 2);

        buf.push(sysex::TAG);
        buf.extend_from_slice(payload);
        buf.push(sysex::END_TAG);

        Self(buf.into())
    }
}

impl<const S: usize> From<[u8; S]> for Msg {
    fn from(buf: [u8; S]) -> Self {
        Self(buf.into())
    }
}

impl From<&[u8]> for Msg {
    fn from(buf: &[u8]) -> Self {
        Self(buf.into())
    }
}

impl From<Vec<u8>> for Msg {
    fn from(buf: Vec<u8>) -> Self {
        Self(buf.into())
    }
}

impl std::ops::Deref for Msg {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
