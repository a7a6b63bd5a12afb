use std::sync::Arc;

use super::{Error, Msg};

/// Returns the first port whose name starts with `prefix`.
///
/// The FIT exposes one input and one output port, both named after the
/// device, so a prefix match is all the discovery we need.
fn find_port<IO: midir::MidiIO>(io: &IO, prefix: &str) -> Result<(Arc<str>, IO::Port), Error> {
    for port in io.ports() {
        let name = io.port_name(&port)?;
        if name.starts_with(prefix) {
            return Ok((name.into(), port));
        }
    }

    Err(Error::PortNotFound(prefix.into()))
}

/// An established input connection.
///
/// Inbound messages are delivered to the callback on the transport's
/// thread, one complete message per invocation. Dropping this closes
/// the connection.
pub struct MidiIn<D: 'static> {
    port_name: Arc<str>,
    _conn: midir::MidiInputConnection<D>,
}

impl<D: Send + 'static> MidiIn<D> {
    pub fn connect<C>(
        client_name: &str,
        port_prefix: &str,
        data: D,
        callback: C,
    ) -> Result<Self, Error>
    where
        C: FnMut(u64, &[u8], &mut D) + Send + 'static,
    {
        let input = midir::MidiInput::new(client_name)?;
        let (port_name, port) = find_port(&input, port_prefix)?;

        let conn = input
            .connect(&port, client_name, callback, data)
            .map_err(|_| Error::PortConnection(Arc::clone(&port_name)))?;

        log::info!("Connected for Input to {port_name}");

        Ok(Self {
            port_name,
            _conn: conn,
        })
    }

    pub fn port_name(&self) -> &str {
        self.port_name.as_ref()
    }
}

/// The output side of the device connection.
///
/// `Detached` behaves like the real thing except that `send` fails with
/// [`Error::NotConnected`]. Unit tests drive the driver with it.
pub enum MidiOut {
    Connected {
        port_name: Arc<str>,
        conn: midir::MidiOutputConnection,
    },
    Detached,
}

impl MidiOut {
    pub fn connect(client_name: &str, port_prefix: &str) -> Result<Self, Error> {
        let output = midir::MidiOutput::new(client_name)?;
        let (port_name, port) = find_port(&output, port_prefix)?;

        let conn = output
            .connect(&port, client_name)
            .map_err(|_| Error::PortConnection(Arc::clone(&port_name)))?;

        log::info!("Connected for Output to {port_name}");

        Ok(Self::Connected { port_name, conn })
    }

    pub fn detached() -> Self {
        Self::Detached
    }

    pub fn port_name(&self) -> Option<&str> {
        match self {
            Self::Connected { port_name, .. } => Some(port_name.as_ref()),
            Self::Detached => None,
        }
    }

    pub fn send(&mut self, msg: &Msg) -> Result<(), Error> {
        match self {
            Self::Connected { conn, .. } => {
                conn.send(msg.inner()).map_err(|err| {
                    log::error!("Failed to send MIDI msg {}: {err}", msg.display());
                    err
                })?;

                Ok(())
            }
            Self::Detached => Err(Error::NotConnected),
        }
    }
}

impl std::fmt::Debug for MidiOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connected { port_name, .. } => {
                f.debug_struct("Connected").field("port_name", port_name).finish_non_exhaustive()
            }
            Self::Detached => f.write_str("Detached"),
        }
    }
}
