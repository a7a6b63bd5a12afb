use super::{
    event::{Event, GlobalEvent, GlobalEventKind, StripEvent, StripEventKind},
    protocol::{self, global, Row, Screen},
    strip::{Channel, StripIds},
};
use crate::midi::{self, Msg};

pub type StripCallback = Box<dyn FnMut(StripCtx<'_>, StripEvent) + Send>;
pub type GlobalCallback = Box<dyn FnMut(&mut Outputs, GlobalEvent) + Send>;

/// Which of a strip's button LEDs to drive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Led {
    Select,
    Solo,
    Mute,
}

#[derive(Default)]
struct Strip {
    callbacks: [Option<StripCallback>; StripEventKind::COUNT],
}

/// The FIT surface driver.
///
/// Owns the output connection and the callback tables. Inbound raw
/// messages go through [`FitSurface::handle_msg`]; outbound writes
/// through [`FitSurface::outputs`] or the [`StripCtx`] handed to strip
/// callbacks.
pub struct FitSurface {
    out: Outputs,
    strips: [Strip; Channel::COUNT],
    globals: [Option<GlobalCallback>; GlobalEventKind::COUNT],
}

impl FitSurface {
    pub fn new(out: midi::MidiOut) -> Self {
        Self {
            out: Outputs { out },
            strips: Default::default(),
            globals: Default::default(),
        }
    }

    pub fn outputs(&mut self) -> &mut Outputs {
        &mut self.out
    }

    /// Registers `callback` for `kind` on `channel`.
    ///
    /// One callback per kind and strip: registering again replaces the
    /// previous one.
    pub fn register(
        &mut self,
        channel: Channel,
        kind: StripEventKind,
        callback: impl FnMut(StripCtx<'_>, StripEvent) + Send + 'static,
    ) {
        self.strips[channel.index()].callbacks[kind.idx()] = Some(Box::new(callback));
    }

    /// Registers `callback` for `kind` on the global button block.
    pub fn register_global(
        &mut self,
        kind: GlobalEventKind,
        callback: impl FnMut(&mut Outputs, GlobalEvent) + Send + 'static,
    ) {
        self.globals[kind.idx()] = Some(Box::new(callback));
    }

    /// Decodes one inbound message and fires the matching callback.
    ///
    /// Messages the driver doesn't model, and events without a
    /// registered callback, are dropped.
    pub fn handle_msg(&mut self, msg: &Msg) {
        let event = match protocol::decode(msg.inner()) {
            Some(event) => event,
            None => {
                log::trace!("Ignoring message {}", msg.display());
                return;
            }
        };

        match event {
            Event::Strip { channel, event } => {
                let slot = &mut self.strips[channel.index()].callbacks[event.kind().idx()];
                if let Some(callback) = slot.as_mut() {
                    callback(
                        StripCtx {
                            channel,
                            out: &mut self.out,
                        },
                        event,
                    );
                }
            }
            Event::Global(event) => {
                if let Some(callback) = self.globals[event.kind().idx()].as_mut() {
                    callback(&mut self.out, event);
                }
            }
        }
    }
}

/// Write access to the device: display, LEDs, fader motors.
///
/// Out of range addresses are deliberate no-ops; transport failures are
/// surfaced to the caller, never retried.
pub struct Outputs {
    out: midi::MidiOut,
}

impl Outputs {
    /// Sends a prebuilt message as-is.
    pub fn send(&mut self, msg: Msg) -> Result<(), midi::Error> {
        self.out.send(&msg)
    }

    /// Writes `text` to one row of one screen, or a wider scope when
    /// `screen` and/or `row` is `0` (meaning "all").
    ///
    /// Text is truncated/padded to the scope length; the contract is
    /// 7 bit ASCII, other bytes are not sanitized.
    pub fn write_row(&mut self, screen: u8, row: u8, text: &str) -> Result<(), midi::Error> {
        match (Screen::from_number(screen), Row::from_number(row)) {
            (Some(screen), Some(row)) => self.send(protocol::display_text(screen, row, text)),
            _ => {
                log::debug!("write_row: no screen {screen} / row {row}");
                Ok(())
            }
        }
    }

    /// Writes `text` across all five rows of `screen` (`0` = all).
    pub fn write_all_rows(&mut self, screen: u8, text: &str) -> Result<(), midi::Error> {
        self.write_row(screen, 0, text)
    }

    /// Writes `text` across `row` (`0` = all) of every screen.
    pub fn write_row_all_screens(&mut self, row: u8, text: &str) -> Result<(), midi::Error> {
        self.write_row(0, row, text)
    }

    /// Writes `text` across the whole display bank.
    pub fn write_all(&mut self, text: &str) -> Result<(), midi::Error> {
        self.write_row(0, 0, text)
    }

    /// Blanks all 17 screens.
    pub fn clear_screens(&mut self) -> Result<(), midi::Error> {
        self.write_all("")
    }

    pub fn set_led(&mut self, channel: u8, led: Led, on: bool) -> Result<(), midi::Error> {
        let channel = match Channel::new(channel) {
            Some(channel) => channel,
            // a number past the strip bank would address unrelated LEDs
            None => return Ok(()),
        };

        let ids = StripIds::of(channel);
        let id = match led {
            Led::Select => ids.select,
            Led::Solo => ids.solo,
            Led::Mute => ids.mute,
        };

        self.send(protocol::led(id, on))
    }

    pub fn set_layer_led(&mut self, layer: u8, on: bool) -> Result<(), midi::Error> {
        match layer {
            1..=8 => self.send(protocol::led(global::LAYER_FIRST + layer - 1, on)),
            _ => Ok(()),
        }
    }

    pub fn set_util_led(&mut self, util: u8, on: bool) -> Result<(), midi::Error> {
        match util {
            1..=8 => self.send(protocol::led(global::UTIL_FIRST + util - 1, on)),
            _ => Ok(()),
        }
    }

    pub fn set_tempo_led(&mut self, on: bool) -> Result<(), midi::Error> {
        self.send(protocol::led(global::TEMPO, on))
    }

    /// Moves a motor fader. `position` is split LSB first without a
    /// range clamp; past 16383 the excess bit is the device's business.
    pub fn set_fader_position(&mut self, channel: u8, position: u16) -> Result<(), midi::Error> {
        match Channel::new(channel) {
            Some(channel) => self.send(protocol::fader_position(channel, position)),
            None => Ok(()),
        }
    }
}

/// Write access scoped to the strip a callback fired for.
pub struct StripCtx<'a> {
    channel: Channel,
    out: &'a mut Outputs,
}

impl StripCtx<'_> {
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// The unscoped write API, for callbacks reaching past their strip.
    pub fn outputs(&mut self) -> &mut Outputs {
        self.out
    }

    pub fn set_row(&mut self, row: u8, text: &str) -> Result<(), midi::Error> {
        self.out.write_row(self.channel.get(), row, text)
    }

    pub fn set_all(&mut self, text: &str) -> Result<(), midi::Error> {
        self.out.write_all_rows(self.channel.get(), text)
    }

    pub fn set_fader(&mut self, position: u16) -> Result<(), midi::Error> {
        self.out.set_fader_position(self.channel.get(), position)
    }

    pub fn set_led_select(&mut self, on: bool) -> Result<(), midi::Error> {
        self.out.set_led(self.channel.get(), Led::Select, on)
    }

    pub fn set_led_solo(&mut self, on: bool) -> Result<(), midi::Error> {
        self.out.set_led(self.channel.get(), Led::Solo, on)
    }

    pub fn set_led_mute(&mut self, on: bool) -> Result<(), midi::Error> {
        self.out.set_led(self.channel.get(), Led::Mute, on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn detached() -> FitSurface {
        FitSurface::new(midi::MidiOut::detached())
    }

    #[test]
    fn select_press_fires_channel_1_only() {
        let mut surface = detached();
        let fired = Arc::new(Mutex::new(Vec::new()));

        for channel in Channel::all() {
            let fired = Arc::clone(&fired);
            surface.register(channel, StripEventKind::SelectPress, move |ctx, event| {
                fired.lock().unwrap().push((ctx.channel().get(), event));
            });
        }

        surface.handle_msg(&Msg::from([0x90, 0x00, 0x7f]));

        assert_eq!(vec![(1, StripEvent::SelectPress)], *fired.lock().unwrap());
    }

    #[test]
    fn last_registration_wins() {
        let mut surface = detached();
        let hits = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&hits);
        surface.register(Channel::MASTER, StripEventKind::MutePress, move |_, _| {
            first.lock().unwrap().push("first");
        });
        let second = Arc::clone(&hits);
        surface.register(Channel::MASTER, StripEventKind::MutePress, move |_, _| {
            second.lock().unwrap().push("second");
        });

        surface.handle_msg(&Msg::from([0x90, 0x73, 0x7f]));

        assert_eq!(vec!["second"], *hits.lock().unwrap());
    }

    #[test]
    fn fader_move_passes_the_position() {
        let mut surface = detached();
        let seen = Arc::new(Mutex::new(None));

        let positions = Arc::clone(&seen);
        surface.register(
            Channel::new(1).unwrap(),
            StripEventKind::FaderMove,
            move |_, event| {
                *positions.lock().unwrap() = Some(event);
            },
        );

        surface.handle_msg(&Msg::from([0xe0, 0x00, 0x01]));

        assert_eq!(Some(StripEvent::FaderMove(128)), *seen.lock().unwrap());
    }

    #[test]
    fn layer_press_reaches_the_global_table() {
        let mut surface = detached();
        let seen = Arc::new(Mutex::new(None));

        let layers = Arc::clone(&seen);
        surface.register_global(GlobalEventKind::LayerPress, move |_, event| {
            *layers.lock().unwrap() = Some(event);
        });

        surface.handle_msg(&Msg::from([0x90, 0x43, 0x7f]));

        assert_eq!(Some(GlobalEvent::LayerPress(4)), *seen.lock().unwrap());
    }

    #[test]
    fn unregistered_and_unknown_messages_are_no_ops() {
        let mut surface = detached();

        // no callback registered
        surface.handle_msg(&Msg::from([0x90, 0x00, 0x7f]));
        // not a message class the device uses
        surface.handle_msg(&Msg::from([0xc0, 0x01]));
        // truncated
        surface.handle_msg(&Msg::from([0x90]));
    }

    #[test]
    fn out_of_range_writes_are_guarded() {
        let mut surface = detached();
        let out = surface.outputs();

        // a detached transport errors on every real send, so Ok here
        // means the guard short-circuited before the transport
        assert!(out.set_led(18, Led::Select, true).is_ok());
        assert!(out.set_led(0, Led::Mute, true).is_ok());
        assert!(out.set_layer_led(9, true).is_ok());
        assert!(out.set_util_led(0, true).is_ok());
        assert!(out.set_fader_position(18, 0).is_ok());
        assert!(out.write_row(18, 1, "x").is_ok());
        assert!(out.write_row(1, 6, "x").is_ok());

        assert!(out.set_led(17, Led::Select, true).is_err());
        assert!(out.set_tempo_led(true).is_err());
        assert!(out.write_row(17, 1, "x").is_err());
    }
}
