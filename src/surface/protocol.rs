//! Wire format of the FIT: decoding of inbound messages and the frame
//! builders for everything the driver writes back.

use super::{
    event::{Event, GlobalEvent, StripEvent},
    strip::{Channel, StripIds},
};
use crate::midi::{u14, Msg};

pub mod button {
    pub const TAG: u8 = 0x90;

    /// The only velocity the FIT sends for a press; everything else is
    /// a release.
    pub const PRESSED: u8 = 0x7f;

    pub const ON: u8 = PRESSED;
    pub const OFF: u8 = 0x00;
}

pub mod knob {
    pub const TAG: u8 = 0xb0;

    /// Raw speeds at or above this encode counter clockwise motion.
    pub const CCW_ORIGIN: u8 = 0x40;
}

pub mod fader {
    pub const TAG_FIRST: u8 = 0xe0;
    pub const TAG_LAST: u8 = 0xef;

    /// The master fader doesn't fit the `0xe0..` status block.
    pub const MASTER_TAG: u8 = 0xaf;
}

pub mod global {
    pub const LAYER_FIRST: u8 = 0x40;
    pub const LAYER_LAST: u8 = 0x47;
    pub const UTIL_FIRST: u8 = 0x50;
    pub const UTIL_LAST: u8 = 0x57;
    pub const TEMPO: u8 = 0x58;
}

pub mod display {
    /// Vendor header of every display frame, SysEx tags excluded.
    pub const HEADER: [u8; 8] = [0x00, 0x00, 0x74, 0x3c, 0x1a, 0x01, 0x00, 0x07];

    pub const COLUMNS: usize = 7;
    pub const ROWS: usize = 5;

    /// Wire address of the master strip's screen.
    pub const MASTER_SCREEN: u8 = 127;

    /// Wire address meaning every screen, or every row.
    pub const ALL: u8 = 0;
}

/// Display screen addressing: a single strip's screen, or the whole bank.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Screen {
    All,
    One(Channel),
}

impl Screen {
    /// `0` addresses every screen, `1..=17` a single one.
    pub fn from_number(num: u8) -> Option<Self> {
        if num == 0 {
            Some(Self::All)
        } else {
            Channel::new(num).map(Self::One)
        }
    }

    fn count(self) -> usize {
        match self {
            Self::All => Channel::COUNT,
            Self::One(_) => 1,
        }
    }

    fn wire(self) -> u8 {
        match self {
            Self::All => display::ALL,
            Self::One(channel) if channel.is_master() => display::MASTER_SCREEN,
            Self::One(channel) => channel.get(),
        }
    }
}

/// Display row addressing: a single row, or all five.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Row {
    All,
    One(u8),
}

impl Row {
    /// `0` addresses every row, `1..=5` a single one.
    pub fn from_number(num: u8) -> Option<Self> {
        match num as usize {
            0 => Some(Self::All),
            1..=display::ROWS => Some(Self::One(num)),
            _ => None,
        }
    }

    fn count(self) -> usize {
        match self {
            Self::All => display::ROWS,
            Self::One(_) => 1,
        }
    }

    fn wire(self) -> u8 {
        match self {
            Self::All => display::ALL,
            Self::One(row) => row,
        }
    }
}

/// Decodes one inbound message into a control event.
///
/// Unknown ids and malformed frames decode to `None`: the device sends
/// more than this driver models, and dropping beats misreading.
pub fn decode(buf: &[u8]) -> Option<Event> {
    let (&status, data) = buf.split_first()?;

    match status {
        button::TAG => decode_button(data),
        knob::TAG => decode_knob(data),
        fader::MASTER_TAG | fader::TAG_FIRST..=fader::TAG_LAST => decode_fader(status, data),
        _ => None,
    }
}

fn decode_button(data: &[u8]) -> Option<Event> {
    if data.len() < 2 {
        return None;
    }
    let (id, velocity) = (data[0], data[1]);
    let pressed = velocity == button::PRESSED;

    // The global block owns its id range outright, so it must be
    // resolved before the strip scan.
    if (global::LAYER_FIRST..=global::TEMPO).contains(&id) {
        return decode_global_button(id, pressed).map(Event::Global);
    }

    for channel in Channel::all() {
        let ids = StripIds::of(channel);

        use StripEvent::*;
        let event = if id == ids.select {
            if pressed {
                SelectPress
            } else {
                SelectRelease
            }
        } else if id == ids.solo {
            if pressed {
                SoloPress
            } else {
                SoloRelease
            }
        } else if id == ids.mute {
            if pressed {
                MutePress
            } else {
                MuteRelease
            }
        } else if id == ids.fader_touch {
            if pressed {
                FaderTouch
            } else {
                FaderRelease
            }
        } else {
            continue;
        };

        return Some(Event::Strip { channel, event });
    }

    None
}

fn decode_global_button(id: u8, pressed: bool) -> Option<GlobalEvent> {
    use GlobalEvent::*;

    match id {
        global::LAYER_FIRST..=global::LAYER_LAST => {
            let layer = id - global::LAYER_FIRST + 1;
            Some(if pressed {
                LayerPress(layer)
            } else {
                LayerRelease(layer)
            })
        }
        global::UTIL_FIRST..=global::UTIL_LAST => {
            let util = id - global::UTIL_FIRST + 1;
            Some(if pressed {
                UtilPress(util)
            } else {
                UtilRelease(util)
            })
        }
        global::TEMPO => Some(if pressed { TempoPress } else { TempoRelease }),
        // 0x48..=0x4f: reserved, nothing wired there
        _ => None,
    }
}

fn decode_knob(data: &[u8]) -> Option<Event> {
    if data.len() < 2 {
        return None;
    }
    let (id, raw) = (data[0], data[1]);
    if raw > 0x7f {
        return None;
    }

    let channel = Channel::all().find(|channel| StripIds::of(*channel).knob == id)?;

    Some(Event::Strip {
        channel,
        event: StripEvent::KnobTurn(knob_speed(raw)),
    })
}

/// Signed knob speed from the raw data byte.
///
/// `0x01..=0x3f` is clockwise as-is, `0x40` origin, `0x41..=0x7f`
/// counter clockwise as a distance from the origin.
pub fn knob_speed(raw: u8) -> i8 {
    let raw = raw & 0x7f;
    if raw >= knob::CCW_ORIGIN {
        -((raw - knob::CCW_ORIGIN) as i8)
    } else {
        raw as i8
    }
}

fn decode_fader(status: u8, data: &[u8]) -> Option<Event> {
    let channel = Channel::all().find(|channel| StripIds::of(*channel).fader_move == status)?;

    let position = match u14::from_data(data) {
        Ok(position) => position,
        Err(err) => {
            log::debug!("Dropping fader frame: {err}");
            return None;
        }
    };

    Some(Event::Strip {
        channel,
        event: StripEvent::FaderMove(position),
    })
}

/// `[0x90, id, velocity]` frame driving a button LED.
pub fn led(id: u8, on: bool) -> Msg {
    Msg::from([button::TAG, id, if on { button::ON } else { button::OFF }])
}

/// Fader move frame for `channel`, the position split LSB first.
pub fn fader_position(channel: Channel, position: u16) -> Msg {
    let [lsb, msb] = u14::to_data(position);

    Msg::from([StripIds::of(channel).fader_move, lsb, msb])
}

/// Display text frame for the given scope.
///
/// `text` is truncated, then right padded with spaces, to the exact byte
/// length the scope calls for. Bytes go to the wire as-is: the contract
/// is 7 bit ASCII, anything else (a stray `0xf7` in particular) is the
/// caller's problem.
pub fn display_text(screen: Screen, row: Row, text: &str) -> Msg {
    let max_len = display::COLUMNS * screen.count() * row.count();

    let mut payload = Vec::with_capacity(display::HEADER.len() + 2 + max_len);
    payload.extend_from_slice(&display::HEADER);
    payload.push(screen.wire());
    payload.push(row.wire());

    let text = text.as_bytes();
    let len = text.len().min(max_len);
    payload.extend_from_slice(&text[..len]);
    payload.resize(payload.len() + (max_len - len), b' ');

    Msg::new_sysex(&payload)
}
