use super::strip::Channel;

/// A decoded inbound message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    Strip { channel: Channel, event: StripEvent },
    Global(GlobalEvent),
}

/// What one strip reported.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StripEvent {
    SelectPress,
    SelectRelease,
    SoloPress,
    SoloRelease,
    MutePress,
    MuteRelease,
    FaderTouch,
    FaderRelease,
    /// 14 bit fader position, `0..=16383`.
    FaderMove(u16),
    /// Signed knob speed, clockwise positive. Zero is still dispatched.
    KnobTurn(i8),
}

impl StripEvent {
    pub fn kind(self) -> StripEventKind {
        use StripEventKind as Kind;

        match self {
            Self::SelectPress => Kind::SelectPress,
            Self::SelectRelease => Kind::SelectRelease,
            Self::SoloPress => Kind::SoloPress,
            Self::SoloRelease => Kind::SoloRelease,
            Self::MutePress => Kind::MutePress,
            Self::MuteRelease => Kind::MuteRelease,
            Self::FaderTouch => Kind::FaderTouch,
            Self::FaderRelease => Kind::FaderRelease,
            Self::FaderMove(_) => Kind::FaderMove,
            Self::KnobTurn(_) => Kind::KnobTurn,
        }
    }
}

/// Callback table slot for [`StripEvent`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StripEventKind {
    SelectPress,
    SelectRelease,
    SoloPress,
    SoloRelease,
    MutePress,
    MuteRelease,
    FaderTouch,
    FaderRelease,
    FaderMove,
    KnobTurn,
}

impl StripEventKind {
    pub(crate) const COUNT: usize = 10;

    pub(crate) fn idx(self) -> usize {
        self as usize
    }
}

/// What the right hand button block reported.
///
/// Layer and utility numbers are `1..=8`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GlobalEvent {
    LayerPress(u8),
    LayerRelease(u8),
    UtilPress(u8),
    UtilRelease(u8),
    TempoPress,
    TempoRelease,
}

impl GlobalEvent {
    pub fn kind(self) -> GlobalEventKind {
        use GlobalEventKind as Kind;

        match self {
            Self::LayerPress(_) => Kind::LayerPress,
            Self::LayerRelease(_) => Kind::LayerRelease,
            Self::UtilPress(_) => Kind::UtilPress,
            Self::UtilRelease(_) => Kind::UtilRelease,
            Self::TempoPress => Kind::TempoPress,
            Self::TempoRelease => Kind::TempoRelease,
        }
    }
}

/// Callback table slot for [`GlobalEvent`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GlobalEventKind {
    LayerPress,
    LayerRelease,
    UtilPress,
    UtilRelease,
    TempoPress,
    TempoRelease,
}

impl GlobalEventKind {
    pub(crate) const COUNT: usize = 6;

    pub(crate) fn idx(self) -> usize {
        self as usize
    }
}
