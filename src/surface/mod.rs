pub mod event;
pub use event::{Event, GlobalEvent, GlobalEventKind, StripEvent, StripEventKind};

mod fit;
pub use fit::{FitSurface, GlobalCallback, Led, Outputs, StripCallback, StripCtx};

pub mod protocol;

pub mod strip;
pub use strip::{Channel, StripIds};
