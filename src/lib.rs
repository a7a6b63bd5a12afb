pub mod bytes;

pub mod midi;

pub mod surface;
pub use surface::FitSurface;
