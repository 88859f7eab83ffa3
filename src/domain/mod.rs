pub mod forecast;
pub mod observation;

pub use forecast::*;
pub use observation::*;

/// Number of forecast horizons (t+1 .. t+6).
pub const HORIZONS: usize = 6;
