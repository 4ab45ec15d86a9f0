pub mod interpolate;
pub mod resolve;

pub use interpolate::interpolate;
pub use resolve::resolve;
