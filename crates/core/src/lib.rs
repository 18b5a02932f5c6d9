pub mod error;
pub mod model;
pub mod schedule;
pub mod time;

pub use error::Error;
pub use time::Clock;
