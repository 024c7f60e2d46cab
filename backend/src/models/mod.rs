pub mod period;
pub mod selection;
pub mod snapshot;
pub mod time;

pub use period::*;
pub use selection::*;
pub use snapshot::*;
pub use time::*;
