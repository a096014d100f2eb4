mod date;
mod generic;
mod timestamp;

pub use date::OptionalDateTypeHandler;
pub use generic::{null_type_for, OptionalScalar, OptionalTypeHandler};
pub use timestamp::{OptionalTimestampTypeHandler, DEFAULT_READ_OFFSET_SECS};
