pub mod errors;
pub mod events;
pub mod types;

pub use errors::{ConfigError, EngineError, MozviewError};
pub use events::{Change, ChangeSink};
pub use types::{PointF, RectF, Size, SizeF};

pub type Result<T> = std::result::Result<T, MozviewError>;
