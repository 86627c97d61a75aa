//! Port definitions — traits that adapters and the imaging host implement.
//!
//! Ports are the boundaries between the plugins and the outside world.
//! They are defined here (in `app`) so that both the trigger layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod clock;
pub mod equipment;
pub mod localizer;
pub mod notifier;
pub mod progress;
pub mod time_source;

pub use clock::{Clock, ManualClock, SystemClock};
pub use equipment::EquipmentProvider;
pub use localizer::Localizer;
pub use notifier::Notifier;
pub use progress::{NullProgress, ProgressSink};
pub use time_source::{TimeContext, TimeSource};
