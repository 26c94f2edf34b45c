//! Platform-independent motion core.
//!
//! Nothing in here touches the DOM; the web glue feeds these types with
//! samples and timestamps and paints whatever they produce.

pub mod cursor;
pub mod field;
pub mod noise;
pub mod palette;
pub mod particles;
pub mod pointer;
pub mod scheduler;
pub mod scroll;
pub mod smoothing;
pub mod spring;
pub mod store;

pub use cursor::*;
pub use field::*;
pub use noise::*;
pub use palette::*;
pub use particles::*;
pub use pointer::*;
pub use scheduler::*;
pub use scroll::*;
pub use smoothing::*;
pub use spring::*;
pub use store::*;
