mod pointer;
mod scroll;

pub use pointer::*;
pub use scroll::*;
