//! Domain models for the tomato variety trial

mod access;
mod breeder;
mod cumulative;
mod record;
mod selection;

pub use access::*;
pub use breeder::*;
pub use cumulative::*;
pub use record::*;
pub use selection::*;
