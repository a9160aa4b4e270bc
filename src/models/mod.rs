pub mod actor;
pub mod appointment;
pub mod availability;
pub mod macros;
pub mod slot;

pub use actor::*;
pub use appointment::*;
pub use availability::*;
pub use slot::*;
