pub mod handoff;
pub mod launcher;
pub mod registry;
pub mod roster;
pub mod storage;
pub mod terminal;
pub mod window;

pub use handoff::*;
pub use launcher::*;
pub use registry::*;
pub use roster::*;
pub use storage::*;
pub use terminal::*;
pub use window::*;
