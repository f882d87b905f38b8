pub mod terminal;
pub mod session;
pub mod message;

pub use terminal::*;
pub use session::*;
pub use message::*;
