pub mod location_messages;
pub mod storage_messages;

pub use location_messages::*;
pub use storage_messages::*;
