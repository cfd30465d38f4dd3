pub mod instruction_utils;
pub mod message_utils;
pub mod nonce_utils;
pub mod pda_utils;

pub use instruction_utils::*;
pub use message_utils::*;
pub use nonce_utils::*;
pub use pda_utils::*;
