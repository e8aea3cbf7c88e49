pub mod account;
pub mod block;
pub mod connection;
pub mod token;
pub mod wire;

pub use account::*;
pub use block::*;
pub use connection::*;
pub use token::*;
