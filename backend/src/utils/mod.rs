pub mod cookies;
pub mod password;
pub mod token;

pub use cookies::*;
pub use password::*;
pub use token::*;
