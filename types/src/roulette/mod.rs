mod betting;
mod constants;
mod kaprekar;
mod session;
mod wheel;

pub use betting::*;
pub use constants::*;
pub use kaprekar::*;
pub use session::*;
pub use wheel::*;
