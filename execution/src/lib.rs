pub mod roulette;

mod session;

pub use roulette::SpinRng;
pub use session::Session;
