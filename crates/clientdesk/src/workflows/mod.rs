pub mod booking;
pub mod intake;
pub mod wizard;
