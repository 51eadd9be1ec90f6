mod participant;

pub use participant::*;
