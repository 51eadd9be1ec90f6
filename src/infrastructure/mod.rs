pub mod bot;
pub mod io;
