mod account;
mod application;
mod job;

pub use account::*;
pub use application::*;
pub use job::*;
