mod ownership;
mod status_notice;

pub use ownership::*;
pub use status_notice::*;
