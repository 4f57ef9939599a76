mod media;
mod tweet;
mod user;

pub use media::*;
pub use tweet::*;
pub use user::*;
