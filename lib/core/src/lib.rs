pub mod error;
pub mod module;

pub use error::ServiceError;
pub use module::Module;
