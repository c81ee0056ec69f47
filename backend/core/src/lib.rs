pub mod error;
pub mod traits;
pub mod validation;

pub use error::NamingError;
pub use traits::NamingClient;
pub use validation::{validate_name, DEFAULT_MAX_NAME_LEN};
