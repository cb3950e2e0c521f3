pub mod channel;
pub mod error;
pub mod file_type;
pub mod group;
pub mod header;
pub mod rates;

pub use channel::*;
pub use error::*;
pub use file_type::*;
pub use group::*;
pub use header::*;
pub use rates::*;
