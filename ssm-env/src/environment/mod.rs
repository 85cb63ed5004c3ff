pub mod in_memory;
pub mod process;

pub use in_memory::InMemoryEnvironment;
pub use process::ProcessEnvironment;

use crate::error::LoaderError;

/// A settable string-to-string store that loaded parameters are written into.
pub trait Environment: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;

    /// Sets `name` to `value`, overwriting any previous value.
    fn set(&self, name: &str, value: &str) -> Result<(), LoaderError>;
}
