use std::env;

use crate::environment::Environment;
use crate::error::LoaderError;

/// The real process environment.
///
/// Writes are process-wide and immediately visible to `std::env::var`. The
/// environment is not synchronised here, so loading is expected to happen
/// once at startup before other threads read or write variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    pub fn new() -> Self {
        Self
    }

    fn validate(name: &str, value: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("name is empty".to_string());
        }
        if name.contains('=') {
            return Err("name contains '='".to_string());
        }
        if name.contains('\0') {
            return Err("name contains a NUL character".to_string());
        }
        if value.contains('\0') {
            return Err("value contains a NUL character".to_string());
        }
        Ok(())
    }
}

impl Environment for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn set(&self, name: &str, value: &str) -> Result<(), LoaderError> {
        Self::validate(name, value).map_err(|message| LoaderError::EnvironmentWrite {
            name: name.to_string(),
            message,
        })?;

        // SAFETY: variables are loaded at startup by a single caller.
        unsafe {
            env::set_var(name, value);
        }
        Ok(())
    }
}
