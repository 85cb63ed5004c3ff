use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::environment::Environment;
use crate::error::LoaderError;

/// Map-backed environment so loads can be exercised without touching the
/// real process state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEnvironment {
    vars: Arc<RwLock<HashMap<String, String>>>,
    rejected: Arc<RwLock<HashSet<String>>>,
    writes: Arc<RwLock<Vec<String>>>,
}

impl InMemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let environment = Self::new();
        {
            let mut map = environment.vars.write().unwrap();
            for (name, value) in vars {
                map.insert(name.into(), value.into());
            }
        }
        environment
    }

    /// Makes every later `set` of `name` fail.
    pub fn reject(&self, name: impl Into<String>) {
        self.rejected.write().unwrap().insert(name.into());
    }

    pub fn len(&self) -> usize {
        self.vars.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.vars.read().unwrap().clone()
    }

    /// Names passed to successful `set` calls, in call order.
    pub fn writes(&self) -> Vec<String> {
        self.writes.read().unwrap().clone()
    }
}

impl Environment for InMemoryEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.read().unwrap().get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) -> Result<(), LoaderError> {
        if self.rejected.read().unwrap().contains(name) {
            return Err(LoaderError::EnvironmentWrite {
                name: name.to_string(),
                message: "rejected by environment".to_string(),
            });
        }
        self.vars
            .write()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        self.writes.write().unwrap().push(name.to_string());
        Ok(())
    }
}
