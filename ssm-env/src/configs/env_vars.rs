use std::env;

/// Returns the variable when it is set to something other than whitespace.
pub fn optional_env(env_name: &str) -> Option<String> {
    env::var(env_name).ok().filter(|v| !v.trim().is_empty())
}

pub fn env_or(env_name: &str, default: &str) -> String {
    optional_env(env_name).unwrap_or_else(|| default.to_string())
}

pub fn env_flag(env_name: &str) -> Result<bool, String> {
    match optional_env(env_name) {
        None => Ok(false),
        Some(v) => match v.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(format!(
                "Environment variable '{env_name}' must be a boolean, got '{other}'"
            )),
        },
    }
}
