use std::env;

use super::ConfigSource;

/// Config source backed by the process environment.
///
/// Variables with non-UTF-8 values are treated as unset; a warning is logged in this case.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment(());

impl Environment {
    /// Creates a source reading from the process environment.
    pub const fn new() -> Self {
        Self(())
    }
}

impl ConfigSource for Environment {
    fn lookup(&self, key: &str) -> Option<String> {
        match env::var_os(key)?.into_string() {
            Ok(value) => Some(value),
            Err(raw) => {
                tracing::warn!(key, ?raw, "env variable is not valid UTF-8; treating it as unset");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_env_variables() {
        // `PATH` is set basically everywhere, and we don't want to mutate the environment in tests.
        let path = env::var("PATH").ok();
        assert_eq!(Environment::new().lookup("PATH"), path);
        assert_eq!(
            Environment::new().lookup("ENVTREE_SURELY_UNSET_VARIABLE_1234"),
            None
        );
    }
}
