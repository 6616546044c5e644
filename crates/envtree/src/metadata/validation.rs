//! Metadata validations performed in compile time.

use compile_fmt::{CompileArgs, clip, compile_args, compile_panic, fmt};

use super::{ConfigMetadata, FieldKind};

#[derive(Debug)]
enum KeyError {
    Empty,
    DisallowedChar { pos: usize, ch: char },
}

type ErrorArgs = CompileArgs<128>;

impl KeyError {
    const fn fmt(self) -> ErrorArgs {
        match self {
            Self::Empty => compile_args!(capacity: ErrorArgs::CAPACITY, "key cannot be empty"),
            Self::DisallowedChar { pos, ch } => compile_args!(
                capacity: ErrorArgs::CAPACITY,
                "key contains a disallowed char '",
                ch => fmt::<char>(),
                "' at position ",
                pos => fmt::<usize>()
            ),
        }
    }
}

/// Env variable names cannot contain `=` or NUL chars on any supported platform.
const fn validate_key(key: &str) -> Result<(), KeyError> {
    if key.is_empty() {
        return Err(KeyError::Empty);
    }

    let key_bytes = key.as_bytes();
    let mut pos = 0;
    while pos < key_bytes.len() {
        let ch = key_bytes[pos];
        if ch == b'=' || ch == 0 {
            return Err(KeyError::DisallowedChar {
                pos,
                ch: ch as char,
            });
        }
        pos += 1;
    }
    Ok(())
}

/// Checks that an env variable name is valid.
#[track_caller]
pub(crate) const fn assert_env_key(key: &str) {
    if let Err(err) = validate_key(key) {
        compile_panic!(
            "Env variable key `", key => clip(32, "…"), "` is invalid: ",
            &err.fmt() => fmt::<&ErrorArgs>()
        );
    }
}

impl ConfigMetadata {
    /// Checks that all env variable keys in this config are valid. Nested configs are not checked;
    /// the derive macro generates a separate assertion for each config type.
    ///
    /// # Panics
    ///
    /// Panics if a key is empty or contains `=` or NUL chars. The derive macro calls this method
    /// in a constant context, so such keys are compile-time errors.
    ///
    /// ```
    /// # use envtree::DescribeConfig;
    /// #[derive(DescribeConfig)]
    /// struct TestConfig {
    ///     #[config(env = "APP_PORT")]
    ///     port: u16,
    /// }
    /// ```
    ///
    /// ```compile_fail
    /// # use envtree::DescribeConfig;
    /// #[derive(DescribeConfig)]
    /// struct TestConfig {
    ///     #[config(env = "APP=PORT")]
    ///     port: u16,
    /// }
    /// ```
    ///
    /// ```compile_fail
    /// # use envtree::DescribeConfig;
    /// #[derive(DescribeConfig)]
    /// struct TestConfig {
    ///     #[config(env = "")]
    ///     port: u16,
    /// }
    /// ```
    ///
    /// ```compile_fail
    /// # use envtree::DescribeConfig;
    /// #[derive(DescribeConfig)]
    /// struct TestConfig {
    ///     #[config(env = "APP_PORT\0")]
    ///     port: u16,
    /// }
    /// ```
    #[track_caller]
    pub const fn assert_valid(&self) {
        let mut i = 0;
        while i < self.fields.len() {
            if let FieldKind::Param(param) = &self.fields[i].kind {
                assert_env_key(param.env);
            }
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{FieldMetadata, ParamKind, ParamMetadata, RustType};

    #[test]
    fn validating_keys() {
        validate_key("APP_PORT").unwrap();
        validate_key("lower_case.and-dashes").unwrap();

        assert!(matches!(validate_key(""), Err(KeyError::Empty)));
        assert!(matches!(
            validate_key("A=B"),
            Err(KeyError::DisallowedChar { pos: 1, ch: '=' })
        ));
        assert!(matches!(
            validate_key("AB\0"),
            Err(KeyError::DisallowedChar { pos: 2, .. })
        ));
    }

    #[test]
    fn formatting_key_errors() {
        let err = KeyError::DisallowedChar { pos: 1, ch: '=' }.fmt();
        assert_eq!(
            err.as_str(),
            "key contains a disallowed char '=' at position 1"
        );
        let err = KeyError::DisallowedChar {
            pos: usize::MAX,
            ch: '\0',
        }
        .fmt();
        assert!(err.as_str().ends_with(&format!("at position {}", usize::MAX)));
        assert_eq!(KeyError::Empty.fmt().as_str(), "key cannot be empty");
    }

    #[test]
    #[should_panic(expected = "Env variable key `A=B` is invalid: key contains a disallowed char '=' at position 1")]
    fn invalid_key_panic_message() {
        assert_env_key("A=B");
    }

    #[test]
    #[should_panic(expected = "Env variable key `` is invalid: key cannot be empty")]
    fn empty_key_panic_message() {
        assert_env_key("");
    }

    #[test]
    #[should_panic(expected = "key contains a disallowed char '=' at position 2")]
    fn validating_config_metadata() {
        const METADATA: ConfigMetadata = ConfigMetadata {
            ty: RustType::of::<()>("TestConfig"),
            help: "",
            fields: &[FieldMetadata {
                rust_field_name: "port",
                help: "",
                required: "",
                kind: FieldKind::Param(ParamMetadata {
                    env: "AB=C",
                    allowed: "",
                    rust_type: RustType::of::<u16>("u16"),
                    kind: ParamKind::Uint { bits: 16 },
                }),
            }],
        };
        METADATA.assert_valid();
    }
}
