//! Testing tools for configurations.

use crate::{ConfigSource, DescribeConfig, FieldTree, KeySnapshot, ParseError, PopulateConfig};

/// Tests populating a config from the provided `sample`, starting from the default config value.
///
/// # Errors
///
/// Propagates parsing errors, which allows testing negative cases.
///
/// # Examples
///
/// ## Basic usage
///
/// ```
/// # use std::time::Duration;
/// use envtree::{testing, DescribeConfig, KeyValueMap, PopulateConfig};
///
/// #[derive(Default, DescribeConfig, PopulateConfig)]
/// struct TestConfig {
///     #[config(env = "TEST_FLAG")]
///     flag: bool,
///     #[config(env = "TEST_TIMEOUT")]
///     timeout: Duration,
/// }
///
/// let sample = KeyValueMap::new([("TEST_TIMEOUT", "2s")]);
/// let config: TestConfig = testing::test(sample)?;
/// assert!(!config.flag);
/// assert_eq!(config.timeout, Duration::from_secs(2));
/// # anyhow::Ok(())
/// ```
///
/// ## Testing errors
///
/// ```
/// # use envtree::{testing, DescribeConfig, KeyValueMap, PopulateConfig, ParseError};
/// #[derive(Debug, Default, DescribeConfig, PopulateConfig)]
/// struct TestConfig {
///     #[config(env = "TEST_FLAG", required = "true")]
///     flag: bool,
/// }
///
/// let sample = KeyValueMap::new([("TEST_FLAG", "no")]);
/// let err = testing::test::<TestConfig>(sample).unwrap_err();
/// let ParseError::Coercion(err) = err else { unreachable!() };
/// assert_eq!(err.key(), "TEST_FLAG");
/// assert_eq!(err.raw(), "no");
/// ```
pub fn test<C>(sample: impl ConfigSource) -> Result<C, ParseError>
where
    C: DescribeConfig + PopulateConfig + Default,
{
    crate::load_from(&sample)
}

/// Tests populating a config ensuring that *all* declared params are covered by the `sample`.
///
/// # Panics
///
/// Panics if the `sample` doesn't cover all params in the config (including params in nested configs).
/// The panic message will contain env variables for the missing params.
///
/// # Errors
///
/// Propagates parsing errors, which allows testing negative cases.
///
/// # Examples
///
/// ```should_panic
/// # use envtree::{testing, DescribeConfig, KeyValueMap, PopulateConfig};
/// #[derive(Default, DescribeConfig, PopulateConfig)]
/// struct TestConfig {
///     #[config(env = "TEST_FLAG")]
///     flag: bool,
///     #[config(env = "TEST_PORT")]
///     port: u16,
/// }
///
/// let incomplete_sample = KeyValueMap::new([("TEST_PORT", "8080")]);
/// // Will panic with a message detailing missing params (`TEST_FLAG` in this case)
/// testing::test_complete::<TestConfig>(incomplete_sample)?;
/// # anyhow::Ok(())
/// ```
#[track_caller]
pub fn test_complete<C>(sample: impl ConfigSource) -> Result<C, ParseError>
where
    C: DescribeConfig + PopulateConfig + Default,
{
    let (tree, snapshot) = resolve::<C>(&sample)?;
    let missing: Vec<_> = tree
        .leaves()
        .into_iter()
        .filter(|leaf| snapshot.get(leaf.leaf.key).is_none())
        .map(|leaf| format!("{} ({})", leaf.leaf.key, leaf.path))
        .collect();
    assert!(
        missing.is_empty(),
        "The provided sample is incomplete; missing params: {missing:?}"
    );
    populate(&tree, &snapshot)
}

/// Tests populating a config ensuring that *only* effectively required params are covered by the `sample`.
/// This is useful to detect new required params (i.e., backward-incompatible changes).
///
/// # Panics
///
/// Panics if the `sample` sets params that are not required given the sample contents.
///
/// # Errors
///
/// Propagates parsing errors, which allows testing negative cases.
#[track_caller]
pub fn test_minimal<C>(sample: impl ConfigSource) -> Result<C, ParseError>
where
    C: DescribeConfig + PopulateConfig + Default,
{
    let (tree, snapshot) = resolve::<C>(&sample)?;
    let redundant: Vec<_> = tree
        .leaves()
        .into_iter()
        .filter(|leaf| {
            snapshot.get(leaf.leaf.key).is_some() && !leaf.is_required(&snapshot)
        })
        .map(|leaf| format!("{} ({})", leaf.leaf.key, leaf.path))
        .collect();
    assert!(
        redundant.is_empty(),
        "The provided sample is not minimal; redundant params: {redundant:?}"
    );
    populate(&tree, &snapshot)
}

fn resolve<C: DescribeConfig>(
    sample: &impl ConfigSource,
) -> Result<(FieldTree, KeySnapshot), ParseError> {
    let tree = FieldTree::for_config::<C>()?;
    let snapshot = KeySnapshot::resolve(tree.referenced_keys(), sample);
    Ok((tree, snapshot))
}

fn populate<C>(tree: &FieldTree, snapshot: &KeySnapshot) -> Result<C, ParseError>
where
    C: PopulateConfig + Default,
{
    let mut config = C::default();
    tree.populate_from_snapshot(&mut config, snapshot)?;
    Ok(config)
}
