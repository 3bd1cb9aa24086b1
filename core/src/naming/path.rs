use crate::determinism::fingerprint::PATH_SEPARATOR;
use crate::error::{CoreError, CoreResult};

/// Split a `/`-joined node path into its components.
///
/// Every component must be non-empty, so leading, trailing or doubled
/// separators are rejected rather than silently dropped.
pub fn split_path(path: &str) -> CoreResult<Vec<String>> {
    if path.is_empty() {
        return Err(CoreError::EmptyPath);
    }
    let components: Vec<String> = path.split(PATH_SEPARATOR).map(str::to_string).collect();
    if let Some(idx) = components.iter().position(|c| c.is_empty()) {
        return Err(CoreError::InvalidInput(format!(
            "path {:?} has an empty component at position {}",
            path, idx
        )));
    }
    Ok(components)
}

pub fn join_path<S: AsRef<str>>(components: &[S]) -> String {
    components
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_separator() {
        assert_eq!(split_path("L1/L2/Pipeline").unwrap(), vec!["L1", "L2", "Pipeline"]);
        assert_eq!(split_path("Top").unwrap(), vec!["Top"]);
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(matches!(split_path(""), Err(CoreError::EmptyPath)));
    }

    #[test]
    fn empty_components_are_rejected() {
        for p in ["/A", "A/", "A//B", "/"] {
            assert!(
                matches!(split_path(p), Err(CoreError::InvalidInput(_))),
                "{} should be rejected",
                p
            );
        }
    }

    #[test]
    fn join_inverts_split() {
        let parts = split_path("A/B/C").unwrap();
        assert_eq!(join_path(&parts), "A/B/C");
    }
}
