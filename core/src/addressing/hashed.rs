use crate::addressing::AddressingScheme;
use crate::determinism::fingerprint::path_fingerprint;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_SENTINEL: &str = "Resource";
pub const DEFAULT_MAX_HUMAN_LEN: usize = 240;
pub const DEFAULT_EMPTY_HUMAN_FALLBACK: &str = "R";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AddressingConfig {
    /// Component name hidden from the readable prefix.
    pub sentinel: String,
    pub max_human_len: usize,
    /// Used as the readable prefix when filtering leaves nothing, so the
    /// candidate never starts with a hex digit.
    pub empty_human_fallback: String,
}

impl Default for AddressingConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            max_human_len: DEFAULT_MAX_HUMAN_LEN,
            empty_human_fallback: DEFAULT_EMPTY_HUMAN_FALLBACK.to_string(),
        }
    }
}

/// Readable prefix + 8-char uppercase fingerprint of the full path.
///
/// Single-component paths are returned unchanged so top-level names stay
/// exactly as the user chose them.
#[derive(Debug, Clone, Default)]
pub struct HashedScheme {
    cfg: AddressingConfig,
}

impl HashedScheme {
    pub fn new(cfg: AddressingConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &AddressingConfig {
        &self.cfg
    }
}

impl AddressingScheme for HashedScheme {
    fn name(&self) -> &'static str {
        "hashed"
    }

    fn allocate(&self, path: &[String]) -> CoreResult<String> {
        match path {
            [] => Err(CoreError::EmptyPath),
            [only] => Ok(only.clone()),
            _ => {
                let hash = path_fingerprint(path);
                let mut human = human_prefix(path, &self.cfg);
                if human.is_empty() {
                    debug!(
                        "path {:?} filtered to an empty prefix, using fallback {:?}",
                        path, self.cfg.empty_human_fallback
                    );
                    human = self.cfg.empty_human_fallback.clone();
                }
                Ok(format!("{}{}", human, hash))
            }
        }
    }
}

/// Readable part of a hashed candidate, before any empty-prefix fallback.
///
/// Dedup is pairwise: a component is dropped when the previously kept one
/// ends with it, and each kept component absorbs at most one follower. So
/// `["A","A","A"]` keeps two components, not one.
pub fn human_prefix(path: &[String], cfg: &AddressingConfig) -> String {
    let mut kept: Vec<&str> = Vec::with_capacity(path.len());
    let mut last_absorbed = false;
    for comp in path {
        if let Some(prev) = kept.last() {
            if !last_absorbed && prev.ends_with(comp.as_str()) {
                last_absorbed = true;
                continue;
            }
        }
        kept.push(comp);
        last_absorbed = false;
    }
    let human: String = kept
        .into_iter()
        .filter(|c| *c != cfg.sentinel)
        .collect();
    human.chars().take(cfg.max_human_len).collect()
}
