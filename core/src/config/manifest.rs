use crate::addressing::{AddressingConfig, AddressingScheme, HashedScheme};
use crate::error::{CoreError, CoreResult};
use crate::registry::IdentifierRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const MANIFEST_VERSION: &str = "logical_id_renames_v1";

/// Per-pass rename overrides, usually checked in next to the tree
/// definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameManifest {
    pub manifest_version: String,
    #[serde(default = "default_pass_id")]
    pub pass_id: String,
    #[serde(default)]
    pub renames: BTreeMap<String, String>, // original -> override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addressing: Option<AddressingConfig>,
}

fn default_pass_id() -> String {
    "pass".to_string()
}

impl RenameManifest {
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let m: RenameManifest = serde_json::from_str(json)?;
        if m.manifest_version != MANIFEST_VERSION {
            return Err(CoreError::InvalidInput(format!(
                "rename manifest version {:?} is not {}",
                m.manifest_version, MANIFEST_VERSION
            )));
        }
        Ok(m)
    }

    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Fresh registry for this pass: hashed scheme with the manifest's
    /// addressing settings, every rename registered.
    pub fn build_registry(&self) -> CoreResult<IdentifierRegistry<HashedScheme>> {
        let scheme = HashedScheme::new(self.addressing.clone().unwrap_or_default());
        let mut reg = IdentifierRegistry::new(scheme).with_pass_id(self.pass_id.clone());
        self.apply(&mut reg)?;
        Ok(reg)
    }

    pub fn apply<S: AddressingScheme>(&self, reg: &mut IdentifierRegistry<S>) -> CoreResult<()> {
        for (original, override_id) in &self.renames {
            reg.register_rename(original, override_id)?;
        }
        Ok(())
    }
}
