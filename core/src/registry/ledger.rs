use crate::addressing::{AddressingScheme, HashedScheme};
use crate::audit::event::{Actor, AuditEvent};
use crate::audit::log::AuditLog;
use crate::error::{CoreError, CoreResult};
use crate::naming::grammar::validate_identifier;
use crate::naming::path::{join_path, split_path};
use crate::registry::report::{NamingProblem, ResolutionReport, ResolvedIdentifier};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Identifier ledger for one synthesis pass.
///
/// Owns the rename table (candidate -> override) and the reverse ledger
/// (final -> candidate and path that produced it). Neither table ever
/// shrinks; a new pass gets a new registry.
pub struct IdentifierRegistry<S: AddressingScheme = HashedScheme> {
    scheme: S,
    pass_id: String,
    renames: BTreeMap<String, String>,
    reverse: BTreeMap<String, Binding>,
    audit: Option<AuditLog>,
}

#[derive(Debug, Clone)]
struct Binding {
    candidate: String,
    path: String,
}

impl IdentifierRegistry<HashedScheme> {
    /// Registry over the default hashed scheme.
    pub fn hashed() -> Self {
        Self::new(HashedScheme::default())
    }
}

impl Default for IdentifierRegistry<HashedScheme> {
    fn default() -> Self {
        Self::hashed()
    }
}

impl<S: AddressingScheme> IdentifierRegistry<S> {
    pub fn new(scheme: S) -> Self {
        Self {
            scheme,
            pass_id: "pass".to_string(),
            renames: BTreeMap::new(),
            reverse: BTreeMap::new(),
            audit: None,
        }
    }

    pub fn with_pass_id(mut self, pass_id: impl Into<String>) -> Self {
        self.pass_id = pass_id.into();
        self
    }

    /// Attach an audit trail. Every later mutation is recorded before it
    /// is applied.
    pub fn with_audit(mut self, mut audit: AuditLog) -> CoreResult<Self> {
        audit.append(AuditEvent::new(
            "PASS_STARTED",
            &self.pass_id,
            Actor::System,
            json!({ "addressing_scheme": self.scheme.name() }),
        ))?;
        self.audit = Some(audit);
        Ok(self)
    }

    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    pub fn pass_id(&self) -> &str {
        &self.pass_id
    }

    pub fn renames(&self) -> &BTreeMap<String, String> {
        &self.renames
    }

    /// `(final, original candidate)` pairs in final-identifier order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.reverse
            .iter()
            .map(|(f, b)| (f.as_str(), b.candidate.as_str()))
    }

    pub fn register_rename(&mut self, original: &str, override_id: &str) -> CoreResult<()> {
        if let Some(existing) = self.renames.get(original) {
            return Err(CoreError::DuplicateRename {
                original: original.to_string(),
                existing: existing.clone(),
                attempted: override_id.to_string(),
            });
        }
        self.record(
            "RENAME_REGISTERED",
            Actor::User,
            json!({ "original": original, "override": override_id }),
        )?;
        debug!("rename registered: {} -> {}", original, override_id);
        self.renames
            .insert(original.to_string(), override_id.to_string());
        Ok(())
    }

    pub fn resolve(&mut self, path: &[String]) -> CoreResult<String> {
        self.resolve_detailed(path).map(|r| r.final_id)
    }

    pub fn resolve_str(&mut self, path: &str) -> CoreResult<String> {
        self.resolve_str_detailed(path).map(|r| r.final_id)
    }

    /// Splits a `/`-joined path and resolves it. Malformed path strings are
    /// recorded as rejections like any other failure.
    pub fn resolve_str_detailed(&mut self, path: &str) -> CoreResult<ResolvedIdentifier> {
        match split_path(path) {
            Ok(components) => self.resolve_detailed(&components),
            Err(e) => {
                self.record_rejection(path, &e);
                Err(e)
            }
        }
    }

    /// Like [`resolve`](Self::resolve) but also reports the candidate and
    /// whether a rename was applied. On failure the ledger is untouched.
    pub fn resolve_detailed(&mut self, path: &[String]) -> CoreResult<ResolvedIdentifier> {
        let resolved = match self.check(path) {
            Ok(r) => r,
            Err(e) => {
                self.record_rejection(&join_path(path), &e);
                return Err(e);
            }
        };

        if !self.reverse.contains_key(&resolved.final_id) {
            self.record(
                "IDENTIFIER_RESOLVED",
                Actor::System,
                json!({
                    "path": resolved.path,
                    "candidate": resolved.candidate,
                    "final": resolved.final_id,
                    "renamed": resolved.renamed,
                }),
            )?;
            self.reverse.insert(
                resolved.final_id.clone(),
                Binding {
                    candidate: resolved.candidate.clone(),
                    path: resolved.path.clone(),
                },
            );
        }
        Ok(resolved)
    }

    // Pure part of resolve: computes and validates without touching state.
    fn check(&self, path: &[String]) -> CoreResult<ResolvedIdentifier> {
        let candidate = self.scheme.allocate(path)?;
        let (final_id, renamed) = match self.renames.get(&candidate) {
            Some(o) => (o.clone(), true),
            None => (candidate.clone(), false),
        };
        validate_identifier(&final_id)?;
        let joined = join_path(path);
        if let Some(existing) = self.reverse.get(&final_id) {
            // Different candidates name the conflict by candidate; equal
            // candidates from different paths name it by path.
            if existing.candidate != candidate {
                return Err(CoreError::IdentifierCollision {
                    identifier: final_id,
                    existing_original: existing.candidate.clone(),
                    conflicting_original: candidate,
                });
            }
            if existing.path != joined {
                return Err(CoreError::IdentifierCollision {
                    identifier: final_id,
                    existing_original: existing.path.clone(),
                    conflicting_original: joined,
                });
            }
        }
        Ok(ResolvedIdentifier {
            path: joined,
            candidate,
            final_id,
            renamed,
        })
    }

    /// Registered originals that no resolve call has produced, sorted.
    pub fn unused_renames(&self) -> Vec<String> {
        let mut unused: BTreeSet<&String> = self.renames.keys().collect();
        for binding in self.reverse.values() {
            unused.remove(&binding.candidate);
        }
        unused.into_iter().cloned().collect()
    }

    /// Call once, after every node of the pass has been resolved.
    pub fn assert_all_renames_applied(&mut self) -> CoreResult<()> {
        let unused = self.unused_renames();
        self.record(
            "RENAMES_AUDIT_RESULT",
            Actor::System,
            json!({
                "result": if unused.is_empty() { "PASS" } else { "FAIL" },
                "unused": unused,
            }),
        )?;
        if unused.is_empty() {
            Ok(())
        } else {
            warn!("{} rename(s) never applied: {:?}", unused.len(), unused);
            Err(CoreError::UnusedRenames(unused))
        }
    }

    /// Resolve every `/`-joined path and then audit renames, collecting all
    /// problems instead of stopping at the first.
    pub fn resolve_all<I, P>(&mut self, paths: I) -> ResolutionReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let mut report = ResolutionReport::default();
        for p in paths {
            let p = p.as_ref();
            match self.resolve_str_detailed(p) {
                Ok(r) => report.resolved.push(r),
                Err(e) => report.problems.push(NamingProblem::new(Some(p), &e)),
            }
        }
        if let Err(e) = self.assert_all_renames_applied() {
            report.problems.push(NamingProblem::new(None, &e));
        }
        report
    }

    fn record(
        &mut self,
        event_type: &str,
        actor: Actor,
        details: serde_json::Value,
    ) -> CoreResult<()> {
        if let Some(audit) = self.audit.as_mut() {
            audit.append(AuditEvent::new(event_type, &self.pass_id, actor, details))?;
        }
        Ok(())
    }

    fn record_rejection(&mut self, path: &str, err: &CoreError) {
        debug!("path {:?} rejected: {}", path, err);
        let details = json!({
            "path": path,
            "error_kind": err.kind().as_str(),
            "message": err.to_string(),
        });
        if let Err(audit_err) = self.record("IDENTIFIER_REJECTED", Actor::System, details) {
            warn!("failed to record rejection in audit log: {}", audit_err);
        }
    }
}
