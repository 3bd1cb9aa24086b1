use crate::determinism::fingerprint::sha256_hex;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEvent {
    pub ts_utc: String, // RFC3339 UTC string
    pub event_type: String,
    pub pass_id: String,
    pub actor: Actor,
    pub details: serde_json::Value,
    pub prev_event_hash: String, // hex 64
    pub event_hash: String,      // hex 64
}

pub const ZERO_HASH_64: &str = "0000000000000000000000000000000000000000000000000000000000000000";

pub const EVENT_TYPES: &[&str] = &[
    "PASS_STARTED",
    "RENAME_REGISTERED",
    "IDENTIFIER_RESOLVED",
    "IDENTIFIER_REJECTED",
    "RENAMES_AUDIT_RESULT",
];

impl AuditEvent {
    pub fn new(event_type: &str, pass_id: &str, actor: Actor, details: serde_json::Value) -> Self {
        Self {
            ts_utc: String::new(),
            event_type: event_type.to_string(),
            pass_id: pass_id.to_string(),
            actor,
            details,
            prev_event_hash: String::new(),
            event_hash: String::new(),
        }
    }
}

// event_hash = SHA-256 over the JSON envelope with event_hash zeroed.
// serde_json::Map keeps keys sorted, so the bytes are stable.
pub fn compute_event_hash(event: &AuditEvent) -> CoreResult<String> {
    let mut e = event.clone();
    e.event_hash = ZERO_HASH_64.to_string();
    let bytes = serde_json::to_vec(&e)?;
    Ok(sha256_hex(&bytes))
}

pub fn finalize_event(mut event: AuditEvent) -> CoreResult<AuditEvent> {
    if !is_hex64(&event.prev_event_hash) {
        return Err(CoreError::InvalidInput(
            "prev_event_hash must be 64 hex chars".to_string(),
        ));
    }
    validate_event_taxonomy(&event)?;
    if has_float(&event.details) {
        return Err(CoreError::InvalidInput(
            "audit details must not contain non-integer numbers".to_string(),
        ));
    }
    event.event_hash = compute_event_hash(&event)?;
    Ok(event)
}

fn has_float(v: &serde_json::Value) -> bool {
    match v {
        serde_json::Value::Number(n) => !(n.is_i64() || n.is_u64()),
        serde_json::Value::Array(arr) => arr.iter().any(has_float),
        serde_json::Value::Object(map) => map.values().any(has_float),
        _ => false,
    }
}

pub(crate) fn is_hex64(s: &str) -> bool {
    s.len() == 64 && s.chars().all(|c| c.is_ascii_hexdigit())
}

fn validate_event_taxonomy(event: &AuditEvent) -> CoreResult<()> {
    if !EVENT_TYPES.contains(&event.event_type.as_str()) {
        return Err(CoreError::InvalidInput(format!(
            "unknown event_type {}",
            event.event_type
        )));
    }
    for k in required_detail_keys(&event.event_type) {
        if event.details.get(k).is_none() {
            return Err(CoreError::InvalidInput(format!(
                "event {} missing details.{}",
                event.event_type, k
            )));
        }
    }
    Ok(())
}

fn required_detail_keys(event_type: &str) -> &'static [&'static str] {
    match event_type {
        "PASS_STARTED" => &["addressing_scheme"],
        "RENAME_REGISTERED" => &["original", "override"],
        "IDENTIFIER_RESOLVED" => &["path", "candidate", "final", "renamed"],
        "IDENTIFIER_REJECTED" => &["path", "error_kind", "message"],
        "RENAMES_AUDIT_RESULT" => &["result", "unused"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AuditEvent {
        let mut ev = AuditEvent::new(
            "RENAME_REGISTERED",
            "p_1",
            Actor::User,
            serde_json::json!({"original": "OldA", "override": "NewA"}),
        );
        ev.ts_utc = "2026-02-10T00:00:00Z".to_string();
        ev.prev_event_hash = ZERO_HASH_64.to_string();
        ev
    }

    #[test]
    fn event_hash_is_stable() {
        let a = finalize_event(sample()).unwrap().event_hash;
        let b = finalize_event(sample()).unwrap().event_hash;
        assert_eq!(a, b);
        assert!(is_hex64(&a));
    }

    #[test]
    fn unknown_event_type_rejected() {
        let mut ev = sample();
        ev.event_type = "RUN_CREATED".to_string();
        assert!(finalize_event(ev).is_err());
    }

    #[test]
    fn hash_ignores_detail_key_order() {
        let mut a = sample();
        a.details = serde_json::json!({"override": "NewA", "original": "OldA"});
        assert_eq!(
            finalize_event(a).unwrap().event_hash,
            finalize_event(sample()).unwrap().event_hash
        );
    }

    #[test]
    fn float_details_rejected() {
        let mut ev = sample();
        ev.details = serde_json::json!({"original": "OldA", "override": "NewA", "w": [1, {"x": 0.5}]});
        let err = finalize_event(ev).unwrap_err().to_string();
        assert!(err.contains("non-integer"), "{}", err);
    }

    #[test]
    fn missing_detail_key_rejected() {
        let mut ev = sample();
        ev.details = serde_json::json!({"original": "OldA"});
        let err = finalize_event(ev).unwrap_err().to_string();
        assert!(err.contains("details.override"), "{}", err);
    }
}
