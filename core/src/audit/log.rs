use crate::audit::event::{compute_event_hash, finalize_event, AuditEvent, ZERO_HASH_64};
use crate::error::{CoreError, CoreResult};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Append-only NDJSON log; each line links to the previous one by hash.
pub struct AuditLog {
    path: PathBuf,
    last_hash: String,
}

impl AuditLog {
    pub fn open_or_create(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            File::create(&path)?;
            return Ok(Self {
                path,
                last_hash: ZERO_HASH_64.to_string(),
            });
        }

        let last_hash = read_events(&path)?
            .last()
            .map(|e| e.event_hash.clone())
            .unwrap_or_else(|| ZERO_HASH_64.to_string());
        Ok(Self { path, last_hash })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, mut event: AuditEvent) -> CoreResult<AuditEvent> {
        event.prev_event_hash = self.last_hash.clone();
        if event.ts_utc.is_empty() {
            event.ts_utc = now_rfc3339_utc()?;
        }
        let event = finalize_event(event)?;
        let line = serde_json::to_string(&event)?;
        let mut f = OpenOptions::new().append(true).open(&self.path)?;
        f.write_all(line.as_bytes())?;
        f.write_all(b"\n")?;
        self.last_hash = event.event_hash.clone();
        Ok(event)
    }
}

pub fn read_events(path: impl AsRef<Path>) -> CoreResult<Vec<AuditEvent>> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}

/// Recompute every hash and check the prev links. Returns the event count.
pub fn verify_chain(path: impl AsRef<Path>) -> CoreResult<usize> {
    let events = read_events(path)?;
    let mut prev = ZERO_HASH_64.to_string();
    for (idx, ev) in events.iter().enumerate() {
        if ev.prev_event_hash != prev {
            return Err(CoreError::InvalidInput(format!(
                "audit chain broken at line {}: prev_event_hash mismatch",
                idx + 1
            )));
        }
        if compute_event_hash(ev)? != ev.event_hash {
            return Err(CoreError::InvalidInput(format!(
                "audit chain broken at line {}: event_hash mismatch",
                idx + 1
            )));
        }
        prev = ev.event_hash.clone();
    }
    Ok(events.len())
}

fn now_rfc3339_utc() -> CoreResult<String> {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .map_err(|e| CoreError::InvalidInput(format!("timestamp formatting failed: {}", e)))
}
