use crate::error::{CoreError, CoreResult, ErrorKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedIdentifier {
    pub path: String,
    pub candidate: String,
    pub final_id: String,
    pub renamed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamingProblem {
    pub path: Option<String>, // None for pass-level problems (unused renames)
    pub kind: ErrorKind,
    pub message: String,
}

impl NamingProblem {
    pub fn new(path: Option<&str>, err: &CoreError) -> Self {
        Self {
            path: path.map(str::to_string),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub resolved: Vec<ResolvedIdentifier>,
    pub problems: Vec<NamingProblem>,
}

impl ResolutionReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn problems_of(&self, kind: ErrorKind) -> impl Iterator<Item = &NamingProblem> {
        self.problems.iter().filter(move |p| p.kind == kind)
    }
}

pub fn render_identifier_map_csv(mut rows: Vec<ResolvedIdentifier>) -> CoreResult<String> {
    rows.sort_by(|a, b| a.path.cmp(&b.path));
    rows.dedup_by(|a, b| a.path == b.path);

    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);
    wtr.write_record(["path", "candidate", "final", "renamed"])?;
    for r in rows {
        wtr.write_record([
            r.path,
            r.candidate,
            r.final_id,
            r.renamed.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).replace("\r\n", "\n"))
}
