pub mod ledger;
pub mod report;

pub use ledger::IdentifierRegistry;
pub use report::{render_identifier_map_csv, NamingProblem, ResolutionReport, ResolvedIdentifier};
