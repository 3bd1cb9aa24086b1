use logical_id_core::config::manifest::RenameManifest;
use logical_id_core::registry::{render_identifier_map_csv, IdentifierRegistry};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("usage: logical_id_resolver <paths.txt> [renames.json]");
        std::process::exit(2);
    }

    let paths_text = match std::fs::read_to_string(&args[1]) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("cannot read {}: {}", args[1], e);
            std::process::exit(2);
        }
    };
    // blank lines are separators, not empty paths
    let paths: Vec<&str> = paths_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let registry = match args.get(2) {
        Some(manifest_path) => {
            RenameManifest::load(manifest_path).and_then(|m| m.build_registry())
        }
        None => Ok(IdentifierRegistry::hashed()),
    };
    let mut registry = match registry {
        Ok(r) => r,
        Err(e) => {
            eprintln!("rename manifest error: {}", e);
            std::process::exit(2);
        }
    };

    let report = registry.resolve_all(paths);
    for p in &report.problems {
        eprintln!(
            "{} {} {}",
            p.kind.as_str(),
            p.path.as_deref().unwrap_or("-"),
            p.message
        );
    }

    let clean = report.is_clean();
    match render_identifier_map_csv(report.resolved) {
        Ok(csv) => print!("{}", csv),
        Err(e) => {
            eprintln!("render error: {}", e);
            std::process::exit(1);
        }
    }
    if !clean {
        std::process::exit(1);
    }
}
