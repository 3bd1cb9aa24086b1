use logical_id_core::addressing::PassThroughScheme;
use logical_id_core::error::{CoreError, ErrorKind};
use logical_id_core::registry::{render_identifier_map_csv, IdentifierRegistry};

fn p(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn same_path_twice_is_idempotent() {
    let mut reg = IdentifierRegistry::hashed();
    let a = reg.resolve_str("Stack/Queue").unwrap();
    let b = reg.resolve_str("Stack/Queue").unwrap();
    assert_eq!(a, b);
}

#[test]
fn rename_is_applied_and_consumed() {
    let mut reg = IdentifierRegistry::hashed();
    reg.register_rename("LegacyBucket", "RenamedBucket").unwrap();
    assert_eq!(reg.resolve(&p(&["LegacyBucket"])).unwrap(), "RenamedBucket");
    reg.assert_all_renames_applied().unwrap();
    let bindings: Vec<_> = reg.bindings().collect();
    assert_eq!(bindings, vec![("RenamedBucket", "LegacyBucket")]);
}

#[test]
fn rename_of_hashed_candidate() {
    let mut reg = IdentifierRegistry::hashed();
    let candidate = IdentifierRegistry::hashed().resolve_str("Stack/Topic").unwrap();
    reg.register_rename(&candidate, "Topic").unwrap();
    assert_eq!(reg.resolve_str("Stack/Topic").unwrap(), "Topic");
}

#[test]
fn two_renames_onto_same_target_collide() {
    let mut reg = IdentifierRegistry::hashed();
    reg.register_rename("OldA", "Shared").unwrap();
    reg.register_rename("OldB", "Shared").unwrap();
    reg.resolve(&p(&["OldA"])).unwrap();
    let err = reg.resolve(&p(&["OldB"])).unwrap_err();
    match err {
        CoreError::IdentifierCollision {
            identifier,
            existing_original,
            conflicting_original,
        } => {
            assert_eq!(identifier, "Shared");
            assert_eq!(existing_original, "OldA");
            assert_eq!(conflicting_original, "OldB");
        }
        other => panic!("expected collision, got {:?}", other),
    }
}

#[test]
fn coinciding_candidates_from_different_paths_collide() {
    let mut reg = IdentifierRegistry::new(PassThroughScheme);
    reg.resolve(&p(&["Foo", "Bar"])).unwrap();
    let err = reg.resolve(&p(&["FooBar"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IDENTIFIER_COLLISION);
}

#[test]
fn unused_rename_is_reported() {
    let mut reg = IdentifierRegistry::hashed();
    reg.register_rename("OldA", "NewA").unwrap();
    reg.resolve(&p(&["Something"])).unwrap();
    match reg.assert_all_renames_applied() {
        Err(CoreError::UnusedRenames(list)) => assert_eq!(list, vec!["OldA".to_string()]),
        other => panic!("expected UnusedRenames, got {:?}", other),
    }
}

#[test]
fn unused_renames_are_sorted() {
    let mut reg = IdentifierRegistry::hashed();
    reg.register_rename("Zeta", "Z2").unwrap();
    reg.register_rename("Alpha", "A2").unwrap();
    reg.register_rename("Mid", "M2").unwrap();
    reg.resolve(&p(&["Mid"])).unwrap();
    assert_eq!(reg.unused_renames(), vec!["Alpha".to_string(), "Zeta".to_string()]);
}

#[test]
fn grammar_violations_rejected() {
    let mut reg = IdentifierRegistry::hashed();
    for bad in ["1Stack", "S", "Has-Dash"] {
        let err = reg.resolve(&p(&[bad])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::INVALID_IDENTIFIER_FORMAT, "{}", bad);
    }
    reg.register_rename("Good", "9Bad").unwrap();
    assert_eq!(
        reg.resolve(&p(&["Good"])).unwrap_err().kind(),
        ErrorKind::INVALID_IDENTIFIER_FORMAT
    );
    assert_eq!(reg.bindings().count(), 0);
}

#[test]
fn resolve_all_collects_every_problem() {
    let mut reg = IdentifierRegistry::new(PassThroughScheme);
    reg.register_rename("Typo", "Fixed").unwrap();
    let report = reg.resolve_all(["App/Db", "1bad", "AppDb", "", "App/Cache"]);

    assert_eq!(report.resolved.len(), 2);
    assert!(!report.is_clean());
    assert_eq!(report.problems_of(ErrorKind::INVALID_IDENTIFIER_FORMAT).count(), 1);
    assert_eq!(report.problems_of(ErrorKind::IDENTIFIER_COLLISION).count(), 1);
    assert_eq!(report.problems_of(ErrorKind::EMPTY_PATH).count(), 1);
    let unused: Vec<_> = report.problems_of(ErrorKind::UNUSED_RENAMES).collect();
    assert_eq!(unused.len(), 1);
    assert!(unused[0].path.is_none());
    assert!(unused[0].message.contains("Typo"));
}

#[test]
fn identifier_map_csv_sorted_by_path() {
    let mut reg = IdentifierRegistry::hashed();
    reg.register_rename("Zed", "ZedRenamed").unwrap();
    let report = reg.resolve_all(["Zed", "App/Db", "App/Db"]);
    assert!(report.is_clean());

    let csv = render_identifier_map_csv(report.resolved).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "path,candidate,final,renamed");
    assert!(lines[1].starts_with("App/Db,AppDb"));
    assert!(lines[1].ends_with(",false"));
    assert_eq!(lines[2], "Zed,Zed,ZedRenamed,true");
}
