use std::fs;
use std::path::Path;
use taxdb::convert::{convert_database, convert_map, convert_names};
use taxdb::identifiers::read_fasta_ids;
use taxdb::registry::Database;
use taxdb::TaxdbError;
use tempfile::TempDir;

const OLD_MAP: &str = "\
2\tBacteria\t0\t0.8
1\tRoot\t0\t0.5
10\tProteobacteria\t2\t0.9
7\tBacteria\t2\t-1
3\tRoot\t1\t-1
";

fn write_old(root: &Path) -> Database {
    let dir = root.join("originals").join("silvamod128");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("silvamod128.map"), OLD_MAP).unwrap();
    fs::write(dir.join("silvamod128.tre"), "(A,B)Root;\n").unwrap();
    fs::write(
        dir.join("silvamod128.fasta"),
        ">s1 desc\nACGU\n>s2\nUUAA\n>s1\nGGGG\n",
    )
    .unwrap();
    Database::from_registry("silvamod128", &root.join("originals")).unwrap()
}

#[test]
fn map_keeps_only_map_entries_sorted() {
    let root = TempDir::new().unwrap();
    let old = write_old(root.path());
    let out = root.path().join("out.map");
    assert_eq!(convert_map(&old.map_path(), &out).unwrap(), 2);
    assert_eq!(fs::read_to_string(out).unwrap(), "3,Root\n7,Bacteria\n");
}

#[test]
fn names_stop_at_first_map_entry() {
    let root = TempDir::new().unwrap();
    let old = write_old(root.path());
    let out = root.path().join("out.names");
    assert_eq!(convert_names(&old.map_path(), &out).unwrap(), 3);
    assert_eq!(
        fs::read_to_string(out).unwrap(),
        "1,Root,0.5\n2,Bacteria,0.8\n10,Proteobacteria,0.9\n"
    );
}

#[test]
fn comma_in_name_is_rejected() {
    let root = TempDir::new().unwrap();
    let old_map = root.path().join("old.map");
    fs::write(&old_map, "1\tRoot\t0\t-1\n2\tA, B\t1\t-1\n").unwrap();
    match convert_map(&old_map, &root.path().join("new.map")) {
        Err(TaxdbError::NameContainsComma { line, name, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(name, "A, B");
        }
        other => panic!("expected a comma error, got {:?}", other),
    }
}

#[test]
fn whole_database_is_converted() {
    let root = TempDir::new().unwrap();
    let old = write_old(root.path());
    let new = Database::from_registry("silvamod128", &root.path().join("databases")).unwrap();

    let summary = convert_database(&old, &new).unwrap();
    assert_eq!(summary.map_entries, 2);
    assert_eq!(summary.names_entries, 3);
    assert_eq!(summary.fasta.written, 2);
    assert_eq!(summary.fasta.duplicates_removed, 1);

    assert!(new.is_complete());
    assert_eq!(fs::read_to_string(new.tre_path()).unwrap(), "(A,B)Root;\n");
    assert_eq!(read_fasta_ids(&new.fasta_path()).unwrap(), vec!["s1", "s2"]);
    let fasta = fs::read_to_string(new.fasta_path()).unwrap();
    assert!(fasta.contains("ACGT"));
    assert!(fasta.contains("TTAA"));
    assert!(!fasta.contains('U'));
}
