use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use taxdb::ranks::{
    find_rank_conflicts, index_reader, write_conflicts, LineageRow, RankConflict, RankExample,
    TaxonRankIndex,
};
use taxdb::TaxdbError;
use tempfile::TempDir;

const ROWS: &str = "acc1\tX/Y\tY\nacc2\tX/Y/Y\tY\n";

fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

fn expected_y() -> RankConflict {
    RankConflict {
        name: "Y".to_string(),
        ranks: vec![2, 3],
        examples: vec![
            RankExample {
                rank: 2,
                accession: "acc1".to_string(),
            },
            RankExample {
                rank: 3,
                accession: "acc2".to_string(),
            },
        ],
    }
}

#[test]
fn name_at_two_ranks_is_a_conflict() {
    let index = index_reader(ROWS.as_bytes(), "rows").unwrap();
    assert_eq!(index.conflicts(), vec![expected_y()]);
}

#[test]
fn gzip_and_plain_give_the_same_conflicts() {
    let compressed = gzip(ROWS);
    let plain = index_reader(ROWS.as_bytes(), "plain").unwrap().conflicts();
    let unzipped = index_reader(&compressed[..], "gzip").unwrap().conflicts();
    assert_eq!(plain, unzipped);
}

#[test]
fn gzip_is_detected_by_content_not_extension() {
    let dir = TempDir::new().unwrap();
    let disguised = dir.path().join("lineages.tsv");
    fs::write(&disguised, gzip(ROWS)).unwrap();
    let plain = dir.path().join("lineages.tsv.gz");
    fs::write(&plain, ROWS).unwrap();
    assert_eq!(find_rank_conflicts(&disguised).unwrap(), vec![expected_y()]);
    assert_eq!(find_rank_conflicts(&plain).unwrap(), vec![expected_y()]);
}

#[test]
fn numeric_segments_do_not_shift_ranks() {
    let rows = "a1\tRoot/Clade/2/Genus\tGenus\na2\tRoot/Other/Genus\tGenus\n";
    let index = index_reader(rows.as_bytes(), "rows").unwrap();
    assert_eq!(index.ranks_of("Clade/2"), vec![2]);
    assert_eq!(index.ranks_of("Genus"), vec![3]);
    assert!(index.conflicts().is_empty());
}

#[test]
fn first_accession_per_rank_is_kept() {
    let rows = [
        LineageRow::parse("first\tA/B/C\tC", "rows", 1).unwrap(),
        LineageRow::parse("second\tA/B/C\tC", "rows", 2).unwrap(),
        LineageRow::parse("third\tA/C\tC", "rows", 3).unwrap(),
    ];
    let mut index = TaxonRankIndex::new();
    index.extend(rows.iter());
    assert_eq!(index.example_accession("C", 3), Some("first"));
    assert_eq!(index.example_accession("C", 2), Some("third"));
    assert_eq!(index.ranks_of("C"), vec![2, 3]);
}

#[test]
fn conflicts_are_sorted_by_name() {
    let rows = "a\tZ/B\tB\nb\tB/Z\tZ\n";
    let conflicts = index_reader(rows.as_bytes(), "rows").unwrap().conflicts();
    let names = conflicts.iter().map(|c| c.name.as_str()).collect::<Vec<&str>>();
    assert_eq!(names, vec!["B", "Z"]);
}

#[test]
fn malformed_row_aborts_the_scan() {
    let rows = "acc1\tX/Y\tY\nacc2\tX/Y\n";
    match index_reader(rows.as_bytes(), "rows") {
        Err(TaxdbError::MalformedRecord { line, found, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(found, 2);
        }
        other => panic!("expected a malformed record, got {:?}", other),
    }
}

#[test]
fn text_report_lists_accessions_per_rank() {
    let mut text = Vec::new();
    write_conflicts(&[expected_y()], &mut text).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert_eq!(
        text,
        "\nNames appearing at multiple ranks:\n\
         --------------------------------\n\
         \nY: appears at ranks [2, 3]\n\
         Example accessions:\n  - acc1 (rank 2)\n  - acc2 (rank 3)\n"
    );
}
