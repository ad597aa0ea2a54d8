mod common;

use common::{Basic, Empty, Inner, init_logging, sample_basic, sample_collection};
use pod_visit::{
    ByteUnit, KB, KiB, ReportStyle, account, convert, file_size, plain_bytes, plain_seq_bytes,
    print_size, print_size_with, save, to_bytes, words_for,
};

#[test]
fn test_basic_breakdown() {
    init_logging();
    let root = account(&mut sample_basic()).unwrap();
    assert_eq!(root.bytes, 68);
    assert_eq!(root.depth, 0);

    let fields: Vec<(&str, u64)> = root
        .children
        .iter()
        .map(|c| (c.label.as_str(), c.bytes))
        .collect();
    assert_eq!(
        fields,
        [("x", 4), ("y", 4), ("z", 8), ("data1", 20), ("data2", 32)]
    );
    assert!(root.children.iter().all(|c| c.depth == 1 && c.children.is_empty()));
}

#[test]
fn test_sequence_of_composites_breakdown() {
    let mut v = sample_collection();
    let root = account(&mut v).unwrap();

    let items = root.child("items").unwrap();
    assert_eq!(items.depth, 1);
    assert_eq!(items.children.len(), 10);
    let element_sum: u64 = items.children.iter().map(|c| c.bytes).sum();
    assert_eq!(items.bytes, 8 + element_sum);

    let first = items.child("[0]").unwrap();
    assert_eq!(first.depth, 2);
    // x + (count + 4 u64s)
    assert_eq!(first.bytes, 4 + 8 + 4 * 8);
    assert_eq!(first.child("data").unwrap().depth, 3);

    let last = items.child("[9]").unwrap();
    assert_eq!(last.bytes, 4 + 8 + 2048 * 8);

    let rows = root.child("rows").unwrap();
    assert_eq!(rows.bytes, 8 + 13 * (8 + 5 * 8));

    let header = root.child("header").unwrap();
    assert_eq!(header.bytes, 4 + 8 + 13 * 4);
}

#[test]
fn test_size_matches_written_bytes() {
    let mut v = sample_collection();
    let accounted = account(&mut v).unwrap().bytes;
    assert_eq!(accounted, to_bytes(&mut v).unwrap().len() as u64);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sized.bin");
    assert_eq!(save(&mut v, &path).unwrap(), accounted);
    assert_eq!(file_size(&path).unwrap(), accounted);
}

#[test]
fn test_empty_sequence_accounts_prefix() {
    let root = account(&mut Basic::<u8, u8>::default()).unwrap();
    assert_eq!(root.child("data1").unwrap().bytes, 8);
    assert_eq!(root.bytes, 32);
}

#[test]
fn test_print_size_report() {
    let mut out = Vec::new();
    let total = print_size(&mut sample_basic(), &mut out).unwrap();
    assert_eq!(total, 68);

    let report = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].ends_with(": 68 bytes (100.00%)"), "{}", lines[0]);
    assert!(lines[0].contains("Basic"));
    assert_eq!(lines[1], "    x: 4 bytes (5.88%)");
    assert_eq!(lines[4], "    data1: 20 bytes (29.41%)");
    assert_eq!(lines[5], "    data2: 32 bytes (47.06%)");
}

#[test]
fn test_report_nesting_and_style() {
    let mut v = Inner::<Vec<u8>> {
        x: 1,
        data: vec![vec![1, 2, 3, 4], vec![]],
    };
    let style = ReportStyle {
        indent: 2,
        unit: ByteUnit::KiB,
    };
    let mut out = Vec::new();
    let total = print_size_with(&mut v, &mut out, style).unwrap();
    // 4 + 8 + (8 + 4) + 8
    assert_eq!(total, 32);

    let report = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[1], "  x: 0.004 KiB (12.50%)");
    assert_eq!(lines[2], "  data: 0.027 KiB (87.50%)");
    assert_eq!(lines[3], "    [0]: 0.012 KiB (37.50%)");
    assert_eq!(lines[4], "    [1]: 0.008 KiB (25.00%)");
}

#[test]
fn test_display_matches_default_report() {
    let root = account(&mut sample_basic()).unwrap();
    let mut out = Vec::new();
    print_size(&mut sample_basic(), &mut out).unwrap();
    assert_eq!(root.to_string(), String::from_utf8(out).unwrap());
}

#[test]
fn test_zero_total_percentages() {
    let root = account(&mut Empty).unwrap();
    assert_eq!(root.bytes, 0);
    assert!(root.children.is_empty());
    assert!(root.to_string().ends_with(": 0 bytes (0.00%)\n"));
}

#[test]
fn test_size_tree_json_export() {
    let root = account(&mut sample_basic()).unwrap();
    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(json["bytes"], 68);
    assert_eq!(json["depth"], 0);
    assert_eq!(json["children"][3]["label"], "data1");
    assert_eq!(json["children"][3]["bytes"], 20);
    assert!(json["children"][3]["children"].as_array().unwrap().is_empty());
}

#[test]
fn test_plain_size_helpers() {
    assert_eq!(plain_bytes::<u64>(), 8);
    assert_eq!(plain_bytes::<[u16; 3]>(), 6);
    assert_eq!(plain_seq_bytes(&[1i32, 2, 3]), 20);
    assert_eq!(plain_seq_bytes::<f64>(&[]), 8);
}

#[test]
fn test_units() {
    assert_eq!(KB, 1000);
    assert_eq!(KiB, 1024);
    assert_eq!(convert(1536, KiB), 1.5);
    assert_eq!(convert(2500, KB), 2.5);
    assert_eq!(ByteUnit::MiB.factor(), 1 << 20);
    assert_eq!(ByteUnit::Bytes.format(12), "12 bytes");
    assert_eq!(ByteUnit::KB.format(1500), "1.500 KB");

    assert_eq!(words_for::<u64>(0), 0);
    assert_eq!(words_for::<u64>(64), 1);
    assert_eq!(words_for::<u64>(65), 2);
    assert_eq!(words_for::<u32>(65), 3);
}

#[test]
fn test_file_size_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = file_size(dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, pod_visit::Error::Open { .. }));
}
