//! 输出端集成测试

mod common;

use common::{SAMPLE_TSV, tsv_info};
use load_data_stream::sink::{InsertSink, MemorySink, MultiSink};
use load_data_stream::{LoadSession, TableInfo};

#[test]
fn test_multi_sink_receives_every_statement() {
    let mut multi = MultiSink::new();
    multi.add_sink(MemorySink::new());
    multi.add_sink(MemorySink::new());

    let mut session =
        LoadSession::new(tsv_info(2), TableInfo::unsharded("t1"), vec![]);
    session.load_from_reader(SAMPLE_TSV.as_bytes(), &mut multi).unwrap();

    for (name, stats) in multi.get_all_stats() {
        assert_eq!(name, "memory");
        assert_eq!(stats.statements_flushed, 3);
        assert!(stats.end_time.is_some());
    }
    assert_eq!(multi.get_stats().statements_flushed, 6);
}

#[test]
fn test_boxed_dyn_sink() {
    let mut sink: Box<dyn InsertSink> = Box::new(MemorySink::new());
    let mut session =
        LoadSession::new(tsv_info(0), TableInfo::unsharded("t1"), vec![]);
    session.load_from_reader(SAMPLE_TSV.as_bytes(), sink.as_mut()).unwrap();
    assert_eq!(sink.get_stats().statements_flushed, 1);
}

#[cfg(feature = "sink-json")]
#[test]
fn test_jsonl_sink() {
    use load_data_stream::sink::JsonlSink;
    use tempfile::TempDir;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("load.jsonl");
    let mut sink = JsonlSink::new(&path).unwrap();

    let mut session =
        LoadSession::new(tsv_info(2), TableInfo::unsharded("t1"), vec![]);
    session.load_from_reader(SAMPLE_TSV.as_bytes(), &mut sink).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let values: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(values.len(), 3);
    assert_eq!(values[2]["seq"], 3);
    assert_eq!(
        values[2]["statement"],
        "INSERT IGNORE INTO t1 (id,name) values ('5','eve')"
    );
}
