//! 集成测试公共模块

use load_data_stream::sink::MemorySink;
use load_data_stream::{
    FieldsInfo, LinesInfo, LoadDataInfo, LoadSession, TableInfo,
};

/// 标准测试数据：制表符分隔，换行结尾，最后一行没有终止符
#[allow(dead_code)]
pub const SAMPLE_TSV: &str = "1\talice\n2\tbob\n3\tcarol\n4\tdave\n5\teve";

/// 带行起始符、包围符和噪声的测试数据
#[allow(dead_code)]
pub const SAMPLE_ENCLOSED: &str = "xx>>\"1\",\"a,b\"\r\n>>\"2\",\"it's\"\r\nnoise>>\"3\",\"d\"";

/// 创建会话参数
#[allow(dead_code)]
pub fn load_info(
    columns: &[&str],
    lines: LinesInfo,
    fields: FieldsInfo,
    batch: usize,
) -> LoadDataInfo {
    let mut info = LoadDataInfo::new(
        "t1",
        columns.iter().map(|c| c.to_string()).collect(),
        lines,
        fields,
    )
    .expect("Failed to create load info");
    info.set_max_rows_in_batch(batch);
    info
}

/// `SAMPLE_TSV` 对应的会话参数
#[allow(dead_code)]
pub fn tsv_info(batch: usize) -> LoadDataInfo {
    load_info(&["id", "name"], LinesInfo::default(), FieldsInfo::default(), batch)
}

/// `SAMPLE_ENCLOSED` 对应的会话参数
#[allow(dead_code)]
pub fn enclosed_info(batch: usize) -> LoadDataInfo {
    load_info(
        &["id", "name"],
        LinesInfo::new(">>", "\r\n"),
        FieldsInfo::new(",", b'"'),
        batch,
    )
}

/// 按给定的块边界依次喂入数据，返回生成的全部语句
#[allow(dead_code)]
pub fn run_chunks(info: LoadDataInfo, chunks: &[&[u8]]) -> Vec<String> {
    let mut session = LoadSession::new(info, TableInfo::unsharded("t1"), vec![]);
    let mut sink = MemorySink::new();
    for chunk in chunks.iter().filter(|c| !c.is_empty()) {
        session.feed(chunk, &mut sink).expect("feed failed");
    }
    session.finish(&mut sink).expect("finish failed");
    sink.into_statements()
}

/// 按固定大小切块
#[allow(dead_code)]
pub fn run_fixed_chunks(
    info: LoadDataInfo,
    data: &[u8],
    chunk_size: usize,
) -> Vec<String> {
    let chunks: Vec<&[u8]> = data.chunks(chunk_size).collect();
    run_chunks(info, &chunks)
}
