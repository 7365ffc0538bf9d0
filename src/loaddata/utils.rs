//! 字节序列查找与拆分的工具函数

use std::borrow::Cow;

/// 在 `haystack` 中查找 `needle` 第一次出现的位置
#[must_use]
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// 在逻辑拼接 `prev ++ cur` 中从 `from` 开始查找 `needle`，不复制整个缓冲区。
///
/// 返回拼接坐标系下的位置。依次检查 `prev` 内部、跨越边界的窗口和 `cur` 内部，
/// 因此得到的总是第一个匹配。
#[must_use]
pub fn find_across(
    prev: &[u8],
    cur: &[u8],
    from: usize,
    needle: &[u8],
) -> Option<usize> {
    let prev_len = prev.len();
    if from >= prev_len {
        let skip = from - prev_len;
        return cur
            .get(skip..)
            .and_then(|body| find(body, needle))
            .map(|i| from + i);
    }

    if let Some(i) = find(&prev[from..], needle) {
        return Some(from + i);
    }

    // 跨越边界的匹配最多占用 cur 的前 needle.len() - 1 个字节
    if needle.len() > 1 {
        let head = prev_len.saturating_sub(needle.len() - 1).max(from);
        let tail = cur.len().min(needle.len() - 1);
        let mut window = Vec::with_capacity(prev_len - head + tail);
        window.extend_from_slice(&prev[head..]);
        window.extend_from_slice(&cur[..tail]);
        if let Some(i) = find(&window, needle) {
            return Some(head + i);
        }
    }

    find(cur, needle).map(|i| prev_len + i)
}

/// 取逻辑拼接 `prev ++ cur` 中 `[start, end)` 的字节，能借用时不分配
#[must_use]
pub fn slice_across<'a>(
    prev: &'a [u8],
    cur: &'a [u8],
    start: usize,
    end: usize,
) -> Cow<'a, [u8]> {
    let prev_len = prev.len();
    if end <= prev_len {
        Cow::Borrowed(&prev[start..end])
    } else if start >= prev_len {
        Cow::Borrowed(&cur[start - prev_len..end - prev_len])
    } else {
        let mut joined = Vec::with_capacity(end - start);
        joined.extend_from_slice(&prev[start..]);
        joined.extend_from_slice(&cur[..end - prev_len]);
        Cow::Owned(joined)
    }
}

/// 按分隔符拆分，语义与常见的 split 一致：空输入得到一个空片段
#[must_use]
pub fn split<'a>(data: &'a [u8], sep: &[u8]) -> Vec<&'a [u8]> {
    let mut parts = Vec::new();
    if sep.is_empty() {
        parts.push(data);
        return parts;
    }
    let mut start = 0;
    while let Some(i) = find(&data[start..], sep) {
        parts.push(&data[start..start + i]);
        start += i + sep.len();
    }
    parts.push(&data[start..]);
    parts
}

/// 不区分大小写比较列名
#[must_use]
pub fn equal_fold(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
