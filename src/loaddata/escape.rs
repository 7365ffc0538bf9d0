//! 转义处理
//!
//! - `escape`：解码 LOAD DATA 字段中的反斜杠转义，同时把未转义的引号重新转义，
//!   使结果可以直接放入单引号 SQL 字面量。
//! - `mysql_escape`：把原始文本编码为 MySQL 字符串安全的形式。
//!
//! 只支持默认的 `\` 转义字符，不支持 `ESCAPED BY` 与 `\N`。

use crate::error::{LoadDataError, Result};
use crate::loaddata::types::Row;

/// 反斜杠之后的字节对应的实际字符，未知转义保持原样
#[must_use]
pub const fn escape_char(c: u8) -> u8 {
    match c {
        b'0' => 0,
        b'b' => 0x08,
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        b'Z' => 0x1A,
        b'\\' => b'\\',
        b'\'' => b'\'',
        b'"' => b'"',
        other => other,
    }
}

/// 解码单个字段
///
/// 输出长度不超过输入的两倍。末尾单独的反斜杠原样保留。
#[must_use]
pub fn escape(field: &[u8]) -> Vec<u8> {
    let mut desc = Vec::with_capacity(field.len() * 2);
    let mut i = 0;
    while i < field.len() {
        let c = field[i];
        if c == b'\\' && i + 1 < field.len() {
            desc.push(escape_char(field[i + 1]));
            i += 2;
            continue;
        }
        if c == b'"' || c == b'\'' {
            desc.push(b'\\');
        }
        desc.push(c);
        i += 1;
    }
    desc
}

/// 解码一组原始字段并转换为字符串
pub fn escape_cols(fields: &[&[u8]]) -> Row {
    fields
        .iter()
        .map(|field| bytes_to_string(escape(field)))
        .collect()
}

fn bytes_to_string(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            #[cfg(feature = "logging")]
            {
                let prefix_len = 8usize.min(bytes.len());
                tracing::warn!(
                    len = bytes.len(),
                    prefix = ?&bytes[..prefix_len],
                    "字段包含无效 UTF-8 字节序列，按有损方式转换"
                );
            }
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}

/// 将原始文本编码为 MySQL 字符串安全的形式
///
/// `\r` `\n` `\\` `'` `"` 以及 0x1A 会被转义，空输入返回 `EmptyInput`。
pub fn mysql_escape(source: &str) -> Result<String> {
    if source.is_empty() {
        return Err(LoadDataError::EmptyInput);
    }

    let mut desc = String::with_capacity(source.len() * 2);
    for c in source.chars() {
        let escaped = match c {
            '\r' => Some('r'),
            '\n' => Some('n'),
            '\\' => Some('\\'),
            '\'' => Some('\''),
            '"' => Some('"'),
            '\u{1a}' => Some('Z'),
            _ => None,
        };
        match escaped {
            Some(e) => {
                desc.push('\\');
                desc.push(e);
            }
            None => desc.push(c),
        }
    }
    Ok(desc)
}
