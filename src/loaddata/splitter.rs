//! 字段拆分

use crate::error::{LoadDataError, Result};
use crate::loaddata::escape::escape_cols;
use crate::loaddata::types::{LoadDataInfo, Row};
use crate::loaddata::utils::split;

impl LoadDataInfo {
    /// 按 FIELDS 子句把一行拆分为字段。
    ///
    /// 启用包围符时整行必须以包围符开始并结束，去掉首尾包围符后以
    /// `包围符 + 分隔符 + 包围符` 拆分，所以包围符内部的分隔符不会拆开字段。
    /// 每个字段都会经过 `escape` 解码。
    pub fn row_from_line(&self, line: &[u8]) -> Result<Row> {
        let terminated = self.fields_info.terminated.as_slice();
        let Some(enclosed) = self.fields_info.enclosed else {
            return Ok(escape_cols(&split(line, terminated)));
        };

        let wrapped = line.len() >= 2
            && line[0] == enclosed
            && line[line.len() - 1] == enclosed;
        if !wrapped {
            return Err(LoadDataError::malformed_record(line, enclosed));
        }

        let mut sep = Vec::with_capacity(terminated.len() + 2);
        sep.push(enclosed);
        sep.extend_from_slice(terminated);
        sep.push(enclosed);

        Ok(escape_cols(&split(&line[1..line.len() - 1], &sep)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaddata::types::{FieldsInfo, LinesInfo};

    fn info(terminated: &str, enclosed: u8) -> LoadDataInfo {
        LoadDataInfo::new(
            "t",
            vec![],
            LinesInfo::default(),
            FieldsInfo::new(terminated, enclosed),
        )
        .unwrap()
    }

    #[test]
    fn test_row_from_line_enclosed() {
        let tests: Vec<(&str, Vec<String>)> = vec![
            (
                r#""1","a string","100.20""#,
                vec!["1".into(), "a string".into(), "100.20".into()],
            ),
            (
                r#""2","a string containing a , comma","102.20""#,
                vec![
                    "2".into(),
                    "a string containing a , comma".into(),
                    "102.20".into(),
                ],
            ),
            (
                r#""3","a string containing a \" quote","102.20""#,
                vec![
                    "3".into(),
                    "a string containing a \" quote".into(),
                    "102.20".into(),
                ],
            ),
            (
                r#""4","a string containing a \", quote and comma","102.20""#,
                vec![
                    "4".into(),
                    "a string containing a \", quote and comma".into(),
                    "102.20".into(),
                ],
            ),
            // 转义字符
            (
                r#""\0\b\n\r\t\Z\\\  \c\'\"""#,
                vec![
                    String::from_utf8(vec![
                        0, 0x08, b'\n', b'\r', b'\t', 26, b'\\', b' ', b' ',
                        b'c', b'\'', b'"',
                    ])
                    .unwrap(),
                ],
            ),
            (
                r#""5","a string containing a ',single quote and comma","102.20""#,
                vec![
                    "5".into(),
                    r"a string containing a \',single quote and comma".into(),
                    "102.20".into(),
                ],
            ),
            (
                r#""6","a string containing a " quote","102.20""#,
                vec![
                    "6".into(),
                    r#"a string containing a \" quote"#.into(),
                    "102.20".into(),
                ],
            ),
        ];

        let l = info(",", b'"');
        for (input, expected) in tests {
            let got = l.row_from_line(input.as_bytes()).unwrap();
            assert_eq!(got, expected, "input: {input}");
        }
    }

    #[test]
    fn test_row_from_line_plain() {
        let l = info("\t", 0);
        let got = l.row_from_line(b"1\tabc\t").unwrap();
        assert_eq!(got, vec!["1", "abc", ""]);
    }

    #[test]
    fn test_row_from_line_multi_byte_terminator() {
        let l = info("||", 0);
        let got = l.row_from_line(b"a||b|c||d").unwrap();
        assert_eq!(got, vec!["a", "b|c", "d"]);
    }

    #[test]
    fn test_missing_enclosure_is_malformed() {
        let l = info(",", b'"');
        let lines: [&[u8]; 4] = [b"1,2", b"\"1\",2", b"\"", b""];
        for line in lines {
            let err = l.row_from_line(line).unwrap_err();
            assert!(err.is_malformed_record());
        }
    }

    #[test]
    fn test_space_enclosure_means_none() {
        let l = info(",", b' ');
        let got = l.row_from_line(b" a , b ").unwrap();
        assert_eq!(got, vec![" a ", " b "]);
    }
}
