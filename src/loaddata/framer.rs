//! 行切分 - 在两个独立读缓冲区之间拼接行起始符与行终止符
//!
//! 网络层交付的数据块不会按行对齐：行起始符（`LINES STARTING BY`）与行终止符
//! （`LINES TERMINATED BY`）都可能被切成两半。`get_line` 每次接收上一次遗留的
//! 数据 `prev` 与新到达的数据 `cur`，返回下一条完整的行，以及尚未消费的剩余部分。
//!
//! ```text
//!   prev            cur
//! ┌────────┐┌──────────────────────────┐
//! │..ST    ││ART field,field END ST... │
//! └────────┘└──────────────────────────┘
//!     └─ valid_data 重新对齐到起始符
//!              └─ find_across 查找终止符（可能跨越边界）
//!                                 └─ 剩余部分 = carry ++ rest
//! ```
//!
//! 剩余部分总是 `prev` 的一个后缀（`carry`）加上 `cur` 的一个后缀（`rest`），
//! 所以调用方只需在一次 `insert_data` 结束时复制一次，一个数据块内有多少行都不会
//! 产生重复拷贝。

use crate::loaddata::types::LoadDataInfo;
use crate::loaddata::utils::{find_across, slice_across};
use std::borrow::Cow;

/// 一次行切分的结果
#[derive(Debug)]
pub struct LineFrame<'a> {
    /// 起始符与终止符之间的字节，`None` 表示需要更多数据
    pub line: Option<Cow<'a, [u8]>>,
    /// 剩余部分中来自 `prev` 的后缀
    pub carry: &'a [u8],
    /// 剩余部分中来自 `cur` 的后缀
    pub rest: &'a [u8],
    /// 是否找到了行起始符
    pub has_starting: bool,
}

impl LineFrame<'_> {
    /// 物化剩余部分
    pub fn remainder(&self) -> Vec<u8> {
        [self.carry, self.rest].concat()
    }
}

/// 重新对齐到行起始符后的数据
struct Realigned<'a> {
    prev: &'a [u8],
    cur: &'a [u8],
    found: bool,
}

impl LoadDataInfo {
    /// 返回从行起始符开始的 `prev` 与 `cur`。
    ///
    /// - 起始符为空时任意位置都是行首，原样返回。
    /// - 起始符在 `prev` 内或横跨 `prev` 与 `cur` 时保留 `prev` 中从起始符开始的部分。
    /// - 起始符只在 `cur` 内时丢弃 `prev`，`cur` 从起始符开始。
    /// - 找不到起始符时只保留末尾 `起始符长度 - 1` 个字节，它们可能与后续数据组成起始符。
    fn valid_data<'a>(&self, prev: &'a [u8], cur: &'a [u8]) -> Realigned<'a> {
        let starting = self.lines_info.starting.as_slice();
        if starting.is_empty() {
            return Realigned { prev, cur, found: true };
        }

        match find_across(prev, cur, 0, starting) {
            Some(idx) if idx < prev.len() => {
                Realigned { prev: &prev[idx..], cur, found: true }
            }
            Some(idx) => Realigned {
                prev: &[],
                cur: &cur[idx - prev.len()..],
                found: true,
            },
            None => {
                let keep = starting.len() - 1;
                if cur.len() >= keep {
                    Realigned {
                        prev: &[],
                        cur: &cur[cur.len() - keep..],
                        found: false,
                    }
                } else {
                    let from = prev.len().saturating_sub(keep - cur.len());
                    Realigned { prev: &prev[from..], cur, found: false }
                }
            }
        }
    }

    /// 从 `prev ++ cur` 中切出下一行。
    ///
    /// 终止符只在起始符之后查找；行首之前的字节被视为噪声丢弃。
    /// 找不到终止符时 `line` 为 `None`，剩余部分从行首开始保留，等待后续数据。
    pub fn get_line<'a>(&self, prev: &'a [u8], cur: &'a [u8]) -> LineFrame<'a> {
        let realigned = self.valid_data(prev, cur);
        if !realigned.found {
            #[cfg(feature = "logging")]
            tracing::trace!(
                kept = realigned.prev.len() + realigned.cur.len(),
                "未找到行起始符"
            );
            return LineFrame {
                line: None,
                carry: realigned.prev,
                rest: realigned.cur,
                has_starting: false,
            };
        }

        let (prev, cur) = (realigned.prev, realigned.cur);
        let starting_len = self.lines_info.starting.len();
        let terminated = self.lines_info.terminated.as_slice();

        let Some(end_idx) = find_across(prev, cur, starting_len, terminated)
        else {
            return LineFrame {
                line: None,
                carry: prev,
                rest: cur,
                has_starting: true,
            };
        };

        let line = slice_across(prev, cur, starting_len, end_idx);
        let next_idx = end_idx + terminated.len();
        let (carry, rest) = if next_idx >= prev.len() {
            (&[][..], &cur[next_idx - prev.len()..])
        } else {
            (&prev[next_idx..], cur)
        };

        #[cfg(feature = "logging")]
        tracing::trace!(
            len = line.len(),
            stitched = matches!(line, Cow::Owned(_)),
            "切分出一行"
        );

        LineFrame { line: Some(line), carry, rest, has_starting: true }
    }
}
