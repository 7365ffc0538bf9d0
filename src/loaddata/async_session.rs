//! 异步读取驱动

use crate::error::Result;
use crate::loaddata::session::LoadSession;
use crate::sink::{AsyncInsertSink, LoadStats, MemorySink};
use std::io::ErrorKind;
use tokio::io::{AsyncRead, AsyncReadExt};

impl LoadSession {
    /// 从 `AsyncRead` 读取全部数据并完成会话
    ///
    /// 切分与语句生成仍在当前任务中同步完成，生成的语句按顺序逐条交给异步输出端。
    pub async fn load_from_async_reader<R, S>(
        &mut self,
        mut reader: R,
        sink: &mut S,
    ) -> Result<LoadStats>
    where
        R: AsyncRead + Unpin,
        S: AsyncInsertSink + ?Sized,
    {
        let mut staged = MemorySink::new();
        let mut buf = vec![0u8; self.read_chunk_size()];

        loop {
            let n = match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            self.feed(&buf[..n], &mut staged)?;
            drain(&mut staged, sink).await?;
        }

        let stats = self.finish(&mut staged)?;
        drain(&mut staged, sink).await?;
        sink.finalize().await?;
        Ok(stats)
    }
}

async fn drain<S: AsyncInsertSink + ?Sized>(
    staged: &mut MemorySink,
    sink: &mut S,
) -> Result<()> {
    for statement in staged.take() {
        sink.insert(&statement).await?;
    }
    Ok(())
}
