//! # Stream Sinks
//!
//! Sinks that can be truncated and rewound before a list is written.
//!
//! The random reference section of the binary format runs to the end of the
//! stream. Rewriting a shorter list over a longer one without truncating would
//! leave stale pairs behind, so serialization only writes into sinks that can
//! be reset to an empty state positioned at the start.

use std::fs::File;
use std::future::Future;
use std::io::{self, Cursor, Seek, SeekFrom, Write};
use tokio::io::{AsyncSeekExt, AsyncWrite};

/// A writable sink that can be emptied and rewound.
pub trait ResetSink: Write {
    /// Discard all content and position the sink at offset zero.
    fn reset(&mut self) -> io::Result<()>;
}

impl ResetSink for Vec<u8> {
    fn reset(&mut self) -> io::Result<()> {
        self.clear();
        Ok(())
    }
}

impl ResetSink for Cursor<Vec<u8>> {
    fn reset(&mut self) -> io::Result<()> {
        self.get_mut().clear();
        self.set_position(0);
        Ok(())
    }
}

impl ResetSink for Cursor<&mut Vec<u8>> {
    fn reset(&mut self) -> io::Result<()> {
        self.get_mut().clear();
        self.set_position(0);
        Ok(())
    }
}

impl ResetSink for File {
    fn reset(&mut self) -> io::Result<()> {
        self.set_len(0)?;
        self.seek(SeekFrom::Start(0))?;
        Ok(())
    }
}

impl<T: ResetSink + ?Sized> ResetSink for &mut T {
    fn reset(&mut self) -> io::Result<()> {
        ResetSink::reset(&mut **self)
    }
}

/// Async counterpart of [`ResetSink`].
pub trait AsyncResetSink: AsyncWrite + Unpin + Send {
    fn reset(&mut self) -> impl Future<Output = io::Result<()>> + Send;
}

impl AsyncResetSink for Cursor<Vec<u8>> {
    fn reset(&mut self) -> impl Future<Output = io::Result<()>> + Send {
        self.get_mut().clear();
        self.set_position(0);
        std::future::ready(Ok(()))
    }
}

impl AsyncResetSink for tokio::fs::File {
    fn reset(&mut self) -> impl Future<Output = io::Result<()>> + Send {
        async move {
            self.set_len(0).await?;
            self.seek(SeekFrom::Start(0)).await?;
            Ok(())
        }
    }
}
