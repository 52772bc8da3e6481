//! Transfer progress plumbing
//!
//! A transfer runs as two cooperating tasks: the copy advances a shared
//! byte-position counter through a counting reader or writer, and the
//! progress loop samples the counter on a timer. The counter is the only
//! shared state between the two.

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

/// Shared, thread-safe byte position of an in-flight transfer
///
/// Cloning hands out another handle to the same counter. The position is
/// monotonically non-decreasing for the lifetime of a transfer.
#[derive(Debug, Clone, Default)]
pub struct ProgressCounter(Arc<AtomicU64>);

impl ProgressCounter {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Start counting from `offset`, for transfers resumed mid-object
    pub fn starting_at(offset: u64) -> Self {
        Self(Arc::new(AtomicU64::new(offset)))
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn add(&self, bytes: u64) {
        self.0.fetch_add(bytes, Ordering::Relaxed);
    }
}

/// Writer adapter that advances a [`ProgressCounter`] as bytes are written
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    position: ProgressCounter,
}

impl<W: AsyncWrite + Unpin> CountingWriter<W> {
    pub fn new(inner: W, position: ProgressCounter) -> Self {
        Self { inner, position }
    }
}

impl<W: AsyncWrite + Unpin> AsyncWrite for CountingWriter<W> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        match Pin::new(&mut this.inner).poll_write(cx, buf) {
            Poll::Ready(Ok(written)) => {
                this.position.add(written as u64);
                Poll::Ready(Ok(written))
            }
            other => other,
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}

/// Reader adapter that advances a [`ProgressCounter`] as bytes are read
#[derive(Debug)]
pub struct CountingReader<R> {
    inner: R,
    position: ProgressCounter,
}

impl<R: AsyncRead + Unpin> CountingReader<R> {
    pub fn new(inner: R, position: ProgressCounter) -> Self {
        Self { inner, position }
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for CountingReader<R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let before = buf.filled().len();
        match Pin::new(&mut this.inner).poll_read(cx, buf) {
            Poll::Ready(Ok(())) => {
                this.position.add((buf.filled().len() - before) as u64);
                Poll::Ready(Ok(()))
            }
            other => other,
        }
    }
}
