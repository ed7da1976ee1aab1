//! Async subtitle loading.
//!
//! This module provides [`DocumentFuture`] for reading and parsing a
//! subtitle file in the background without blocking the async runtime.
//! File I/O, decoding and parsing run on a blocking thread through
//! `tokio::task::spawn_blocking`.
//!
//! # Example
//!
//! ```no_run
//! use subcue::{SubcueError, SubtitleLoader};
//!
//! # async fn example() -> Result<(), SubcueError> {
//! let document = SubtitleLoader::new().load_async("movie.srt", None).await?;
//! println!("Got {} cues", document.len());
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use crate::document::SubtitleDocument;
use crate::error::SubcueError;
use crate::info::SubtitleInfo;
use crate::loader::SubtitleLoader;

/// A future that resolves to a loaded [`SubtitleDocument`].
///
/// Created via [`SubtitleLoader::load_async`]. If the background task
/// panics or is aborted, the future resolves to
/// [`SubcueError::Cancelled`].
pub struct DocumentFuture {
    handle: JoinHandle<Result<SubtitleDocument, SubcueError>>,
}

impl Future for DocumentFuture {
    type Output = Result<SubtitleDocument, SubcueError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle)
            .poll(cx)
            .map(|result| result.unwrap_or_else(|_| Err(SubcueError::Cancelled)))
    }
}

impl SubtitleLoader {
    /// Load a subtitle file on a blocking thread.
    ///
    /// Must be called from within a Tokio runtime. Errors are the same as
    /// for [`load`](SubtitleLoader::load).
    pub fn load_async(
        &self,
        path: impl Into<PathBuf>,
        info: Option<SubtitleInfo>,
    ) -> DocumentFuture {
        let loader = self.clone();
        let path = path.into();
        let handle = tokio::task::spawn_blocking(move || loader.load(&path, info));

        DocumentFuture { handle }
    }
}
