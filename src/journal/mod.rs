//! Append-only request log.
//!
//! One flat text file, one line per message in the form
//! `YYYY-MM-DD HH:MM:SS - <message>`. No rotation and no size bound; small
//! appends rely on the platform's atomic-append guarantee, so concurrent
//! writers interleave whole lines rather than bytes.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

/// Timestamped, append-only log file.
///
/// # Examples
///
/// ```no_run
/// use kerangka::journal::Journal;
///
/// # async fn demo() -> std::io::Result<()> {
/// let journal = Journal::new("/var/log/app/log.txt");
/// journal.append("lead created").await?;
/// for line in journal.entries().await? {
///     println!("{line}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    /// Creates a journal writing to `path`. Parent directories are created
    /// lazily on the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one timestamped line for `message`.
    pub async fn append(&self, message: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("{stamp} - {message}\n");

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }

    /// Reads all non-empty lines back, oldest first.
    ///
    /// Returns an empty list when the file does not exist yet.
    pub async fn entries(&self) -> std::io::Result<Vec<String>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        Ok(text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect())
    }
}
