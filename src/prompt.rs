// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Interactive date entry, the last resort when a file carries no date

use async_trait::async_trait;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tracing::warn;

use crate::date::DateStamp;
use crate::{RefileError, Result};

/// Input that re-opens the file instead of answering
pub const OPEN_TOKEN: &str = "o";

/// Asks for a date stamp
#[async_trait]
pub trait DatePrompt: Send {
    async fn ask(&mut self, file: &Path, suggested: &DateStamp) -> Result<DateStamp>;
}

/// Shows a file to the user
pub trait FileViewer: Send + Sync {
    fn open(&self, path: &Path) -> Result<()>;
}

/// The platform's default viewer (`open`, `xdg-open`, `start`)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemViewer;

impl FileViewer for SystemViewer {
    fn open(&self, path: &Path) -> Result<()> {
        open::that(path)?;
        Ok(())
    }
}

/// Line-oriented prompt over any reader/writer pair
pub struct InteractivePrompt<R, W, V> {
    reader: R,
    writer: W,
    viewer: V,
}

impl InteractivePrompt<BufReader<Stdin>, Stdout, SystemViewer> {
    /// Prompt on the terminal
    pub fn terminal() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout(), SystemViewer)
    }
}

impl<R, W, V> InteractivePrompt<R, W, V>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
    V: FileViewer,
{
    pub fn new(reader: R, writer: W, viewer: V) -> Self {
        Self { reader, writer, viewer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<R, W, V> DatePrompt for InteractivePrompt<R, W, V>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
    V: FileViewer,
{
    async fn ask(&mut self, file: &Path, suggested: &DateStamp) -> Result<DateStamp> {
        loop {
            let question = format!(
                "Please validate/enter the date for {} (YYYYMMDD) [Enter to accept '{}', '{}' to open]: ",
                file.display(),
                suggested,
                OPEN_TOKEN
            );
            self.writer.write_all(question.as_bytes()).await?;
            self.writer.flush().await?;

            let mut line = String::new();
            if self.reader.read_line(&mut line).await? == 0 {
                return Err(RefileError::Prompt(format!(
                    "input closed while asking for the date of {}",
                    file.display()
                )));
            }

            let answer = line.trim();
            if answer.eq_ignore_ascii_case(OPEN_TOKEN) {
                if let Err(e) = self.viewer.open(file) {
                    warn!("Could not open {:?}: {}", file, e);
                }
                continue;
            }

            if answer.is_empty() {
                return Ok(suggested.clone());
            }

            match DateStamp::parse(answer) {
                Ok(stamp) => return Ok(stamp),
                Err(e) => warn!("{}", e),
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// Answers from a fixed list and records every question
    pub struct ScriptedPrompt {
        answers: Vec<String>,
        pub asked: Vec<(PathBuf, DateStamp)>,
    }

    impl ScriptedPrompt {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().rev().map(|s| s.to_string()).collect(),
                asked: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl DatePrompt for ScriptedPrompt {
        async fn ask(&mut self, file: &Path, suggested: &DateStamp) -> Result<DateStamp> {
            self.asked.push((file.to_path_buf(), suggested.clone()));
            match self.answers.pop() {
                Some(answer) if answer.is_empty() => Ok(suggested.clone()),
                Some(answer) => DateStamp::parse(&answer),
                None => Err(RefileError::Prompt("no scripted answer left".to_string())),
            }
        }
    }

    #[derive(Default, Clone)]
    struct RecordingViewer {
        opened: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl FileViewer for RecordingViewer {
        fn open(&self, path: &Path) -> Result<()> {
            self.opened.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    fn suggested() -> DateStamp {
        DateStamp::parse("20240101").unwrap()
    }

    #[tokio::test]
    async fn test_empty_answer_accepts_suggestion() {
        let mut prompt = InteractivePrompt::new(&b"\n"[..], Vec::new(), RecordingViewer::default());

        let stamp = prompt.ask(Path::new("scan.pdf"), &suggested()).await.unwrap();
        assert_eq!(stamp, suggested());

        let shown = String::from_utf8(prompt.into_writer()).unwrap();
        assert!(shown.contains("scan.pdf"));
        assert!(shown.contains("'20240101'"));
    }

    #[tokio::test]
    async fn test_explicit_answer_overrides() {
        let mut prompt = InteractivePrompt::new(&b"  20191231  \n"[..], Vec::new(), RecordingViewer::default());

        let stamp = prompt.ask(Path::new("scan.pdf"), &suggested()).await.unwrap();
        assert_eq!(stamp.as_str(), "20191231");
    }

    #[tokio::test]
    async fn test_open_then_ask_again() {
        let viewer = RecordingViewer::default();
        let mut prompt = InteractivePrompt::new(&b"O\n\n"[..], Vec::new(), viewer.clone());

        let stamp = prompt.ask(Path::new("/scans/scan.pdf"), &suggested()).await.unwrap();

        assert_eq!(stamp, suggested());
        assert_eq!(*viewer.opened.lock().unwrap(), vec![PathBuf::from("/scans/scan.pdf")]);
        let shown = String::from_utf8(prompt.into_writer()).unwrap();
        assert_eq!(shown.matches("Please validate/enter").count(), 2);
    }

    #[tokio::test]
    async fn test_malformed_answer_is_asked_again() {
        let mut prompt = InteractivePrompt::new(&b"2024-05-17\n20240517\n"[..], Vec::new(), RecordingViewer::default());

        let stamp = prompt.ask(Path::new("scan.pdf"), &suggested()).await.unwrap();
        assert_eq!(stamp.as_str(), "20240517");
    }

    #[tokio::test]
    async fn test_closed_input_is_error() {
        let mut prompt = InteractivePrompt::new(&b""[..], Vec::new(), RecordingViewer::default());

        let result = prompt.ask(Path::new("scan.pdf"), &suggested()).await;
        assert!(matches!(result, Err(RefileError::Prompt(_))));
    }
}
