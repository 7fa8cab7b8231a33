use crate::download::checksum::verify_checksum;
use crate::download::client::{AttohttpcClient, HttpClient, HttpResponse};
use crate::download::options::DownloadOptions;
use crate::error::{PrebinError, Result};
use std::fs;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const DOWNLOAD_CHUNK_SIZE: usize = 8192;

pub trait ProgressReporter: Send + Sync {
    fn on_start(&mut self, total_bytes: u64);

    fn on_progress(&mut self, bytes_downloaded: u64);

    fn on_complete(&mut self);
}

pub struct HttpFileDownloader {
    pub(crate) http_client: Box<dyn HttpClient>,
    progress_reporter: Option<Box<dyn ProgressReporter>>,
}

impl Default for HttpFileDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFileDownloader {
    pub fn new() -> Self {
        Self::with_client(Box::new(AttohttpcClient::new()))
    }

    pub fn with_client(http_client: Box<dyn HttpClient>) -> Self {
        Self {
            http_client,
            progress_reporter: None,
        }
    }

    pub fn with_progress_reporter(mut self, reporter: Box<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Download `url` into `destination`.
    ///
    /// The body is streamed into a temporary file next to the destination and
    /// only renamed into place after the full byte count (and the checksum,
    /// when one is supplied) validates. A partial download is never visible at
    /// the destination path.
    pub fn download(
        &mut self,
        url: &str,
        destination: &Path,
        options: &DownloadOptions,
    ) -> Result<PathBuf> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        let response = self.http_client.get(url)?;

        self.validate_response(url, response.as_ref(), options.max_size)?;

        let total_size = content_length(response.as_ref());

        if let Some(reporter) = &mut self.progress_reporter {
            reporter.on_start(total_size);
        }

        // Same directory as the destination so the final rename stays on one
        // filesystem and is atomic.
        let temp_file =
            NamedTempFile::new_in(destination.parent().unwrap_or_else(|| Path::new(".")))?;

        self.stream_to_file(response, temp_file.as_file())?;

        if let Some(expected_checksum) = &options.checksum {
            verify_checksum(temp_file.path(), expected_checksum)?;
        }

        temp_file.persist(destination).map_err(|e| {
            PrebinError::SystemError(format!(
                "Failed to move download into place at {}: {}",
                destination.display(),
                e.error
            ))
        })?;

        if let Some(reporter) = &mut self.progress_reporter {
            reporter.on_complete();
        }

        log::debug!("Downloaded {url} to {}", destination.display());
        Ok(destination.to_path_buf())
    }

    fn validate_response(
        &self,
        url: &str,
        response: &dyn HttpResponse,
        max_size: u64,
    ) -> Result<()> {
        let status = response.status();

        if !(200..300).contains(&status) {
            return Err(PrebinError::Download {
                url: url.to_string(),
                status: Some(status),
            });
        }

        if let Some(content_length) = response.header("Content-Length") {
            if let Ok(length) = content_length.parse::<u64>() {
                if length > max_size {
                    return Err(PrebinError::ValidationError(format!(
                        "Download size {length} exceeds maximum allowed size {max_size}"
                    )));
                }
            }
        }

        Ok(())
    }

    fn stream_to_file(
        &mut self,
        mut response: Box<dyn HttpResponse>,
        file: &fs::File,
    ) -> Result<()> {
        let mut writer = BufWriter::new(file);
        let mut downloaded = 0u64;
        let mut buffer = vec![0; DOWNLOAD_CHUNK_SIZE];

        loop {
            match response.read(&mut buffer) {
                Ok(0) => break, // EOF
                Ok(n) => {
                    writer.write_all(&buffer[..n])?;
                    downloaded += n as u64;

                    if let Some(reporter) = &mut self.progress_reporter {
                        reporter.on_progress(downloaded);
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        writer.flush()?;
        Ok(())
    }
}

fn content_length(response: &dyn HttpResponse) -> u64 {
    response
        .header("Content-Length")
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "http_file_downloader_tests.rs"]
mod http_file_downloader_tests;
