mod common;

use common::sha256_hex;
use prebin::download::{DownloadOptions, HttpFileDownloader};
use prebin::error::PrebinError;
use tempfile::TempDir;

#[test]
fn download_writes_body_to_destination() {
    let mut server = mockito::Server::new();
    let body = b"release archive bytes";
    let mock = server
        .mock("GET", "/releases/download/v1.2.3/foo.tar.gz")
        .with_status(200)
        .with_header("Content-Length", &body.len().to_string())
        .with_body(body)
        .create();

    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("foo.tar.gz");
    let url = format!("{}/releases/download/v1.2.3/foo.tar.gz", server.url());

    let mut downloader = HttpFileDownloader::new();
    let result = downloader.download(&url, &destination, &DownloadOptions::default());

    assert!(result.is_ok());
    assert_eq!(std::fs::read(&destination).unwrap(), body);
    mock.assert();
}

#[test]
fn download_follows_redirects() {
    let mut server = mockito::Server::new();
    let body = b"redirected archive";
    let target_path = "/actual/foo.tar.gz";

    let redirect = server
        .mock("GET", "/releases/download/v1.2.3/foo.tar.gz")
        .with_status(302)
        .with_header("Location", &format!("{}{target_path}", server.url()))
        .create();
    let target = server
        .mock("GET", target_path)
        .with_status(200)
        .with_body(body)
        .create();

    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("foo.tar.gz");
    let url = format!("{}/releases/download/v1.2.3/foo.tar.gz", server.url());

    let mut downloader = HttpFileDownloader::new();
    downloader
        .download(&url, &destination, &DownloadOptions::default())
        .unwrap();

    assert_eq!(std::fs::read(&destination).unwrap(), body);
    redirect.assert();
    target.assert();
}

#[test]
fn download_surfaces_http_status() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/releases/download/v9.9.9/foo.tar.gz")
        .with_status(404)
        .with_body("not found")
        .create();

    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("foo.tar.gz");
    let url = format!("{}/releases/download/v9.9.9/foo.tar.gz", server.url());

    let mut downloader = HttpFileDownloader::new();
    let result = downloader.download(&url, &destination, &DownloadOptions::default());

    match result {
        Err(PrebinError::Download { url: err_url, status }) => {
            assert_eq!(err_url, url);
            assert_eq!(status, Some(404));
        }
        other => panic!("expected Download error, got {other:?}"),
    }
    assert!(!destination.exists());
    mock.assert();
}

#[test]
fn download_verifies_checksum_before_rename() {
    let mut server = mockito::Server::new();
    let body = b"checksummed archive";
    server
        .mock("GET", "/foo.tar.gz")
        .with_status(200)
        .with_body(body)
        .create();

    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("foo.tar.gz");
    let url = format!("{}/foo.tar.gz", server.url());

    let options = DownloadOptions {
        checksum: Some(sha256_hex(body)),
        ..Default::default()
    };

    let mut downloader = HttpFileDownloader::new();
    downloader.download(&url, &destination, &options).unwrap();
    assert!(destination.exists());
}

#[test]
fn download_checksum_mismatch_leaves_no_file() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/foo.tar.gz")
        .with_status(200)
        .with_body(b"tampered archive")
        .create();

    let temp = TempDir::new().unwrap();
    let destination = temp.path().join("foo.tar.gz");
    let url = format!("{}/foo.tar.gz", server.url());

    let options = DownloadOptions {
        checksum: Some(
            "0000000000000000000000000000000000000000000000000000000000000000".to_string(),
        ),
        ..Default::default()
    };

    let mut downloader = HttpFileDownloader::new();
    let result = downloader.download(&url, &destination, &options);

    assert!(matches!(result, Err(PrebinError::ChecksumMismatch { .. })));
    assert!(
        !destination.exists(),
        "a failed download must never be visible at the destination"
    );
}
