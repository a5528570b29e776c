//! File upload pipeline.
//!
//! Uploading takes four calls:
//! 1. `POST /pre-sign-url` for a presigned storage URL
//! 2. `PUT` of the raw bytes to that URL
//! 3. `POST /file` to register the stored object
//! 4. `POST /file/parse_process` for documents, so the service reads them
//!
//! Any failing step aborts the pipeline with [`UploadError::Failed`] naming
//! the step. Later steps are not attempted.

use bytes::Bytes;
use std::path::Path;

use crate::client::KimiClient;
use crate::error::{KimiError, KimiResult, UploadError, UploadStep};
use crate::models::{
    FileType, ParseProcessRequest, PreSignRequest, PreSignResponse, RegisterFileRequest,
    RegisterFileResponse, UploadedFile,
};

/// Marker the parse endpoint returns once a document is readable
const PARSED_MARKER: &str = r#""status":"parsed""#;

pub(crate) async fn upload_file(client: &KimiClient, path: &Path) -> KimiResult<UploadedFile> {
    match tokio::fs::metadata(path).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(UploadError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(e) => {
            let err = KimiError::internal_with("Cannot access file", e);
            return Err(fail(path, UploadStep::ReadFile, err));
        }
    }

    client.open().await?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let file_type = FileType::classify(path);
    tracing::info!("Starting upload for file '{}' (type: {})", name, file_type);

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| fail(path, UploadStep::ReadFile, KimiError::internal_with("Cannot read file", e)))?;

    let pre = pre_sign(client, &name, file_type)
        .await
        .map_err(|e| fail(path, UploadStep::PreSign, e))?;
    tracing::debug!("Received pre-signed URL for '{}'", name);

    client
        .put_bytes(&pre.url, Bytes::from(bytes))
        .await
        .map_err(|e| fail(path, UploadStep::PutObject, e))?;
    tracing::debug!("File content for '{}' uploaded to storage", name);

    let registered = register(client, &name, &pre, file_type)
        .await
        .map_err(|e| fail(path, UploadStep::Register, e))?;
    tracing::debug!("File '{}' registered with API. File ID: {}", name, registered.id);

    if file_type == FileType::File {
        request_parse(client, &name, &registered.id)
            .await
            .map_err(|e| fail(path, UploadStep::Parse, e))?;
    }

    let uploaded = UploadedFile {
        file_type: registered
            .file_type
            .as_deref()
            .and_then(FileType::parse)
            .unwrap_or(file_type),
        name: registered.name.unwrap_or(name),
        object_name: registered.object_name.unwrap_or(pre.object_name),
        meta: registered.meta.unwrap_or_default(),
        id: registered.id,
    };
    tracing::info!(
        "File '{}' successfully uploaded with ID: {}",
        uploaded.name,
        uploaded.id
    );
    Ok(uploaded)
}

async fn pre_sign(client: &KimiClient, name: &str, file_type: FileType) -> KimiResult<PreSignResponse> {
    let request = PreSignRequest {
        name,
        action: file_type,
    };
    let response = client.post_json("pre-sign-url", &request).await?;
    Ok(response.json()?)
}

async fn register(
    client: &KimiClient,
    name: &str,
    pre: &PreSignResponse,
    file_type: FileType,
) -> KimiResult<RegisterFileResponse> {
    let request = RegisterFileRequest {
        name,
        object_name: &pre.object_name,
        file_type,
        file_id: &pre.file_id,
    };
    let response = client.post_json("file", &request).await?;
    Ok(response.json()?)
}

/// Ask the service to parse a document. One check, no polling.
async fn request_parse(client: &KimiClient, name: &str, id: &str) -> KimiResult<()> {
    tracing::info!("Waiting for document '{}' to be parsed by Kimi...", name);
    let response = client
        .post_json("file/parse_process", &ParseProcessRequest { ids: [id] })
        .await?;

    if response.text().contains(PARSED_MARKER) {
        tracing::info!("File '{}' has been successfully parsed", name);
    } else {
        tracing::warn!(
            "Could not confirm immediate parsing for '{}'. May need time.",
            name
        );
    }
    Ok(())
}

fn fail(path: &Path, step: UploadStep, err: KimiError) -> KimiError {
    if matches!(err, KimiError::ClientClosed) {
        return err;
    }
    tracing::error!(
        "File upload failed for '{}' at step {}: {}",
        path.display(),
        step,
        err
    );
    UploadError::failed(path, step, err).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockResponse, MockTransport};
    use crate::config::SessionConfig;
    use crate::traits::{HttpError, Method, RequestBody};
    use serde_json::json;
    use std::io::Write;
    use std::sync::Arc;

    const BASE: &str = "https://kimi.test/api";
    const PUT_URL: &str = "https://storage.test/bucket/obj-1?sig=abc";

    struct Fixture {
        client: KimiClient,
        transport: MockTransport,
        dir: tempfile::TempDir,
        _cookies: tempfile::NamedTempFile,
    }

    impl Fixture {
        fn new() -> Self {
            let mut cookies = tempfile::NamedTempFile::new().unwrap();
            writeln!(cookies, ".kimi.com\tTRUE\t/\tTRUE\t0\tkimi-auth\ttok").unwrap();

            let transport = MockTransport::new();
            let config = SessionConfig::new()
                .with_cookies_path(cookies.path())
                .with_base_url(BASE);
            let client = KimiClient::with_transport(config, Arc::new(transport.clone()));

            Self {
                client,
                transport,
                dir: tempfile::tempdir().unwrap(),
                _cookies: cookies,
            }
        }

        fn file(&self, name: &str, contents: &[u8]) -> std::path::PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, contents).unwrap();
            path
        }

        fn happy_path(&self, file_type: &str, parse_body: &str) {
            self.transport.set_response(
                &format!("{}/pre-sign-url", BASE),
                MockResponse::json(200, json!({"url": PUT_URL, "object_name": "obj-1"})),
            );
            self.transport.set_response(PUT_URL, MockResponse::text(200, ""));
            self.transport.set_response(
                &format!("{}/file", BASE),
                MockResponse::json(
                    200,
                    json!({"id": "f-1", "name": "x", "object_name": "obj-1", "type": file_type, "meta": {"pages": 3}}),
                ),
            );
            self.transport.set_response(
                &format!("{}/file/parse_process", BASE),
                MockResponse::text(200, parse_body),
            );
        }
    }

    #[tokio::test]
    async fn test_document_upload_runs_all_four_steps() {
        let fx = Fixture::new();
        fx.happy_path("file", r#"{"id":"f-1","status":"parsed"}"#);
        let path = fx.file("report.pdf", b"%PDF-1.4");

        let uploaded = fx.client.upload_file(&path).await.unwrap();
        assert_eq!(uploaded.id, "f-1");
        assert_eq!(uploaded.file_type, FileType::File);
        assert_eq!(uploaded.meta["pages"], 3);

        let requests = fx.transport.get_requests();
        let urls: Vec<_> = requests.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://kimi.test/api/pre-sign-url",
                PUT_URL,
                "https://kimi.test/api/file",
                "https://kimi.test/api/file/parse_process",
            ]
        );

        assert_eq!(
            requests[0].json().unwrap(),
            &json!({"name": "report.pdf", "action": "file"})
        );
        assert_eq!(requests[1].method, Method::Put);
        assert_eq!(requests[1].body, RequestBody::Raw(Bytes::from_static(b"%PDF-1.4")));
        assert_eq!(
            requests[2].json().unwrap(),
            &json!({"name": "report.pdf", "object_name": "obj-1", "type": "file", "file_id": ""})
        );
        assert_eq!(requests[3].json().unwrap(), &json!({"ids": ["f-1"]}));
    }

    #[tokio::test]
    async fn test_image_upload_skips_parse() {
        let fx = Fixture::new();
        fx.happy_path("image", "");
        let path = fx.file("photo.JPG", b"\xff\xd8\xff");

        let uploaded = fx.client.upload_file(&path).await.unwrap();
        assert_eq!(uploaded.file_type, FileType::Image);
        assert!(fx.transport.requests_to("/parse_process").is_empty());
        assert_eq!(
            fx.transport.requests_to("/pre-sign-url")[0].json().unwrap()["action"],
            "image"
        );
    }

    #[tokio::test]
    async fn test_unconfirmed_parse_still_succeeds() {
        let fx = Fixture::new();
        fx.happy_path("file", r#"{"status":"parsing"}"#);
        let path = fx.file("notes.txt", b"hello");

        assert!(fx.client.upload_file(&path).await.is_ok());
        assert_eq!(fx.transport.requests_to("/parse_process").len(), 1);
    }

    #[tokio::test]
    async fn test_pre_sign_file_id_is_forwarded() {
        let fx = Fixture::new();
        fx.happy_path("file", "");
        fx.transport.set_response(
            &format!("{}/pre-sign-url", BASE),
            MockResponse::json(
                200,
                json!({"url": PUT_URL, "object_name": "obj-1", "file_id": "pre-42"}),
            ),
        );
        let path = fx.file("a.csv", b"1,2");

        fx.client.upload_file(&path).await.unwrap();
        assert_eq!(
            fx.transport.requests_to("/file")[0].json().unwrap()["file_id"],
            "pre-42"
        );
    }

    #[tokio::test]
    async fn test_put_failure_stops_before_register() {
        let fx = Fixture::new();
        fx.happy_path("file", "");
        fx.transport
            .set_response(PUT_URL, MockResponse::text(403, "SignatureDoesNotMatch"));
        let path = fx.file("report.pdf", b"data");

        let err = fx.client.upload_file(&path).await.unwrap_err();
        match &err {
            KimiError::Upload(upload) => {
                assert_eq!(upload.step(), Some(UploadStep::PutObject));
                assert_eq!(upload.path(), &path);
            }
            other => panic!("Expected upload error, got {:?}", other),
        }
        assert!(fx.transport.requests_to("/file").is_empty());
        assert!(fx.transport.requests_to("/parse_process").is_empty());
    }

    #[tokio::test]
    async fn test_register_failure_names_step() {
        let fx = Fixture::new();
        fx.happy_path("file", "");
        fx.transport.set_response(
            &format!("{}/file", BASE),
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );
        let path = fx.file("report.pdf", b"data");

        let err = fx.client.upload_file(&path).await.unwrap_err();
        assert!(matches!(
            err,
            KimiError::Upload(ref e) if e.step() == Some(UploadStep::Register)
        ));
    }

    #[tokio::test]
    async fn test_parse_http_failure_fails_upload() {
        let fx = Fixture::new();
        fx.happy_path("file", "");
        fx.transport.set_response(
            &format!("{}/file/parse_process", BASE),
            MockResponse::text(500, "oops"),
        );
        let path = fx.file("report.pdf", b"data");

        let err = fx.client.upload_file(&path).await.unwrap_err();
        assert!(matches!(
            err,
            KimiError::Upload(ref e) if e.step() == Some(UploadStep::Parse)
        ));
    }

    #[tokio::test]
    async fn test_missing_file_makes_no_requests() {
        let fx = Fixture::new();
        let path = fx.dir.path().join("missing.pdf");

        let err = fx.client.upload_file(&path).await.unwrap_err();
        assert!(matches!(
            err,
            KimiError::Upload(UploadError::FileNotFound { .. })
        ));
        assert!(fx.transport.get_requests().is_empty());
        assert!(!fx.client.is_ready().await);
    }

    #[tokio::test]
    async fn test_upload_on_closed_client() {
        let fx = Fixture::new();
        let path = fx.file("a.png", b"x");
        fx.client.close().await;

        let err = fx.client.upload_file(&path).await.unwrap_err();
        assert!(matches!(err, KimiError::ClientClosed));
    }
}
