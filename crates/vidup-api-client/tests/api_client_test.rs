use mockito::Matcher;
use vidup_api_client::{ApiClient, Auth, ClientError, UploadRequest, VideoApi};

const RECORD: &str = r#"{
    "id": "6f1c2d3e-4b5a-4c6d-8e7f-9a0b1c2d3e4f",
    "title": "Clip A",
    "description": null,
    "publicId": "video-uploads/a",
    "originalSize": "2097152",
    "compressedSize": "1048576",
    "duration": 12.5,
    "createdAt": "2024-05-01T10:00:00Z",
    "updatedAt": "2024-05-01T10:00:00Z"
}"#;

fn upload_request() -> UploadRequest {
    UploadRequest {
        data: bytes::Bytes::from_static(b"fake video bytes"),
        filename: "clip.mp4".to_string(),
        content_type: Some("video/mp4".to_string()),
        title: "Clip A".to_string(),
        description: "first upload".to_string(),
        original_size: 16,
    }
}

#[tokio::test]
async fn list_videos_parses_array() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/videos")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!("[{}]", RECORD))
        .create_async()
        .await;

    let client = ApiClient::new(server.url(), None).unwrap();
    let videos = client.list_videos().await.unwrap();

    mock.assert_async().await;
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].public_id, "video-uploads/a");
    assert_eq!(videos[0].duration, 12.5);
}

#[tokio::test]
async fn list_videos_rejects_object_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/videos")
        .with_status(200)
        .with_body(r#"{"error":"Error fetching videos"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(server.url(), None).unwrap();
    let err = client.list_videos().await.unwrap_err();

    assert!(matches!(err, ClientError::UnexpectedFormat(_)));
}

#[tokio::test]
async fn list_videos_reports_server_error_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/videos")
        .with_status(500)
        .with_body(r#"{"error":"Error fetching videos","code":"LISTING_ERROR"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(server.url(), None).unwrap();
    match client.list_videos().await.unwrap_err() {
        ClientError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("LISTING_ERROR"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn upload_sends_form_fields_and_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/video-upload")
        .match_header("authorization", "Bearer tok_123")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="clip.mp4""#.to_string()),
            Matcher::Regex(r#"name="title"\r\n\r\nClip A"#.to_string()),
            Matcher::Regex(r#"name="originalSize"\r\n\r\n16"#.to_string()),
            Matcher::Regex("fake video bytes".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"publicId":"video-uploads/new"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(server.url(), Some(Auth::Bearer("tok_123".to_string()))).unwrap();
    let response = client.upload_video(upload_request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.public_id, "video-uploads/new");
}

#[tokio::test]
async fn upload_body_is_sent_with_content_length() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/video-upload")
        .match_header("content-length", Matcher::Regex(r"^[1-9][0-9]*$".to_string()))
        .match_header("transfer-encoding", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"publicId":"video-uploads/new"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(server.url(), None).unwrap();
    client.upload_video(upload_request()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn upload_with_session_cookie() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/video-upload")
        .match_header("cookie", "__session=tok_456")
        .with_status(200)
        .with_body(r#"{"publicId":"video-uploads/new"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(
        server.url(),
        Some(Auth::SessionCookie("tok_456".to_string())),
    )
    .unwrap();
    client.upload_video(upload_request()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn unauthorized_upload_surfaces_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/video-upload")
        .with_status(401)
        .with_body(r#"{"error":"Unauthorized","code":"UNAUTHORIZED"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(server.url(), None).unwrap();
    let err = client.upload_video(upload_request()).await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status, .. } if status.as_u16() == 401));
}

#[tokio::test]
async fn download_writes_file() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/demo/video/upload/video-uploads/a.mp4")
        .with_status(200)
        .with_body("mp4-bytes")
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("Clip A.mp4");
    let client = ApiClient::new(server.url(), None).unwrap();

    let written = client
        .download_to(
            &format!("{}/demo/video/upload/video-uploads/a.mp4", server.url()),
            &destination,
        )
        .await
        .unwrap();

    assert_eq!(written, 9);
    assert_eq!(std::fs::read(&destination).unwrap(), b"mp4-bytes");
}

#[tokio::test]
async fn download_of_missing_asset_fails() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/demo/video/upload/missing.mp4")
        .with_status(404)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("missing.mp4");
    let client = ApiClient::new(server.url(), None).unwrap();

    let result = client
        .download_to(&format!("{}/demo/video/upload/missing.mp4", server.url()), &destination)
        .await;

    assert!(result.is_err());
    assert!(!destination.exists());
}
