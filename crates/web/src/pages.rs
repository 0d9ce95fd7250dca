use bare_http::connection::ResponseWriter;
use bare_http::protocol::{SendError, default_headers};
use http::StatusCode;
use tokio::io::AsyncWrite;

pub const OK_PAGE: &str = "<html>
<head>
<title>200 OK</title>
</head>
<body>
<h1>Success!</h1>
<p>Your request was an absolute banger.</p>
</body>
</html>
";

pub const BAD_REQUEST_PAGE: &str = "<html>
<head>
<title>400 Bad Request</title>
</head>
<body>
<h1>Bad Request</h1>
<p>Your request honestly kinda sucked.</p>
</body>
</html>
";

pub const INTERNAL_SERVER_ERROR_PAGE: &str = "<html>
<head>
<title>500 Internal Server Error</title>
</head>
<body>
<h1>Internal Server Error</h1>
<p>Okay, you know what? This one is on me.</p>
</body>
</html>
";

/// Writes a complete HTML response: status line, default headers with
/// `content-type: text/html`, then `body`.
///
/// # Errors
///
/// Returns the [`SendError`] of the first section that failed to write.
pub async fn write_page<W>(writer: &mut ResponseWriter<W>, status: StatusCode, body: &str) -> Result<(), SendError>
where
    W: AsyncWrite + Unpin,
{
    let mut headers = default_headers(body.len());
    headers.replace("Content-Type", "text/html")?;

    writer.write_status_line(status).await?;
    writer.write_headers(&headers).await?;
    writer.write_body(body.as_bytes()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[tokio::test]
    async fn write_bad_request_page() {
        let mut writer = ResponseWriter::new(Vec::new());
        write_page(&mut writer, StatusCode::BAD_REQUEST, BAD_REQUEST_PAGE).await.unwrap();

        let response = String::from_utf8(writer.into_inner()).unwrap();
        let (head, body) = response.split_once("\r\n\r\n").unwrap();

        let mut lines = head.split("\r\n");
        assert_eq!(lines.next(), Some("HTTP/1.1 400 Bad Request"));
        let mut header_lines = lines.map(str::to_string).collect::<Vec<_>>();
        header_lines.sort_unstable();
        assert_eq!(
            header_lines,
            vec![
                "connection: close".to_string(),
                format!("content-length: {}", BAD_REQUEST_PAGE.len()),
                "content-type: text/html".to_string(),
            ]
        );

        assert_eq!(
            body,
            indoc! {r"
                <html>
                <head>
                <title>400 Bad Request</title>
                </head>
                <body>
                <h1>Bad Request</h1>
                <p>Your request honestly kinda sucked.</p>
                </body>
                </html>
            "}
        );
    }

    #[tokio::test]
    async fn content_length_matches_body() {
        for (status, page) in [
            (StatusCode::OK, OK_PAGE),
            (StatusCode::BAD_REQUEST, BAD_REQUEST_PAGE),
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_PAGE),
        ] {
            let mut writer = ResponseWriter::new(Vec::new());
            write_page(&mut writer, status, page).await.unwrap();

            let response = String::from_utf8(writer.into_inner()).unwrap();
            assert!(response.contains(&format!("content-length: {}\r\n", page.len())));
            assert!(response.ends_with(page));
        }
    }
}
