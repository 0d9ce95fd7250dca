use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bare_http::connection::ResponseWriter;
use bare_http::handler::Handler;
use bare_http::protocol::{Headers, Request, SendError, default_headers};
use bare_http::server::{Server, ShutdownHandle};
use http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// Echoes the request body, or streams it back chunked with a trailer when the
/// target is `/chunked`.
struct EchoHandler;

#[async_trait]
impl Handler for EchoHandler {
    async fn call<W>(&self, request: Request, writer: &mut ResponseWriter<W>) -> Result<(), SendError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        writer.write_status_line(StatusCode::OK).await?;

        if request.target() == "/chunked" {
            let mut headers = default_headers(0);
            headers.remove("content-length");
            headers.set("Transfer-Encoding", "chunked").expect("valid header");
            headers.set("Trailer", "X-Body-Length").expect("valid header");
            writer.write_headers(&headers).await?;

            for piece in request.body().chunks(4) {
                writer.write_chunked_body(piece).await?;
            }
            writer.write_chunked_body_done().await?;

            let mut trailers = Headers::new();
            trailers.set("X-Body-Length", &request.body().len().to_string()).expect("valid header");
            return writer.write_trailers(&trailers).await;
        }

        writer.write_headers(&default_headers(request.body().len())).await?;
        writer.write_body(request.body()).await?;
        Ok(())
    }
}

async fn start() -> (std::net::SocketAddr, ShutdownHandle, JoinHandle<()>) {
    let server = Server::builder().address("127.0.0.1:0").bind().await.unwrap();
    let address = server.local_addr().unwrap();
    let shutdown = server.shutdown_handle();
    let join = tokio::spawn(server.serve(Arc::new(EchoHandler)));
    (address, shutdown, join)
}

async fn round_trip(address: std::net::SocketAddr, parts: &[&[u8]]) -> String {
    let mut stream = TcpStream::connect(address).await.unwrap();
    for part in parts {
        stream.write_all(part).await.unwrap();
        stream.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn echo_over_tcp() {
    let (address, shutdown, join) = start().await;

    let response = round_trip(
        address,
        &[b"POST /echo HTTP/1.1\r\nHost: local", b"host\r\nContent-Length: 11\r\n\r\nhello", b" world"],
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("content-length: 11\r\n"));
    assert!(response.contains("connection: close\r\n"));
    assert!(response.ends_with("\r\n\r\nhello world"));

    shutdown.shutdown();
    join.await.unwrap();
}

#[tokio::test]
async fn chunked_over_tcp() {
    let (address, shutdown, join) = start().await;

    let response = round_trip(address, &[b"POST /chunked HTTP/1.1\r\nContent-Length: 10\r\n\r\n0123456789"]).await;

    let (head, body) = response.split_once("\r\n\r\n").unwrap();
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(head.contains("transfer-encoding: chunked"));
    assert!(head.contains("trailer: X-Body-Length"));
    assert!(!head.contains("content-length"));
    assert_eq!(body, "4\r\n0123\r\n4\r\n4567\r\n2\r\n89\r\n0\r\nx-body-length: 10\r\n\r\n");

    shutdown.shutdown();
    join.await.unwrap();
}

#[tokio::test]
async fn bad_request_over_tcp() {
    let (address, shutdown, join) = start().await;

    let response = round_trip(address, &[b"GET /nope HTTP/1.0\r\n\r\n"]).await;

    assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    assert!(response.ends_with("Error parsing request: unsupported http version: \"HTTP/1.0\""));

    shutdown.shutdown();
    join.await.unwrap();
}

#[tokio::test]
async fn concurrent_connections_are_independent() {
    let (address, shutdown, join) = start().await;

    // a stalled client must not block the others
    let mut stalled = TcpStream::connect(address).await.unwrap();
    stalled.write_all(b"GET /stalled HTTP/1.1\r\nHost: ").await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..8 {
        tasks.push(tokio::spawn(async move {
            let body = format!("client-{i}");
            let request = format!("POST / HTTP/1.1\r\nContent-Length: {}\r\n\r\n{body}", body.len());
            let response = round_trip(address, &[request.as_bytes()]).await;
            assert!(response.ends_with(&body), "{response}");
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    drop(stalled);
    shutdown.shutdown();
    join.await.unwrap();
}

#[tokio::test]
async fn shared_handle_stops_every_server() {
    let handle = ShutdownHandle::new();

    let mut joins = Vec::new();
    for _ in 0..2 {
        let server = Server::builder().address("127.0.0.1:0").shutdown_handle(handle.clone()).bind().await.unwrap();
        joins.push(tokio::spawn(server.serve(Arc::new(EchoHandler))));
    }

    // both loops are parked in accept before shutdown
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.shutdown();

    for join in joins {
        tokio::time::timeout(Duration::from_secs(5), join).await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn shutdown_before_serve() {
    let server = Server::builder().address("127.0.0.1:0").bind().await.unwrap();
    server.shutdown_handle().shutdown();

    tokio::time::timeout(Duration::from_secs(5), server.serve(Arc::new(EchoHandler))).await.unwrap();
}
