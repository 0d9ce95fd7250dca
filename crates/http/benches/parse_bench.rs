use async_trait::async_trait;
use bare_http::codec::{ChunkedEncoder, HeaderEncoder, RequestDecoder, StatusLineEncoder};
use bare_http::connection::{HttpConnection, ResponseWriter};
use bare_http::handler::Handler;
use bare_http::protocol::{PayloadItem, Request, SendError, default_headers};
use bytes::{Bytes, BytesMut};
use criterion::{Criterion, criterion_group, criterion_main};
use futures::executor::block_on;
use http::StatusCode;
use std::hint::black_box;
use std::sync::Arc;
use tokio::io::AsyncWrite;
use tokio_util::codec::{Decoder, Encoder};

const REQUEST: &[u8] = b"POST /submit HTTP/1.1\r\n\
Host: localhost:42069\r\n\
User-Agent: curl/7.81.0\r\n\
Accept: */*\r\n\
Content-Type: application/json\r\n\
Content-Length: 22\r\n\
\r\n\
{\"flavor\":\"dark mode\"}";

struct HelloHandler;

#[async_trait]
impl Handler for HelloHandler {
    async fn call<W>(&self, _request: Request, writer: &mut ResponseWriter<W>) -> Result<(), SendError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        writer.write_status_line(StatusCode::OK).await?;
        writer.write_headers(&default_headers(12)).await?;
        writer.write_body(b"Hello World!").await?;
        Ok(())
    }
}

fn bench_request_decoder(c: &mut Criterion) {
    c.bench_function("decode_whole_request", |b| {
        b.iter(|| {
            let mut decoder = RequestDecoder::new();
            let mut bytes = BytesMut::from(REQUEST);
            black_box(decoder.decode(&mut bytes).unwrap());
        });
    });

    c.bench_function("decode_request_byte_by_byte", |b| {
        b.iter(|| {
            let mut decoder = RequestDecoder::new();
            let mut bytes = BytesMut::with_capacity(REQUEST.len());
            let mut request = None;
            for byte in REQUEST {
                bytes.extend_from_slice(&[*byte]);
                request = decoder.decode(&mut bytes).unwrap();
            }
            black_box(request.unwrap());
        });
    });
}

fn bench_response_encoder(c: &mut Criterion) {
    let headers = default_headers(12);
    let payload = Bytes::from_static(b"Hello World!");

    c.bench_function("encode_chunked_response", |b| {
        b.iter(|| {
            let mut bytes = BytesMut::new();
            StatusLineEncoder.encode(StatusCode::OK, &mut bytes).unwrap();
            HeaderEncoder.encode(&headers, &mut bytes).unwrap();
            let mut chunked = ChunkedEncoder::new();
            for _ in 0..8 {
                chunked.encode(PayloadItem::Chunk(payload.clone()), &mut bytes).unwrap();
            }
            chunked.encode(PayloadItem::<Bytes>::Eof, &mut bytes).unwrap();
            black_box(bytes);
        });
    });
}

fn bench_http_connection(c: &mut Criterion) {
    let handler = Arc::new(HelloHandler);

    c.bench_function("process_request", |b| {
        b.iter(|| {
            let connection = HttpConnection::new(REQUEST, tokio::io::sink());
            block_on(connection.process(Arc::clone(&handler))).unwrap();
        });
    });
}

criterion_group!(benches, bench_request_decoder, bench_response_encoder, bench_http_connection);
criterion_main!(benches);
