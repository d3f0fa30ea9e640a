// NDJSON streaming utilities - One JSON document per line
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use serde::Serialize;
use tokio::sync::broadcast;

/// Create a chunked NDJSON streaming response
pub fn ndjson_stream<S, T>(stream: S) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = T> + Send + 'static,
    T: Serialize + Send + 'static,
{
    let byte_stream = stream.map(|item| serialize_line(&item));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(byte_stream))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single item to a newline-terminated chunk
fn serialize_line<T: Serialize>(item: &T) -> Result<Bytes, std::io::Error> {
    let json = serde_json::to_vec(item)?;
    let mut chunk = BytesMut::with_capacity(json.len() + 1);
    chunk.put_slice(&json);
    chunk.put_u8(b'\n');
    Ok(chunk.freeze())
}

/// Stream everything published on a broadcast channel. Lagging clients skip what they missed.
pub fn stream_from_broadcast<T>(mut rx: broadcast::Receiver<T>) -> impl IntoResponse
where
    T: Serialize + Clone + Send + 'static,
{
    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(item) => yield item,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "live feed client lagging");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    match ndjson_stream(stream) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Line {
        id: &'static str,
    }

    #[test]
    fn test_lines_are_newline_terminated() {
        let chunk = serialize_line(&Line { id: "BIN-001" }).unwrap();
        assert_eq!(&chunk[..], b"{\"id\":\"BIN-001\"}\n");
    }
}
