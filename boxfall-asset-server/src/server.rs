//! Just enough HTTP/1.1 to serve the game bundle out of one static
//! directory. One request per connection; every response closes the socket.

use std::path::{Component, Path, PathBuf};

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::debug;

pub async fn handle_connection(stream: TcpStream, root: &str) -> Result<()> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    // Drain headers; none of them matter for static GETs.
    loop {
        let mut header = String::new();
        let n = reader.read_line(&mut header).await?;
        if n == 0 || header == "\r\n" || header == "\n" {
            break;
        }
    }

    let mut stream = reader.into_inner();

    let Some((method, target)) = parse_request_line(&request_line) else {
        return respond(&mut stream, 400, "Bad Request", "text/plain", b"bad request", true).await;
    };
    let with_body = method != "HEAD";
    if method != "GET" && method != "HEAD" {
        debug!("{method} {target} -> 405");
        return respond(
            &mut stream,
            405,
            "Method Not Allowed",
            "text/plain",
            b"method not allowed",
            with_body,
        )
        .await;
    }

    let file = match resolve_path(Path::new(root), target) {
        Some(path) => tokio::fs::read(&path).await.ok().map(|body| (path, body)),
        None => None,
    };
    match file {
        Some((path, body)) => {
            debug!("{method} {target} -> 200 ({} bytes)", body.len());
            respond(&mut stream, 200, "OK", content_type(&path), &body, with_body).await
        }
        None => {
            debug!("{method} {target} -> 404");
            respond(&mut stream, 404, "Not Found", "text/plain", b"not found", with_body).await
        }
    }
}

async fn respond(
    stream: &mut TcpStream,
    status: u16,
    reason: &str,
    content_type: &str,
    body: &[u8],
    with_body: bool,
) -> Result<()> {
    let header = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    stream.write_all(header.as_bytes()).await?;
    if with_body {
        stream.write_all(body).await?;
    }
    stream.shutdown().await?;
    Ok(())
}

/// Split "GET /path HTTP/1.1" into method and target.
fn parse_request_line(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    Some((method, target))
}

/// Map a request target onto a file under `root`: `/` serves `index.html`,
/// query strings are stripped, and anything that is not a plain relative
/// path (`..`, `//`, `.`) is rejected.
fn resolve_path(root: &Path, target: &str) -> Option<PathBuf> {
    let path = target.split_once('?').map_or(target, |(path, _)| path);
    let path = path.strip_prefix('/')?;
    let path = if path.is_empty() { "index.html" } else { path };

    let relative = Path::new(path);
    if relative
        .components()
        .any(|part| !matches!(part, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript",
        Some("wasm") => "application/wasm",
        Some("png") => "image/png",
        Some("mp3") => "audio/mpeg",
        Some("css") => "text/css",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
