//! Mock OFD server.
//!
//! Emulates an operator without the cryptographic machine: accepts one
//! message per connection, prints the decoded document, and answers with an
//! unsigned `operatorAck`. Messages are assumed to arrive unencrypted.
//!
//! ```bash
//! mock-ofd --port 12345
//! ```

use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use ofd::frame::{self, MsgTypeCheck};
use ofd::session;
use ofd::{build_ack, decode_container, FrameHeader, SessionHeader};

/// INN stamped into outgoing acknowledgments.
const OFD_INN: &str = "7704358518";

type ConnectionError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser, Debug)]
#[command(name = "mock-ofd")]
#[command(about = "OFD emulator: receives fiscal documents, replies with operator acknowledgments")]
#[command(version)]
struct Args {
    /// Host to bind the server to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind the server to
    #[arg(long, default_value_t = 12345)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
    info!("mock ofd server has been started at {}", listener.local_addr()?);

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tokio::spawn(handle_connection(stream, peer));
            }
            Err(err) => error!(%err, "accept failed"),
        }
    }
}

async fn handle_connection(mut stream: TcpStream, peer: SocketAddr) {
    if let Err(err) = serve(&mut stream).await {
        // any codec error is a protocol violation: log and drop the connection
        warn!(%peer, %err, "connection aborted");
    }
    let _ = stream.shutdown().await;
}

async fn serve(stream: &mut TcpStream) -> Result<(), ConnectionError> {
    let (document, in_session, in_frame) = read_message(stream).await?;
    info!("received document:\n{}", serde_json::to_string_pretty(&document)?);

    let body = document_body(&document)?;
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as u32;
    let response = build_ack(body, &in_session, &in_frame, OFD_INN, now)?;
    debug!(bytes = response.len(), "sending operator acknowledgment");

    stream.write_all(&response).await?;
    stream.shutdown().await?;
    Ok(())
}

/// Read the session header, then exactly the container it announces, and
/// decode both envelopes and the document body.
async fn read_message(
    stream: &mut TcpStream,
) -> Result<(Value, SessionHeader, FrameHeader), ConnectionError> {
    let mut session_raw = [0u8; session::SIZE];
    stream.read_exact(&mut session_raw).await?;
    let in_session = SessionHeader::unpack_from(&session_raw)?;
    debug!(?in_session, "session header");

    if (in_session.length as usize) < frame::SIZE {
        return Err(Box::new(ofd::OfdError::WrongSize {
            expected: frame::SIZE,
            actual: in_session.length as usize,
        }));
    }
    let mut container = vec![0u8; in_session.length as usize];
    stream.read_exact(&mut container).await?;

    let in_frame = FrameHeader::unpack_from(&container[..frame::SIZE], MsgTypeCheck::Strict)?;
    debug!(?in_frame, "frame header");

    // the emulator runs without the cryptographic machine, so the fiscal
    // sign placeholder mirrors what a register would have appended
    let document = decode_container(&container[frame::SIZE..], b"0")?;
    Ok((document, in_session, in_frame))
}

/// Pull the document body (the object under the kind key) out of the
/// decoded `{"document": {<kind>: {…}}}` envelope.
fn document_body(document: &Value) -> Result<&Value, ConnectionError> {
    document
        .get("document")
        .and_then(Value::as_object)
        .and_then(|kinds| kinds.values().next())
        .ok_or_else(|| Box::from("decoded message is not a document envelope"))
}
