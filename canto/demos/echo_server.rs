//! Example: TCP echo server
//!
//! Listens on 127.0.0.1:30000 (or the address given as first argument) and
//! spawns one task per connection. Every chunk received is sent back
//! prefixed with `Got:`.
//!
//! Try it with `nc 127.0.0.1 30000`.

use canto::Scheduler;
use canto::net::{TcpListener, TcpStream};
use std::io;
use tracing_subscriber::EnvFilter;

async fn echo_handler(mut stream: TcpStream) -> io::Result<()> {
    loop {
        let data = stream.recv(10_000).await?;
        if data.is_empty() {
            break;
        }

        let mut reply = b"Got:".to_vec();
        reply.extend_from_slice(&data);
        stream.send_all(&reply).await?;
    }

    Ok(())
}

async fn tcp_server(scheduler: Scheduler, address: String) -> io::Result<()> {
    let listener = TcpListener::bind(&scheduler, address.as_str())?;
    println!("Listening on {}", listener.local_addr()?);

    loop {
        let (stream, peer) = listener.accept().await?;
        println!("Connection from {peer}");

        scheduler.new_task(async move {
            if let Err(err) = echo_handler(stream).await {
                eprintln!("Connection from {peer} failed: {err}");
            }
            println!("Connection from {peer} closed");
        });
    }
}

#[canto::main(name = "echo")]
async fn main(scheduler: Scheduler) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let address = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:30000".to_string());

    if let Err(err) = tcp_server(scheduler, address).await {
        eprintln!("Server error: {err}");
    }
}
