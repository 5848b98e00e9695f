use crate::runtime::interpreter::jul_interpreter::INTERPRETER_THREAD_STACK_SIZE;
use std::{
    net::{TcpListener, TcpStream},
    sync::Arc,
    thread,
};
use tracing::{info, warn};

/// Accept connections forever, handing each one to the handler on its own thread.  Connections
/// share nothing but the handler.  Failed accepts are logged and skipped.  Connection threads get
/// a stack big enough for an interpreter running at its full nesting depth.
pub fn serve<F>(listener: TcpListener, handler: F)
where
    F: Fn(TcpStream) + Send + Sync + 'static,
{
    let handler = Arc::new(handler);

    if let Ok(address) = listener.local_addr() {
        info!(%address, "listening");
    }

    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(error) => {
                warn!(%error, "failed to accept a connection");
                continue;
            }
        };

        match stream.peer_addr() {
            Ok(peer) => info!(%peer, "accepted connection"),
            Err(_) => info!("accepted connection"),
        }

        let handler = Arc::clone(&handler);

        let spawned = thread::Builder::new()
            .name("jul-connection".to_string())
            .stack_size(INTERPRETER_THREAD_STACK_SIZE)
            .spawn(move || handler(stream));

        if let Err(error) = spawned {
            warn!(%error, "failed to start a connection thread");
        }
    }
}
