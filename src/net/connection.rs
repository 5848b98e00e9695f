use crate::net::framing::{read_message, write_message};
use std::{
    io::{self, BufReader},
    net::{SocketAddr, TcpStream, ToSocketAddrs},
};
use tracing::debug;

/// One end of a framed text conversation over TCP.
pub struct Connection {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    peer: SocketAddr,
}

impl Connection {
    /// Connect to a peer.
    pub fn connect<A: ToSocketAddrs>(address: A) -> io::Result<Connection> {
        let stream = TcpStream::connect(address)?;
        let connection = Connection::from_stream(stream)?;

        debug!(peer = %connection.peer, "connected");

        Ok(connection)
    }

    /// Wrap an already established stream, such as one accepted by a server.
    pub fn from_stream(stream: TcpStream) -> io::Result<Connection> {
        let peer = stream.peer_addr()?;
        let writer = stream.try_clone()?;

        Ok(Connection {
            reader: BufReader::new(stream),
            writer,
            peer,
        })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Send the text as one message.
    pub fn send(&mut self, text: &str) -> io::Result<()> {
        write_message(&mut self.writer, text.as_bytes())
    }

    /// Wait for the next message.  Messages that aren't valid UTF-8 are an `InvalidData` error.
    pub fn receive(&mut self) -> io::Result<String> {
        let message = read_message(&mut self.reader)?;

        String::from_utf8(message).map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
    }
}
