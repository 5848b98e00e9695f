/// Zero terminated message framing.
pub mod framing;

/// An outbound connection speaking the framed protocol.
pub mod connection;

/// Thread per connection TCP server.
pub mod server;
