use std::net::{Ipv4Addr, SocketAddrV4, UdpSocket as StdUdpSocket};

use anyhow::{Context, Result};
use shared::message::Message;
use shared::protocol::{MDNS_PORT, MDNS_V4_GROUP};
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::decode;

/// Packets larger than this are not valid mDNS; 9000 covers jumbo frames.
const RECV_BUF_SIZE: usize = 9000;

fn bind_multicast(interface: Option<Ipv4Addr>) -> Result<StdUdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
        .context("Failed to create UDP socket")?;

    // Share the port with any mDNS responder already running on the host.
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nonblocking(true)?;

    let addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, MDNS_PORT);
    socket
        .bind(&addr.into())
        .with_context(|| format!("Failed to bind {}", addr))?;

    let iface = interface.unwrap_or(Ipv4Addr::UNSPECIFIED);
    socket
        .join_multicast_v4(&MDNS_V4_GROUP, &iface)
        .with_context(|| format!("Failed to join {} on {}", MDNS_V4_GROUP, iface))?;

    Ok(socket.into())
}

/// Receive loop: decode each datagram and hand the message to the monitor.
pub async fn run_listener(
    interface: Option<Ipv4Addr>,
    tx: mpsc::Sender<Message>,
    cancel: CancellationToken,
) -> Result<()> {
    let socket = UdpSocket::from_std(bind_multicast(interface)?)
        .context("Failed to register socket with the runtime")?;

    tracing::info!("Listening for mDNS traffic on port {}", MDNS_PORT);

    let mut buf = vec![0u8; RECV_BUF_SIZE];
    loop {
        tokio::select! {
            result = socket.recv_from(&mut buf) => {
                match result {
                    Ok((len, from)) => match decode::decode_packet(&buf[..len], from.ip()) {
                        Ok(message) => {
                            if tx.send(message).await.is_err() {
                                // Monitor is gone; nothing left to do.
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::debug!("Ignoring undecodable packet from {}: {}", from, e);
                        }
                    },
                    Err(e) => {
                        tracing::warn!("Socket receive error: {}", e);
                    }
                }
            }
            _ = cancel.cancelled() => {
                tracing::info!("mDNS listener shutting down");
                break;
            }
        }
    }

    Ok(())
}
