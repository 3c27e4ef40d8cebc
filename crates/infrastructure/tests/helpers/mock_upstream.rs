#![allow(dead_code)]

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy)]
pub enum UpstreamBehavior {
    /// One A record with this address.
    Answer(Ipv4Addr),
    NxDomain,
    /// Never replies.
    Silent,
}

/// Upstream DNS server on an ephemeral loopback port answering with canned
/// responses. UDP and TCP share the port when both are enabled.
pub struct MockUpstream {
    addr: SocketAddr,
    udp_hits: Arc<AtomicUsize>,
    tcp_hits: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockUpstream {
    pub async fn udp(behavior: UpstreamBehavior) -> Self {
        Self::start(behavior, true, false).await
    }

    pub async fn tcp(behavior: UpstreamBehavior) -> Self {
        Self::start(behavior, false, true).await
    }

    pub async fn udp_and_tcp(behavior: UpstreamBehavior) -> Self {
        Self::start(behavior, true, true).await
    }

    async fn start(behavior: UpstreamBehavior, with_udp: bool, with_tcp: bool) -> Self {
        let (udp, tcp) = bind_pair(with_udp, with_tcp).await;
        let addr = match (&udp, &tcp) {
            (Some(socket), _) => socket.local_addr().unwrap(),
            (None, Some(listener)) => listener.local_addr().unwrap(),
            (None, None) => panic!("mock upstream needs a transport"),
        };

        let udp_hits = Arc::new(AtomicUsize::new(0));
        let tcp_hits = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let udp_counter = Arc::clone(&udp_hits);
        let tcp_counter = Arc::clone(&tcp_hits);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 65535];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    Some((len, peer)) = recv(udp.as_ref(), &mut buf) => {
                        udp_counter.fetch_add(1, Ordering::SeqCst);
                        if let Some(response) = build_response(&buf[..len], behavior) {
                            let _ = udp.as_ref().unwrap().send_to(&response, peer).await;
                        }
                    }
                    Some(stream) = accept(tcp.as_ref()) => {
                        let counter = Arc::clone(&tcp_counter);
                        tokio::spawn(serve_tcp(stream, behavior, counter));
                    }
                }
            }
        });

        Self {
            addr,
            udp_hits,
            tcp_hits,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_hits(&self) -> usize {
        self.udp_hits.load(Ordering::SeqCst)
    }

    pub fn tcp_hits(&self) -> usize {
        self.tcp_hits.load(Ordering::SeqCst)
    }

    pub fn hits(&self) -> usize {
        self.udp_hits() + self.tcp_hits()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn bind_pair(with_udp: bool, with_tcp: bool) -> (Option<UdpSocket>, Option<TcpListener>) {
    for _ in 0..20 {
        if !with_udp {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            return (None, Some(listener));
        }

        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        if !with_tcp {
            return (Some(socket), None);
        }

        let port = socket.local_addr().unwrap().port();
        if let Ok(listener) = TcpListener::bind(("127.0.0.1", port)).await {
            return (Some(socket), Some(listener));
        }
    }
    panic!("could not bind UDP and TCP on the same port");
}

async fn recv(socket: Option<&UdpSocket>, buf: &mut [u8]) -> Option<(usize, SocketAddr)> {
    match socket {
        Some(socket) => socket.recv_from(buf).await.ok(),
        None => std::future::pending().await,
    }
}

async fn accept(listener: Option<&TcpListener>) -> Option<TcpStream> {
    match listener {
        Some(listener) => listener.accept().await.ok().map(|(stream, _)| stream),
        None => std::future::pending().await,
    }
}

async fn serve_tcp(mut stream: TcpStream, behavior: UpstreamBehavior, hits: Arc<AtomicUsize>) {
    loop {
        let mut len_buf = [0u8; 2];
        if stream.read_exact(&mut len_buf).await.is_err() {
            return;
        }
        let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
        if stream.read_exact(&mut query).await.is_err() {
            return;
        }
        hits.fetch_add(1, Ordering::SeqCst);

        let Some(response) = build_response(&query, behavior) else {
            continue;
        };
        let mut frame = (response.len() as u16).to_be_bytes().to_vec();
        frame.extend_from_slice(&response);
        if stream.write_all(&frame).await.is_err() {
            return;
        }
    }
}

/// Echoes the question section; the query must carry no additional records.
pub fn build_response(query: &[u8], behavior: UpstreamBehavior) -> Option<Vec<u8>> {
    if query.len() < 12 {
        return None;
    }

    let (rcode, answer) = match behavior {
        UpstreamBehavior::Silent => return None,
        UpstreamBehavior::NxDomain => (0x03, None),
        UpstreamBehavior::Answer(ip) => (0x00, Some(ip)),
    };

    let mut response = Vec::with_capacity(512);
    response.extend_from_slice(&query[0..2]);
    response.push(0x80 | (query[2] & 0x79));
    response.push(0x80 | rcode);
    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&[0x00, answer.is_some() as u8]);
    response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    response.extend_from_slice(&query[12..]);

    if let Some(ip) = answer {
        response.extend_from_slice(&[
            0xc0, 0x0c, // pointer to question name
            0x00, 0x01, // A
            0x00, 0x01, // IN
            0x00, 0x00, 0x00, 0x3c, // TTL 60
            0x00, 0x04,
        ]);
        response.extend_from_slice(&ip.octets());
    }

    Some(response)
}
