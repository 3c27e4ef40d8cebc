#![allow(dead_code)]

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use hostdns_application::services::DomainRouter;
use hostdns_application::use_cases::HandleDnsQueryUseCase;
use hostdns_domain::ResolverTable;
use hostdns_infrastructure::dns::{DnsServer, DnsServerHandler, UpstreamForwarder};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio::task::JoinHandle;

pub const ATTEMPT_TIMEOUT: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
pub enum Upstream {
    Answer(Ipv4Addr),
    NxDomain,
    Silent,
}

/// UDP-only upstream on an ephemeral loopback port.
pub struct FakeUpstream {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl FakeUpstream {
    pub async fn start(behavior: Upstream) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let task = tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            while let Ok((len, peer)) = socket.recv_from(&mut buf).await {
                counter.fetch_add(1, Ordering::SeqCst);
                if let Some(response) = respond(&buf[..len], behavior) {
                    let _ = socket.send_to(&response, peer).await;
                }
            }
        });

        Self { addr, hits, task }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn respond(query: &[u8], behavior: Upstream) -> Option<Vec<u8>> {
    if query.len() < 12 {
        return None;
    }
    let (rcode, answer) = match behavior {
        Upstream::Silent => return None,
        Upstream::NxDomain => (3u8, None),
        Upstream::Answer(ip) => (0u8, Some(ip)),
    };

    let mut response = query[0..2].to_vec();
    response.push(0x80 | (query[2] & 0x79));
    response.push(0x80 | rcode);
    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&[0, answer.is_some() as u8, 0, 0, 0, 0]);
    response.extend_from_slice(&query[12..]);
    if let Some(ip) = answer {
        response.extend_from_slice(&[0xc0, 0x0c, 0, 1, 0, 1, 0, 0, 0, 60, 0, 4]);
        response.extend_from_slice(&ip.octets());
    }
    Some(response)
}

pub fn a_query(id: u16, domain: &str) -> Vec<u8> {
    let mut query = Query::new();
    query.set_name(Name::from_str(domain).unwrap());
    query.set_query_type(RecordType::A);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.metadata.recursion_desired = true;
    message.add_query(query);
    message.to_vec().unwrap()
}

pub fn decode(bytes: &[u8]) -> Message {
    Message::from_vec(bytes).unwrap()
}

pub fn a_records(message: &Message) -> Vec<Ipv4Addr> {
    message
        .answers
        .iter()
        .filter_map(|record| match &record.data {
            RData::A(a) => Some(a.0),
            _ => None,
        })
        .collect()
}

pub fn message_id(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Listener runtime on ephemeral loopback ports for both transports.
pub async fn start_server(table: ResolverTable) -> DnsServer {
    let router = DomainRouter::new(Arc::new(table));
    let forwarder = Arc::new(UpstreamForwarder::new(ATTEMPT_TIMEOUT));
    let handler = DnsServerHandler::new(Arc::new(HandleDnsQueryUseCase::new(router, forwarder)));
    let loopback = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);

    DnsServer::builder(handler)
        .udp(loopback)
        .tcp(loopback)
        .start()
        .await
        .unwrap()
}

pub async fn query_udp(server: SocketAddr, query: &[u8]) -> Vec<u8> {
    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    client.send_to(query, server).await.unwrap();

    let mut buf = vec![0u8; 4096];
    let (len, _) = tokio::time::timeout(Duration::from_secs(5), client.recv_from(&mut buf))
        .await
        .expect("no UDP reply")
        .unwrap();
    buf.truncate(len);
    buf
}

pub async fn query_tcp(server: SocketAddr, query: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(server).await.unwrap();
    let mut frame = (query.len() as u16).to_be_bytes().to_vec();
    frame.extend_from_slice(query);
    stream.write_all(&frame).await.unwrap();

    let mut len_buf = [0u8; 2];
    tokio::time::timeout(Duration::from_secs(5), stream.read_exact(&mut len_buf))
        .await
        .expect("no TCP reply")
        .unwrap();
    let mut response = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut response).await.unwrap();
    response
}
