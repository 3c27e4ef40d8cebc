mod helpers;

use hickory_proto::op::ResponseCode;
use helpers::{a_query, decode, message_id, query_tcp, query_udp, start_server, FakeUpstream, Upstream};
use hostdns_domain::{ResolverGroup, ResolverTable};

#[tokio::test]
async fn test_nxdomain_from_second_default_group_is_relayed() {
    let silent_a = FakeUpstream::start(Upstream::Silent).await;
    let silent_b = FakeUpstream::start(Upstream::Silent).await;
    let nxdomain = FakeUpstream::start(Upstream::NxDomain).await;
    let never = FakeUpstream::start(Upstream::Silent).await;

    let table = ResolverTable::with_defaults(vec![
        ResolverGroup::new("first", vec![silent_a.addr(), silent_b.addr()]).unwrap(),
        ResolverGroup::new("second", vec![nxdomain.addr(), never.addr()]).unwrap(),
    ]);
    let mut server = start_server(table).await;

    let reply = query_udp(server.udp_addr().unwrap(), &a_query(0x0D0D, "missing.example.")).await;
    let message = decode(&reply);

    assert_eq!(message_id(&reply), 0x0D0D);
    assert_eq!(message.metadata.response_code, ResponseCode::NXDomain);
    assert!(message.answers.is_empty());
    assert_eq!(silent_a.hits(), 1);
    assert_eq!(silent_b.hits(), 1);
    assert_eq!(nxdomain.hits(), 1);
    assert_eq!(never.hits(), 0);

    server.shutdown().await;
}

#[tokio::test]
async fn test_every_upstream_silent_yields_servfail() {
    let silent = FakeUpstream::start(Upstream::Silent).await;

    let table =
        ResolverTable::with_defaults(vec![ResolverGroup::new("only", vec![silent.addr()]).unwrap()]);
    let mut server = start_server(table).await;

    let query = a_query(0xF00D, "example.com.");
    let reply = query_tcp(server.tcp_addr().unwrap(), &query).await;
    let message = decode(&reply);

    assert_eq!(message_id(&reply), 0xF00D);
    assert_eq!(message.metadata.response_code, ResponseCode::ServFail);
    assert_eq!(reply[3] & 0x80, 0, "RA must be clear");
    assert_eq!(reply[12..], query[12..]);

    server.shutdown().await;
    server.shutdown().await;
}
