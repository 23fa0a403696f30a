use hickory_server::ServerFuture;
use nns_dns_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

const MAX_UDP_MESSAGE_SIZE: usize = 4096;
const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn start_dns_server(
    bind_addr: String,
    handler: DnsServerHandler,
    num_workers: usize,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    info!(bind_address = %socket_addr, num_workers, "Starting DNS server with SO_REUSEPORT");

    let handler = Arc::new(handler);
    let mut join_set: JoinSet<()> = JoinSet::new();

    for i in 0..num_workers.max(1) {
        let udp_socket = Arc::new(create_udp_socket(domain, socket_addr)?);
        let handler_udp = handler.clone();
        join_set.spawn(async move {
            run_udp_worker(udp_socket, handler_udp, i).await;
        });
    }

    let tcp_listener = create_tcp_listener(domain, socket_addr)?;
    let handler_tcp = (*handler).clone();
    join_set.spawn(async move {
        let mut server = ServerFuture::new(handler_tcp);
        server.register_listener(tcp_listener, TCP_IDLE_TIMEOUT);
        if let Err(e) = server.block_until_done().await {
            error!(error = %e, "TCP DNS listener error");
        }
    });

    info!("DNS server ready - {} UDP workers and TCP on {}", num_workers, socket_addr);

    while join_set.join_next().await.is_some() {}
    Ok(())
}

async fn run_udp_worker(socket: Arc<UdpSocket>, handler: Arc<DnsServerHandler>, worker_id: usize) {
    let mut recv_buf = [0u8; MAX_UDP_MESSAGE_SIZE];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                // ICMP port unreachable from a previous reply surfaces here on some platforms.
                warn!(worker = worker_id, error = %e, "UDP recv error");
                continue;
            }
        };

        let handler = handler.clone();
        let socket = socket.clone();
        let query: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        tokio::spawn(async move {
            if let Some(response) = handler.handle_udp(&query).await {
                if let Err(e) = socket.send_to(&response, from).await {
                    debug!(client = %from, error = %e, "Failed to send UDP response");
                }
            }
        });
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
