use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;

/// Binds a TCP listener for the server. A host of `*` binds a wildcard
/// listener, preferring an IPv6 dual-stack socket and falling back to IPv4.
pub async fn create_listener(
    host: &str,
    port: u16,
) -> std::io::Result<(String, tokio::net::TcpListener)> {
    if host == "*" {
        return create_wildcard_listener(port);
    }

    let addr = format!("{host}:{port}");
    tracing::info!("Attempting to bind server to {}...", addr);

    let tokio_listener = tokio::net::TcpListener::bind(&addr).await?;

    Ok((addr, tokio_listener))
}

fn create_wildcard_listener(port: u16) -> std::io::Result<(String, tokio::net::TcpListener)> {
    match create_dual_stack_listener(port) {
        Ok(listener) => Ok(listener),
        Err(_) => {
            tracing::warn!("Failed to bind IPv6 listener. Attempting IPv4 only.");

            let str_addr = format!("0.0.0.0:{port}");
            tracing::info!("Attempting to bind server to {}... (IPv4)", str_addr);
            bind_nonblocking(Domain::IPV4, &str_addr, |_| Ok(()))
        }
    }
}

fn create_dual_stack_listener(port: u16) -> std::io::Result<(String, tokio::net::TcpListener)> {
    let str_addr = format!("[::]:{port}");
    tracing::info!(
        "Attempting to bind server to {}... (IPv6 + IPv4 dual-stack)",
        str_addr
    );

    bind_nonblocking(Domain::IPV6, &str_addr, |socket| {
        // Dual-stack mode can fail on some systems; a v6-only listener is
        // still usable, so keep going.
        if let Err(e) = socket.set_only_v6(false) {
            tracing::warn!("Failed to set dual-stack mode for IPv6 socket: {}", e);
        }
        Ok(())
    })
}

fn bind_nonblocking(
    domain: Domain,
    str_addr: &str,
    configure: impl FnOnce(&Socket) -> std::io::Result<()>,
) -> std::io::Result<(String, tokio::net::TcpListener)> {
    let addr: SocketAddr = str_addr
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    configure(&socket)?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;

    // tokio requires the socket in non-blocking mode.
    socket.set_nonblocking(true)?;

    let std_listener: std::net::TcpListener = socket.into();
    let tokio_listener = tokio::net::TcpListener::from_std(std_listener)?;

    Ok((str_addr.to_string(), tokio_listener))
}
