use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// Minimal HTTP/1.1 server answering every request with one fixed response.
pub struct MockHttpServer {
    addr: SocketAddr,
    user_agents: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockHttpServer {
    pub async fn start(status: u16, body: &str) -> Result<Self, std::io::Error> {
        Self::spawn(Some((status, body.to_string()))).await
    }

    /// Accepts connections and reads requests but never answers.
    pub async fn start_silent() -> Result<Self, std::io::Error> {
        Self::spawn(None).await
    }

    async fn spawn(response: Option<(u16, String)>) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let user_agents = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let agents = Arc::clone(&user_agents);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            let agents = Arc::clone(&agents);
                            let response = response.clone();
                            tokio::spawn(Self::serve(stream, response, agents));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            user_agents,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    async fn serve(
        mut stream: TcpStream,
        response: Option<(u16, String)>,
        agents: Arc<Mutex<Vec<String>>>,
    ) {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let request = String::from_utf8_lossy(&request);
        if let Some(agent) = request.lines().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("user-agent")
                .then(|| value.trim().to_string())
        }) {
            agents.lock().unwrap().push(agent);
        }

        let Some((status, body)) = response else {
            tokio::time::sleep(Duration::from_secs(60)).await;
            return;
        };

        let reason = match status {
            200 => "OK",
            404 => "Not Found",
            500 => "Internal Server Error",
            _ => "Unknown",
        };
        let reply = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );
        let _ = stream.write_all(reply.as_bytes()).await;
        let _ = stream.shutdown().await;
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.user_agents.lock().unwrap().clone()
    }
}

impl Drop for MockHttpServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
