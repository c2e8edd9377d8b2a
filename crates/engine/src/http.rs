use axum::Router;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpServer {
    addr: String,
    router: Arc<Router>,
}

impl HttpServer {
    pub fn new(addr: String, router: Router) -> Self {
        Self {
            addr,
            router: Arc::new(router),
        }
    }

    pub async fn start(&self) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr.as_str()).await?;
        tracing::info!(addr = %self.addr, "listening");
        axum::serve(listener, (*self.router).clone()).await
    }
}
