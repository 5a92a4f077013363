// src/main.rs

use std::env;

use tokio::net::TcpListener;

use backspace_backend::{config::AppState, router};

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não
    // deve iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");

    let app = router(app_state);

    // Inicia o servidor
    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!(
        "🚀 Servidor escutando em {}",
        listener.local_addr().expect("endereço local do listener")
    );
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
