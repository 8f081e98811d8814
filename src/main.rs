use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use tenderdesk::application::ports::{LlmClient, TenderRepository};
use tenderdesk::application::services::{BoqExtractionService, DocumentService, ReviewService};
use tenderdesk::infrastructure::llm::OpenAiClient;
use tenderdesk::infrastructure::observability::{TracingConfig, init_tracing};
use tenderdesk::infrastructure::persistence::{InMemoryTenderRepository, PgTenderRepository};
use tenderdesk::infrastructure::text_processing::{
    DelimitedTextLoader, PdfLoader, SpreadsheetLoader,
};
use tenderdesk::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment)?;

    init_tracing(
        TracingConfig {
            environment: environment.to_string(),
            json_format: settings.logging.enable_json,
        },
        settings.server.port,
    );

    let repository: Arc<dyn TenderRepository> = match &settings.database.url {
        Some(url) => {
            tracing::info!("Using PostgreSQL record store");
            let pool = PgPoolOptions::new()
                .max_connections(settings.database.max_connections)
                .connect_lazy(url)?;
            Arc::new(PgTenderRepository::new(pool))
        }
        None => {
            tracing::warn!("No database configured; using the in-memory record store");
            Arc::new(InMemoryTenderRepository::new())
        }
    };

    let llm: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(
        settings.llm.api_key.clone(),
        settings.llm.base_url.clone(),
        settings.llm.model.clone(),
        settings.llm.temperature,
    ));
    let extraction = Arc::new(BoqExtractionService::new(llm));

    let document_service = Arc::new(DocumentService::new(
        Arc::new(PdfLoader::new()),
        Arc::new(SpreadsheetLoader::new()),
        Arc::new(DelimitedTextLoader::new()),
        extraction,
        Arc::clone(&repository),
    ));
    let review_service = Arc::new(ReviewService::new(Arc::clone(&repository)));

    let state = AppState {
        document_service,
        review_service,
        tender_repository: repository,
    };

    let max_upload_bytes = settings.upload.max_file_size_mb * 1024 * 1024;
    let router = create_router(state, max_upload_bytes);

    let host: IpAddr = settings.server.host.parse()?;
    let addr = SocketAddr::new(host, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
