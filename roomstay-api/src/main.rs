use roomstay_api::{app, gateway::MockRefundGateway, AppState};
use roomstay_booking::{HoldManager, PaymentReconciler, RefundPolicy, ReservationLifecycle};
use roomstay_core::{RefundGateway, ReservationRepository, RoomRepository};
use roomstay_shared::{Clock, SystemClock};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomstay_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = roomstay_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting Roomstay API on port {}", config.server.port);

    let store = Arc::new(
        roomstay_store::PgStore::connect(&config.database.url)
            .await
            .expect("Failed to connect to Postgres"),
    );
    store
        .run_migrations()
        .await
        .expect("Failed to run migrations");

    let rates = config.exchange_rates().expect("Invalid exchange rate table");

    let rooms: Arc<dyn RoomRepository> = store.clone();
    let reservations: Arc<dyn ReservationRepository> = store.clone();
    let refund_gateway: Arc<dyn RefundGateway> = Arc::new(MockRefundGateway);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let refunds = RefundPolicy::new(reservations.clone(), refund_gateway);
    let app_state = AppState {
        holds: Arc::new(HoldManager::new(
            rooms,
            reservations.clone(),
            rates,
            config.hold_duration(),
        )),
        lifecycle: Arc::new(ReservationLifecycle::new(reservations.clone(), refunds)),
        payments: Arc::new(PaymentReconciler::new(reservations.clone())),
        reservations,
        clock,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
