//! # Structured Logging Module
//!
//! Environment-aware structured logging for the configuration core. The UI
//! host usually installs its own subscriber; this initializer is for
//! standalone use (tests, tools) and is safe to call more than once.

use std::env;
use std::sync::OnceLock;
use chrono::Utc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        // Production gets JSON lines for log shippers; everything else gets
        // a readable console format
        let initialized = if environment == "production" {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_ansi(false)
                        .json()
                        .with_filter(filter),
                )
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_ansi(true)
                        .with_filter(filter),
                )
                .try_init()
        };

        if initialized.is_err() {
            // A global subscriber is already set (likely by the host
            // application); continue with the existing one
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::info!(
            environment = %environment,
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    env::var("ORCHESTRATION_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log structured data for draft operations
pub fn log_draft_operation(
    operation: &str,
    session_id: Option<&str>,
    orchestration_id: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        session_id = session_id,
        orchestration_id = orchestration_id,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "📋 DRAFT_OPERATION"
    );
}

/// Log structured data for orchestration lifecycle operations
pub fn log_orchestration_operation(
    operation: &str,
    orchestration_id: Option<&str>,
    name: Option<&str>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        orchestration_id = orchestration_id,
        name = name,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "🎛️ ORCHESTRATION_OPERATION"
    );
}

/// Log structured data for registry snapshot operations
pub fn log_registry_operation(
    operation: &str,
    scope: Option<&str>,
    snapshot_version: Option<u64>,
    wrapper_count: Option<usize>,
    status: &str,
) {
    tracing::info!(
        operation = %operation,
        scope = scope,
        snapshot_version = snapshot_version,
        wrapper_count = wrapper_count,
        status = %status,
        timestamp = %Utc::now().to_rfc3339(),
        "📚 REGISTRY_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "❌ ERROR"
    );
}
