pub mod metrics_store;
