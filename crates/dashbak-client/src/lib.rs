pub mod grafana;
pub mod traits;

pub use grafana::GrafanaClient;
pub use traits::RemoteService;
