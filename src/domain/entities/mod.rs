pub mod channel;
pub mod cluster_info;
pub mod existing_monitor;
pub mod monitor_document;
pub mod monitor_spec;

pub use channel::ChannelRecord;
pub use cluster_info::ClusterInfo;
pub use existing_monitor::ExistingMonitor;
pub use monitor_document::MonitorDocument;
pub use monitor_spec::{DesiredSet, MonitorRecord, MonitorSpec, MonitorsDocument, RejectedMonitor};
