use serde::Serialize;
use tokio::sync::broadcast;

pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// View-model change, emitted once per rebuild and once per node update.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ViewEvent {
    TreeRebuilt { generation: u64 },
    NodeUpdated { generation: u64, path: String },
    FolderToggled { generation: u64, path: String, open: bool },
}

impl ViewEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ViewEvent::TreeRebuilt { .. } => "treeRebuilt",
            ViewEvent::NodeUpdated { .. } => "nodeUpdated",
            ViewEvent::FolderToggled { .. } => "folderToggled",
        }
    }
}

/// Fire-and-forget sink for `ViewEvent`s; sending without subscribers is fine.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<ViewEvent>,
}

impl ChangeNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn notify(&self, event: ViewEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.sender.subscribe()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
