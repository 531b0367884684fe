use std::time::Duration;

use crate::models::FileNode;

/// Paths of every file node, depth first, in child order.
pub fn file_paths(root: &FileNode) -> Vec<String> {
    fn collect(node: &FileNode, out: &mut Vec<String>) {
        for child in node.children() {
            if child.is_file() {
                out.push(child.path.clone());
            } else {
                collect(child, out);
            }
        }
    }

    let mut out = Vec::new();
    collect(root, &mut out);
    out
}

/// Fixed-size batches; the last one holds the remainder.
pub fn plan_batches(paths: Vec<String>, batch_size: usize) -> Vec<Vec<String>> {
    paths
        .chunks(batch_size.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Dispatch delay of a request: `stagger` times its position in the batch.
/// Batches themselves are not delayed relative to one another. Saturates at
/// `Duration::MAX` instead of overflowing.
pub fn dispatch_delay(index_in_batch: usize, stagger: Duration) -> Duration {
    u32::try_from(index_in_batch)
        .ok()
        .and_then(|index| stagger.checked_mul(index))
        .unwrap_or(Duration::MAX)
}
