//! Node table construction.

use rustc_hash::FxHashSet;

use crate::error::{GraphError, Result};
use crate::models::{Node, SongFeatureVector};

/// Build one node per song, in song order.
///
/// Ids are `artist - title`. Two different (artist, title) pairs can still
/// produce the same id when a name itself contains `" - "`; that is rejected
/// because graph tools would merge the two songs.
pub fn build_nodes(songs: &[SongFeatureVector]) -> Result<Vec<Node>> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut nodes = Vec::with_capacity(songs.len());

    for song in songs {
        let node = Node::from(song);
        if !seen.insert(node.id.clone()) {
            return Err(GraphError::integrity(
                format!("song '{}' by '{}'", song.title, song.artist),
                format!("node id '{}' is already used by another song", node.id),
            ));
        }
        nodes.push(node);
    }

    Ok(nodes)
}
