//! Queue sources: JSON queue files and the built-in sample catalog

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use super::types::{Album, PlayableItem};

/// Read a queue from a JSON array of items
pub fn load_queue_file(path: &Path) -> Result<Vec<PlayableItem>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read queue file {}", path.display()))?;
    let items: Vec<PlayableItem> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse queue file {}", path.display()))?;
    tracing::info!(path = %path.display(), count = items.len(), "Loaded queue file");
    Ok(items)
}

/// Albums used when no queue file is given
pub fn sample_albums() -> Vec<Album> {
    vec![
        Album {
            id: "tro-ve".to_string(),
            title: "Trở Về".to_string(),
            artist: "Ưng Hoàng Phúc".to_string(),
            cover_art: "uhp-album".to_string(),
            release_year: 2004,
            songs: vec![
                PlayableItem::new(
                    "nhung-loi-doi-gian",
                    "Những Lời Dối Gian (Remix)",
                    "Ưng Hoàng Phúc",
                    Duration::from_secs(305),
                )
                .with_album("Trở Về", "uhp-album")
                .with_lyrics("Em đã nói dối tôi lời đầu tiên\nEm đã nói dối tôi lời sau cuối"),
            ],
        },
        Album {
            id: "22".to_string(),
            title: "22".to_string(),
            artist: "Mono".to_string(),
            cover_art: "mono-album".to_string(),
            release_year: 2022,
            songs: vec![
                PlayableItem::new("waiting-for-you", "Waiting For You", "Mono", Duration::from_secs(266))
                    .with_album("22", "mono-album")
                    .with_lyrics("Em muốn anh sống sao?\nỞ bên một người mà tim không trao"),
            ],
        },
        Album {
            id: "link".to_string(),
            title: "LINK".to_string(),
            artist: "Hoàng Thuỳ Linh".to_string(),
            cover_art: "htl-album".to_string(),
            release_year: 2022,
            songs: vec![
                PlayableItem::new("see-tinh", "See Tình", "Hoàng Thuỳ Linh", Duration::from_secs(185))
                    .with_album("LINK", "htl-album"),
            ],
        },
    ]
}

/// Every sample album's songs, in album order
pub fn sample_queue() -> Vec<PlayableItem> {
    sample_albums().into_iter().flat_map(|album| album.songs).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sample_queue_has_unique_ids() {
        let queue = sample_queue();
        let mut ids: Vec<_> = queue.iter().map(|item| item.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), queue.len());
    }

    #[test]
    fn loads_queue_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "a", "title": "A", "artist": "X", "duration_secs": 10}},
                {{"id": "b", "title": "B", "artist": "Y", "duration_secs": 20.5, "lyrics": "hey"}}
            ]"#
        )
        .unwrap();

        let items = load_queue_file(file.path()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].lyrics.as_deref(), Some("hey"));
    }

    #[test]
    fn malformed_queue_file_names_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = load_queue_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse queue file"));
    }
}
