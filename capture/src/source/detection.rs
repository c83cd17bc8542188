//! Local camera discovery.
//!
//! Only enumerates candidate indices; nothing is opened.

/// Lists candidate local camera indices, sorted.
///
/// Linux: even `/dev/videoN` nodes below 20 (odd nodes are usually the
/// metadata half of the same camera). Other platforms: 0 through 3.
/// Falls back to `[0]` when nothing is found.
#[cfg(target_os = "linux")]
pub fn list_device_ids() -> Vec<u32> {
    use std::fs;

    let mut device_ids = Vec::with_capacity(4);

    if let Ok(entries) = fs::read_dir("/dev") {
        for entry in entries.flatten() {
            if let Some(name) = entry.file_name().to_str()
                && let Some(id) = parse_video_node(name)
            {
                device_ids.push(id);
            }
        }
    }

    device_ids.sort_unstable();

    if device_ids.is_empty() {
        device_ids.push(0);
    }

    device_ids
}

#[cfg(not(target_os = "linux"))]
pub fn list_device_ids() -> Vec<u32> {
    vec![0, 1, 2, 3]
}

/// `video4` -> `Some(4)`; odd or out-of-range nodes -> `None`
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_video_node(name: &str) -> Option<u32> {
    let id = name.strip_prefix("video")?.parse::<u32>().ok()?;
    (id % 2 == 0 && id < 20).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_device_ids_sorted_and_non_empty() {
        let ids = list_device_ids();

        assert!(!ids.is_empty());
        assert!(ids.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_parse_video_node() {
        assert_eq!(parse_video_node("video0"), Some(0));
        assert_eq!(parse_video_node("video2"), Some(2));
        assert_eq!(parse_video_node("video1"), None);
        assert_eq!(parse_video_node("video20"), None);
        assert_eq!(parse_video_node("vhci"), None);
        assert_eq!(parse_video_node("video"), None);
    }
}
