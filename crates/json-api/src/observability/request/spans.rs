//! Route labels for spans and metrics.

use uuid::Uuid;

/// Replace UUID path segments so every pickup point shares one label per route.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_segments_are_collapsed() {
        let path = format!("/pvz/{}/close_last_reception", Uuid::now_v7());

        assert_eq!(route_label(&path), "/pvz/{uuid}/close_last_reception");
        assert_eq!(route_label("/pvz"), "/pvz");
        assert_eq!(route_label("/"), "/");
    }
}
