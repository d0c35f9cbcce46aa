use mirror_fs::{NormalizedPath, is_windows_style};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case("/media/movies/Heat (1995)/Heat.mkv", 1, Some("/media/movies/Heat (1995)"))]
#[case("/media/tv/Severance/Season 1/S01E01.mkv", 2, Some("/media/tv/Severance"))]
#[case("D:\\Media\\TV\\Show\\Season 2\\ep.mkv", 2, Some("D:/Media/TV/Show"))]
#[case("/media/ep.mkv", 2, None)]
#[case("relative/file.mkv", 1, Some("relative"))]
fn test_drop_last(#[case] input: &str, #[case] count: usize, #[case] expected: Option<&str>) {
    let path = NormalizedPath::new(input);
    let dropped = path.drop_last(count);
    assert_eq!(dropped.as_ref().map(NormalizedPath::as_str), expected);
}

#[test]
fn test_join_and_file_name() {
    let dir = NormalizedPath::new("/mnt/mirror/trending");
    let link = dir.join("Heat (1995).lnk");

    assert_eq!(link.as_str(), "/mnt/mirror/trending/Heat (1995).lnk");
    assert_eq!(link.file_name(), Some("Heat (1995).lnk"));
    assert_eq!(link.extension(), Some("lnk"));
    assert_eq!(link.parent(), Some(dir));
}

#[test]
fn test_trailing_slash_is_insignificant() {
    assert_eq!(
        NormalizedPath::new("/media/movies/One/"),
        NormalizedPath::new("/media/movies/One")
    );
}

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        let as_str = path.as_str();

        if cfg!(windows) || is_windows_style(as_str) {
            prop_assert!(!as_str.contains('\\'));
        }

        let remainder = as_str.strip_prefix("//").unwrap_or(as_str);
        prop_assert!(!remainder.contains("//"));

        // Normalizing twice changes nothing
        let again = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, again);
    }

    #[test]
    fn test_drop_last_shortens(segments in prop::collection::vec("[a-z]{1,8}", 1..6), count in 0usize..6) {
        let path = NormalizedPath::new(format!("/{}", segments.join("/")));
        match path.drop_last(count) {
            Some(dropped) => {
                prop_assert!(count < segments.len());
                prop_assert!(path.as_str().starts_with(dropped.as_str()));
            }
            None => prop_assert!(count >= segments.len()),
        }
    }
}
