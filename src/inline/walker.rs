//! Depth-first walk that rewrites `img` sources into data URIs.

use std::path::{Component, Path, PathBuf};

use super::encode::{data_uri, encode_file};
use super::report::{InlineFailure, InlineReport};
use crate::dom::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// Sources with these prefixes are never fetched or touched.
const REMOTE_PREFIXES: [&str; 2] = ["http://", "https://"];

/// What to do with one `src` value.
enum SrcAction {
    Remote,
    Local(String),
}

/// Check whether a `src` value points at a remote resource.
pub fn is_remote(src: &str) -> bool {
    REMOTE_PREFIXES.iter().any(|p| src.starts_with(p))
}

/// Map a local `src` value to a file path under `base_dir`.
///
/// The value is always taken relative to the base directory, even when it
/// starts with `/`, and the joined path is cleaned lexically: `.` segments are
/// dropped and `..` removes the preceding segment. Symlinks are not resolved.
pub fn resolve_src(base_dir: &Path, src: &str) -> PathBuf {
    let mut joined = base_dir.to_path_buf();
    for component in Path::new(src).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => joined.push(other),
        }
    }
    clean_path(&joined)
}

fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other),
        }
    }

    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Inline every local `img` `src` under the document root.
///
/// Visits each node once in document order. Only the value of the first
/// `src` attribute of an `img` element is ever changed; nodes are never
/// added or removed. Unreadable images are logged and left as they were.
pub fn inline_images(dom: &mut ArenaDom, base_dir: &Path) -> InlineReport {
    let view: &ArenaDom = dom;
    let targets: Vec<(ArenaNodeId, SrcAction)> = view
        .descendants(view.document())
        .filter_map(|id| classify(view, id).map(|action| (id, action)))
        .collect();

    let mut report = InlineReport::default();
    for (id, action) in targets {
        match action {
            SrcAction::Remote => report.skipped_remote += 1,
            SrcAction::Local(src) => inline_one(dom, id, &src, base_dir, &mut report),
        }
    }

    log::debug!("image inlining finished: {report}");
    report
}

fn classify(dom: &ArenaDom, id: ArenaNodeId) -> Option<SrcAction> {
    let node = dom.get(id)?;
    let ArenaNodeData::Element { name, .. } = &node.data else {
        return None;
    };
    if name.local.as_ref() != "img" {
        return None;
    }

    let src = dom.get_attr(id, "src")?;
    if is_remote(src) {
        Some(SrcAction::Remote)
    } else {
        Some(SrcAction::Local(src.to_string()))
    }
}

fn inline_one(
    dom: &mut ArenaDom,
    id: ArenaNodeId,
    src: &str,
    base_dir: &Path,
    report: &mut InlineReport,
) {
    let path = resolve_src(base_dir, src);
    match encode_file(&path) {
        Ok(payload) => {
            dom.set_attr(id, "src", data_uri(&payload));
            report.inlined += 1;
            log::debug!("inlined {src} ({} base64 chars)", payload.len());
        }
        Err(e) => {
            log::warn!("Error converting image to base64: {e}");
            report.failures.push(InlineFailure {
                src: src.to_string(),
                path,
                error: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use proptest::prelude::*;
    use tempfile::TempDir;

    use super::*;
    use crate::dom::{parse_html, to_html_string};

    fn run(html: &str, base: &Path) -> (String, InlineReport) {
        let mut dom = parse_html(html).unwrap();
        let report = inline_images(&mut dom, base);
        (to_html_string(&dom).unwrap(), report)
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("http://example.com/a.png"));
        assert!(is_remote("https://example.com/a.png"));
        assert!(!is_remote("HTTP://example.com/a.png"));
        assert!(!is_remote("//example.com/a.png"));
        assert!(!is_remote("ftp://example.com/a.png"));
        assert!(!is_remote("images/http://x.png"));
    }

    #[test]
    fn test_inlines_local_image() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pic.png"), [0xFF, 0xD8, 0xFF]).unwrap();

        let (out, report) = run(r#"<img src="pic.png">"#, dir.path());

        assert!(out.contains(r#"<img src="data:image/png;base64,/9j/">"#), "{out}");
        assert_eq!(report.inlined, 1);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_remote_untouched() {
        let dir = TempDir::new().unwrap();
        let (out, report) = run(
            r#"<img src="http://a.test/x.png"><img src="https://b.test/y.png?q=1&amp;r=2">"#,
            dir.path(),
        );

        assert!(out.contains(r#"src="http://a.test/x.png""#));
        assert!(out.contains(r#"src="https://b.test/y.png?q=1&amp;r=2""#), "{out}");
        assert_eq!(report.skipped_remote, 2);
        assert_eq!(report.inlined, 0);
    }

    #[test]
    fn test_missing_image_left_alone() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ok.png"), b"ok").unwrap();

        let (out, report) = run(
            r#"<img src="gone.png"><img src="ok.png">"#,
            dir.path(),
        );

        assert!(out.contains(r#"<img src="gone.png">"#));
        assert!(out.contains("data:image/png;base64,b2s="));
        assert_eq!(report.inlined, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].src, "gone.png");
        assert_eq!(report.failures[0].path, dir.path().join("gone.png"));
    }

    #[test]
    fn test_img_without_src_and_other_tags_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.png"), b"a").unwrap();

        let html = r#"<img alt="none"><script src="a.png"></script><video src="a.png"></video><img SRC="a.png" alt="x">"#;
        let (out, report) = run(html, dir.path());

        assert!(out.contains(r#"<img alt="none">"#));
        assert!(out.contains(r#"<script src="a.png"></script>"#));
        assert!(out.contains(r#"<video src="a.png"></video>"#));
        // The parser lowercases attribute names, so SRC is matched as src
        assert!(out.contains(r#"<img src="data:image/png;base64,YQ==" alt="x">"#), "{out}");
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn test_other_attributes_keep_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.png"), b"abc").unwrap();

        let (out, _) = run(
            r#"<img class="c" src="a.png" width="3" alt="t">"#,
            dir.path(),
        );
        assert!(
            out.contains(r#"<img class="c" src="data:image/png;base64,YWJj" width="3" alt="t">"#),
            "{out}"
        );
    }

    #[test]
    fn test_subdirectory_and_parent_paths() {
        let dir = TempDir::new().unwrap();
        let pages = dir.path().join("pages");
        fs::create_dir_all(pages.join("img")).unwrap();
        fs::write(pages.join("img/one.png"), b"1").unwrap();
        fs::write(dir.path().join("two.png"), b"2").unwrap();

        let (out, report) = run(r#"<img src="img/one.png"><img src="../two.png">"#, &pages);

        assert!(out.contains("data:image/png;base64,MQ=="));
        assert!(out.contains("data:image/png;base64,Mg=="));
        assert_eq!(report.inlined, 2);
    }

    #[test]
    fn test_rooted_src_stays_under_base() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/a.png"), b"rooted").unwrap();

        let (out, report) = run(r#"<img src="/img/a.png">"#, dir.path());

        assert!(out.contains("data:image/png;base64,cm9vdGVk"), "{out}");
        assert_eq!(report.inlined, 1);
    }

    #[test]
    fn test_dot_segments_cleaned_before_read() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pic.png"), b"pic").unwrap();

        // `nodir` does not exist, so the OS would reject this path unless
        // `nodir/..` is removed first
        let (out, report) = run(
            r#"<img src="nodir/../pic.png"><img src="./x/./../pic.png">"#,
            dir.path(),
        );

        assert_eq!(out.matches("data:image/png;base64,cGlj").count(), 2, "{out}");
        assert_eq!(report.inlined, 2);
    }

    #[test]
    fn test_resolve_src() {
        let base = Path::new("/site/pages");
        assert_eq!(resolve_src(base, "a.png"), Path::new("/site/pages/a.png"));
        assert_eq!(resolve_src(base, "/a.png"), Path::new("/site/pages/a.png"));
        assert_eq!(resolve_src(base, "./img/../a.png"), Path::new("/site/pages/a.png"));
        assert_eq!(resolve_src(base, "../../../a.png"), Path::new("/a.png"));
        assert_eq!(resolve_src(Path::new("."), "a.png"), Path::new("a.png"));
        assert_eq!(resolve_src(Path::new("."), "../a.png"), Path::new("../a.png"));
        assert_eq!(resolve_src(Path::new("pages"), ".."), Path::new("."));
    }

    #[test]
    fn test_data_uri_not_reinlined() {
        let dir = TempDir::new().unwrap();
        let html = r#"<img src="data:image/png;base64,AAAA">"#;

        let (out, report) = run(html, dir.path());

        assert!(out.contains(html));
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_nested_document_order() {
        let dir = TempDir::new().unwrap();
        for name in ["a", "b", "c"] {
            fs::write(dir.path().join(format!("{name}.png")), name).unwrap();
        }

        let html = r#"<div><p><img src="a.png"></p><img src="missing.png"></div><table><tr><td><img src="b.png"></td></tr></table><img src="c.png">"#;
        let (out, report) = run(html, dir.path());

        let a = out.find("base64,YQ==").unwrap();
        let b = out.find("base64,Yg==").unwrap();
        let c = out.find("base64,Yw==").unwrap();
        assert!(a < b && b < c);
        assert_eq!(report.inlined, 3);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("deep.png"), b"d").unwrap();

        let depth = 5_000;
        let html = format!(
            "{}<img src=\"deep.png\">{}",
            "<span>".repeat(depth),
            "</span>".repeat(depth)
        );
        let mut dom = parse_html(&html).unwrap();
        let report = inline_images(&mut dom, dir.path());

        assert_eq!(report.inlined, 1);
    }

    proptest! {
        #[test]
        fn prop_remote_src_never_rewritten(
            scheme in prop_oneof![Just("http://"), Just("https://")],
            rest in "[a-z0-9./_-]{0,32}",
        ) {
            let dir = TempDir::new().unwrap();
            let src = format!("{scheme}{rest}");
            let (out, report) = run(&format!(r#"<img src="{src}">"#), dir.path());

            let expected = format!(r#"<img src="{src}">"#);
            prop_assert!(out.contains(&expected));
            prop_assert_eq!(report.skipped_remote, 1);
        }
    }
}
