use std::fs;

use notion_pages_core::contract::{MockContentSource, MockPublisher, PublishedPage, Publisher};
use notion_pages_core::error::{PublishError, RenderError, SourceError};
use notion_pages_core::model::{Block, BlockKind, Page, PageId, RichText, TextBlock};
use notion_pages_core::site::{filename_for_title, publish_site, DirectoryPublisher};
use notion_pages_core::template::MiniJinjaTemplates;
use notion_pages_core::PageAssembler;
use tempfile::tempdir;

fn source_with_pages(pages: &'static [(&'static str, &'static str)]) -> MockContentSource {
    let mut source = MockContentSource::new();
    source.expect_fetch_page().returning(move |id: &PageId| {
        let title = pages
            .iter()
            .find(|(page_id, _)| *page_id == id.as_str())
            .map(|(_, title)| *title)
            .unwrap_or_default();
        Ok(Page {
            id: id.clone(),
            title: vec![RichText::plain(title)],
            cover: None,
        })
    });
    source.expect_fetch_root_blocks().returning(|id: &PageId| {
        Ok(vec![Block::new(
            format!("{id}-p"),
            BlockKind::Paragraph(TextBlock::from(vec![RichText::plain(format!(
                "body of {id}"
            ))])),
        )])
    });
    source
}

#[test]
fn filenames_are_derived_from_titles() {
    assert_eq!(filename_for_title("Hello World"), "Hello-World.html");
    assert_eq!(filename_for_title("a/b: c?"), "a_b_-c.html");
    assert_eq!(filename_for_title("  "), "untitled.html");
    assert_eq!(filename_for_title("C# tips"), "C_-tips.html");
    assert_eq!(filename_for_title("100% done"), "100_-done.html");
}

#[tokio::test]
async fn index_links_resolve_for_titles_with_url_characters() {
    let out = tempdir().unwrap();
    let assembler = PageAssembler::new(
        source_with_pages(&[("p1", "C# tips")]),
        MiniJinjaTemplates::builtin(),
    );
    let publisher = DirectoryPublisher::new(out.path());
    let report = publish_site(&assembler, &[PageId::new("p1")], &publisher, "S")
        .await
        .unwrap();

    assert_eq!(report.pages[0].filename, "C_-tips.html");
    assert!(out.path().join("posts").join("C_-tips.html").exists());
    let index = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(index.contains(r#"<li><a href="posts/C_-tips.html">C# tips</a></li>"#));
}

#[tokio::test]
async fn publishes_pages_and_index_to_directory() {
    let out = tempdir().unwrap();
    fs::create_dir_all(out.path().join(".git")).unwrap();
    fs::write(out.path().join(".git").join("HEAD"), "ref: refs/heads/main").unwrap();
    fs::write(out.path().join("stale.html"), "old").unwrap();
    fs::create_dir_all(out.path().join("posts")).unwrap();
    fs::write(out.path().join("posts").join("gone.html"), "old").unwrap();

    let assembler = PageAssembler::new(
        source_with_pages(&[("p1", "First Post"), ("p2", "First Post")]),
        MiniJinjaTemplates::builtin(),
    );
    let publisher = DirectoryPublisher::new(out.path());
    let report = publish_site(
        &assembler,
        &[PageId::new("p1"), PageId::new("p2")],
        &publisher,
        "My Site",
    )
    .await
    .unwrap();

    let filenames: Vec<_> = report.pages.iter().map(|p| p.filename.as_str()).collect();
    assert_eq!(filenames, ["First-Post.html", "First-Post-2.html"]);

    assert!(out.path().join(".git").join("HEAD").exists());
    assert!(!out.path().join("stale.html").exists());
    assert!(!out.path().join("posts").join("gone.html").exists());

    let first = fs::read_to_string(out.path().join("posts").join("First-Post.html")).unwrap();
    assert!(first.contains("<title>First Post</title>"));
    assert!(first.contains("<p><span>body of p1</span></p>"));
    let second = fs::read_to_string(out.path().join("posts").join("First-Post-2.html")).unwrap();
    assert!(second.contains("body of p2"));

    let index = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(index.contains("<title>My Site</title>"));
    assert!(index.contains(r#"<li><a href="posts/First-Post.html">First Post</a></li>"#));
    assert!(index.contains(r#"<li><a href="posts/First-Post-2.html">First Post</a></li>"#));
}

#[tokio::test]
async fn render_failure_publishes_nothing() {
    let mut source = MockContentSource::new();
    source.expect_fetch_page().returning(|id: &PageId| {
        Ok(Page {
            id: id.clone(),
            title: vec![RichText::plain("T")],
            cover: None,
        })
    });
    source
        .expect_fetch_root_blocks()
        .returning(|_| Err(SourceError::Fatal("gone".to_string())));

    let mut publisher = MockPublisher::new();
    publisher.expect_prepare().times(0);
    publisher.expect_publish_page().times(0);
    publisher.expect_publish_index().times(0);

    let assembler = PageAssembler::new(source, MiniJinjaTemplates::builtin());
    let err = publish_site(&assembler, &[PageId::new("p1")], &publisher, "S")
        .await
        .unwrap_err();
    assert!(
        matches!(err, PublishError::Render(RenderError::RootFetchFailed { .. })),
        "{err:?}"
    );
}

#[tokio::test]
async fn publisher_sees_prepare_then_pages_in_order_then_index() {
    let mut seq = mockall::Sequence::new();
    let mut publisher = MockPublisher::new();
    publisher
        .expect_prepare()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(()));
    publisher
        .expect_publish_page()
        .withf(|page: &PublishedPage| page.filename == "Alpha.html")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    publisher
        .expect_publish_page()
        .withf(|page: &PublishedPage| page.filename == "Beta.html")
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    publisher
        .expect_publish_index()
        .withf(|markup: &str| markup.find("Alpha").unwrap_or(usize::MAX) < markup.find("Beta").unwrap_or(0))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let assembler = PageAssembler::new(
        source_with_pages(&[("a", "Alpha"), ("b", "Beta")]),
        MiniJinjaTemplates::builtin(),
    );
    let report = publish_site(
        &assembler,
        &[PageId::new("a"), PageId::new("b")],
        &publisher,
        "S",
    )
    .await
    .unwrap();
    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.pages[0].page_id, PageId::new("a"));
}

#[tokio::test]
async fn directory_publisher_creates_missing_output_dir() {
    let root = tempdir().unwrap();
    let out = root.path().join("nested").join("site");
    let publisher = DirectoryPublisher::new(&out);

    publisher.prepare().await.unwrap();
    publisher
        .publish_page(&PublishedPage {
            title: "T".to_string(),
            filename: "T.html".to_string(),
            markup: "<html></html>".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        fs::read_to_string(out.join("posts").join("T.html")).unwrap(),
        "<html></html>"
    );
}
