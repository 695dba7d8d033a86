//! Integration tests for chroma-browser
//!
//! These tests require Chrome/Chromium to be installed and are marked #[ignore]
//! by default. Run with: cargo test --package chroma-browser -- --ignored

use chroma_browser::{BrowserError, BrowserSettings, ChromeBrowser};

fn styled_page() -> String {
    r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Contrast Fixture</title>
        <style>
            .note { color: red; background-color: white; border-top-width: 2px; }
        </style>
    </head>
    <body>
        <div id="wrapper" class="note"><p>First paragraph</p><p>Second</p></div>
        <div id="hidden" style="display:none"><p>Invisible</p></div>
    </body>
    </html>
    "#
    .to_string()
}

fn data_url(html: &str) -> String {
    format!("data:text/html,{}", urlencoding::encode(html))
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_navigation_and_title() {
    let browser = ChromeBrowser::launch(BrowserSettings::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");

    page.navigate(&data_url(&styled_page()))
        .await
        .expect("failed to navigate");

    assert_eq!(page.title().await.expect("title"), "Contrast Fixture");
    assert!(page.url().await.expect("url").starts_with("data:text/html"));

    page.close().await.expect("failed to close page");
    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_element_reads() {
    let browser = ChromeBrowser::launch(BrowserSettings::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&data_url(&styled_page())).await.expect("navigate");

    let elements = page
        .query_selector_all("#wrapper")
        .await
        .expect("query failed");
    assert_eq!(elements.len(), 1);
    let wrapper = &elements[0];

    let styles = wrapper
        .computed_style(&[
            "color".to_string(),
            "background-color".to_string(),
            "border-top-width".to_string(),
        ])
        .await
        .expect("computed style");
    assert_eq!(styles.get("color").map(String::as_str), Some("rgb(255, 0, 0)"));
    assert_eq!(
        styles.get("background-color").map(String::as_str),
        Some("rgb(255, 255, 255)")
    );
    assert_eq!(styles.get("border-top-width").map(String::as_str), Some("0px"));

    assert_eq!(wrapper.child_count().await.expect("children"), 2);
    assert!(wrapper.inner_text().await.expect("text").contains("First paragraph"));
    let html = wrapper.outer_html().await.expect("html").expect("some html");
    assert!(html.starts_with("<div id=\"wrapper\""));

    let hidden = page.query_selector_all("#hidden").await.expect("query");
    assert_eq!(hidden[0].inner_text().await.expect("text"), "");

    page.close().await.expect("close page");
    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_detached_element_is_stale() {
    let browser = ChromeBrowser::launch(BrowserSettings::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");
    page.navigate(&data_url(&styled_page())).await.expect("navigate");

    let elements = page.query_selector_all("#wrapper").await.expect("query");
    let _: bool = page
        .evaluate("document.getElementById('wrapper').remove(), true")
        .await
        .expect("remove");

    let err = elements[0].outer_html().await.expect_err("detached node");
    assert!(matches!(err, BrowserError::StaleElement), "got {err:?}");

    page.close().await.expect("close page");
    browser.close().await.expect("failed to close");
}
