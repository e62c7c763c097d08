/// Example demonstrating deterministic Markdown output
///
/// The editor compares conversions by fingerprint, so identical HTML must
/// always produce byte-identical Markdown.
///
/// Run with: cargo run --example deterministic_output
use editmd_converter::{MarkdownConverter, fingerprint};

fn main() {
    println!("=== Deterministic Markdown Output Example ===\n");

    let html = r#"
        <h1>Main Title</h1>
        <p>This is a paragraph with <strong>bold</strong> and <em>italic</em> text.</p>
        <p>Here's a <a href="https://example.com">link</a> and an image: <img src="image.png" alt="Test Image"/></p>
        <ul>
            <li>First item</li>
            <li>Second item with <code>inline code</code></li>
            <li>Third item
                <ul>
                    <li>Nested item 1</li>
                    <li>Nested item 2</li>
                </ul>
            </li>
        </ul>
        <pre><code>fn main() {
    println!("Hello, world!");
}</code></pre>
    "#;

    println!("Converting HTML to Markdown 5 times...\n");

    let converter = MarkdownConverter::new();
    let results: Vec<String> = (1..=5)
        .map(|i| {
            let markdown = converter.convert(html);
            println!("Conversion {}: {} bytes, fingerprint {}", i, markdown.len(), fingerprint(&markdown));
            markdown
        })
        .collect();

    println!("\nVerifying deterministic output...");
    let first = &results[0];
    if results.iter().all(|r| r == first) {
        println!("SUCCESS: all 5 conversions produced identical output");
        println!("\nMarkdown output:\n{}", "=".repeat(80));
        println!("{}", first);
        println!("{}", "=".repeat(80));
    } else {
        println!("FAILURE: conversions differ");
        std::process::exit(1);
    }
}
