//! Basic conversion example demonstrating the Markdown transducer
//!
//! Run with: cargo run --example basic_conversion

use editmd_converter::converter::MarkdownConverter;

fn main() {
    println!("=== EditMD Converter - Basic Examples ===\n");

    let converter = MarkdownConverter::new();
    let examples = [
        (
            "Heading and paragraph",
            "<h1>Welcome</h1><p>This is a <strong>test</strong> document.</p>",
        ),
        (
            "Nested lists",
            "<ul><li>Fruit<ol><li>Apple</li><li>Pear</li></ol></li><li>Vegetables</li></ul>",
        ),
        (
            "Blockquote and code block",
            "<blockquote><p>Quoted</p></blockquote><pre><code>let  x = 1;</code></pre>",
        ),
        (
            "Table",
            "<table><tr><th>Name</th><th>Age</th></tr><tr><td>Ann</td><td>31</td></tr></table>",
        ),
        (
            "Links and images",
            r#"<p><a href="https://example.com">Site</a> <img src="logo.png" alt="Logo" title="Our logo"></p>"#,
        ),
        (
            "Malformed input",
            "<p>Unclosed <em>emphasis</strong> and a stray </blockquote>close",
        ),
    ];

    for (index, (title, html)) in examples.iter().enumerate() {
        println!("Example {}: {}", index + 1, title);
        println!("Input HTML:\n{}\n", html);
        println!("Output Markdown:\n{}", converter.convert(html));
        println!("---\n");
    }
}
