//! Text extraction from plain text and Markdown files

use crate::error::Result;
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Plain text with list items kept as "- " bullets and a blank line after each block
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());

    for event in Parser::new(markdown) {
        match event {
            Event::Text(content) | Event::Code(content) => text.push_str(&content),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::Start(Tag::Item) => text.push_str("- "),
            Event::End(Tag::Item) => text.push('\n'),
            Event::End(Tag::Paragraph) | Event::End(Tag::Heading(..)) | Event::End(Tag::CodeBlock(_)) => {
                text.push_str("\n\n")
            }
            Event::End(Tag::List(_)) | Event::Rule => text.push('\n'),
            _ => {}
        }
    }

    // Loose lists and nested blocks leave extra blank lines behind
    let mut cleaned = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        cleaned.push_str(line);
        cleaned.push('\n');
    }

    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text_keeps_structure() {
        let markdown = "# Experience\n\nBuilt **Python** services.\n\n## Skills\n\n- Python\n- `SQL`\n";
        let text = markdown_to_text(markdown);

        assert!(text.starts_with("Experience\n\nBuilt Python services."));
        assert!(text.contains("Skills\n\n- Python\n- SQL"));
        assert!(!text.contains("**"));
        assert!(!text.contains("\n\n\n"));
    }

    #[tokio::test]
    async fn test_plain_text_extractor() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        std::fs::write(file.path(), "Python developer\n\nSQL").unwrap();

        let text = PlainTextExtractor.extract(file.path()).await.unwrap();
        assert_eq!(text, "Python developer\n\nSQL");
    }
}
