// PDF report text via poppler's pdftotext

use std::path::Path;
use std::process::Command;

use log::debug;

/// Share of U+FFFD among visible characters above which the PDF's fonts
/// could not be mapped to text.
const MAX_UNMAPPED_RATIO: f64 = 0.10;

/// Lines of a PDF, in extraction order.
pub fn pdf_lines(file: &Path) -> Result<Vec<String>, String> {
    let text = pdftotext(file)?;
    let pages = check_text(&text)?;
    debug!("{}: {} pages, {} bytes of text", file.display(), pages, text.len());
    Ok(text_lines(&text))
}

/// `pdftotext -layout -enc UTF-8 <file> -`. `-layout` keeps table rows on
/// one physical line where it can; rows that still wrap are merged by the
/// row collector.
fn pdftotext(file: &Path) -> Result<String, String> {
    which::which("pdftotext").map_err(|_| "pdftotext not installed (poppler-utils)".to_string())?;

    let output = Command::new("pdftotext")
        .arg("-layout")
        .args(["-enc", "UTF-8"])
        .arg(file)
        .arg("-")
        .output()
        .map_err(|e| format!("failed to run pdftotext on {}: {}", file.display(), e))?;

    if !output.status.success() {
        let code = output.status.code().map_or_else(|| "signal".to_string(), |c| c.to_string());
        return Err(format!(
            "pdftotext could not read {} (exit {}): {}",
            file.display(),
            code,
            String::from_utf8_lossy(&output.stderr).trim(),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Reject text no table can come out of. Returns the page count.
fn check_text(text: &str) -> Result<usize, String> {
    let visible: Vec<char> = text.chars().filter(|c| !c.is_whitespace() && *c != '\u{c}').collect();
    if visible.is_empty() {
        return Err("PDF appears scanned/image-only, text extraction failed".to_string());
    }
    let unmapped = visible.iter().filter(|c| **c == char::REPLACEMENT_CHARACTER).count();
    if unmapped as f64 / visible.len() as f64 > MAX_UNMAPPED_RATIO {
        return Err(format!(
            "PDF text is unreadable: {} of {} characters have no font mapping",
            unmapped,
            visible.len()
        ));
    }
    // pdftotext ends every page with a form feed.
    Ok(text.matches('\u{c}').count().max(1))
}

/// Split extracted text into lines, dropping page-break form feeds.
/// Leading whitespace is kept; wrapped lines are recognized by it.
pub fn text_lines(text: &str) -> Vec<String> {
    text.lines().map(|l| l.replace('\u{c}', "")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_feeds_are_removed_and_indent_kept() {
        let lines = text_lines("TOTAL NASIONAL 1\n\u{c}Halaman 2\n    304 0 304\n");
        assert_eq!(lines, vec!["TOTAL NASIONAL 1", "Halaman 2", "    304 0 304"]);
    }

    #[test]
    fn page_count_from_form_feeds() {
        assert_eq!(check_text("halaman 1\u{c}halaman 2\u{c}"), Ok(2));
        assert_eq!(check_text("satu halaman"), Ok(1));
    }

    #[test]
    fn blank_text_is_scanned() {
        let err = check_text(" \n\u{c}\n\u{c}").unwrap_err();
        assert!(err.contains("scanned"));
    }

    #[test]
    fn unmapped_glyphs_are_rejected() {
        let garbled: String = "\u{fffd}\u{fffd}\u{fffd} 12\n".repeat(5);
        assert!(check_text(&garbled).unwrap_err().contains("font mapping"));
        assert!(check_text("TOTAL NASIONAL 1.234 \u{fffd}\n").is_ok());
    }

    #[test]
    fn missing_file_is_an_error() {
        // Either pdftotext is absent or it fails on the path; both are errors.
        let err = pdf_lines(Path::new("/nonexistent/report.pdf")).unwrap_err();
        assert!(err.contains("pdftotext"));
    }
}
