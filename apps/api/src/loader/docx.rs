//! DOCX text extraction: unzip `word/document.xml` and collect the text of
//! each `w:p` paragraph, one line per paragraph.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::LoaderError;

pub(super) fn extract_docx_text(path: &Path) -> Result<String, LoaderError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| LoaderError::Docx(e.to_string()))?;

    let mut document = archive
        .by_name("word/document.xml")
        .map_err(|e| LoaderError::Docx(e.to_string()))?;
    // Decode failures here are the upload being broken (non-UTF-8 XML, a
    // truncated deflate stream), not an I/O fault on our side.
    let mut xml = String::new();
    document
        .read_to_string(&mut xml)
        .map_err(|e| LoaderError::Docx(e.to_string()))?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut paragraphs = Vec::new();
    let mut in_paragraph = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"w:p" {
                    in_paragraph = true;
                    current.clear();
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"w:p" {
                    if !current.trim().is_empty() {
                        paragraphs.push(current.trim().to_string());
                    }
                    current.clear();
                    in_paragraph = false;
                }
            }
            Ok(Event::Text(e)) => {
                if in_paragraph {
                    let value = e
                        .xml_content()
                        .map_err(|e| LoaderError::Docx(e.to_string()))?;
                    current.push_str(&value);
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(LoaderError::Docx(err.to_string())),
            _ => {}
        }

        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}
