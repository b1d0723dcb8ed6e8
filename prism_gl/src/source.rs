use std::fs;
use std::path::Path;

use thiserror::Error;

/// Vertex and fragment source split out of one combined shader file.
///
/// The file format is a plain sequence of lines. A line containing the
/// `#shader` marker selects the section for the lines that follow it, based
/// on whether `vertex` or `fragment` appears on the marker line. Marker
/// lines themselves are never part of the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read shader source: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Copy)]
enum Section {
    None,
    Vertex,
    Fragment,
}

impl ShaderSource {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path)?;

        Ok(Self::parse(&text))
    }

    /// Splits combined shader text into its sections. Never fails; a
    /// missing or empty section stays empty and is left for the shader
    /// compiler to reject with its own diagnostic.
    pub fn parse(text: &str) -> Self {
        let mut vertex = String::new();
        let mut fragment = String::new();
        let mut section = Section::None;
        let mut dropped = 0_usize;

        for line in text.lines() {
            if line.contains("#shader") {
                if line.contains("vertex") {
                    section = Section::Vertex;
                } else if line.contains("fragment") {
                    section = Section::Fragment;
                }
                continue;
            }

            let buf = match section {
                Section::None => {
                    dropped += 1;
                    continue;
                }
                Section::Vertex => &mut vertex,
                Section::Fragment => &mut fragment,
            };

            buf.push_str(line);
            buf.push('\n');
        }

        if dropped > 0 {
            log::warn!("dropped {dropped} line(s) found before the first #shader marker");
        }

        Self { vertex, fragment }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    const BASIC: &str = "\
#shader vertex
#version 330 core
void main() {}
#shader fragment
#version 330 core
out vec4 color;
void main() { color = vec4(1.0); }
";

    #[test]
    fn splits_sections() {
        let src = ShaderSource::parse(BASIC);

        assert_eq!(src.vertex, "#version 330 core\nvoid main() {}\n");
        assert_eq!(
            src.fragment,
            "#version 330 core\nout vec4 color;\nvoid main() { color = vec4(1.0); }\n"
        );
    }

    #[test]
    fn marker_lines_never_reach_output() {
        let src = ShaderSource::parse(BASIC);

        assert!(!src.vertex.contains("#shader"));
        assert!(!src.fragment.contains("#shader"));
    }

    #[test]
    fn lines_before_first_marker_are_dropped() {
        let src = ShaderSource::parse("// prelude\n\n#shader vertex\nvoid main() {}\n");

        assert_eq!(src.vertex, "void main() {}\n");
        assert_eq!(src.fragment, "");
    }

    #[test]
    fn no_markers_yields_empty_sections() {
        let src = ShaderSource::parse("void main() {}\nvoid main() {}\n");

        assert_eq!(src, ShaderSource::default());
    }

    #[test]
    fn unknown_marker_keyword_keeps_current_section() {
        let src = ShaderSource::parse("#shader vertex\na\n#shader geometry\nb\n");

        assert_eq!(src.vertex, "a\nb\n");
        assert_eq!(src.fragment, "");
    }

    #[test]
    fn marker_keywords_are_case_sensitive() {
        let src = ShaderSource::parse("#shader VERTEX\na\n");

        assert_eq!(src.vertex, "");
        assert_eq!(src.fragment, "");
    }

    #[test]
    fn sections_can_appear_in_any_order() {
        let src = ShaderSource::parse("#shader fragment\nf\n#shader vertex\nv\n");

        assert_eq!(src.vertex, "v\n");
        assert_eq!(src.fragment, "f\n");
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{BASIC}").unwrap();

        let src = ShaderSource::load(file.path()).unwrap();

        assert_eq!(src, ShaderSource::parse(BASIC));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ShaderSource::load("no/such/file.glsl").unwrap_err();

        assert!(matches!(err, SourceError::Io(_)));
    }
}
