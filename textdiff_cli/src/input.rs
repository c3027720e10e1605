use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Largest input, in bytes, that is diffed unless `--threshold` says otherwise.
pub const DEFAULT_THRESHOLD: u64 = 10_000_000;

// Only the head of the content is inspected when sniffing for binary data.
const BINARY_SNIFF_BYTES: usize = 4096;

/// Reasons an input is refused before it reaches the diff engine.
#[derive(Debug)]
pub enum InputError {
    TooLarge {
        label: String,
        threshold: u64,
    },
    Binary {
        label: String,
    },
    Io {
        label: String,
        source: io::Error,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::TooLarge { label, threshold } => write!(
                f,
                "(file size of {label} exceeds {threshold} bytes, diff output suppressed)"
            ),
            InputError::Binary { label } => {
                write!(f, "({label} is binary, diff output suppressed)")
            }
            InputError::Io { label, source } => write!(f, "cannot read {label}: {source}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Decoded text for one side of the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub label: String,
    pub text: String,
    pub from_file: bool,
}

/// Resolve `arg` as a file path when such a file exists, otherwise as the
/// literal content itself, then apply the size and binary guards.
pub fn load(arg: &str, side: &str, threshold: u64) -> Result<Input, InputError> {
    let path = Path::new(arg);
    if path.is_file() {
        let label = path.display().to_string();
        let io_err = |source| InputError::Io {
            label: label.clone(),
            source,
        };
        let size = fs::metadata(path).map_err(io_err)?.len();
        check_size(&label, size, threshold)?;
        let bytes = fs::read(path).map_err(io_err)?;
        let text = decode(&label, bytes)?;
        return Ok(Input {
            label,
            text,
            from_file: true,
        });
    }

    let label = format!("<{side} text>");
    check_size(&label, arg.len() as u64, threshold)?;
    let text = decode(&label, arg.as_bytes().to_vec())?;
    Ok(Input {
        label,
        text,
        from_file: false,
    })
}

fn check_size(label: &str, size: u64, threshold: u64) -> Result<(), InputError> {
    if size > threshold {
        return Err(InputError::TooLarge {
            label: label.to_string(),
            threshold,
        });
    }
    Ok(())
}

fn decode(label: &str, bytes: Vec<u8>) -> Result<String, InputError> {
    let binary = || InputError::Binary {
        label: label.to_string(),
    };
    if is_binary(&bytes) {
        return Err(binary());
    }
    String::from_utf8(bytes).map_err(|_| binary())
}

/// Whether the head of `bytes` looks like binary data: NUL bytes, invalid
/// UTF-8, or control characters other than whitespace.
pub fn is_binary(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(BINARY_SNIFF_BYTES)];
    if head.contains(&0) {
        return true;
    }

    let text = match std::str::from_utf8(head) {
        Ok(text) => text,
        // A multi-byte character cut off by the sniff window is fine.
        Err(err) if err.error_len().is_none() && head.len() < bytes.len() => {
            match std::str::from_utf8(&head[..err.valid_up_to()]) {
                Ok(text) => text,
                Err(_) => return true,
            }
        }
        Err(_) => return true,
    };

    text.chars().any(|ch| ch.is_control() && !ch.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_binary() {
        assert!(!is_binary(b"aaa\r\n\tbbb\n"));
        assert!(!is_binary("caf\u{e9}\n".as_bytes()));
        assert!(!is_binary(b""));
    }

    #[test]
    fn nul_and_control_bytes_are_binary() {
        assert!(is_binary(b"\x89PNG\r\n\x1a\n\0\0"));
        assert!(is_binary(b"text\x07bell"));
        assert!(is_binary(&[0xff, 0xfe, 0x41]));
    }

    #[test]
    fn char_split_by_sniff_window_is_text() {
        let mut bytes = vec![b'a'; BINARY_SNIFF_BYTES - 1];
        bytes.extend_from_slice("\u{e9}".as_bytes());
        assert!(!is_binary(&bytes));
    }

    #[test]
    fn literal_content_is_used_when_no_file_exists() {
        let input = load("aaa\nbbb\n", "left", DEFAULT_THRESHOLD).expect("literal input");
        assert_eq!(input.label, "<left text>");
        assert_eq!(input.text, "aaa\nbbb\n");
        assert!(!input.from_file);
    }

    #[test]
    fn literal_content_over_threshold_is_refused() {
        let err = load("aaa\nbbb\n", "right", 4).expect_err("too large");
        assert_eq!(
            err.to_string(),
            "(file size of <right text> exceeds 4 bytes, diff output suppressed)"
        );
    }
}
