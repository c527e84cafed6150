//! Upload input and output types.

use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;

use super::StorageAddress;
use crate::constants::FALLBACK_FILENAME;

/// Streaming upload payload.
///
/// Both storage backends consume the reader once, without buffering the
/// whole payload.
pub type ByteStream = Box<dyn AsyncRead + Send + Sync + Unpin>;

/// Boxes any reader into a [`ByteStream`].
pub fn byte_stream<R>(reader: R) -> ByteStream
where
    R: AsyncRead + Send + Sync + Unpin + 'static,
{
    Box::new(reader)
}

/// Result of a successful upload, echoed back to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Address to fetch the file with later
    pub result: StorageAddress,
    /// Original filename as sent by the client
    pub filename: String,
    /// Size in bytes
    pub size: u64,
}

/// Reduces an untrusted filename to its final path component.
///
/// Both `/` and `\` count as separators so Windows-style traversal is
/// stripped too. Control characters are dropped. Names that end up empty,
/// `.` or `..` are replaced by [`FALLBACK_FILENAME`].
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    match cleaned {
        "" | "." | ".." => FALLBACK_FILENAME.to_string(),
        name => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("report.csv", "report.csv" ; "plain name")]
    #[test_case("../../etc/passwd", "passwd" ; "unix traversal")]
    #[test_case("..\\..\\windows\\win.ini", "win.ini" ; "windows traversal")]
    #[test_case("/abs/path/data.bin", "data.bin" ; "absolute path")]
    #[test_case("dir/", "upload" ; "trailing slash")]
    #[test_case("..", "upload" ; "parent only")]
    #[test_case(".", "upload" ; "current only")]
    #[test_case("", "upload" ; "empty")]
    #[test_case("a\0b\n.txt", "ab.txt" ; "control characters")]
    #[test_case("  spaced name.txt ", "spaced name.txt" ; "surrounding whitespace")]
    fn test_sanitize_filename(raw: &str, expected: &str) {
        assert_eq!(sanitize_filename(raw), expected);
    }

    proptest! {
        #[test]
        fn sanitized_name_has_no_separators(raw in ".*") {
            let name = sanitize_filename(&raw);
            prop_assert!(!name.is_empty());
            prop_assert!(!name.contains('/'));
            prop_assert!(!name.contains('\\'));
            prop_assert!(name != "." && name != "..");
        }

        #[test]
        fn traversal_prefix_is_discarded(depth in 1usize..8, leaf in "[a-z]{1,12}\\.txt") {
            let raw = format!("{}{}", "../".repeat(depth), leaf);
            prop_assert_eq!(sanitize_filename(&raw), leaf);
        }
    }

    #[test]
    fn test_upload_result_json_shape() {
        let result = UploadResult {
            result: StorageAddress::remote("QmABC"),
            filename: "report.csv".into(),
            size: 5,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["result"], "QmABC");
        assert_eq!(json["filename"], "report.csv");
        assert_eq!(json["size"], 5);
    }
}
