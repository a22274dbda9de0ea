//! Flow file ingestion
//!
//! Converts an external source, either the standard input stream or a
//! directory tree, into queued flow files.

use std::collections::HashMap;
use std::fs::{read, read_dir};
use std::io::Read;
use std::path::Path;

use log::{debug, error};

use crate::attributes::seed;
use crate::constants::ATTR_FILENAME;
use crate::errors::{input_dir_not_found_error, input_not_a_directory_error, Result};
use crate::flowfile::FlowFileQueue;

/// Admits flow files from the configured source into the queue
///
/// With an input directory set, every regular file under it (recursively)
/// becomes one flow file. Without one, the standard input buffer is probed
/// once, non-blocking, and any bytes already available become a single flow
/// file. Returns the number of flow files admitted.
pub fn ingest_into(
    input_dir: Option<&Path>,
    base_attributes: &HashMap<String, String>,
    queue: &mut FlowFileQueue,
) -> Result<usize> {
    match input_dir {
        Some(dir) => ingest_directory(dir, base_attributes, queue),
        None => ingest_stdin(base_attributes, queue),
    }
}

/// Admits at most one flow file from whatever is already buffered on stdin
///
/// This is a best-effort, timing-sensitive probe: it checks how many bytes
/// are available right now and never waits for input to arrive. Interactive
/// use where nothing has been typed yet therefore admits zero flow files.
fn ingest_stdin(
    base_attributes: &HashMap<String, String>,
    queue: &mut FlowFileQueue,
) -> Result<usize> {
    let available = stdin_available_bytes();
    if available == 0 {
        debug!("No bytes available on stdin, admitting no flow files");
        return Ok(0);
    }

    let mut payload = Vec::with_capacity(available);
    std::io::stdin()
        .lock()
        .take(available as u64)
        .read_to_end(&mut payload)?;

    debug!("Admitting one flow file with {} bytes from stdin", payload.len());
    queue.admit(payload, seed(base_attributes, HashMap::new()));
    Ok(1)
}

/// Number of bytes currently buffered on stdin, without blocking
#[cfg(unix)]
fn stdin_available_bytes() -> usize {
    let mut available: libc::c_int = 0;
    let result = unsafe {
        libc::ioctl(
            libc::STDIN_FILENO,
            libc::FIONREAD,
            &mut available as *mut libc::c_int,
        )
    };
    if result < 0 {
        debug!("stdin availability probe failed, treating as empty");
        return 0;
    }
    available.max(0) as usize
}

/// Fallback for platforms without FIONREAD: the probe always reports empty
#[cfg(not(unix))]
fn stdin_available_bytes() -> usize {
    debug!("stdin availability probe is not supported on this platform");
    0
}

/// Admits one flow file per regular file under the input directory
///
/// A missing path and a non-directory path are distinct fatal errors.
/// Traversal order is whatever the platform's directory iteration yields;
/// it is not sorted. I/O errors on individual entries are logged and
/// skipped so the rest of the tree is still ingested.
fn ingest_directory(
    dir: &Path,
    base_attributes: &HashMap<String, String>,
    queue: &mut FlowFileQueue,
) -> Result<usize> {
    if !dir.exists() {
        return Err(input_dir_not_found_error(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(input_not_a_directory_error(dir.to_path_buf()));
    }

    let mut admitted = 0;
    walk_directory(dir, base_attributes, queue, &mut admitted);
    debug!("Admitted {admitted} flow files from {}", dir.display());
    Ok(admitted)
}

fn walk_directory(
    dir: &Path,
    base_attributes: &HashMap<String, String>,
    queue: &mut FlowFileQueue,
    admitted: &mut usize,
) {
    let entries = match read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to read directory {}: {e}", dir.display());
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                error!("Failed to read entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();

        if path.is_dir() {
            walk_directory(&path, base_attributes, queue, admitted);
            continue;
        }
        if !path.is_file() {
            continue;
        }

        let payload = match read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to read file {}: {e}", path.display());
                continue;
            }
        };

        let mut item_attributes = HashMap::new();
        if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
            item_attributes.insert(ATTR_FILENAME.to_string(), filename.to_string());
        }

        queue.admit(payload, seed(base_attributes, item_attributes));
        *admitted += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_input_directory_is_fatal() {
        let mut queue = FlowFileQueue::new();
        let error = ingest_into(
            Some(Path::new("/nonexistent/input")),
            &HashMap::new(),
            &mut queue,
        )
        .unwrap_err();
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_input_path_that_is_a_file_is_fatal() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut queue = FlowFileQueue::new();
        let error =
            ingest_into(Some(file.path()), &HashMap::new(), &mut queue).unwrap_err();
        assert_eq!(error.exit_code(), 4);
    }

    #[test]
    fn test_directory_ingestion_recurses_and_tags_filename() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("first.txt"), b"alpha").unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("second.txt"), b"beta-beta").unwrap();

        let mut base = HashMap::new();
        base.insert("env".to_string(), "test".to_string());

        let mut queue = FlowFileQueue::new();
        let admitted = ingest_into(Some(dir.path()), &base, &mut queue).unwrap();
        assert_eq!(admitted, 2);
        assert_eq!(queue.len(), 2);

        while let Some(flow_file) = queue.dequeue() {
            let filename = flow_file.attributes().get("filename").unwrap();
            match filename.as_str() {
                "first.txt" => assert_eq!(flow_file.size(), 5),
                "second.txt" => assert_eq!(flow_file.size(), 9),
                other => panic!("unexpected filename attribute: {other}"),
            }
            assert_eq!(
                flow_file.attributes().get("env"),
                Some(&"test".to_string())
            );
        }
    }

    #[test]
    fn test_filename_attribute_beats_base_attribute() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("real.txt"), b"data").unwrap();

        let mut base = HashMap::new();
        base.insert("filename".to_string(), "from-base".to_string());

        let mut queue = FlowFileQueue::new();
        ingest_into(Some(dir.path()), &base, &mut queue).unwrap();

        let flow_file = queue.dequeue().unwrap();
        assert_eq!(
            flow_file.attributes().get("filename"),
            Some(&"real.txt".to_string())
        );
    }

    #[test]
    fn test_empty_directory_admits_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut queue = FlowFileQueue::new();
        let admitted = ingest_into(Some(dir.path()), &HashMap::new(), &mut queue).unwrap();
        assert_eq!(admitted, 0);
        assert!(queue.is_empty());
    }
}
