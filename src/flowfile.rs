//! Flow file data model
//!
//! This module defines the unit of work flowing through the engine and the
//! FIFO queue holding admitted units.

use std::borrow::Cow;
use std::collections::{HashMap, VecDeque};
use std::fmt;

use chrono::{DateTime, Local};

/// A discrete unit of payload plus attributes flowing through the engine
///
/// Derived metadata (id, entry date, lineage start date) is assigned when the
/// flow file is admitted to the queue and never changes afterwards. The
/// payload and attribute map may be altered by the script execution engine.
#[derive(Debug, Clone)]
pub struct FlowFile {
    id: u64,
    payload: Vec<u8>,
    attributes: HashMap<String, String>,
    entry_date: DateTime<Local>,
    lineage_start_date: DateTime<Local>,
}

impl FlowFile {
    /// Creates a new flow file with metadata assigned at admission time
    ///
    /// The lineage start date is initially equal to the entry date.
    pub fn new(id: u64, payload: Vec<u8>, attributes: HashMap<String, String>) -> Self {
        let now = Local::now();
        FlowFile {
            id,
            payload,
            attributes,
            entry_date: now,
            lineage_start_date: now,
        }
    }

    /// The unique id assigned at admission
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Replaces the payload with the script's output
    pub fn set_payload(&mut self, payload: Vec<u8>) {
        self.payload = payload;
    }

    /// The payload decoded as text, verbatim, with invalid UTF-8 replaced
    pub fn content_string(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    /// The attribute map (possibly empty, never absent)
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// Sets or overwrites a single attribute
    pub fn set_attribute(&mut self, key: String, value: String) {
        self.attributes.insert(key, value);
    }

    /// The current payload length in bytes
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }

    /// The timestamp at which the flow file was admitted
    pub fn entry_date(&self) -> DateTime<Local> {
        self.entry_date
    }

    /// The timestamp at which the flow file's lineage began
    pub fn lineage_start_date(&self) -> DateTime<Local> {
        self.lineage_start_date
    }
}

impl fmt::Display for FlowFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlowFile[id={}, size={}]", self.id, self.size())
    }
}

/// FIFO queue of flow files awaiting execution
///
/// The queue also tracks how many flow files were ever admitted, which
/// drives the batch-run decision in the script runner.
#[derive(Debug, Default)]
pub struct FlowFileQueue {
    items: VecDeque<FlowFile>,
    next_id: u64,
    admitted: usize,
}

impl FlowFileQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        FlowFileQueue {
            items: VecDeque::new(),
            next_id: 1,
            admitted: 0,
        }
    }

    /// Admits a new flow file to the back of the queue and returns its id
    pub fn admit(&mut self, payload: Vec<u8>, attributes: HashMap<String, String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.admitted += 1;
        self.items.push_back(FlowFile::new(id, payload, attributes));
        id
    }

    /// Removes and returns the front flow file, or None if the queue is empty
    pub fn dequeue(&mut self) -> Option<FlowFile> {
        self.items.pop_front()
    }

    /// Number of flow files currently queued
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue is currently empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of flow files ever admitted to this queue
    pub fn admitted(&self) -> usize {
        self.admitted
    }
}
