use std::collections::{HashMap, HashSet};

/// Suffix appended to a counter's key for its per-sample rate dataset.
pub const RATE_SUFFIX: &str = "#d/dt";

const SELECTED_VMSTAT: &[&str] = &[
    "r", "b", "swpd", "bi", "bo", "in", "cs", "us", "sy", "id", "wa", "st",
];

const SELECTED_JSTAT: &[&str] = &[
    "Timestamp", "S0", "S1", "E", "O", "P", "EC", "OC", "PC", "EU", "OU", "PU", "YGC", "YGCT",
    "FGC", "FGCT", "GCT", "YGC#d/dt", "YGCT#d/dt", "FGC#d/dt", "FGCT#d/dt", "GCT#d/dt",
];

const CAPACITY: &[&str] = &["S0C", "S1C", "EC", "OC", "PC"];

const COUNTER: &[&str] = &["YGC", "YGCT", "FGC", "FGCT", "GCT"];

const LABELS: &[(&str, &str)] = &[
    // vmstat
    ("r", "Processes waiting for runtime"),
    ("b", "Processes in uninterruptible sleep"),
    ("swpd", "Virtual memory used"),
    ("free", "Idle memory"),
    ("buff", "Memory used as buffers"),
    ("cache", "Memory used as cache"),
    ("inact", "Inactive memory"),
    ("active", "Active memory"),
    ("si", "Memory swapped in from disk (/s)"),
    ("so", "Memory swapped to disk (/s)"),
    ("bi", "IO: Blocks received (/s)"),
    ("bo", "IO: Blocks sent (/s)"),
    ("in", "Interrupts, including the clock (/s)"),
    ("cs", "Context switches (/s)"),
    ("us", "User time (%)"),
    ("sy", "System time (%)"),
    ("id", "Idle time (%)"),
    ("wa", "Waiting for IO time (%)"),
    ("st", "Time stolen from a virtual machine (%)"),
    ("Timestamp", "Timestamp"),
    // jstat -class
    ("Loaded", "Number of classes loaded"),
    ("Unloaded", "Number of classes unloaded"),
    ("Bytes", "Number of Kbytes loaded / unloaded"),
    ("Time", "Time spent in the tasks"),
    // jstat -compiler
    ("Compiled", "Number of compilation tasks performed"),
    ("Failed", "Number of compilation tasks that failed"),
    ("Invalid", "Number of compilation tasks that were invalidated"),
    ("FailedType", "Compile type of the last failed compilation"),
    ("FailedMethod", "Class name and method for the last failed compilation"),
    // jstat -gc / -gccapacity / -gcnew
    ("NGCMN", "Minimum new generation capacity (KB)"),
    ("NGCMX", "Maximum new generation capacity (KB)"),
    ("NGC", "New generation capacity (KB)"),
    ("NGU", "New generation usage (KB)"),
    ("S0CMX", "Maximum survivor space 0 capacity (KB)"),
    ("S0C", "Survivor space 0 capacity (KB)"),
    ("S1CMX", "Maximum survivor space 1 capacity (KB)"),
    ("S1C", "Survivor space 1 capacity (KB)"),
    ("S0U", "Survivor space 0 usage (KB)"),
    ("S1U", "Survivor space 1 usage (KB)"),
    ("S0", "Survivor space 0 usage (%)"),
    ("S1", "Survivor space 1 usage (%)"),
    ("ECMX", "Maximum eden space capacity (KB)"),
    ("EC", "Eden space capacity (KB)"),
    ("EU", "Eden space usage (KB)"),
    ("E", "Eden space usage (%)"),
    ("TT", "Tenuring threshold"),
    ("MTT", "Maximum tenuring threshold"),
    ("DSS", "Desired survivor size (KB)"),
    // jstat -gcold
    ("OGCMN", "Minimum old generation capacity (KB)"),
    ("OGCMX", "Maximum old generation capacity (KB)"),
    ("OGC", "Old generation capacity (KB)"),
    ("OC", "Old space capacity (KB)"),
    ("OU", "Old space usage (KB)"),
    ("O", "Old space usage (%)"),
    // jstat -gcperm
    ("PGCMN", "Minimum permanent generation capacity (KB)"),
    ("PGCMX", "Maximum permanent generation capacity (KB)"),
    ("PGC", "Permanent generation capacity (KB)"),
    ("PC", "Permanent space capacity (KB)"),
    ("PU", "Permanent space usage (KB)"),
    ("P", "Permanent space usage (%)"),
    // GC counters and their rates
    ("YGC", "Number of young generation GC Events"),
    ("YGCT", "Young garbage collection total time"),
    ("FGC", "Number of full GC Events"),
    ("FGCT", "Full garbage collection total time"),
    ("GCT", "Total garbage collection total time"),
    ("YGC#d/dt", "Young generation GC Events per second"),
    ("YGCT#d/dt", "Young garbage collection time per second"),
    ("FGC#d/dt", "Full GC Events per second"),
    ("FGCT#d/dt", "Full garbage collection time per second"),
    ("GCT#d/dt", "Total garbage collection time per second"),
    // jstat -printcompilation
    ("Size", "Number of bytes of bytecode for the method"),
    ("Type", "Compilation type"),
    ("Method", "Method name is the method within the given class"),
];

// ---------------------------------------------------------------------------
// Classification result
// ---------------------------------------------------------------------------

/// What the tables say about one column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    /// Charted (allow-listed or all categories requested).
    pub selected: bool,
    /// Total size of a memory region; only drawn next to its usage column.
    pub capacity: bool,
    /// Monotonic counter; also gets a rate dataset.
    pub counter: bool,
    /// Description from the label table, if the name is known.
    pub label: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// CategoryTables – immutable lookup tables, built once at startup
// ---------------------------------------------------------------------------

/// Allow-lists and labels for vmstat / jstat columns.
///
/// Built once and shared by reference; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct CategoryTables {
    selected: HashSet<&'static str>,
    capacity: HashSet<&'static str>,
    counter: HashSet<&'static str>,
    labels: HashMap<&'static str, &'static str>,
}

impl Default for CategoryTables {
    fn default() -> Self {
        Self::standard()
    }
}

impl CategoryTables {
    /// The built-in vmstat and jstat tables.
    pub fn standard() -> Self {
        CategoryTables {
            selected: SELECTED_VMSTAT
                .iter()
                .chain(SELECTED_JSTAT)
                .copied()
                .collect(),
            capacity: CAPACITY.iter().copied().collect(),
            counter: COUNTER.iter().copied().collect(),
            labels: LABELS.iter().copied().collect(),
        }
    }

    /// Classify a column name.
    pub fn classify(&self, name: &str, include_all: bool) -> Classification<'_> {
        Classification {
            selected: include_all || self.selected.contains(name),
            capacity: self.capacity.contains(name),
            counter: self.counter.contains(name),
            label: self.label(name),
        }
    }

    pub fn label(&self, name: &str) -> Option<&'static str> {
        self.labels.get(name).copied()
    }

    /// Label for `name`, falling back to the name itself.
    pub fn title<'a>(&self, name: &'a str) -> &'a str {
        match self.labels.get(name) {
            Some(label) => *label,
            None => name,
        }
    }

    /// Name of the capacity column paired with `usage`, if the tables know it.
    pub fn capacity_for(&self, usage: &str) -> Option<String> {
        let candidate = corresponding_capacity(usage);
        self.capacity.contains(candidate.as_str()).then_some(candidate)
    }

    pub fn selected_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.selected.iter().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Literal pairing rule: drop the last character and append `C`.
///
/// `"S0"` → `"S0C"`, `"E"` → `"EC"`, `"EU"` → `"EC"`.
pub fn corresponding_capacity(name: &str) -> String {
    let mut chars = name.chars();
    chars.next_back();
    let mut capacity = chars.as_str().to_string();
    capacity.push('C');
    capacity
}

/// Key of the rate dataset derived from a counter.
pub fn rate_key(name: &str) -> String {
    format!("{name}{RATE_SUFFIX}")
}
