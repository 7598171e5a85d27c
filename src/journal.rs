//! Operation log: a fixed ring of entries, each stamped with a timestamp and a checksum.
//!
//! The checksum is `timestamp ^ len(operation)`. It catches an entry edited after the fact,
//! not a forger who recomputes it, since the function is public and trivially invertible.

use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub operation: String,
    pub timestamp: i64,
    pub hash: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Integrity {
    Ok,
    Tampered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogStatus {
    pub slot: usize,
    pub integrity: Integrity,
}

/// Truncates both operands to 32-bit signed integers before mixing them.
pub fn compute_hash(operation: &str, timestamp: i64) -> u32 {
    ((timestamp as i32) ^ (operation.len() as i32)) as u32
}

pub struct Journal {
    slots: Vec<LogEntry>,
    capacity: usize,
    log_count: u64, // Operations ever recorded, keeps growing past capacity
}

impl Journal {
    /// A ring of at least one slot.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            log_count: 0,
        }
    }

    /// Records an operation in slot `log_count % capacity`, overwriting the oldest entry once full.
    pub fn append(&mut self, operation: String, timestamp: i64) {
        let hash = compute_hash(&operation, timestamp);
        let slot = (self.log_count % self.capacity as u64) as usize;
        let entry = LogEntry {
            operation,
            timestamp,
            hash,
        };
        if slot < self.slots.len() {
            self.slots[slot] = entry;
        } else {
            self.slots.push(entry);
        }
        self.log_count += 1;
    }

    pub fn log_count(&self) -> u64 {
        self.log_count
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Populated slots, in slot order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.slots
    }

    pub fn slot_mut(&mut self, slot: usize) -> Option<&mut LogEntry> {
        self.slots.get_mut(slot)
    }

    /// Recomputes every populated slot's checksum.
    pub fn verify(&self) -> Vec<LogStatus> {
        self.slots
            .iter()
            .enumerate()
            .map(|(slot, entry)| {
                let integrity = if compute_hash(&entry.operation, entry.timestamp) == entry.hash {
                    Integrity::Ok
                } else {
                    tracing::warn!(slot, operation = %entry.operation, "tampered log entry");
                    Integrity::Tampered
                };
                LogStatus { slot, integrity }
            })
            .collect()
    }

    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Filesystem Logs:")?;
        for entry in &self.slots {
            writeln!(
                out,
                "[{}] {} (Hash: {})",
                entry.timestamp, entry.operation, entry.hash
            )?;
        }
        Ok(())
    }

    pub fn print_verification(&self, out: &mut impl Write) -> io::Result<Vec<LogStatus>> {
        writeln!(out, "Verifying log integrity:")?;
        let statuses = self.verify();
        for status in &statuses {
            match status.integrity {
                Integrity::Ok => writeln!(out, "Log {} OK", status.slot)?,
                Integrity::Tampered => writeln!(
                    out,
                    "Log {} TAMPERED: {}",
                    status.slot, self.slots[status.slot].operation
                )?,
            }
        }
        Ok(statuses)
    }
}
