use chrono::{DateTime, Utc};

/// Issues `SUB-<YYYYmmddHHMMSS>` identifiers.
///
/// The first identifier in a given second carries the bare stamp. Later ones
/// in the same second get a `-<n>` suffix from a sequence that resets when the
/// stamp changes. `is_taken` is consulted so a clock that steps backwards
/// cannot reissue an identifier that is still held.
#[derive(Debug, Default)]
pub struct SubmissionIdGenerator {
    last_stamp: String,
    sequence: u64,
}

impl SubmissionIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, now: DateTime<Utc>, is_taken: impl Fn(&str) -> bool) -> String {
        let stamp = now.format("%Y%m%d%H%M%S").to_string();

        if stamp == self.last_stamp {
            self.sequence += 1;
        } else {
            self.last_stamp = stamp;
            self.sequence = 0;
        }

        loop {
            let candidate = self.render();
            if !is_taken(&candidate) {
                return candidate;
            }
            self.sequence += 1;
        }
    }

    fn render(&self) -> String {
        if self.sequence == 0 {
            format!("SUB-{}", self.last_stamp)
        } else {
            format!("SUB-{}-{}", self.last_stamp, self.sequence)
        }
    }
}
