//! Repeated mapping keys.
//!
//! The loader keeps the last of two identically spelled keys and moves it to
//! the end of the mapping, which loses document order. This pass replays the
//! parser's event stream and rejects the document instead.

use rustc_hash::FxHashSet;
use yaml_rust::parser::{Event, EventReceiver, Parser};
use yamlate_ir::errors::{duplicate_key, invalid_yaml};
use yamlate_ir::YamlResult;

/// Fail with `DuplicateKey` if any mapping in `source` repeats a scalar key.
pub(crate) fn reject_duplicate_keys(source: &str) -> YamlResult<()> {
    let mut scan = KeyScan::default();
    Parser::new(source.chars())
        .load(&mut scan, true)
        .map_err(|e| invalid_yaml(e.to_string()))?;

    match scan.duplicate {
        Some(key) => Err(duplicate_key(&key)),
        None => Ok(()),
    }
}

enum Frame {
    Sequence,
    Mapping {
        seen: FxHashSet<String>,
        /// The next completed node is a key, not a value.
        at_key: bool,
    },
}

#[derive(Default)]
struct KeyScan {
    frames: Vec<Frame>,
    /// First repeated key found.
    duplicate: Option<String>,
}

impl KeyScan {
    /// A node finished inside the innermost collection. `scalar` is its text
    /// for scalar nodes.
    fn node_done(&mut self, scalar: Option<String>) {
        let Some(Frame::Mapping { seen, at_key }) = self.frames.last_mut() else {
            return;
        };
        if *at_key {
            if let Some(key) = scalar {
                if self.duplicate.is_none() && seen.contains(&key) {
                    self.duplicate = Some(key);
                } else {
                    seen.insert(key);
                }
            }
        }
        *at_key = !*at_key;
    }
}

impl EventReceiver for KeyScan {
    fn on_event(&mut self, event: Event) {
        match event {
            Event::MappingStart(_) => self.frames.push(Frame::Mapping {
                seen: FxHashSet::default(),
                at_key: true,
            }),
            Event::SequenceStart(_) => self.frames.push(Frame::Sequence),
            Event::MappingEnd | Event::SequenceEnd => {
                self.frames.pop();
                self.node_done(None);
            }
            Event::Scalar(text, ..) => self.node_done(Some(text)),
            Event::Alias(_) => self.node_done(None),
            Event::DocumentStart => self.frames.clear(),
            Event::Nothing | Event::StreamStart | Event::StreamEnd | Event::DocumentEnd => {}
        }
    }
}
