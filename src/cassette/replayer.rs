//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

#[derive(Debug)]
struct Slot {
    interaction: Interaction,
    used: bool,
}

/// Serves recorded interactions per port/method pair.
///
/// Each interaction is served at most once. Lookups either take the next
/// unused interaction in recording order, or the first unused one whose
/// recorded input equals the request. Links are validated concurrently, so
/// their lookups must match on input rather than on order.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Vec<Slot>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Slot>> = HashMap::new();
        let mut interactions = cassette.interactions.clone();
        interactions.sort_by_key(|i| i.seq);
        for interaction in interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(Slot { interaction, used: false });
        }
        Self { queues }
    }

    /// Returns the output of the next unused interaction for `port`/`method`.
    ///
    /// # Errors
    ///
    /// Returns a description of what was requested and what remains when
    /// nothing is left to serve.
    pub fn next_output(&mut self, port: &str, method: &str) -> Result<serde_json::Value, String> {
        self.take(port, method, |_| true)
            .ok_or_else(|| self.exhausted(port, method, None))
    }

    /// Returns the output of the first unused interaction whose input equals `input`.
    ///
    /// # Errors
    ///
    /// Returns a description of what was requested and what remains when
    /// no unused interaction matches.
    pub fn matching_output(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        self.take(port, method, |recorded| recorded == input)
            .ok_or_else(|| self.exhausted(port, method, Some(input)))
    }

    fn take(
        &mut self,
        port: &str,
        method: &str,
        accept: impl Fn(&serde_json::Value) -> bool,
    ) -> Option<serde_json::Value> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };
        let slot = self
            .queues
            .get_mut(&key)?
            .iter_mut()
            .find(|slot| !slot.used && accept(&slot.interaction.input))?;
        slot.used = true;
        Some(slot.interaction.output.clone())
    }

    fn exhausted(&self, port: &str, method: &str, input: Option<&serde_json::Value>) -> String {
        let mut remaining: Vec<String> = self
            .queues
            .iter()
            .map(|(k, slots)| {
                let left = slots.iter().filter(|s| !s.used).count();
                format!("{}::{} ({left} left)", k.port, k.method)
            })
            .collect();
        remaining.sort();
        let wanted = input.map_or_else(String::new, |i| format!(" with input {i}"));
        format!(
            "Cassette exhausted: no unused interaction for port={port:?} method={method:?}{wanted}. \
             Recorded port::method pairs: [{}]",
            remaining.join(", ")
        )
    }
}
