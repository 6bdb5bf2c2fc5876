//! Secret scrubbing for diagnostics.
//!
//! Serialized errors can echo request payloads, which can echo wallet
//! keys. Every error string entering span attributes or log lines goes
//! through the scrubber first; it is an injectable sink configured once
//! with the secrets to redact, not a global output-stream hook.

/// Redacts a configured list of secrets from diagnostic strings.
#[derive(Debug, Clone, Default)]
pub struct Scrubber {
	secrets: Vec<String>,
}

impl Scrubber {
	pub fn new(secrets: Vec<String>) -> Self {
		// Longest first, so overlapping secrets redact fully.
		let mut secrets: Vec<String> = secrets.into_iter().filter(|s| !s.is_empty()).collect();
		secrets.sort_by_key(|s| std::cmp::Reverse(s.len()));
		Self { secrets }
	}

	/// Replace every occurrence of every secret with a fixed mask.
	pub fn scrub(&self, input: &str) -> String {
		let mut out = input.to_string();
		for secret in &self.secrets {
			if out.contains(secret.as_str()) {
				out = out.replace(secret.as_str(), "********");
			}
		}
		out
	}

	/// Scrub an error's display form.
	pub fn scrub_err(&self, err: &dyn std::fmt::Display) -> String {
		self.scrub(&err.to_string())
	}
}
